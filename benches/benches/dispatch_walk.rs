// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_propagation::BindingId;
use understory_propagation::policy::Options;
use understory_propagation::propagator::Propagator;
use understory_propagation::types::{
    EventFlags, GestureEvent, INPUT_EVENT, InputId, NativeInput, ParentLookup, PointerType,
    Recognizer,
};

#[derive(Clone, Copy)]
struct Input(u64);

impl NativeInput for Input {
    fn input_id(&self) -> InputId {
        InputId(self.0)
    }
    fn prevent_default(&self) {}
}

struct Noop(u32);

impl Recognizer<u32, Input> for Noop {
    fn element(&self) -> u32 {
        self.0
    }
    fn subscribe(&mut self, _kind: &str) {}
    fn unsubscribe(&mut self, _kind: &str) {}
    fn destroy(&mut self) {}
}

/// Element `n` is the child of `n - 1`; 0 is the root.
#[derive(Default)]
struct Chain;

impl ParentLookup<u32> for Chain {
    fn parent_of(&self, node: &u32) -> Option<u32> {
        node.checked_sub(1)
    }
}

/// A chain of `depth` elements with one binding and one `tap` handler on each.
fn build(depth: u32) -> (Propagator<u32, Input, Chain>, Vec<BindingId>) {
    let mut doc = Propagator::new();
    let ids: Vec<_> = (0..depth)
        .map(|element| {
            let id = doc.bind(Noop(element), Options::new());
            doc.on(id, "tap", |e| {
                black_box(e.first_target());
                Ok(())
            });
            id
        })
        .collect();
    (doc, ids)
}

fn bench_bubble(c: &mut Criterion) {
    let mut group = c.benchmark_group("bubble");
    for &depth in &[8_u32, 32, 128] {
        let (mut doc, ids) = build(depth);
        let leaf = depth - 1;
        let leaf_id = ids[leaf as usize];
        group.throughput(Throughput::Elements(u64::from(depth)));
        let mut next = 0_u64;
        group.bench_function(format!("leaf_to_root_d{depth}"), |b| {
            b.iter(|| {
                next += 1;
                let src = Input(next);
                let down = GestureEvent::new(INPUT_EVENT, leaf, src, PointerType::Touch)
                    .with_flags(EventFlags::FIRST | EventFlags::FINAL);
                let _ = doc.dispatch(leaf_id, down);
                let tap = GestureEvent::new("tap", leaf, src, PointerType::Touch);
                black_box(doc.dispatch(leaf_id, tap))
            });
        });
    }
    group.finish();
}

fn bench_dedup(c: &mut Criterion) {
    let mut group = c.benchmark_group("dedup");
    let depth = 32_u32;
    let (mut doc, ids) = build(depth);
    let leaf = depth - 1;
    let mut next = 0_u64;
    group.bench_function("every_binding_reports_d32", |b| {
        b.iter(|| {
            next += 1;
            let src = Input(next);
            // One pass from the leaf; the remaining reports are duplicates.
            for &id in ids.iter().rev() {
                let tap = GestureEvent::new("tap", leaf, src, PointerType::Touch);
                let _ = black_box(doc.dispatch(id, tap));
            }
        });
    });
    group.finish();
}

criterion_group!(benches, bench_bubble, bench_dedup);
criterion_main!(benches);
