// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Propagation basics.
//!
//! Three nested elements each get their own recognizer binding. A tap on the
//! innermost element bubbles outward; a second tap is stopped halfway.
//!
//! Run:
//! - `cargo run -p understory_demos --example propagation_basics`

use std::collections::HashMap;

use understory_propagation::BindingId;
use understory_propagation::policy::Options;
use understory_propagation::propagator::Propagator;
use understory_propagation::types::{
    EventFlags, GestureEvent, INPUT_EVENT, InputId, NativeInput, ParentLookup, PointerType,
    Recognizer,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
struct El(u32);

#[derive(Clone, Debug)]
struct Pointer(u64);

impl NativeInput for Pointer {
    fn input_id(&self) -> InputId {
        InputId(self.0)
    }
    fn prevent_default(&self) {}
}

/// Recognizer stand-in that only reports what it is asked to listen for.
struct Printing(El);

impl Recognizer<El, Pointer> for Printing {
    fn element(&self) -> El {
        self.0
    }
    fn subscribe(&mut self, kind: &str) {
        println!("  [{:?}] listening for {kind}", self.0);
    }
    fn unsubscribe(&mut self, kind: &str) {
        println!("  [{:?}] no longer listening for {kind}", self.0);
    }
    fn destroy(&mut self) {
        println!("  [{:?}] destroyed", self.0);
    }
}

struct Tree(HashMap<El, El>);

impl ParentLookup<El> for Tree {
    fn parent_of(&self, node: &El) -> Option<El> {
        self.0.get(node).copied()
    }
}

fn tap(doc: &mut Propagator<El, Pointer, Tree>, on: BindingId, at: El, id: u64) {
    let down = GestureEvent::new(INPUT_EVENT, at, Pointer(id), PointerType::Mouse)
        .with_flags(EventFlags::FIRST | EventFlags::FINAL);
    let _ = doc.dispatch(on, down);
    let out = doc.dispatch(on, GestureEvent::new("tap", at, Pointer(id), PointerType::Mouse));
    println!("  -> {out:?}");
}

fn main() {
    let (page, list, item) = (El(1), El(2), El(3));
    let tree = Tree(HashMap::from([(item, list), (list, page)]));
    let mut doc = Propagator::with_parent(tree);

    println!("== Bind ==");
    let names = [(page, "page"), (list, "list"), (item, "item")];
    let mut ids = Vec::new();
    for (el, name) in names {
        let id = doc.bind(Printing(el), Options::new());
        doc.on(id, "tap", move |e| {
            println!("  {name}: tap (first_target={:?})", e.first_target());
            if name == "list" && e.event().src.0 == 2 {
                println!("  {name}: stopping propagation");
                e.stop_propagation();
            }
            Ok(())
        });
        ids.push(id);
    }
    let item_id = ids[2];

    println!("== Tap on item ==");
    tap(&mut doc, item_id, item, 1);

    println!("== Tap on item, stopped by list ==");
    tap(&mut doc, item_id, item, 2);

    println!("== Destroy list binding, tap again ==");
    doc.destroy(ids[1]);
    tap(&mut doc, item_id, item, 3);
}
