// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag across siblings.
//!
//! A pan starts on one card and moves over its sibling. Handlers on the
//! shared parent keep seeing the card where the drag began as the first
//! target, while `target` follows the pointer. Both bindings report every
//! native move; each gesture type still propagates once per move.
//!
//! Options come from JSON, and touch input has its default action suppressed.
//!
//! Run:
//! - `cargo run -p understory_demos --example propagation_drag`

use std::cell::Cell;
use std::rc::Rc;

use kurbo::Point;
use understory_propagation::policy::Options;
use understory_propagation::propagator::{Delivery, Propagator};
use understory_propagation::types::{
    EventFlags, GestureEvent, INPUT_EVENT, InputId, NativeInput, ParentLookup, PointerType,
    Recognizer,
};

#[derive(Clone, Debug)]
struct Touch {
    id: u64,
    prevented: Rc<Cell<bool>>,
}

impl Touch {
    fn new(id: u64) -> Self {
        Self {
            id,
            prevented: Rc::new(Cell::new(false)),
        }
    }
}

impl NativeInput for Touch {
    fn input_id(&self) -> InputId {
        InputId(self.id)
    }
    fn prevent_default(&self) {
        self.prevented.set(true);
    }
}

struct Pan(u32);

impl Recognizer<u32, Touch> for Pan {
    fn element(&self) -> u32 {
        self.0
    }
    fn subscribe(&mut self, _kind: &str) {}
    fn unsubscribe(&mut self, _kind: &str) {}
    fn destroy(&mut self) {}
}

/// Board (0) holds two cards, 1 and 2.
#[derive(Default)]
struct Board;

impl ParentLookup<u32> for Board {
    fn parent_of(&self, node: &u32) -> Option<u32> {
        (*node != 0).then_some(0)
    }
}

fn main() {
    let options: Options = match serde_json::from_str(r#"{ "preventDefault": "touch" }"#) {
        Ok(o) => o,
        Err(err) => {
            eprintln!("bad options: {err}");
            return;
        }
    };
    println!("options: {options:?}");

    let mut doc: Propagator<u32, Touch, Board> = Propagator::new();
    let board = doc.bind(Pan(0), options);
    let card = doc.bind(Pan(1), options);

    doc.on(board, "pan panend", |e| {
        let ev = e.event();
        println!(
            "  board {:<6} first_target={} target={} center=({:.0}, {:.0}) delta=({:.0}, {:.0})",
            ev.kind,
            e.first_target(),
            ev.target,
            ev.center.x,
            ev.center.y,
            ev.delta.x,
            ev.delta.y
        );
        Ok(())
    });
    doc.on(card, "panend", |e| {
        println!("  card 1 saw the drag end over {}", e.target());
        Ok(())
    });

    let start = Point::new(20.0, 20.0);
    let path = [
        (1, Point::new(20.0, 20.0)),
        (1, Point::new(60.0, 22.0)),
        (2, Point::new(140.0, 25.0)),
    ];
    for (step, &(over, at)) in path.iter().enumerate() {
        let first = step == 0;
        let last = step + 1 == path.len();
        let mut flags = EventFlags::empty();
        flags.set(EventFlags::FIRST, first);
        flags.set(EventFlags::FINAL, last);

        let src = Touch::new(step as u64);
        println!("== move {step} over card {over} ==");
        // Both recognizers observe the same native move.
        for id in [card, board] {
            let raw = GestureEvent::new(INPUT_EVENT, over, src.clone(), PointerType::Touch)
                .with_flags(flags);
            let _ = doc.dispatch(id, raw);
        }
        let mut kinds = vec!["pan"];
        if last {
            kinds.push("panend");
        }
        for kind in kinds {
            for id in [card, board] {
                let ev = GestureEvent::new(kind, over, src.clone(), PointerType::Touch)
                    .with_flags(flags)
                    .at(at, at - start);
                match doc.dispatch(id, ev) {
                    Ok(Delivery::Duplicate) => println!("  ({kind} already propagated)"),
                    Ok(_) => {}
                    Err(err) => eprintln!("  dispatch failed: {err}"),
                }
            }
        }
        println!("  default prevented: {}", src.prevented.get());
    }

}
