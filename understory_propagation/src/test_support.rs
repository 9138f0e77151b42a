// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixtures for unit tests.

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use crate::types::{GestureEvent, InputId, NativeInput, ParentLookup, PointerType, Recognizer};

/// Shared, clonable record of what happened, in order.
#[derive(Clone, Debug, Default)]
pub(crate) struct Log(Rc<RefCell<Vec<String>>>);

impl Log {
    pub(crate) fn push(&self, entry: impl Into<String>) {
        self.0.borrow_mut().push(entry.into());
    }

    pub(crate) fn take(&self) -> Vec<String> {
        core::mem::take(&mut *self.0.borrow_mut())
    }
}

/// Recognizer that records subscription changes, emits, and teardown.
#[derive(Debug)]
pub(crate) struct MockRecognizer {
    element: u32,
    log: Log,
}

impl MockRecognizer {
    pub(crate) fn new(element: u32, log: Log) -> Self {
        Self { element, log }
    }
}

impl Recognizer<u32, Native> for MockRecognizer {
    fn element(&self) -> u32 {
        self.element
    }

    fn subscribe(&mut self, kind: &str) {
        self.log.push(format!("subscribe {kind}"));
    }

    fn unsubscribe(&mut self, kind: &str) {
        self.log.push(format!("unsubscribe {kind}"));
    }

    fn emit(&mut self, event: &GestureEvent<u32, Native>) {
        self.log.push(format!("emit {}", event.kind));
    }

    fn destroy(&mut self) {
        self.log.push("destroy");
    }
}

/// Native input whose default action can be observed.
#[derive(Clone, Debug)]
pub(crate) struct Native {
    id: u64,
    prevented: Rc<Cell<bool>>,
}

impl Native {
    pub(crate) fn new(id: u64) -> Self {
        Self {
            id,
            prevented: Rc::new(Cell::new(false)),
        }
    }

    pub(crate) fn prevented(&self) -> bool {
        self.prevented.get()
    }
}

impl NativeInput for Native {
    fn input_id(&self) -> InputId {
        InputId(self.id)
    }

    fn prevent_default(&self) {
        self.prevented.set(true);
    }
}

/// Parent table: `child → parent`.
#[derive(Clone, Debug, Default)]
pub(crate) struct Parents(BTreeMap<u32, u32>);

impl Parents {
    /// A single chain, outermost first: `[1, 2, 3]` makes 3 a child of 2, a child of 1.
    pub(crate) fn chain(nodes: &[u32]) -> Self {
        Self(nodes.windows(2).map(|w| (w[1], w[0])).collect())
    }

    pub(crate) fn with(mut self, child: u32, parent: u32) -> Self {
        self.0.insert(child, parent);
        self
    }
}

impl ParentLookup<u32> for Parents {
    fn parent_of(&self, node: &u32) -> Option<u32> {
        self.0.get(node).copied()
    }
}

/// Gesture event of `kind` over `target`, from touch input.
pub(crate) fn gesture(kind: &str, target: u32, src: &Native) -> GestureEvent<u32, Native> {
    GestureEvent::new(kind, target, src.clone(), PointerType::Touch)
}
