// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_propagation --heading-base-level=0

//! Understory Propagation: bubbling gesture events across independently bound recognizers.
//!
//! ## Overview
//!
//! Gesture recognizers are usually bound to one element each and know nothing about one another.
//! This crate gives them DOM-style bubbling: a gesture recognized on a nested element is delivered
//! to the handlers of that element and then of every ancestor that also has a binding, until a
//! handler stops propagation.
//!
//! It does not recognize gestures. A [`Recognizer`](crate::types::Recognizer) supplied by the host
//! reports events, and a [`ParentLookup`](crate::types::ParentLookup) describes the element tree.
//!
//! ## Pieces
//!
//! - [`Propagator`](crate::propagator::Propagator): owns the bindings of one document and runs the
//!   dispatch trampoline.
//! - [`Binding`](crate::binding::Binding): one recognizer on one element, with its per-type
//!   handler registry.
//! - [`GestureOrigin`](crate::origin::GestureOrigin): where the current gesture began. Walks
//!   always start there, so a drag that leaves its element keeps bubbling from where it started.
//! - [`Options`](crate::policy::Options): the default-action policy applied to raw input phases.
//! - [`adapter`]: bind a single recognizer, or wrap a factory so every recognizer it builds is bound.
//!
//! ## Ordering
//!
//! For one event, handlers run from the gesture's first target outward to the root.
//! On one element, bindings run in attach order and each binding's handlers in registration order.
//! [`PropagatedEvent::stop_propagation`](crate::event::PropagatedEvent::stop_propagation) ends the
//! walk after the current handler.
//!
//! ## Dedup
//!
//! One native input may be reported by several bindings. Each gesture type propagates at most once
//! per native input, keyed on [`InputId`](crate::types::InputId); distinct types from the same input
//! (say `pan` and `panend`) each get their own pass.
//!
//! ## Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use understory_propagation::policy::Options;
//! use understory_propagation::propagator::Propagator;
//! use understory_propagation::types::{
//!     EventFlags, GestureEvent, InputId, INPUT_EVENT, NativeInput, ParentLookup, PointerType,
//!     Recognizer,
//! };
//!
//! #[derive(Clone)]
//! struct Pointer(u64);
//! impl NativeInput for Pointer {
//!     fn input_id(&self) -> InputId { InputId(self.0) }
//!     fn prevent_default(&self) {}
//! }
//!
//! struct Taps(u32);
//! impl Recognizer<u32, Pointer> for Taps {
//!     fn element(&self) -> u32 { self.0 }
//!     fn subscribe(&mut self, _kind: &str) {}
//!     fn unsubscribe(&mut self, _kind: &str) {}
//!     fn destroy(&mut self) {}
//! }
//!
//! // 2 is a child of 1.
//! #[derive(Default)]
//! struct Tree;
//! impl ParentLookup<u32> for Tree {
//!     fn parent_of(&self, node: &u32) -> Option<u32> { (*node == 2).then_some(1) }
//! }
//!
//! let mut doc: Propagator<u32, Pointer, Tree> = Propagator::new();
//! let parent = doc.bind(Taps(1), Options::new());
//! let child = doc.bind(Taps(2), Options::new());
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! for (id, name) in [(parent, "parent"), (child, "child")] {
//!     let seen = seen.clone();
//!     doc.on(id, "tap", move |e| {
//!         seen.borrow_mut().push((name, e.first_target()));
//!         Ok(())
//!     });
//! }
//!
//! // The child's recognizer reports a pointer down, then a tap.
//! let down = Pointer(1);
//! let raw = GestureEvent::new(INPUT_EVENT, 2, down.clone(), PointerType::Touch)
//!     .with_flags(EventFlags::FIRST);
//! doc.dispatch(child, raw).unwrap();
//! doc.dispatch(child, GestureEvent::new("tap", 2, down, PointerType::Touch)).unwrap();
//!
//! assert_eq!(*seen.borrow(), [("child", 2), ("parent", 2)]);
//! ```
//!
//! ## Limitations
//!
//! One gesture is tracked at a time per [`Propagator`](crate::propagator::Propagator).
//! Simultaneous gestures recognized by different bindings share a single origin.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapter;
pub mod binding;
pub mod error;
pub mod event;
pub mod origin;
pub mod policy;
pub mod propagator;
pub mod types;

#[cfg(test)]
mod test_support;

pub use adapter::{RecognizerFactory, wrap_factory, wrap_instance};
pub use binding::{Binding, BindingId, HandlerId};
pub use error::{ConfigError, DispatchError, HandlerError, HandlerResult};
pub use event::PropagatedEvent;
pub use propagator::{Delivery, Propagator};
