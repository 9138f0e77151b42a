// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bindings: one recognizer on one element, plus its handler registry.
//!
//! ## Registry
//!
//! Handlers are kept per event type in registration order. The recognizer is
//! subscribed to a type when its first handler arrives and unsubscribed when
//! its last handler leaves, so a recognizer never reports types nobody
//! listens to.
//!
//! Type lists are whitespace separated, so `"pan panend"` registers for both.
//! An empty list registers nothing.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::collections::btree_map::Entry;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::error::HandlerResult;
use crate::event::PropagatedEvent;
use crate::policy::Options;
use crate::types::{INPUT_EVENT, Recognizer};

/// Handle to a binding owned by a [`Propagator`](crate::propagator::Propagator).
///
/// A slot index plus a generation. Once the binding is destroyed the handle is
/// stale; a later binding reusing the slot gets a higher generation, so stale
/// handles never alias it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct BindingId(pub(crate) u32, pub(crate) u32);

impl BindingId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Identity of a handler registered with [`Binding::on`].
///
/// Pass it to [`Binding::off`] to remove exactly that handler.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct HandlerId(u32);

pub(crate) type Callback<K, N> = Rc<RefCell<dyn FnMut(&mut PropagatedEvent<K, N>) -> HandlerResult>>;

struct Handler<K, N> {
    id: HandlerId,
    callback: Callback<K, N>,
}

/// A gesture recognizer bound to an element, with its handler registry.
pub struct Binding<K, N> {
    element: K,
    recognizer: Box<dyn Recognizer<K, N>>,
    options: Options,
    handlers: BTreeMap<String, Vec<Handler<K, N>>>,
    next_handler: u32,
}

impl<K: core::fmt::Debug, N> core::fmt::Debug for Binding<K, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Binding")
            .field("element", &self.element)
            .field("options", &self.options)
            .field("types", &self.handlers.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl<K: Copy, N> Binding<K, N> {
    pub(crate) fn new(mut recognizer: Box<dyn Recognizer<K, N>>, options: Options) -> Self {
        recognizer.subscribe(INPUT_EVENT);
        Self {
            element: recognizer.element(),
            recognizer,
            options,
            handlers: BTreeMap::new(),
            next_handler: 0,
        }
    }

    /// The element this binding is attached to.
    pub fn element(&self) -> K {
        self.element
    }

    /// Options captured at construction.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Register `handler` for each type in the whitespace-separated `kinds`.
    ///
    /// The same handler (and the same [`HandlerId`]) is shared by all listed types.
    pub fn on<F>(&mut self, kinds: &str, handler: F) -> HandlerId
    where
        F: FnMut(&mut PropagatedEvent<K, N>) -> HandlerResult + 'static,
    {
        let id = HandlerId(self.next_handler);
        self.next_handler = self.next_handler.wrapping_add(1);
        let callback: Callback<K, N> = Rc::new(RefCell::new(handler));

        for kind in kinds.split_whitespace() {
            if kind == INPUT_EVENT {
                tracing::warn!(kind, "reserved event type cannot carry handlers");
                continue;
            }
            let handler = Handler {
                id,
                callback: Rc::clone(&callback),
            };
            match self.handlers.entry(kind.into()) {
                Entry::Vacant(slot) => {
                    tracing::debug!(kind, "subscribing recognizer");
                    self.recognizer.subscribe(kind);
                    slot.insert(alloc::vec![handler]);
                }
                Entry::Occupied(slot) => slot.into_mut().push(handler),
            }
        }
        id
    }

    /// Remove handlers for each type in the whitespace-separated `kinds`.
    ///
    /// With `Some(id)` only that handler is removed; with `None` every handler
    /// for the type is. A type left without handlers is unsubscribed.
    pub fn off(&mut self, kinds: &str, handler: Option<HandlerId>) {
        for kind in kinds.split_whitespace() {
            if kind == INPUT_EVENT {
                tracing::warn!(kind, "reserved event type cannot carry handlers");
                continue;
            }
            let Some(list) = self.handlers.get_mut(kind) else {
                continue;
            };
            match handler {
                Some(id) => list.retain(|h| h.id != id),
                None => list.clear(),
            }
            if list.is_empty() {
                self.handlers.remove(kind);
                tracing::debug!(kind, "unsubscribing recognizer");
                self.recognizer.unsubscribe(kind);
            }
        }
    }

    /// Whether any handler is registered for `kind`.
    pub fn listens(&self, kind: &str) -> bool {
        self.handlers.contains_key(kind)
    }

    /// Types the recognizer is currently subscribed to on behalf of handlers.
    pub fn registered_types(&self) -> impl Iterator<Item = &str> + '_ {
        self.handlers.keys().map(String::as_str)
    }

    /// Number of handlers registered for `kind`.
    pub fn handler_count(&self, kind: &str) -> usize {
        self.handlers.get(kind).map_or(0, Vec::len)
    }

    pub(crate) fn callbacks(&self, kind: &str) -> impl Iterator<Item = &Callback<K, N>> + '_ {
        self.handlers
            .get(kind)
            .into_iter()
            .flatten()
            .map(|h| &h.callback)
    }

    pub(crate) fn recognizer_mut(&mut self) -> &mut dyn Recognizer<K, N> {
        &mut *self.recognizer
    }

    /// Clear every handler and tear down the recognizer.
    pub(crate) fn destroy(mut self) {
        self.handlers.clear();
        self.recognizer.destroy();
    }
}
