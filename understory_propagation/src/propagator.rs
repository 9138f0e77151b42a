// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Propagator: binding registry, gesture origin, and the dispatch trampoline.
//!
//! ## Overview
//!
//! A [`Propagator`] owns every binding of one document, the element → bindings
//! side-table used to discover them during a walk, the shared
//! [`GestureOrigin`], and the dedup bookkeeping for native inputs.
//!
//! ## Dispatch
//!
//! Recognizers report each event through [`Propagator::dispatch`], once per
//! subscribed type and per binding. For the raw-phase type
//! [`INPUT_EVENT`](crate::types::INPUT_EVENT) the propagator applies the
//! binding's default-action policy and updates the origin. For every other
//! type it:
//!
//! 1. skips the event if the same native input already propagated this type;
//! 2. wraps it in a fresh [`PropagatedEvent`] carrying the gesture's first target;
//! 3. walks from the first target to the root, running each binding's handlers
//!    for the type in registration order, until a handler stops propagation.
//!
//! The walk starts where the gesture began, not at the element of the binding
//! that reported it.
//!
//! ## Dedup
//!
//! Only the handled types of the most recent native input are remembered.
//! Native inputs are processed one at a time, so the first report of a new
//! [`InputId`] retires the previous input's record.
//!
//! ## Handler failures
//!
//! A handler returning [`HandlerError::Failed`] does not stop the walk; the
//! first failure is returned once the walk completes. [`HandlerError::Cancelled`]
//! ends the walk immediately and is returned as is.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::binding::{Binding, BindingId, HandlerId};
use crate::error::{DispatchError, HandlerError, HandlerResult};
use crate::event::PropagatedEvent;
use crate::origin::GestureOrigin;
use crate::policy::Options;
use crate::types::{GestureEvent, InputId, NativeInput, NoParent, ParentLookup, Recognizer};

/// What a call to [`Propagator::dispatch`] did.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Delivery {
    /// A raw-phase event: policy and origin were updated, no handler ran.
    Input,
    /// This type was already propagated for the same native input.
    Duplicate,
    /// The binding has no handler for this type.
    Unobserved,
    /// A walk ran.
    Propagated {
        /// Number of handlers invoked.
        handlers: usize,
        /// Whether a handler stopped the walk before it reached the root.
        stopped: bool,
    },
}

#[derive(Debug, Default)]
struct Handled {
    input: Option<InputId>,
    kinds: Vec<String>,
}

impl Handled {
    /// Record `kind` as propagated for `input`. Returns false if it already was.
    fn mark(&mut self, input: InputId, kind: &str) -> bool {
        if self.input != Some(input) {
            self.input = Some(input);
            self.kinds.clear();
        }
        if self.kinds.iter().any(|k| k == kind) {
            return false;
        }
        self.kinds.push(kind.into());
        true
    }
}

/// Bubbling propagation over a tree of gesture bindings.
///
/// ## Usage
///
/// - Construct with [`Propagator::new`], or [`Propagator::with_parent`] to supply
///   the [`ParentLookup`] that describes the element tree.
/// - Attach recognizers with [`Propagator::bind`] and register handlers with
///   [`Propagator::on`].
/// - Have each recognizer report its events through [`Propagator::dispatch`].
pub struct Propagator<K, N, P = NoParent> {
    parents: P,
    origin: GestureOrigin<K>,
    slots: Vec<Option<Binding<K, N>>>,
    generations: Vec<u32>,
    free_list: Vec<usize>,
    elements: BTreeMap<K, Vec<BindingId>>,
    handled: Handled,
}

impl<K: core::fmt::Debug, N, P> core::fmt::Debug for Propagator<K, N, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let alive = self.slots.iter().filter(|b| b.is_some()).count();
        f.debug_struct("Propagator")
            .field("origin", &self.origin)
            .field("bindings_alive", &alive)
            .field("free_list", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

impl<K, N, P> Default for Propagator<K, N, P>
where
    K: Copy + Ord + core::fmt::Debug,
    N: NativeInput,
    P: ParentLookup<K> + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, N, P> Propagator<K, N, P>
where
    K: Copy + Ord + core::fmt::Debug,
    N: NativeInput,
    P: ParentLookup<K> + Default,
{
    /// Create a propagator with a default parent lookup.
    pub fn new() -> Self {
        Self::with_parent(P::default())
    }
}

impl<K, N, P> Propagator<K, N, P>
where
    K: Copy + Ord + core::fmt::Debug,
    N: NativeInput,
    P: ParentLookup<K>,
{
    /// Create a propagator with an explicit parent lookup.
    pub fn with_parent(parents: P) -> Self {
        Self {
            parents,
            origin: GestureOrigin::new(),
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            elements: BTreeMap::new(),
            handled: Handled::default(),
        }
    }

    /// Bind `recognizer` to its element.
    ///
    /// The recognizer is subscribed to the raw-phase type right away. The
    /// binding is discoverable from its element until [`Propagator::destroy`].
    pub fn bind<R>(&mut self, recognizer: R, options: Options) -> BindingId
    where
        R: Recognizer<K, N> + 'static,
    {
        self.bind_boxed(Box::new(recognizer), options)
    }

    /// Like [`Propagator::bind`], for a recognizer that is already boxed.
    pub fn bind_boxed(
        &mut self,
        recognizer: Box<dyn Recognizer<K, N>>,
        options: Options,
    ) -> BindingId {
        let binding = Binding::new(recognizer, options);
        let element = binding.element();
        let idx = if let Some(idx) = self.free_list.pop() {
            self.generations[idx] = self.generations[idx].wrapping_add(1);
            self.slots[idx] = Some(binding);
            idx
        } else {
            self.slots.push(Some(binding));
            self.generations.push(1);
            self.slots.len() - 1
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "BindingId uses 32-bit indices by design."
        )]
        let id = BindingId::new(idx as u32, self.generations[idx]);
        self.elements.entry(element).or_default().push(id);
        tracing::debug!(?element, ?id, "binding attached");
        id
    }

    /// Detach a binding from its element, clear its handlers, and destroy its recognizer.
    ///
    /// Returns false if `id` is stale.
    pub fn destroy(&mut self, id: BindingId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        let Some(binding) = self.slots[id.idx()].take() else {
            return false;
        };
        let element = binding.element();
        if let Some(ids) = self.elements.get_mut(&element) {
            ids.retain(|b| *b != id);
            if ids.is_empty() {
                self.elements.remove(&element);
            }
        }
        self.free_list.push(id.idx());
        binding.destroy();
        tracing::debug!(?element, ?id, "binding destroyed");
        true
    }

    /// Whether `id` refers to a live binding.
    pub fn is_alive(&self, id: BindingId) -> bool {
        self.generations.get(id.idx()) == Some(&id.1)
            && self.slots.get(id.idx()).is_some_and(Option::is_some)
    }

    /// The binding for `id`, if alive.
    pub fn binding(&self, id: BindingId) -> Option<&Binding<K, N>> {
        if !self.is_alive(id) {
            return None;
        }
        self.slots.get(id.idx())?.as_ref()
    }

    /// Mutable access to the binding for `id`, if alive.
    pub fn binding_mut(&mut self, id: BindingId) -> Option<&mut Binding<K, N>> {
        if !self.is_alive(id) {
            return None;
        }
        self.slots.get_mut(id.idx())?.as_mut()
    }

    /// Bindings attached to `element`, in attach order.
    pub fn bindings_at(&self, element: &K) -> &[BindingId] {
        self.elements.get(element).map_or(&[], Vec::as_slice)
    }

    /// The shared gesture origin.
    pub fn origin(&self) -> &GestureOrigin<K> {
        &self.origin
    }

    /// `from` followed by each of its ancestors, up to the root.
    pub fn ancestors(&self, from: K) -> impl Iterator<Item = K> + '_ {
        core::iter::successors(Some(from), |n| self.parents.parent_of(n))
    }

    /// Register a handler on binding `id`; see [`Binding::on`].
    ///
    /// Returns `None` if `id` is stale.
    pub fn on<F>(&mut self, id: BindingId, kinds: &str, handler: F) -> Option<HandlerId>
    where
        F: FnMut(&mut PropagatedEvent<K, N>) -> HandlerResult + 'static,
    {
        Some(self.binding_mut(id)?.on(kinds, handler))
    }

    /// Remove handlers from binding `id`; see [`Binding::off`].
    ///
    /// Returns false if `id` is stale.
    pub fn off(&mut self, id: BindingId, kinds: &str, handler: Option<HandlerId>) -> bool {
        match self.binding_mut(id) {
            Some(b) => {
                b.off(kinds, handler);
                true
            }
            None => false,
        }
    }

    /// Emit `event` manually through binding `id`.
    ///
    /// Outside a live gesture the origin is re-anchored at the event's target
    /// first. The recognizer observes the event, then it is dispatched like a
    /// recognized one.
    pub fn emit(
        &mut self,
        id: BindingId,
        event: GestureEvent<K, N>,
    ) -> Result<Delivery, DispatchError> {
        if !self.is_alive(id) {
            return Err(DispatchError::UnknownBinding(id));
        }
        if self.origin.anchor(event.target) {
            tracing::trace!(element = ?event.target, "origin re-anchored by emit");
        }
        if let Some(b) = self.binding_mut(id) {
            b.recognizer_mut().emit(&event);
        }
        self.dispatch(id, event)
    }

    /// Entry point for recognizers: handle one event reported by binding `id`.
    pub fn dispatch(
        &mut self,
        id: BindingId,
        event: GestureEvent<K, N>,
    ) -> Result<Delivery, DispatchError> {
        let Some(binding) = self.binding(id) else {
            return Err(DispatchError::UnknownBinding(id));
        };

        if event.is_input() {
            if binding
                .options()
                .prevent_default
                .is_some_and(|p| p.applies_to(event.pointer_type))
            {
                event.src.prevent_default();
            }
            if event.is_first() {
                self.origin.begin(event.target);
            }
            if event.is_final() {
                self.origin.finish();
            }
            return Ok(Delivery::Input);
        }

        if !binding.listens(&event.kind) {
            return Ok(Delivery::Unobserved);
        }
        if !self.handled.mark(event.src.input_id(), &event.kind) {
            tracing::trace!(kind = %event.kind, ?id, "already propagated for this input");
            return Ok(Delivery::Duplicate);
        }

        let first_target = self.origin.first_target().unwrap_or(event.target);
        let mut event = PropagatedEvent::new(event, first_target);
        self.walk(&mut event)
    }

    fn walk(&self, event: &mut PropagatedEvent<K, N>) -> Result<Delivery, DispatchError> {
        let kind = String::from(event.kind());
        let mut handlers = 0;
        let mut failure: Option<HandlerError> = None;
        tracing::trace!(kind = %kind, first_target = ?event.first_target(), "propagating");

        'walk: for element in self.ancestors(event.first_target()) {
            for &id in self.bindings_at(&element) {
                let Some(binding) = self.binding(id) else {
                    continue;
                };
                for callback in binding.callbacks(&kind) {
                    let Ok(mut handler) = callback.try_borrow_mut() else {
                        tracing::warn!(?element, kind = %kind, "skipping handler that is already running");
                        continue;
                    };
                    handlers += 1;
                    match (&mut *handler)(&mut *event) {
                        Ok(()) => {}
                        Err(HandlerError::Cancelled) => {
                            tracing::trace!(?element, kind = %kind, "propagation cancelled");
                            return Err(HandlerError::Cancelled.into());
                        }
                        Err(err) => {
                            tracing::debug!(?element, kind = %kind, %err, "handler failed");
                            if failure.is_none() {
                                failure = Some(err);
                            }
                        }
                    }
                    if event.is_propagation_stopped() {
                        tracing::trace!(?element, kind = %kind, "propagation stopped");
                        break 'walk;
                    }
                }
            }
        }

        match failure {
            Some(err) => Err(err.into()),
            None => Ok(Delivery::Propagated {
                handlers,
                stopped: event.is_propagation_stopped(),
            }),
        }
    }
}
