// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The event handed to handlers during a propagation pass.

use crate::types::{GestureEvent, NativeInput};

/// A [`GestureEvent`] augmented for one propagation pass.
///
/// Each pass builds a fresh value, so a stop requested in one pass never
/// leaks into another.
#[derive(Debug)]
pub struct PropagatedEvent<K, N> {
    event: GestureEvent<K, N>,
    first_target: K,
    stopped: bool,
}

impl<K: Copy, N> PropagatedEvent<K, N> {
    pub(crate) fn new(event: GestureEvent<K, N>, first_target: K) -> Self {
        Self {
            event,
            first_target,
            stopped: false,
        }
    }

    /// The event as reported by the recognizer.
    pub fn event(&self) -> &GestureEvent<K, N> {
        &self.event
    }

    /// Event type, e.g. `"tap"`.
    pub fn kind(&self) -> &str {
        &self.event.kind
    }

    /// Element the pointer is currently over; may change during a drag.
    pub fn target(&self) -> K {
        self.event.target
    }

    /// Element where the gesture began; stable for the whole gesture.
    pub fn first_target(&self) -> K {
        self.first_target
    }

    /// Stop the walk after the current handler returns.
    ///
    /// Remaining handlers on the current element are skipped as well as every
    /// ancestor. There is no way to resume within the same pass.
    pub fn stop_propagation(&mut self) {
        self.stopped = true;
    }

    /// Whether a handler stopped this pass.
    pub fn is_propagation_stopped(&self) -> bool {
        self.stopped
    }
}

impl<K: Copy, N: NativeInput> PropagatedEvent<K, N> {
    /// Suppress the native default action of the underlying input.
    pub fn prevent_default(&self) {
        self.event.src.prevent_default();
    }
}
