// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Where the current gesture began.
//!
//! ## Lifecycle
//!
//! One [`GestureOrigin`] is shared by every binding of a
//! [`Propagator`](crate::propagator::Propagator):
//!
//! - the first raw phase of a gesture calls [`GestureOrigin::begin`], anchoring the origin and
//!   marking the gesture in progress;
//! - the final raw phase calls [`GestureOrigin::finish`], which leaves the anchor in place
//!   until the next gesture begins;
//! - a manual emit outside a live gesture re-anchors through [`GestureOrigin::anchor`].
//!
//! Only one gesture is tracked at a time. Simultaneous gestures on different bindings
//! share the same origin; whichever began last wins.
//! A gesture that never reports a final phase leaves the origin in progress.

/// Origin of the gesture currently being propagated.
///
/// ```
/// use understory_propagation::origin::GestureOrigin;
///
/// let mut origin = GestureOrigin::new();
/// origin.begin(3_u32);
/// assert!(!origin.anchor(5));
/// origin.finish();
/// assert_eq!(origin.first_target(), Some(3));
/// assert!(origin.anchor(5));
/// assert_eq!(origin.first_target(), Some(5));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GestureOrigin<K> {
    first_target: Option<K>,
    in_progress: bool,
}

impl<K: Copy> GestureOrigin<K> {
    /// An idle origin with no anchor.
    pub const fn new() -> Self {
        Self {
            first_target: None,
            in_progress: false,
        }
    }

    /// Element where the latest gesture began.
    pub fn first_target(&self) -> Option<K> {
        self.first_target
    }

    /// True between the first and the final phase of a gesture.
    pub fn in_progress(&self) -> bool {
        self.in_progress
    }

    /// First phase: anchor at `target` and enter the in-progress state.
    pub fn begin(&mut self, target: K) {
        self.first_target = Some(target);
        self.in_progress = true;
    }

    /// Final phase: return to idle. The anchor stays readable.
    pub fn finish(&mut self) {
        self.in_progress = false;
    }

    /// Re-anchor at `target` unless a gesture is in progress.
    ///
    /// Returns whether the anchor moved.
    pub fn anchor(&mut self, target: K) -> bool {
        if self.in_progress {
            return false;
        }
        self.first_target = Some(target);
        true
    }

    /// Forget the anchor and return to idle.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
