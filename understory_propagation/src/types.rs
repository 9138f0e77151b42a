// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types: pointer kinds, event flags, gesture events, and the traits the
//! host implements for its tree, its native input, and its gesture recognizer.
//!
//! ## Overview
//!
//! The propagator never inspects raw input or detects gestures itself.
//! Everything it needs from the outside world is expressed here:
//!
//! - [`ParentLookup`] walks from an element to its parent.
//! - [`NativeInput`] identifies one raw pointer/touch event and can suppress its default action.
//! - [`Recognizer`] is the gesture source bound to one element.

use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use kurbo::{Point, Vec2};

use crate::error::ConfigError;

/// Reserved event type carrying raw pointer/touch phases.
///
/// Every binding subscribes its recognizer to this type. Events of this type
/// drive the default-action policy and the gesture origin bookkeeping; they are
/// never delivered to user handlers.
pub const INPUT_EVENT: &str = "hammer.input";

/// Kind of device that produced an input.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PointerType {
    /// Mouse or other indirect pointer.
    Mouse,
    /// Finger on a touch surface.
    Touch,
    /// Stylus.
    Pen,
}

impl PointerType {
    /// The lowercase tag used in configuration, e.g. `"touch"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mouse => "mouse",
            Self::Touch => "touch",
            Self::Pen => "pen",
        }
    }
}

impl fmt::Display for PointerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PointerType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mouse" => Ok(Self::Mouse),
            "touch" => Ok(Self::Touch),
            "pen" => Ok(Self::Pen),
            other => Err(ConfigError::UnknownPointerType(other.into())),
        }
    }
}

bitflags::bitflags! {
    /// Position of an event within its gesture.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct EventFlags: u8 {
        /// First event of a gesture (pointer down).
        const FIRST = 0b0000_0001;
        /// Final event of a gesture (pointer up or cancel).
        const FINAL = 0b0000_0010;
    }
}

/// Identity of one native input event.
///
/// Gesture events recognized from the same native event carry the same id.
/// The propagator keys its dedup bookkeeping on it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct InputId(pub u64);

/// The raw pointer or touch event underneath a gesture event.
pub trait NativeInput {
    /// Identity of this native event, shared by every gesture recognized from it.
    fn input_id(&self) -> InputId;
    /// Suppress the platform default action (scrolling, text selection, ...).
    fn prevent_default(&self);
}

/// Look up the parent of an element, i.e. `parentNode`.
///
/// The propagator consults this to walk from a gesture's origin out to the root.
pub trait ParentLookup<K> {
    /// Returns the parent of `node`, or `None` if `node` is a root.
    fn parent_of(&self, node: &K) -> Option<K>;
}

/// A no‑op parent provider: every element is a root.
///
/// With it, a gesture only reaches bindings on its origin element.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoParent;

impl<K> ParentLookup<K> for NoParent {
    #[inline]
    fn parent_of(&self, _node: &K) -> Option<K> {
        None
    }
}

/// A gesture recognizer attached to one element.
///
/// The recognizer turns native input into [`GestureEvent`]s and reports each
/// one for every type it is subscribed to by calling
/// [`Propagator::dispatch`](crate::propagator::Propagator::dispatch) with the
/// binding it belongs to.
pub trait Recognizer<K, N> {
    /// The element this recognizer listens on.
    fn element(&self) -> K;
    /// Start reporting events of `kind`.
    fn subscribe(&mut self, kind: &str);
    /// Stop reporting events of `kind`.
    fn unsubscribe(&mut self, kind: &str);
    /// Observe a manually emitted event before it is dispatched.
    fn emit(&mut self, _event: &GestureEvent<K, N>) {}
    /// Release everything the recognizer holds on its element.
    fn destroy(&mut self);
}

/// One recognized gesture phase, as reported by a [`Recognizer`].
#[derive(Clone, Debug)]
pub struct GestureEvent<K, N> {
    /// Event type, e.g. `"tap"` or `"panend"`.
    pub kind: String,
    /// Element the pointer is currently over.
    pub target: K,
    /// Native input this event was recognized from.
    pub src: N,
    /// First/final markers.
    pub flags: EventFlags,
    /// Device that produced the input.
    pub pointer_type: PointerType,
    /// Gesture center in the host's coordinate space.
    pub center: Point,
    /// Movement since the first event of the gesture.
    pub delta: Vec2,
}

impl<K, N> GestureEvent<K, N> {
    /// Create an event with no flags, centered at the origin.
    pub fn new(kind: impl Into<String>, target: K, src: N, pointer_type: PointerType) -> Self {
        Self {
            kind: kind.into(),
            target,
            src,
            flags: EventFlags::empty(),
            pointer_type,
            center: Point::ZERO,
            delta: Vec2::ZERO,
        }
    }

    /// Replace the first/final markers.
    #[must_use]
    pub fn with_flags(mut self, flags: EventFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Set the center point and the delta since the gesture began.
    #[must_use]
    pub fn at(mut self, center: Point, delta: Vec2) -> Self {
        self.center = center;
        self.delta = delta;
        self
    }

    /// True for the first event of a gesture.
    pub fn is_first(&self) -> bool {
        self.flags.contains(EventFlags::FIRST)
    }

    /// True for the final event of a gesture.
    pub fn is_final(&self) -> bool {
        self.flags.contains(EventFlags::FINAL)
    }

    /// True for the reserved raw-phase type [`INPUT_EVENT`].
    pub fn is_input(&self) -> bool {
        self.kind == INPUT_EVENT
    }
}
