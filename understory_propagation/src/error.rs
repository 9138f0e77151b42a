// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for configuration, handlers, and dispatch.

use alloc::boxed::Box;
use alloc::string::String;

use crate::binding::BindingId;

/// Invalid [`Options`](crate::policy::Options).
///
/// Raised while building options, before anything is attached to an element.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// `preventDefault: false` was given explicitly.
    ///
    /// The option only exists to opt in; leave it unset instead.
    #[error("preventDefault can only be enabled: pass true or a pointer type, or leave it unset")]
    PreventDefaultFalse,
    /// A pointer type tag other than `mouse`, `touch`, or `pen`.
    #[error("unknown pointer type `{0}`")]
    UnknownPointerType(String),
}

impl From<core::convert::Infallible> for ConfigError {
    fn from(never: core::convert::Infallible) -> Self {
        match never {}
    }
}

/// Returned by a handler to signal that it did not complete normally.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// Abort the walk immediately; no further handler runs for this pass.
    #[error("propagation cancelled by handler")]
    Cancelled,
    /// The handler failed. The walk continues and the failure is reported
    /// once it completes.
    #[error("handler failed: {0}")]
    Failed(Box<dyn core::error::Error + 'static>),
}

impl HandlerError {
    /// Wrap any error as a handler failure.
    pub fn failed(err: impl core::error::Error + 'static) -> Self {
        Self::Failed(Box::new(err))
    }
}

/// Result type returned by event handlers.
pub type HandlerResult = Result<(), HandlerError>;

/// Failure of a dispatch pass.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The binding was destroyed, or never existed.
    #[error("no live binding for {0:?}")]
    UnknownBinding(BindingId),
    /// A handler cancelled the pass or failed during it.
    #[error(transparent)]
    Handler(#[from] HandlerError),
}
