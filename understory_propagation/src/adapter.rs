// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction adapter: wrap one recognizer, or a factory for many.
//!
//! [`wrap_instance`] binds a recognizer that already exists.
//! [`wrap_factory`] captures [`Options`] once and returns a
//! [`PropagatingFactory`] whose every recognizer is bound with them, through
//! either [`PropagatingFactory::create`] or [`PropagatingFactory::manager`].
//!
//! Options are validated when they are built, so an invalid configuration
//! never reaches either entry point.

use crate::binding::BindingId;
use crate::policy::Options;
use crate::propagator::Propagator;
use crate::types::{NativeInput, ParentLookup, Recognizer};

/// Something that builds recognizers for elements.
pub trait RecognizerFactory<K, N> {
    /// Recognizer configuration (thresholds, enabled gestures, ...).
    type Config;
    /// The recognizer produced.
    type Recognizer: Recognizer<K, N> + 'static;

    /// Build a recognizer with the factory's preset gestures.
    fn create(&self, element: K, config: Self::Config) -> Self::Recognizer;

    /// Build a bare manager without preset gestures.
    ///
    /// Defaults to [`RecognizerFactory::create`].
    fn manager(&self, element: K, config: Self::Config) -> Self::Recognizer {
        self.create(element, config)
    }
}

/// A factory whose recognizers are bound to a [`Propagator`] as they are built.
#[derive(Clone, Debug)]
pub struct PropagatingFactory<F> {
    factory: F,
    options: Options,
}

impl<F> PropagatingFactory<F> {
    /// Options applied to every binding this factory creates.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The wrapped factory.
    pub fn inner(&self) -> &F {
        &self.factory
    }

    /// Build a recognizer for `element` and bind it.
    pub fn create<K, N, P>(
        &self,
        doc: &mut Propagator<K, N, P>,
        element: K,
        config: F::Config,
    ) -> BindingId
    where
        F: RecognizerFactory<K, N>,
        K: Copy + Ord + core::fmt::Debug,
        N: NativeInput,
        P: ParentLookup<K>,
    {
        doc.bind(self.factory.create(element, config), self.options)
    }

    /// Build a bare manager for `element` and bind it.
    pub fn manager<K, N, P>(
        &self,
        doc: &mut Propagator<K, N, P>,
        element: K,
        config: F::Config,
    ) -> BindingId
    where
        F: RecognizerFactory<K, N>,
        K: Copy + Ord + core::fmt::Debug,
        N: NativeInput,
        P: ParentLookup<K>,
    {
        doc.bind(self.factory.manager(element, config), self.options)
    }
}

/// Capture `options` for every recognizer `factory` will build.
pub fn wrap_factory<F>(factory: F, options: Options) -> PropagatingFactory<F> {
    PropagatingFactory { factory, options }
}

/// Bind an existing recognizer with `options`.
pub fn wrap_instance<K, N, P, R>(
    doc: &mut Propagator<K, N, P>,
    recognizer: R,
    options: Options,
) -> BindingId
where
    K: Copy + Ord + core::fmt::Debug,
    N: NativeInput,
    P: ParentLookup<K>,
    R: Recognizer<K, N> + 'static,
{
    doc.bind(recognizer, options)
}
