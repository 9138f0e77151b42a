// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binding options and the default-action policy.
//!
//! ## Prevent default
//!
//! The policy is evaluated on the raw phases of every gesture (see
//! [`INPUT_EVENT`](crate::types::INPUT_EVENT)). When it applies to the event's
//! pointer type, the native input's default action is suppressed.
//!
//! The option is opt-in only: an explicit `false` is a [`ConfigError`], raised
//! while the options are built and therefore before any binding exists.
//!
//! ```
//! use understory_propagation::policy::{Options, PreventDefault};
//! use understory_propagation::types::PointerType;
//!
//! let touch_only = Options::new().with_prevent_default("touch").unwrap();
//! assert_eq!(touch_only.prevent_default, Some(PreventDefault::Pointer(PointerType::Touch)));
//!
//! assert!(Options::new().with_prevent_default(false).is_err());
//! ```

use core::str::FromStr;

use crate::error::ConfigError;
use crate::types::PointerType;

/// When to suppress the native default action.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PreventDefault {
    /// For every pointer type.
    Always,
    /// Only for inputs from this pointer type.
    Pointer(PointerType),
}

impl PreventDefault {
    /// Whether the policy suppresses the default action for `pointer`.
    pub fn applies_to(self, pointer: PointerType) -> bool {
        match self {
            Self::Always => true,
            Self::Pointer(p) => p == pointer,
        }
    }
}

impl TryFrom<bool> for PreventDefault {
    type Error = ConfigError;

    fn try_from(value: bool) -> Result<Self, Self::Error> {
        if value {
            Ok(Self::Always)
        } else {
            Err(ConfigError::PreventDefaultFalse)
        }
    }
}

impl From<PointerType> for PreventDefault {
    fn from(pointer: PointerType) -> Self {
        Self::Pointer(pointer)
    }
}

impl FromStr for PreventDefault {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "true" => Ok(Self::Always),
            "false" => Err(ConfigError::PreventDefaultFalse),
            tag => tag.parse().map(Self::Pointer),
        }
    }
}

impl TryFrom<&str> for PreventDefault {
    type Error = ConfigError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Options captured by a binding, or by a wrapped factory for every binding it creates.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct Options {
    /// Default-action policy; `None` leaves native defaults alone.
    pub prevent_default: Option<PreventDefault>,
}

impl Options {
    /// Options with no policy.
    pub const fn new() -> Self {
        Self {
            prevent_default: None,
        }
    }

    /// Enable the default-action policy.
    ///
    /// Accepts `true`, a [`PointerType`], a [`PreventDefault`], or a string tag.
    /// `false` (or `"false"`) fails with [`ConfigError::PreventDefaultFalse`].
    pub fn with_prevent_default<V>(mut self, value: V) -> Result<Self, ConfigError>
    where
        V: TryInto<PreventDefault>,
        ConfigError: From<V::Error>,
    {
        self.prevent_default = Some(value.try_into()?);
        Ok(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PreventDefault {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct Visitor;

        impl serde::de::Visitor<'_> for Visitor {
            type Value = PreventDefault;

            fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str("`true` or one of \"mouse\", \"touch\", \"pen\"")
            }

            fn visit_bool<E: serde::de::Error>(self, v: bool) -> Result<Self::Value, E> {
                PreventDefault::try_from(v).map_err(E::custom)
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse::<PointerType>()
                    .map(PreventDefault::Pointer)
                    .map_err(E::custom)
            }
        }

        deserializer.deserialize_any(Visitor)
    }
}
