// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power-on behavior of lights and outlets.
//!
//! Not every device supports this; mostly first-party bulbs and plugs do.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::ValueError;

/// What a device does when mains power returns.
///
/// # Examples
///
/// ```
/// use hue_bridge::types::StartupMode;
///
/// assert_eq!(StartupMode::Resume.as_str(), "powerfail");
/// assert_eq!("safety".parse::<StartupMode>().unwrap(), StartupMode::Safety);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StartupMode {
    /// Default warm white at full brightness.
    #[default]
    Safety,
    /// Resume the state from before the power loss.
    Resume,
    /// Use the configured custom settings.
    Custom,
    /// Use the last state that was switched on.
    LastOnState,
}

impl StartupMode {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Safety => "safety",
            Self::Resume => "powerfail",
            Self::Custom => "custom",
            Self::LastOnState => "lastonstate",
        }
    }
}

impl fmt::Display for StartupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StartupMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "safety" => Ok(Self::Safety),
            "powerfail" => Ok(Self::Resume),
            "custom" => Ok(Self::Custom),
            "lastonstate" => Ok(Self::LastOnState),
            _ => Err(ValueError::InvalidVariant {
                kind: "startup mode",
                value: s.to_string(),
            }),
        }
    }
}

impl Serialize for StartupMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
