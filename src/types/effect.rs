// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Alert and effect modes.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::ValueError;

/// Temporary alert effect of a light, outlet or sensor.
///
/// The bridge reports the last alert that was sent, not whether it is
/// still running: after a breathe cycle ends the value is not reset.
///
/// # Examples
///
/// ```
/// use hue_bridge::types::Alert;
///
/// assert_eq!(Alert::LongSelect.as_str(), "lselect");
/// assert_eq!("select".parse::<Alert>().unwrap(), Alert::Select);
/// assert!("blink".parse::<Alert>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alert {
    /// No alert.
    #[default]
    None,
    /// One breathe cycle.
    Select,
    /// Breathe cycles for 15 seconds or until cancelled with [`Alert::None`].
    LongSelect,
}

impl Alert {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Select => "select",
            Self::LongSelect => "lselect",
        }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Alert {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "select" => Ok(Self::Select),
            "lselect" => Ok(Self::LongSelect),
            _ => Err(ValueError::InvalidVariant {
                kind: "alert",
                value: s.to_string(),
            }),
        }
    }
}

impl Serialize for Alert {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Dynamic light effect.
///
/// # Examples
///
/// ```
/// use hue_bridge::types::Effect;
///
/// assert_eq!(Effect::ColorLoop.to_string(), "colorloop");
/// assert_eq!("none".parse::<Effect>().unwrap(), Effect::None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Effect {
    /// No effect.
    #[default]
    None,
    /// Cycle through all hues at the current brightness and saturation.
    ColorLoop,
}

impl Effect {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::ColorLoop => "colorloop",
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Effect {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "colorloop" => Ok(Self::ColorLoop),
            _ => Err(ValueError::InvalidVariant {
                kind: "effect",
                value: s.to_string(),
            }),
        }
    }
}

impl Serialize for Effect {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_roundtrips_through_strings() {
        for alert in [Alert::None, Alert::Select, Alert::LongSelect] {
            assert_eq!(alert.as_str().parse::<Alert>().unwrap(), alert);
        }
        assert_eq!("LSELECT".parse::<Alert>().unwrap(), Alert::LongSelect);
    }

    #[test]
    fn alert_rejects_unknown() {
        assert_eq!(
            "breathe".parse::<Alert>(),
            Err(ValueError::InvalidVariant {
                kind: "alert",
                value: "breathe".to_string()
            })
        );
    }

    #[test]
    fn effect_serializes_as_string() {
        assert_eq!(
            serde_json::to_string(&Effect::ColorLoop).unwrap(),
            "\"colorloop\""
        );
        assert!("rainbow".parse::<Effect>().is_err());
    }
}
