// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Last-known light state and its partial wire encoding.

use std::time::Duration;

use serde_json::{Map, Value, json};

use crate::types::{Alert, Effect, Xy};

use super::{Attribute, DirtyMask};

/// Length of one transition step.
const TRANSITION_STEP_MS: u128 = 100;

/// Snapshot of the state of a light, outlet or group action.
///
/// Not every field is meaningful for every device: an outlet only reports
/// power, alert and reachability.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorState {
    pub(crate) on: bool,
    pub(crate) xy: Xy,
    pub(crate) hue: u16,
    pub(crate) saturation: u8,
    pub(crate) brightness: u8,
    pub(crate) temperature: u16,
    pub(crate) color: bool,
    pub(crate) alert: Alert,
    pub(crate) effect: Effect,
    pub(crate) transition: u16,
    pub(crate) reachable: bool,
}

impl ColorState {
    /// Returns the power state.
    #[must_use]
    pub const fn is_on(&self) -> bool {
        self.on
    }

    /// Returns the chromaticity coordinate.
    #[must_use]
    pub const fn xy(&self) -> Xy {
        self.xy
    }

    /// Returns the hue (0-65535).
    #[must_use]
    pub const fn hue(&self) -> u16 {
        self.hue
    }

    /// Returns the saturation (0-254).
    #[must_use]
    pub const fn saturation(&self) -> u8 {
        self.saturation
    }

    /// Returns the brightness (1-254).
    #[must_use]
    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Returns the color temperature in mireds.
    #[must_use]
    pub const fn temperature(&self) -> u16 {
        self.temperature
    }

    /// Returns `true` if the device reported a color mode.
    #[must_use]
    pub const fn is_color(&self) -> bool {
        self.color
    }

    /// Returns the last alert sent.
    #[must_use]
    pub const fn alert(&self) -> Alert {
        self.alert
    }

    /// Returns the active effect.
    #[must_use]
    pub const fn effect(&self) -> Effect {
        self.effect
    }

    /// Returns `true` if the bridge can reach the device.
    #[must_use]
    pub const fn is_reachable(&self) -> bool {
        self.reachable
    }

    /// Returns the transition time applied to state changes.
    #[must_use]
    pub fn transition(&self) -> Duration {
        Duration::from_millis(u64::from(self.transition) * 100)
    }

    pub(crate) fn set_transition(&mut self, transition: Duration) {
        self.transition = transition_steps(transition);
    }

    /// Fields selected by `mask`, without a transition time.
    pub(crate) fn fields(&self, mask: &DirtyMask) -> Map<String, Value> {
        let mut body = Map::new();
        for attribute in mask.iter() {
            let (key, value) = match attribute {
                Attribute::On => ("on", json!(self.on)),
                Attribute::Xy => ("xy", json!(self.xy)),
                Attribute::Hue => ("hue", json!(self.hue)),
                Attribute::Alert => ("alert", json!(self.alert)),
                Attribute::Effect => ("effect", json!(self.effect)),
                Attribute::Brightness => ("bri", json!(self.brightness)),
                Attribute::Saturation => ("sat", json!(self.saturation)),
                Attribute::Temperature => ("ct", json!(self.temperature)),
                Attribute::Name | Attribute::Startup | Attribute::Led => continue,
            };
            body.insert(key.to_string(), value);
        }
        body
    }

    /// State body for a light or group action: the selected fields plus the
    /// transition time.
    pub(crate) fn payload(&self, mask: &DirtyMask) -> Value {
        let mut body = self.fields(mask);
        body.insert("transitiontime".to_string(), json!(self.transition));
        Value::Object(body)
    }
}

/// Converts a duration to tenths of a second, saturating at `u16::MAX`.
pub(crate) fn transition_steps(transition: Duration) -> u16 {
    u16::try_from(transition.as_millis() / TRANSITION_STEP_MS).unwrap_or(u16::MAX)
}
