// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Standalone light settings.
//!
//! A [`LightState`] collects settings without being bound to a device. It is
//! used to describe the custom power-on state of a light.

use std::time::Duration;

use serde::{Serialize, Serializer};
use serde_json::{Value, json};

use crate::error::ValueError;
use crate::types::{Alert, Effect, Gamut, RgbColor, Xy};

use super::color_state::transition_steps;
use super::{Attribute, ColorState, DirtyMask};

/// A set of light settings staged for later use.
///
/// Only the settings that were explicitly given are encoded. Colors given as
/// RGB or hex are converted with [`Gamut::DEFAULT`].
///
/// # Examples
///
/// ```
/// use hue_bridge::state::LightState;
///
/// let state = LightState::new().with_brightness(200).with_temperature(366);
/// assert_eq!(
///     serde_json::to_value(&state).unwrap(),
///     serde_json::json!({"bri": 200, "ct": 366})
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LightState {
    state: ColorState,
    mask: DirtyMask,
    transition: Option<u16>,
}

impl LightState {
    /// Creates an empty set of settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(state: ColorState, mask: DirtyMask) -> Self {
        Self {
            state,
            mask,
            transition: None,
        }
    }

    /// Sets the power state.
    #[must_use]
    pub fn with_on(mut self, on: bool) -> Self {
        self.state.on = on;
        self.mask.insert(Attribute::On);
        self
    }

    /// Sets the alert effect.
    #[must_use]
    pub fn with_alert(mut self, alert: Alert) -> Self {
        self.state.alert = alert;
        self.mask.insert(Attribute::Alert);
        self
    }

    /// Sets the hue.
    #[must_use]
    pub fn with_hue(mut self, hue: u16) -> Self {
        self.state.hue = hue;
        self.mask.insert(Attribute::Hue);
        self
    }

    /// Sets the dynamic effect.
    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.state.effect = effect;
        self.mask.insert(Attribute::Effect);
        self
    }

    /// Sets the brightness.
    #[must_use]
    pub fn with_brightness(mut self, brightness: u8) -> Self {
        self.state.brightness = brightness;
        self.mask.insert(Attribute::Brightness);
        self
    }

    /// Sets the saturation.
    #[must_use]
    pub fn with_saturation(mut self, saturation: u8) -> Self {
        self.state.saturation = saturation;
        self.mask.insert(Attribute::Saturation);
        self
    }

    /// Sets the color temperature in mireds.
    #[must_use]
    pub fn with_temperature(mut self, temperature: u16) -> Self {
        self.state.temperature = temperature;
        self.mask.insert(Attribute::Temperature);
        self
    }

    /// Sets the chromaticity coordinate.
    #[must_use]
    pub fn with_xy(mut self, xy: Xy) -> Self {
        self.state.xy = xy;
        self.mask.insert(Attribute::Xy);
        self
    }

    /// Sets the color from an RGB value.
    #[must_use]
    pub fn with_rgb(self, color: RgbColor) -> Self {
        self.with_xy(color.to_xy(&Gamut::DEFAULT))
    }

    /// Sets the color from a hex string such as `#FF8000`.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidHexColor` if the string is malformed.
    pub fn with_hex(self, hex: &str) -> Result<Self, ValueError> {
        Ok(self.with_rgb(RgbColor::from_hex(hex)?))
    }

    /// Sets the transition time, in steps of 100 ms.
    #[must_use]
    pub fn with_transition(mut self, transition: Duration) -> Self {
        self.transition = Some(transition_steps(transition));
        self
    }

    /// Returns `true` if no setting was given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mask.is_empty() && self.transition.is_none()
    }

    /// Returns the staged settings.
    #[must_use]
    pub fn state(&self) -> &ColorState {
        &self.state
    }

    /// Returns which settings were given.
    #[must_use]
    pub fn mask(&self) -> &DirtyMask {
        &self.mask
    }

    /// Encodes the given settings as a partial state object.
    #[must_use]
    pub fn payload(&self) -> Value {
        let mut body = self.state.fields(&self.mask);
        if let Some(steps) = self.transition {
            body.insert("transitiontime".to_string(), json!(steps));
        }
        Value::Object(body)
    }
}

impl Serialize for LightState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.payload().serialize(serializer)
    }
}
