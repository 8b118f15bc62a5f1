// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wire shapes of bridge resources.
//!
//! Required fields are kept optional here so that a missing one is reported
//! by name. Enumerations stay strings until they are validated.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{ParseError, ValueError};
use crate::state::{Attribute, ColorState, DirtyMask};
use crate::types::{Gamut, Xy};

/// Fails with `ParseError::MissingField` when `value` is absent.
pub(crate) fn required<T>(value: Option<T>, field: &str) -> Result<T, ParseError> {
    value.ok_or_else(|| ParseError::MissingField(field.to_string()))
}

/// Deserializes a JSON value into a wire shape.
pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ParseError> {
    serde_json::from_value(value).map_err(ParseError::from)
}

/// Splits a resource listing into its entries.
pub(crate) fn listing(value: Value) -> Result<Map<String, Value>, ParseError> {
    match value {
        Value::Object(entries) => Ok(entries),
        other => Err(ParseError::UnexpectedFormat(format!(
            "expected a resource listing, got {other}"
        ))),
    }
}

// ============================================================================
// Lights and outlets
// ============================================================================

/// An entry of `/lights`.
#[derive(Debug, Deserialize)]
pub(crate) struct DeviceWire {
    pub name: Option<String>,
    pub uniqueid: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub modelid: Option<String>,
    pub productname: Option<String>,
    pub manufacturername: Option<String>,
    pub state: Option<StateWire>,
    #[serde(default)]
    pub config: DeviceConfigWire,
    #[serde(default)]
    pub capabilities: CapabilitiesWire,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DeviceConfigWire {
    pub startup: Option<StartupWire>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StartupWire {
    pub mode: Option<String>,
    pub customsettings: Option<StateWire>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CapabilitiesWire {
    pub control: Option<ControlCapabilitiesWire>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ControlCapabilitiesWire {
    pub maxlumen: Option<Value>,
    pub ct: Option<Value>,
    pub colorgamut: Option<Gamut>,
}

impl CapabilitiesWire {
    /// Returns the gamut to use when the entry describes a light, or `None`
    /// for a plain switchable device.
    ///
    /// An entry is a light when it reports a luminous flux or a color
    /// temperature range.
    pub(crate) fn light_gamut(&self) -> Option<Gamut> {
        let control = self.control.as_ref()?;
        if control.maxlumen.is_none() && control.ct.is_none() {
            return None;
        }
        Some(control.colorgamut.unwrap_or(Gamut::DEFAULT))
    }
}

/// A state or action object.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct StateWire {
    pub on: Option<bool>,
    pub bri: Option<u8>,
    pub hue: Option<u16>,
    pub sat: Option<u8>,
    pub xy: Option<Xy>,
    pub ct: Option<u16>,
    pub alert: Option<String>,
    pub effect: Option<String>,
    pub colormode: Option<String>,
    pub reachable: Option<bool>,
    pub transitiontime: Option<u16>,
}

impl StateWire {
    /// Converts into a snapshot plus the set of fields that were present.
    pub(crate) fn decode(self) -> Result<(ColorState, DirtyMask), ValueError> {
        let mut present = DirtyMask::new();
        let mut state = ColorState::default();

        if let Some(on) = self.on {
            state.on = on;
            present.insert(Attribute::On);
        }
        if let Some(brightness) = self.bri {
            state.brightness = brightness;
            present.insert(Attribute::Brightness);
        }
        if let Some(hue) = self.hue {
            state.hue = hue;
            present.insert(Attribute::Hue);
        }
        if let Some(saturation) = self.sat {
            state.saturation = saturation;
            present.insert(Attribute::Saturation);
        }
        if let Some(xy) = self.xy {
            state.xy = xy;
            present.insert(Attribute::Xy);
        }
        if let Some(temperature) = self.ct {
            state.temperature = temperature;
            present.insert(Attribute::Temperature);
        }
        if let Some(alert) = self.alert {
            state.alert = alert.parse()?;
            present.insert(Attribute::Alert);
        }
        if let Some(effect) = self.effect {
            state.effect = effect.parse()?;
            present.insert(Attribute::Effect);
        }
        state.color = self.colormode.is_some();
        state.reachable = self.reachable.unwrap_or_default();
        state.transition = self.transitiontime.unwrap_or_default();

        Ok((state, present))
    }
}

// ============================================================================
// Sensors
// ============================================================================

/// An entry of `/sensors`.
#[derive(Debug, Deserialize)]
pub(crate) struct SensorWire {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub modelid: Option<String>,
    pub uniqueid: Option<String>,
    pub productname: Option<String>,
    pub manufacturername: Option<String>,
    pub state: Option<Map<String, Value>>,
    pub config: Option<SensorConfigWire>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SensorConfigWire {
    pub on: Option<bool>,
    pub alert: Option<String>,
    pub reachable: Option<bool>,
    pub ledindication: Option<bool>,
    pub battery: Option<u8>,
}

// ============================================================================
// Groups
// ============================================================================

/// An entry of `/groups`, or the body of `/groups/0`.
#[derive(Debug, Deserialize)]
pub(crate) struct GroupWire {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub class: Option<String>,
    pub action: Option<StateWire>,
    #[serde(default)]
    pub lights: Vec<String>,
    #[serde(default)]
    pub sensors: Vec<String>,
    #[serde(default)]
    pub state: GroupStateWire,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct GroupStateWire {
    #[serde(default)]
    pub any_on: bool,
    #[serde(default)]
    pub all_on: bool,
}
