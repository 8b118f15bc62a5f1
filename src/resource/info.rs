// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device metadata and power-on behavior.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::ValueError;
use crate::response::wire::StartupWire;
use crate::state::LightState;
use crate::types::StartupMode;

/// Manufacturer and model metadata of a device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceInfo {
    pub(crate) unique_id: String,
    pub(crate) kind: String,
    pub(crate) model: String,
    pub(crate) product: String,
    pub(crate) manufacturer: String,
}

impl DeviceInfo {
    /// Returns the hardware identifier (MAC-based), empty if not reported.
    #[must_use]
    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    /// Returns the device type, e.g. `Extended color light`.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns the model identifier, e.g. `LCT015`.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the product name, empty if not reported.
    #[must_use]
    pub fn product(&self) -> &str {
        &self.product
    }

    /// Returns the manufacturer, empty if not reported.
    #[must_use]
    pub fn manufacturer(&self) -> &str {
        &self.manufacturer
    }
}

/// What a light or outlet does when mains power returns.
///
/// Serialized as the `config.startup` object of a device.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Startup {
    mode: StartupMode,
    settings: Option<LightState>,
}

impl Startup {
    /// Startup behavior with a fixed mode.
    #[must_use]
    pub fn new(mode: StartupMode) -> Self {
        Self {
            mode,
            settings: None,
        }
    }

    /// Startup behavior that restores `settings`.
    #[must_use]
    pub fn custom(settings: LightState) -> Self {
        Self {
            mode: StartupMode::Custom,
            settings: Some(settings),
        }
    }

    /// Returns the mode.
    #[must_use]
    pub fn mode(&self) -> StartupMode {
        self.mode
    }

    /// Returns the custom settings, if any.
    #[must_use]
    pub fn settings(&self) -> Option<&LightState> {
        self.settings.as_ref()
    }

    pub(crate) fn decode(wire: StartupWire) -> Result<Self, ValueError> {
        let mode = wire
            .mode
            .map(|mode| mode.parse::<StartupMode>())
            .transpose()?
            .unwrap_or_default();
        let settings = wire
            .customsettings
            .map(|state| {
                state
                    .decode()
                    .map(|(state, present)| LightState::from_parts(state, present))
            })
            .transpose()?;
        Ok(Self { mode, settings })
    }
}

impl Serialize for Startup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("mode", &self.mode)?;
        if let Some(settings) = &self.settings {
            map.serialize_entry("customsettings", settings)?;
        }
        map.end()
    }
}
