// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entries of the `/lights` listing.
//!
//! The listing mixes real lights with plain switchable devices such as smart
//! plugs. [`Device::decode`] looks at the capabilities each entry reports and
//! builds the matching record.

use serde_json::{Value, json};

use crate::error::Error;
use crate::protocol::Transport;
use crate::response::wire::{DeviceWire, decode, required};
use crate::state::{Attribute, ColorState, DirtyMask};
use crate::sync::Synchronizer;

use super::{Control, DeviceInfo, Light, Resource, ResourceKind, Startup};

/// A decoded `/lights` entry.
#[derive(Debug)]
pub enum Device<T> {
    /// An entry reporting a luminous flux or a color temperature range.
    Light(Light<T>),
    /// Any other entry.
    Control(Control<T>),
}

impl<T> Device<T> {
    /// Decodes an entry, choosing the record kind from its capabilities.
    pub(crate) fn decode(id: &str, value: Value, sync: &Synchronizer<T>) -> Result<Self, Error> {
        let wire: DeviceWire = decode(value)?;
        let gamut = wire.capabilities.light_gamut();
        let kind = if gamut.is_some() {
            ResourceKind::Light
        } else {
            ResourceKind::Control
        };

        let mut core = DeviceCore::new(kind, id, sync.clone());
        core.apply(wire)?;

        Ok(match gamut {
            Some(gamut) => Self::Light(Light::new(core, gamut)),
            None => Self::Control(Control::new(core)),
        })
    }

    /// Returns the ID of the entry.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Light(light) => &light.core.id,
            Self::Control(control) => &control.core.id,
        }
    }

    /// Returns the record kind that was chosen.
    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Light(_) => ResourceKind::Light,
            Self::Control(_) => ResourceKind::Control,
        }
    }
}

/// State shared by lights and controls.
#[derive(Debug)]
pub(crate) struct DeviceCore<T> {
    pub(crate) kind: ResourceKind,
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) info: DeviceInfo,
    pub(crate) state: ColorState,
    pub(crate) startup: Startup,
    pub(crate) mask: DirtyMask,
    pub(crate) manual: bool,
    pub(crate) sync: Synchronizer<T>,
}

impl<T> DeviceCore<T> {
    fn new(kind: ResourceKind, id: &str, sync: Synchronizer<T>) -> Self {
        Self {
            kind,
            id: id.to_string(),
            name: String::new(),
            info: DeviceInfo::default(),
            state: ColorState::default(),
            startup: Startup::default(),
            mask: DirtyMask::new(),
            manual: false,
            sync,
        }
    }

    /// Replaces the snapshot. Nothing changes if a field fails to decode.
    fn apply(&mut self, wire: DeviceWire) -> Result<(), Error> {
        let name = required(wire.name, "name")?;
        let info = DeviceInfo {
            unique_id: required(wire.uniqueid, "uniqueid")?,
            kind: required(wire.kind, "type")?,
            model: required(wire.modelid, "modelid")?,
            product: wire.productname.unwrap_or_default(),
            manufacturer: wire.manufacturername.unwrap_or_default(),
        };
        let (mut state, _) = required(wire.state, "state")?.decode()?;
        let startup = match wire.config.startup {
            Some(startup) => Startup::decode(startup)?,
            None => Startup::default(),
        };

        // The bridge does not report the transition time
        state.transition = self.state.transition;

        self.name = name;
        self.info = info;
        self.state = state;
        self.startup = startup;
        Ok(())
    }
}

impl<T: Transport> DeviceCore<T> {
    pub(crate) async fn update(&mut self) -> Result<(), Error> {
        let sync = self.sync.clone();
        sync.sync(self).await
    }

    /// Marks `attribute` and pushes unless in manual mode.
    pub(crate) async fn commit(&mut self, attribute: Attribute) -> Result<(), Error> {
        self.mask.insert(attribute);
        if self.manual {
            return Ok(());
        }
        self.update().await
    }
}

impl<T> Resource for DeviceCore<T> {
    fn kind(&self) -> ResourceKind {
        self.kind
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn mask(&self) -> &DirtyMask {
        &self.mask
    }

    fn mask_mut(&mut self) -> &mut DirtyMask {
        &mut self.mask
    }

    fn identity_payload(&self) -> Value {
        let mut body = serde_json::Map::new();
        if self.mask.contains(Attribute::Name) {
            body.insert("name".to_string(), json!(self.name));
        }
        if self.mask.contains(Attribute::Startup) {
            body.insert("config".to_string(), json!({ "startup": self.startup }));
        }
        Value::Object(body)
    }

    fn state_payload(&self) -> Value {
        self.state.payload(&self.mask)
    }

    fn refresh(&mut self, value: Value) -> Result<(), Error> {
        self.apply(decode(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use crate::testing::{ScriptedTransport, synchronizer};
    use crate::types::Gamut;
    use std::sync::Arc;

    fn entry(capabilities: Value) -> Value {
        json!({
            "name": "Desk",
            "uniqueid": "00:17:88:01:00:bd:c7:b9-0b",
            "type": "Extended color light",
            "modelid": "LCT015",
            "productname": "Hue color lamp",
            "manufacturername": "Signify Netherlands B.V.",
            "state": {"on": true, "bri": 200, "colormode": "xy", "xy": [0.4, 0.4], "reachable": true},
            "capabilities": capabilities
        })
    }

    #[test]
    fn maxlumen_makes_a_light() {
        let sync = synchronizer(&Arc::new(ScriptedTransport::new()));
        let device = Device::decode("1", entry(json!({"control": {"maxlumen": 800}})), &sync).unwrap();
        assert_eq!(device.kind(), ResourceKind::Light);
        assert_eq!(device.id(), "1");
        let Device::Light(light) = device else {
            panic!("expected a light");
        };
        assert_eq!(light.gamut(), Gamut::DEFAULT);
        assert_eq!(light.core.info.manufacturer(), "Signify Netherlands B.V.");
    }

    #[test]
    fn color_temperature_makes_a_light() {
        let sync = synchronizer(&Arc::new(ScriptedTransport::new()));
        let device = Device::decode(
            "2",
            entry(json!({"control": {"ct": {"min": 153, "max": 454}}})),
            &sync,
        )
        .unwrap();
        assert_eq!(device.kind(), ResourceKind::Light);
    }

    #[test]
    fn plain_entry_makes_a_control() {
        let sync = synchronizer(&Arc::new(ScriptedTransport::new()));
        let device = Device::decode("3", entry(json!({"control": {}})), &sync).unwrap();
        assert_eq!(device.kind(), ResourceKind::Control);

        let mut bare = entry(json!({}));
        bare.as_object_mut().unwrap().remove("capabilities");
        let device = Device::decode("4", bare, &sync).unwrap();
        assert_eq!(device.kind(), ResourceKind::Control);
    }

    #[test]
    fn missing_required_field_is_named() {
        let sync = synchronizer(&Arc::new(ScriptedTransport::new()));
        let mut value = entry(json!({}));
        value.as_object_mut().unwrap().remove("modelid");
        let err = Device::decode("5", value, &sync).unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::MissingField(field)) if field == "modelid"));
    }

    #[test]
    fn identity_payload_selects_fields() {
        let sync = synchronizer(&Arc::new(ScriptedTransport::new()));
        let mut core = DeviceCore::new(ResourceKind::Control, "1", sync);
        core.name = "Plug".to_string();
        core.mask.insert(Attribute::Name);
        assert_eq!(core.identity_payload(), json!({"name": "Plug"}));

        core.mask.insert(Attribute::Startup);
        assert_eq!(
            core.identity_payload(),
            json!({"name": "Plug", "config": {"startup": {"mode": "safety"}}})
        );
    }
}
