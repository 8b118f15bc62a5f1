// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sensor accessories.
//!
//! Sensors report free-form values (`presence`, `temperature`,
//! `buttonevent`, ...) that differ per model. They are kept as JSON and
//! looked up by name, ignoring case.

use chrono::NaiveDateTime;
use serde_json::{Map, Value, json};

use crate::error::{Error, ParseError};
use crate::protocol::Transport;
use crate::response::wire::{SensorWire, decode, required};
use crate::state::{Attribute, DirtyMask};
use crate::sync::Synchronizer;
use crate::types::Alert;

use super::{DeviceInfo, Resource, ResourceKind};

/// Timestamp format of `lastupdated`.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// The `config` object of a sensor.
#[derive(Debug, Clone, Default, PartialEq)]
struct SensorConfig {
    on: bool,
    alert: Alert,
    reachable: bool,
    led: Option<bool>,
    battery: Option<u8>,
}

/// A sensor or switch accessory.
#[derive(Debug)]
pub struct Sensor<T> {
    id: String,
    name: String,
    info: DeviceInfo,
    values: Map<String, Value>,
    updated: Option<NaiveDateTime>,
    config: SensorConfig,
    mask: DirtyMask,
    manual: bool,
    sync: Synchronizer<T>,
}

impl<T> Sensor<T> {
    pub(crate) fn decode(id: &str, value: Value, sync: &Synchronizer<T>) -> Result<Self, Error> {
        let mut sensor = Self {
            id: id.to_string(),
            name: String::new(),
            info: DeviceInfo::default(),
            values: Map::new(),
            updated: None,
            config: SensorConfig::default(),
            mask: DirtyMask::new(),
            manual: false,
            sync: sync.clone(),
        };
        sensor.apply(decode(value)?)?;
        Ok(sensor)
    }

    fn apply(&mut self, wire: SensorWire) -> Result<(), Error> {
        let name = required(wire.name, "name")?;
        let info = DeviceInfo {
            unique_id: wire.uniqueid.unwrap_or_default(),
            kind: required(wire.kind, "type")?,
            model: required(wire.modelid, "modelid")?,
            product: wire.productname.unwrap_or_default(),
            manufacturer: wire.manufacturername.unwrap_or_default(),
        };

        let mut values = Map::new();
        let mut updated = None;
        for (key, value) in required(wire.state, "state")? {
            if key == "lastupdated" {
                updated = parse_timestamp(&value)?;
            } else {
                values.insert(key.to_lowercase(), value);
            }
        }

        let config = required(wire.config, "config")?;
        let config = SensorConfig {
            on: config.on.unwrap_or_default(),
            alert: config
                .alert
                .map(|alert| alert.parse::<Alert>())
                .transpose()?
                .unwrap_or_default(),
            reachable: config.reachable.unwrap_or_default(),
            led: config.ledindication,
            battery: config.battery,
        };

        self.name = name;
        self.info = info;
        self.values = values;
        self.updated = updated;
        self.config = config;
        Ok(())
    }

    /// Returns the bridge ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns model metadata.
    #[must_use]
    pub fn info(&self) -> &DeviceInfo {
        &self.info
    }

    /// Returns `true` if the sensor is enabled.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.config.on
    }

    /// Returns the last alert sent.
    #[must_use]
    pub fn alert(&self) -> Alert {
        self.config.alert
    }

    /// Returns `true` if the bridge can reach the sensor.
    #[must_use]
    pub fn is_reachable(&self) -> bool {
        self.config.reachable
    }

    /// Returns `true` if the LED indicator is on.
    #[must_use]
    pub fn led(&self) -> bool {
        self.config.led.unwrap_or(false)
    }

    /// Returns `true` if the sensor has an LED indicator.
    #[must_use]
    pub fn has_led(&self) -> bool {
        self.config.led.is_some()
    }

    /// Returns the battery level in percent, 0 if not reported.
    #[must_use]
    pub fn battery(&self) -> u8 {
        self.config.battery.unwrap_or(0)
    }

    /// Returns `true` if the sensor reports a battery level.
    #[must_use]
    pub fn has_battery(&self) -> bool {
        self.config.battery.is_some()
    }

    /// Returns when the values last changed, if ever.
    #[must_use]
    pub fn updated(&self) -> Option<NaiveDateTime> {
        self.updated
    }

    /// Returns every reported value, keyed by lowercase name.
    #[must_use]
    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    /// Returns `true` if a value with this name is reported.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(&name.to_lowercase())
    }

    /// Returns the raw value with this name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(&name.to_lowercase())
    }

    /// Returns a boolean value.
    ///
    /// # Errors
    ///
    /// Returns `Error::ValueNotFound` if the value is not reported, or
    /// `Error::ValueNotType` if it is not a boolean.
    pub fn bool(&self, name: &str) -> Result<bool, Error> {
        self.typed(name, "boolean", Value::as_bool)
    }

    /// Returns a string value.
    ///
    /// # Errors
    ///
    /// Returns `Error::ValueNotFound` if the value is not reported, or
    /// `Error::ValueNotType` if it is not a string.
    pub fn string(&self, name: &str) -> Result<String, Error> {
        self.typed(name, "string", |v| v.as_str().map(str::to_string))
    }

    /// Returns a numeric value.
    ///
    /// # Errors
    ///
    /// Returns `Error::ValueNotFound` if the value is not reported, or
    /// `Error::ValueNotType` if it is not a number.
    pub fn number(&self, name: &str) -> Result<f64, Error> {
        self.typed(name, "number", Value::as_f64)
    }

    /// Returns `true` if edits are held back until [`update`](Self::update).
    #[must_use]
    pub fn is_manual(&self) -> bool {
        self.manual
    }

    /// Enables or disables manual mode.
    pub fn set_manual(&mut self, manual: bool) {
        self.manual = manual;
    }

    /// Returns the edits not yet confirmed by the bridge.
    #[must_use]
    pub fn dirty(&self) -> &DirtyMask {
        &self.mask
    }

    fn typed<V>(
        &self,
        name: &str,
        expected: &'static str,
        convert: impl FnOnce(&Value) -> Option<V>,
    ) -> Result<V, Error> {
        let value = self
            .get(name)
            .ok_or_else(|| Error::ValueNotFound(name.to_string()))?;
        convert(value).ok_or_else(|| Error::ValueNotType {
            name: name.to_string(),
            expected,
        })
    }
}

impl<T: Transport> Sensor<T> {
    /// Enables or disables the sensor.
    ///
    /// # Errors
    ///
    /// Returns error if the push fails.
    pub async fn set_on(&mut self, on: bool) -> Result<(), Error> {
        self.config.on = on;
        self.commit(Attribute::On).await
    }

    /// Enables the sensor.
    ///
    /// # Errors
    ///
    /// Returns error if the push fails.
    pub async fn on(&mut self) -> Result<(), Error> {
        self.set_on(true).await
    }

    /// Disables the sensor.
    ///
    /// # Errors
    ///
    /// Returns error if the push fails.
    pub async fn off(&mut self) -> Result<(), Error> {
        self.set_on(false).await
    }

    /// Switches the LED indicator.
    ///
    /// # Errors
    ///
    /// Returns error if the push fails.
    pub async fn set_led(&mut self, led: bool) -> Result<(), Error> {
        self.config.led = Some(led);
        self.commit(Attribute::Led).await
    }

    /// Starts or stops an alert effect.
    ///
    /// # Errors
    ///
    /// Returns error if the push fails.
    pub async fn set_alert(&mut self, alert: Alert) -> Result<(), Error> {
        self.config.alert = alert;
        self.commit(Attribute::Alert).await
    }

    /// Changes the display name.
    ///
    /// # Errors
    ///
    /// Returns error if the push fails.
    pub async fn set_name(&mut self, name: &str) -> Result<(), Error> {
        self.name = name.to_string();
        self.commit(Attribute::Name).await
    }

    /// Pushes pending edits, or re-fetches the sensor if there are none.
    ///
    /// # Errors
    ///
    /// Returns the error of the first request that failed.
    pub async fn update(&mut self) -> Result<(), Error> {
        let sync = self.sync.clone();
        sync.sync(self).await
    }

    async fn commit(&mut self, attribute: Attribute) -> Result<(), Error> {
        self.mask.insert(attribute);
        if self.manual {
            return Ok(());
        }
        self.update().await
    }
}

impl<T> Resource for Sensor<T> {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Sensor
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
        json!({ "name": self.name })
    }

    fn state_payload(&self) -> Value {
        let mut body = Map::new();
        if self.mask.contains(Attribute::On) {
            body.insert("on".to_string(), json!(self.config.on));
        }
        if self.mask.contains(Attribute::Alert) {
            body.insert("alert".to_string(), json!(self.config.alert));
        }
        if let (true, Some(led)) = (self.mask.contains(Attribute::Led), self.config.led) {
            body.insert("ledindication".to_string(), json!(led));
        }
        Value::Object(body)
    }

    fn refresh(&mut self, value: Value) -> Result<(), Error> {
        self.apply(decode(value)?)
    }
}

fn parse_timestamp(value: &Value) -> Result<Option<NaiveDateTime>, ParseError> {
    let text = match value {
        Value::Null => return Ok(None),
        Value::String(text) => text.as_str(),
        other => {
            return Err(ParseError::InvalidValue {
                field: "lastupdated".to_string(),
                message: format!("expected a string, got {other}"),
            });
        }
    };
    if text.is_empty() || text == "none" {
        return Ok(None);
    }
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
        .map(Some)
        .map_err(|e| ParseError::InvalidValue {
            field: "lastupdated".to_string(),
            message: e.to_string(),
        })
}
