// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Groups of devices.

use std::fmt;
use std::time::Duration;

use serde_json::{Value, json};

use crate::error::{DeviceError, Error};
use crate::protocol::Transport;
use crate::response::wire::{GroupWire, decode, required};
use crate::state::{Attribute, ColorState, DirtyMask};
use crate::sync::Synchronizer;
use crate::types::{Alert, Effect, Gamut, GroupClass, GroupType, RgbColor, Xy};

use super::{
    Control, ControlMap, Light, LightMap, Resource, ResourceKind, Sensor, SensorMap, Shared,
};

/// Device maps a group resolves its member IDs against.
pub(crate) struct Members<T> {
    pub(crate) lights: LightMap<T>,
    pub(crate) controls: ControlMap<T>,
    pub(crate) sensors: SensorMap<T>,
}

impl<T> Clone for Members<T> {
    fn clone(&self) -> Self {
        Self {
            lights: self.lights.clone(),
            controls: self.controls.clone(),
            sensors: self.sensors.clone(),
        }
    }
}

/// A room, zone or other group of devices.
///
/// Members are the same shared records the bridge hands out, so locking a
/// member through a group and through [`Bridge::light`](crate::Bridge::light)
/// yields the same light.
///
/// State setters act on the group `action` and reach every member light.
/// They do not update the member records; re-fetch those to observe the
/// change.
///
/// # Examples
///
/// ```no_run
/// use hue_bridge::Bridge;
///
/// # async fn example() -> hue_bridge::Result<()> {
/// let bridge = Bridge::http("192.168.1.2", "secret-key").build()?;
/// if let Some(room) = bridge.group_by_name("living room").await? {
///     let mut room = room.lock().await;
///     room.set_brightness(120).await?;
///     println!("{} lights, any on: {}", room.lights().len(), room.any_on());
/// }
/// # Ok(())
/// # }
/// ```
pub struct Group<T> {
    id: String,
    name: String,
    group_type: GroupType,
    class: Option<GroupClass>,
    action: ColorState,
    any_on: bool,
    all_on: bool,
    lights: Vec<Shared<Light<T>>>,
    controls: Vec<Shared<Control<T>>>,
    sensors: Vec<Shared<Sensor<T>>>,
    members: Members<T>,
    mask: DirtyMask,
    manual: bool,
    sync: Synchronizer<T>,
}

impl<T> Group<T> {
    pub(crate) fn decode(
        id: &str,
        value: Value,
        members: &Members<T>,
        sync: &Synchronizer<T>,
    ) -> Result<Self, Error> {
        let mut group = Self {
            id: id.to_string(),
            name: String::new(),
            group_type: GroupType::default(),
            class: None,
            action: ColorState::default(),
            any_on: false,
            all_on: false,
            lights: Vec::new(),
            controls: Vec::new(),
            sensors: Vec::new(),
            members: members.clone(),
            mask: DirtyMask::new(),
            manual: false,
            sync: sync.clone(),
        };
        group.apply(decode(value)?)?;
        Ok(group)
    }

    /// Marks this group as the one containing every device.
    pub(crate) fn into_all(mut self) -> Self {
        self.group_type = GroupType::All;
        self
    }

    fn apply(&mut self, wire: GroupWire) -> Result<(), Error> {
        let name = required(wire.name, "name")?;
        let group_type = match self.group_type {
            GroupType::All => GroupType::All,
            _ => required(wire.kind, "type")?.parse::<GroupType>()?,
        };
        let class = wire.class.map(|class| {
            class.parse().unwrap_or_else(|_| {
                tracing::debug!(group = %self.id, class = %class, "Unknown group class");
                GroupClass::Other
            })
        });
        let (mut action, _) = required(wire.action, "action")?.decode()?;
        action.transition = self.action.transition;

        let mut lights = Vec::new();
        let mut controls = Vec::new();
        for id in &wire.lights {
            if let Some(light) = self.members.lights.get(id) {
                lights.push(light.clone());
            } else if let Some(control) = self.members.controls.get(id) {
                controls.push(control.clone());
            } else {
                tracing::debug!(group = %self.id, member = %id, "Dropping unknown light member");
            }
        }
        let mut sensors = Vec::new();
        for id in &wire.sensors {
            if let Some(sensor) = self.members.sensors.get(id) {
                sensors.push(sensor.clone());
            } else {
                tracing::debug!(group = %self.id, member = %id, "Dropping unknown sensor member");
            }
        }

        self.name = name;
        self.group_type = group_type;
        self.class = class;
        self.action = action;
        self.any_on = wire.state.any_on;
        self.all_on = wire.state.all_on;
        self.lights = lights;
        self.controls = controls;
        self.sensors = sensors;
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

    /// Returns how the group was formed.
    #[must_use]
    pub fn group_type(&self) -> GroupType {
        self.group_type
    }

    /// Returns the room class, if the bridge reports one.
    #[must_use]
    pub fn class(&self) -> Option<GroupClass> {
        self.class
    }

    /// Returns the member lights.
    #[must_use]
    pub fn lights(&self) -> &[Shared<Light<T>>] {
        &self.lights
    }

    /// Returns the member controls.
    #[must_use]
    pub fn controls(&self) -> &[Shared<Control<T>>] {
        &self.controls
    }

    /// Returns the member sensors.
    #[must_use]
    pub fn sensors(&self) -> &[Shared<Sensor<T>>] {
        &self.sensors
    }

    /// Returns `true` if at least one member is on.
    #[must_use]
    pub fn any_on(&self) -> bool {
        self.any_on
    }

    /// Returns `true` if every member is on.
    #[must_use]
    pub fn all_on(&self) -> bool {
        self.all_on
    }

    /// Returns the last action applied to the group.
    #[must_use]
    pub fn action(&self) -> &ColorState {
        &self.action
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

    /// Sets the transition time sent with the next action push.
    pub fn set_transition(&mut self, transition: Duration) {
        self.action.set_transition(transition);
    }

    fn require_color(&self) -> Result<(), Error> {
        if self.action.color {
            Ok(())
        } else {
            Err(DeviceError::no_color().into())
        }
    }
}

impl<T: Transport> Group<T> {
    /// Changes the display name.
    ///
    /// # Errors
    ///
    /// Returns error if the push fails.
    pub async fn set_name(&mut self, name: &str) -> Result<(), Error> {
        self.name = name.to_string();
        self.commit(Attribute::Name).await
    }

    /// Switches every member on or off.
    ///
    /// # Errors
    ///
    /// Returns error if the push fails.
    pub async fn set_on(&mut self, on: bool) -> Result<(), Error> {
        self.action.on = on;
        self.commit(Attribute::On).await
    }

    /// Switches every member on.
    ///
    /// # Errors
    ///
    /// Returns error if the push fails.
    pub async fn on(&mut self) -> Result<(), Error> {
        self.set_on(true).await
    }

    /// Switches every member off.
    ///
    /// # Errors
    ///
    /// Returns error if the push fails.
    pub async fn off(&mut self) -> Result<(), Error> {
        self.set_on(false).await
    }

    /// Starts or stops an alert effect on every member.
    ///
    /// # Errors
    ///
    /// Returns error if the push fails.
    pub async fn set_alert(&mut self, alert: Alert) -> Result<(), Error> {
        self.action.alert = alert;
        self.commit(Attribute::Alert).await
    }

    /// Sets the dynamic effect.
    ///
    /// # Errors
    ///
    /// Returns error if the push fails.
    pub async fn set_effect(&mut self, effect: Effect) -> Result<(), Error> {
        self.action.effect = effect;
        self.commit(Attribute::Effect).await
    }

    /// Sets the brightness (1-254).
    ///
    /// # Errors
    ///
    /// Returns error if the push fails.
    pub async fn set_brightness(&mut self, brightness: u8) -> Result<(), Error> {
        self.action.brightness = brightness;
        self.commit(Attribute::Brightness).await
    }

    /// Sets the hue (0-65535).
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::UnsupportedCapability` when the group has no
    /// color mode, or the push error.
    pub async fn set_hue(&mut self, hue: u16) -> Result<(), Error> {
        self.require_color()?;
        self.action.hue = hue;
        self.commit(Attribute::Hue).await
    }

    /// Sets the saturation (0-254).
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::UnsupportedCapability` when the group has no
    /// color mode, or the push error.
    pub async fn set_saturation(&mut self, saturation: u8) -> Result<(), Error> {
        self.require_color()?;
        self.action.saturation = saturation;
        self.commit(Attribute::Saturation).await
    }

    /// Sets the color temperature in mireds.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::UnsupportedCapability` when the group has no
    /// color mode, or the push error.
    pub async fn set_temperature(&mut self, temperature: u16) -> Result<(), Error> {
        self.require_color()?;
        self.action.temperature = temperature;
        self.commit(Attribute::Temperature).await
    }

    /// Sets the chromaticity coordinate.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::UnsupportedCapability` when the group has no
    /// color mode, or the push error.
    pub async fn set_xy(&mut self, xy: Xy) -> Result<(), Error> {
        self.require_color()?;
        self.action.xy = xy;
        self.commit(Attribute::Xy).await
    }

    /// Sets the color from RGB.
    ///
    /// Members may have different gamuts, so the conversion uses
    /// [`Gamut::DEFAULT`].
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::UnsupportedCapability` when the group has no
    /// color mode, or the push error.
    pub async fn set_rgb(&mut self, color: RgbColor) -> Result<(), Error> {
        self.set_xy(color.to_xy(&Gamut::DEFAULT)).await
    }

    /// Sets the color from a hex string such as `#FF8000`.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::UnsupportedCapability` when the group has no
    /// color mode, `ValueError::InvalidHexColor` for a malformed string, or
    /// the push error.
    pub async fn set_hex(&mut self, hex: &str) -> Result<(), Error> {
        self.require_color()?;
        let color = RgbColor::from_hex(hex)?;
        self.set_rgb(color).await
    }

    /// Pushes pending edits, or re-fetches the group if there are none.
    ///
    /// A re-fetch resolves membership again against the devices known when
    /// the group was loaded.
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

impl<T> Resource for Group<T> {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Group
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
        self.action.payload(&self.mask)
    }

    fn refresh(&mut self, value: Value) -> Result<(), Error> {
        self.apply(decode(value)?)
    }
}

impl<T> fmt::Debug for Group<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("group_type", &self.group_type)
            .field("class", &self.class)
            .field("action", &self.action)
            .field("any_on", &self.any_on)
            .field("all_on", &self.all_on)
            .field("lights", &self.lights.len())
            .field("controls", &self.controls.len())
            .field("sensors", &self.sensors.len())
            .field("mask", &self.mask)
            .field("manual", &self.manual)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ParseError, ValueError};
    use crate::protocol::Method;
    use crate::resource::{Device, shared};
    use crate::testing::{ScriptedTransport, synchronizer};
    use std::collections::HashMap;
    use std::sync::Arc;

    fn members(sync: &Synchronizer<ScriptedTransport>) -> Members<ScriptedTransport> {
        let light = json!({
            "name": "Ceiling",
            "uniqueid": "00:17:88:01:00:bd:c7:b9-0b",
            "type": "Extended color light",
            "modelid": "LCT015",
            "state": {"on": true, "bri": 254, "colormode": "ct", "reachable": true},
            "capabilities": {"control": {"maxlumen": 806}}
        });
        let plug = json!({
            "name": "Lamp plug",
            "uniqueid": "7c:b0:3e:aa:00:a3:65:5c-03",
            "type": "On/Off plug-in unit",
            "modelid": "Plug 01",
            "state": {"on": false, "reachable": true}
        });
        let sensor = json!({
            "name": "Dimmer",
            "type": "ZLLSwitch",
            "modelid": "RWL021",
            "state": {"buttonevent": 1002, "lastupdated": "none"},
            "config": {"on": true, "reachable": true, "battery": 100}
        });

        let mut lights = HashMap::new();
        let mut controls = HashMap::new();
        for (id, value) in [("1", light), ("2", plug)] {
            match Device::decode(id, value, sync).unwrap() {
                Device::Light(light) => {
                    lights.insert(id.to_string(), shared(light));
                }
                Device::Control(control) => {
                    controls.insert(id.to_string(), shared(control));
                }
            }
        }
        let mut sensors = HashMap::new();
        sensors.insert(
            "5".to_string(),
            shared(Sensor::decode("5", sensor, sync).unwrap()),
        );

        Members {
            lights: Arc::new(lights),
            controls: Arc::new(controls),
            sensors: Arc::new(sensors),
        }
    }

    fn room_json(lights: &[&str]) -> Value {
        json!({
            "name": "Living room",
            "type": "Room",
            "class": "Living room",
            "lights": lights,
            "sensors": ["5", "42"],
            "state": {"any_on": true, "all_on": false},
            "action": {"on": true, "bri": 254, "ct": 366, "alert": "none", "colormode": "ct"}
        })
    }

    fn room(transport: &Arc<ScriptedTransport>) -> Group<ScriptedTransport> {
        let sync = synchronizer(transport);
        Group::decode("3", room_json(&["1", "2", "9"]), &members(&sync), &sync).unwrap()
    }

    #[test]
    fn members_are_resolved_and_unknown_ids_dropped() {
        let group = room(&Arc::new(ScriptedTransport::new()));
        assert_eq!(group.name(), "Living room");
        assert_eq!(group.group_type(), GroupType::Room);
        assert_eq!(group.class(), Some(GroupClass::LivingRoom));
        assert_eq!(group.lights().len(), 1);
        assert_eq!(group.controls().len(), 1);
        assert_eq!(group.sensors().len(), 1);
        assert!(group.any_on());
        assert!(!group.all_on());
        assert_eq!(group.action().temperature(), 366);
    }

    #[test]
    fn members_alias_the_cached_records() {
        let sync = synchronizer(&Arc::new(ScriptedTransport::new()));
        let members = members(&sync);
        let group = Group::decode("3", room_json(&["1"]), &members, &sync).unwrap();
        assert!(Arc::ptr_eq(&group.lights()[0], &members.lights["1"]));
    }

    #[test]
    fn unknown_class_is_other() {
        let sync = synchronizer(&Arc::new(ScriptedTransport::new()));
        let mut value = room_json(&[]);
        value["class"] = json!("Sauna");
        let group = Group::decode("3", value, &members(&sync), &sync).unwrap();
        assert_eq!(group.class(), Some(GroupClass::Other));

        value = room_json(&[]);
        value.as_object_mut().unwrap().remove("class");
        let group = Group::decode("3", value, &members(&sync), &sync).unwrap();
        assert_eq!(group.class(), None);
    }

    #[test]
    fn unknown_type_is_rejected() {
        let sync = synchronizer(&Arc::new(ScriptedTransport::new()));
        let mut value = room_json(&[]);
        value["type"] = json!("Cluster");
        assert!(matches!(
            Group::decode("3", value, &members(&sync), &sync),
            Err(Error::Value(ValueError::InvalidVariant { kind: "group type", .. }))
        ));

        let mut value = room_json(&[]);
        value.as_object_mut().unwrap().remove("action");
        assert!(matches!(
            Group::decode("3", value, &members(&sync), &sync),
            Err(Error::Parse(ParseError::MissingField(field))) if field == "action"
        ));
    }

    #[tokio::test]
    async fn action_push_goes_to_the_action_resource() {
        let transport = Arc::new(ScriptedTransport::new());
        let mut group = room(&transport);
        group.set_manual(true);
        group.set_transition(Duration::from_millis(400));
        group.set_brightness(100).await.unwrap();
        group.off().await.unwrap();

        group.update().await.unwrap();

        let requests = transport.requests();
        assert_eq!(transport.paths(), ["PUT /groups/3/action"]);
        assert_eq!(
            requests[0].body,
            Some(json!({"on": false, "bri": 100, "transitiontime": 4}))
        );
        assert!(group.dirty().is_empty());
    }

    #[tokio::test]
    async fn rename_then_action() {
        let transport = Arc::new(ScriptedTransport::new());
        let mut group = room(&transport);
        group.set_manual(true);
        group.set_name("Lounge").await.unwrap();
        group.set_alert(Alert::Select).await.unwrap();

        group.update().await.unwrap();

        assert_eq!(transport.paths(), ["PUT /groups/3", "PUT /groups/3/action"]);
        assert_eq!(
            transport.requests()[0].body,
            Some(json!({"name": "Lounge"}))
        );
    }

    #[tokio::test]
    async fn color_setters_need_a_color_mode() {
        let transport = Arc::new(ScriptedTransport::new());
        let sync = synchronizer(&transport);
        let mut value = room_json(&[]);
        value["action"] = json!({"on": false, "bri": 1});
        let mut group = Group::decode("4", value, &members(&sync), &sync).unwrap();

        assert!(matches!(
            group.set_hex("#FF8000").await,
            Err(Error::Device(DeviceError::UnsupportedCapability { .. }))
        ));
        assert!(group.set_rgb(RgbColor::new(0, 0, 255)).await.is_err());
        assert!(group.dirty().is_empty());
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn rgb_uses_the_default_gamut() {
        let transport = Arc::new(ScriptedTransport::new());
        let mut group = room(&transport);
        let color = RgbColor::new(255, 128, 0);

        group.set_rgb(color).await.unwrap();

        assert_eq!(group.action().xy(), color.to_xy(&Gamut::DEFAULT));
        assert_eq!(transport.paths(), ["PUT /groups/3/action"]);
    }

    #[tokio::test]
    async fn refetch_relinks_members() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply(Method::Get, "/groups/3", room_json(&["2"]));
        let mut group = room(&transport);
        assert_eq!(group.lights().len(), 1);

        group.update().await.unwrap();

        assert!(group.lights().is_empty());
        assert_eq!(group.controls().len(), 1);
    }

    #[tokio::test]
    async fn all_group_keeps_its_type() {
        let transport = Arc::new(ScriptedTransport::new());
        let mut all_json = room_json(&["1", "2"]);
        all_json["type"] = json!("LightGroup");
        all_json.as_object_mut().unwrap().remove("class");
        transport.reply(Method::Get, "/groups/0", all_json.clone());
        let sync = synchronizer(&transport);
        let mut all = Group::decode("0", all_json, &members(&sync), &sync)
            .unwrap()
            .into_all();
        assert_eq!(all.group_type(), GroupType::All);

        all.update().await.unwrap();

        assert_eq!(all.group_type(), GroupType::All);
        assert_eq!(all.lights().len() + all.controls().len(), 2);
    }
}
