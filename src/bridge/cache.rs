// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-kind record maps and their population.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{Error, ParseError};
use crate::protocol::Transport;
use crate::resource::{
    ControlMap, Device, Group, GroupMap, LightMap, Members, ResourceKind, Sensor, SensorMap,
    Shared, shared,
};
use crate::response::wire::listing;
use crate::sync::Synchronizer;

/// Lights and controls, which share the `/lights` listing.
pub(crate) struct Devices<T> {
    pub(crate) lights: LightMap<T>,
    pub(crate) controls: ControlMap<T>,
}

impl<T> Clone for Devices<T> {
    fn clone(&self) -> Self {
        Self {
            lights: Arc::clone(&self.lights),
            controls: Arc::clone(&self.controls),
        }
    }
}

/// Records loaded so far. An absent kind is loaded on first access.
pub(crate) struct Cache<T> {
    pub(crate) devices: Option<Devices<T>>,
    pub(crate) sensors: Option<SensorMap<T>>,
    pub(crate) groups: Option<GroupMap<T>>,
    pub(crate) all: Option<Shared<Group<T>>>,
}

impl<T> Default for Cache<T> {
    fn default() -> Self {
        Self {
            devices: None,
            sensors: None,
            groups: None,
            all: None,
        }
    }
}

impl<T> Cache<T> {
    /// Drops every loaded kind.
    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}

impl<T: Transport> Cache<T> {
    /// Returns the lights and controls, loading them if needed.
    pub(crate) async fn devices(&mut self, sync: &Synchronizer<T>) -> Result<Devices<T>, Error> {
        if let Some(devices) = &self.devices {
            return Ok(devices.clone());
        }
        let devices = load_devices(sync).await?;
        self.devices = Some(devices.clone());
        Ok(devices)
    }

    /// Returns the sensors, loading them if needed.
    pub(crate) async fn sensors(&mut self, sync: &Synchronizer<T>) -> Result<SensorMap<T>, Error> {
        if let Some(sensors) = &self.sensors {
            return Ok(Arc::clone(sensors));
        }
        let sensors = load_sensors(sync).await?;
        self.sensors = Some(Arc::clone(&sensors));
        Ok(sensors)
    }

    /// Returns the groups, loading devices and sensors first if needed.
    pub(crate) async fn groups(&mut self, sync: &Synchronizer<T>) -> Result<GroupMap<T>, Error> {
        if let Some(groups) = &self.groups {
            return Ok(Arc::clone(groups));
        }
        let members = self.members(sync).await?;
        let groups = load_groups(sync, &members).await?;
        self.groups = Some(Arc::clone(&groups));
        Ok(groups)
    }

    /// Returns the group of every device, loading it if needed.
    pub(crate) async fn all(&mut self, sync: &Synchronizer<T>) -> Result<Shared<Group<T>>, Error> {
        if let Some(all) = &self.all {
            return Ok(Arc::clone(all));
        }
        let members = self.members(sync).await?;
        let value = sync.get("/groups/0").await?;
        let all = Group::decode("0", value, &members, sync)
            .map_err(entry_error(ResourceKind::Group, "0"))?
            .into_all();
        let all = shared(all);
        self.all = Some(Arc::clone(&all));
        Ok(all)
    }

    async fn members(&mut self, sync: &Synchronizer<T>) -> Result<Members<T>, Error> {
        let devices = self.devices(sync).await?;
        let sensors = self.sensors(sync).await?;
        Ok(Members {
            lights: devices.lights,
            controls: devices.controls,
            sensors,
        })
    }
}

async fn fetch_listing<T: Transport>(
    sync: &Synchronizer<T>,
    kind: ResourceKind,
) -> Result<serde_json::Map<String, Value>, Error> {
    let value = sync.get(&format!("/{}", kind.collection())).await?;
    Ok(listing(value)?)
}

async fn load_devices<T: Transport>(sync: &Synchronizer<T>) -> Result<Devices<T>, Error> {
    let mut lights = HashMap::new();
    let mut controls = HashMap::new();
    for (id, value) in fetch_listing(sync, ResourceKind::Light).await? {
        match Device::decode(&id, value, sync).map_err(entry_error(ResourceKind::Light, &id))? {
            Device::Light(light) => {
                lights.insert(id, shared(light));
            }
            Device::Control(control) => {
                controls.insert(id, shared(control));
            }
        }
    }
    tracing::info!(
        lights = lights.len(),
        controls = controls.len(),
        "Loaded lights and controls"
    );
    Ok(Devices {
        lights: Arc::new(lights),
        controls: Arc::new(controls),
    })
}

async fn load_sensors<T: Transport>(sync: &Synchronizer<T>) -> Result<SensorMap<T>, Error> {
    let mut sensors = HashMap::new();
    for (id, value) in fetch_listing(sync, ResourceKind::Sensor).await? {
        let sensor =
            Sensor::decode(&id, value, sync).map_err(entry_error(ResourceKind::Sensor, &id))?;
        sensors.insert(id, shared(sensor));
    }
    tracing::info!(sensors = sensors.len(), "Loaded sensors");
    Ok(Arc::new(sensors))
}

async fn load_groups<T: Transport>(
    sync: &Synchronizer<T>,
    members: &Members<T>,
) -> Result<GroupMap<T>, Error> {
    let mut groups = HashMap::new();
    for (id, value) in fetch_listing(sync, ResourceKind::Group).await? {
        let group = Group::decode(&id, value, members, sync)
            .map_err(entry_error(ResourceKind::Group, &id))?;
        groups.insert(id, shared(group));
    }
    tracing::info!(groups = groups.len(), "Loaded groups");
    Ok(Arc::new(groups))
}

fn entry_error(kind: ResourceKind, id: &str) -> impl FnOnce(Error) -> Error {
    let id = id.to_string();
    move |source| {
        ParseError::Resource {
            kind,
            id,
            source: Box::new(source),
        }
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Method;
    use crate::testing::{ScriptedTransport, synchronizer};
    use serde_json::json;

    fn scripted() -> Arc<ScriptedTransport> {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply(
            Method::Get,
            "/lights",
            json!({
                "1": {
                    "name": "Ceiling",
                    "uniqueid": "00:17:88:01:00:bd:c7:b9-0b",
                    "type": "Dimmable light",
                    "modelid": "LWB010",
                    "state": {"on": true, "bri": 254, "reachable": true},
                    "capabilities": {"control": {"maxlumen": 806}}
                },
                "2": {
                    "name": "Plug",
                    "uniqueid": "7c:b0:3e:aa:00:a3:65:5c-03",
                    "type": "On/Off plug-in unit",
                    "modelid": "Plug 01",
                    "state": {"on": false, "reachable": true}
                }
            }),
        );
        transport.reply(Method::Get, "/sensors", json!({}));
        transport.reply(
            Method::Get,
            "/groups",
            json!({
                "1": {
                    "name": "Hall",
                    "type": "Room",
                    "class": "Hallway",
                    "lights": ["1", "2"],
                    "action": {"on": true, "bri": 254}
                }
            }),
        );
        transport
    }

    #[tokio::test]
    async fn groups_load_members_first() {
        let transport = scripted();
        let sync = synchronizer(&transport);
        let mut cache = Cache::default();

        let groups = cache.groups(&sync).await.unwrap();

        assert_eq!(transport.paths(), ["GET /lights", "GET /sensors", "GET /groups"]);
        assert_eq!(groups.len(), 1);
        let devices = cache.devices.as_ref().unwrap();
        assert_eq!(devices.lights.len(), 1);
        assert_eq!(devices.controls.len(), 1);
        assert!(cache.sensors.as_ref().unwrap().is_empty());
    }

    #[tokio::test]
    async fn loaded_kinds_are_not_fetched_again() {
        let transport = scripted();
        let sync = synchronizer(&transport);
        let mut cache = Cache::default();

        cache.devices(&sync).await.unwrap();
        cache.groups(&sync).await.unwrap();
        cache.groups(&sync).await.unwrap();

        assert_eq!(transport.paths(), ["GET /lights", "GET /sensors", "GET /groups"]);
    }

    #[tokio::test]
    async fn failed_load_leaves_kind_absent() {
        let transport = scripted();
        transport.fail(Method::Get, "/sensors");
        let sync = synchronizer(&transport);
        let mut cache = Cache::default();

        assert!(matches!(cache.groups(&sync).await, Err(Error::Protocol(_))));
        assert!(cache.devices.is_some());
        assert!(cache.sensors.is_none());
        assert!(cache.groups.is_none());
    }

    #[tokio::test]
    async fn bad_entry_names_the_resource() {
        let transport = scripted();
        transport.reply(
            Method::Get,
            "/sensors",
            json!({"7": {"name": "Broken", "type": "ZLLSwitch", "modelid": "RWL021"}}),
        );
        let sync = synchronizer(&transport);
        let mut cache = Cache::default();

        let err = cache.sensors(&sync).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Parse(ParseError::Resource { kind: ResourceKind::Sensor, ref id, .. }) if id == "7"
        ));
    }

    #[tokio::test]
    async fn listing_must_be_an_object() {
        let transport = scripted();
        transport.reply(Method::Get, "/sensors", json!("nope"));
        let sync = synchronizer(&transport);
        let mut cache = Cache::default();

        assert!(matches!(
            cache.sensors(&sync).await,
            Err(Error::Parse(ParseError::UnexpectedFormat(_)))
        ));
    }
}
