// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Records mirroring bridge resources.
//!
//! Every record keeps the last state received from the bridge, a
//! [`DirtyMask`] of local edits and a manual flag. Mutators write the new
//! value locally and, unless the record is in manual mode, push it right
//! away. In manual mode edits accumulate until `update` is called.
//!
//! # Record kinds
//!
//! - [`Light`] - Dimmable or colored light
//! - [`Control`] - Switchable device without light control, such as an outlet
//! - [`Sensor`] - Sensor or switch accessory
//! - [`Group`] - Room, zone or other group of devices
//!
//! Lights and controls share the operations of the [`Switchable`] trait.

mod control;
mod device;
mod group;
mod info;
mod light;
mod sensor;
mod switchable;

pub use control::Control;
pub use device::Device;
pub use group::Group;
pub use info::{DeviceInfo, Startup};
pub use light::Light;
pub use sensor::Sensor;
pub use switchable::Switchable;

pub(crate) use group::Members;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;

use crate::error::Error;
use crate::state::DirtyMask;

/// A record shared between the cache and the groups referencing it.
pub type Shared<R> = Arc<Mutex<R>>;

/// Lights by ID.
pub type LightMap<T> = Arc<HashMap<String, Shared<Light<T>>>>;

/// Controls by ID.
pub type ControlMap<T> = Arc<HashMap<String, Shared<Control<T>>>>;

/// Sensors by ID.
pub type SensorMap<T> = Arc<HashMap<String, Shared<Sensor<T>>>>;

/// Groups by ID.
pub type GroupMap<T> = Arc<HashMap<String, Shared<Group<T>>>>;

pub(crate) fn shared<R>(record: R) -> Shared<R> {
    Arc::new(Mutex::new(record))
}

/// Kind of a bridge resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// A light.
    Light,
    /// A switchable device without light control.
    Control,
    /// A sensor accessory.
    Sensor,
    /// A group.
    Group,
}

impl ResourceKind {
    /// Returns the collection the resource lives in.
    #[must_use]
    pub const fn collection(&self) -> &'static str {
        match self {
            Self::Light | Self::Control => "lights",
            Self::Sensor => "sensors",
            Self::Group => "groups",
        }
    }

    /// Returns the sub-resource that takes state writes.
    #[must_use]
    pub const fn state_resource(&self) -> &'static str {
        match self {
            Self::Light | Self::Control => "state",
            Self::Sensor => "config",
            Self::Group => "action",
        }
    }

    /// Returns the lowercase name of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Control => "control",
            Self::Sensor => "sensor",
            Self::Group => "group",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the synchronizer needs from a record.
pub(crate) trait Resource {
    fn kind(&self) -> ResourceKind;

    fn id(&self) -> &str;

    fn mask(&self) -> &DirtyMask;

    fn mask_mut(&mut self) -> &mut DirtyMask;

    /// Body for the resource root (name, startup behavior).
    fn identity_payload(&self) -> Value;

    /// Body for the state sub-resource.
    fn state_payload(&self) -> Value;

    /// Replaces the snapshot with a freshly fetched representation.
    fn refresh(&mut self, value: Value) -> Result<(), Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_paths() {
        assert_eq!(ResourceKind::Control.collection(), "lights");
        assert_eq!(ResourceKind::Sensor.state_resource(), "config");
        assert_eq!(ResourceKind::Group.state_resource(), "action");
        assert_eq!(ResourceKind::Light.to_string(), "light");
    }
}
