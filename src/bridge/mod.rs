// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entry point to a bridge.
//!
//! A [`Bridge`] loads each kind of record the first time it is asked for
//! and hands out shared handles to the cached records. Groups hold handles
//! to the same records, so an edit made through either is seen by both.
//!
//! Loading groups loads lights, controls and sensors first, in that order,
//! because group membership is resolved against them.

mod cache;

use std::fmt;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::Error;
use crate::protocol::Transport;
use crate::resource::{
    Control, ControlMap, Group, GroupMap, Light, LightMap, Sensor, SensorMap, Shared, Switchable,
};
use crate::sync::Synchronizer;

use cache::Cache;

#[cfg(feature = "http")]
use crate::protocol::{HttpConfig, HttpTransport};
#[cfg(feature = "http")]
use std::time::Duration;

/// A connection to a bridge and the records loaded from it.
///
/// # Lock discipline
///
/// Records are shared as `Arc<tokio::sync::Mutex<_>>`. The `*_by_name`
/// lookups lock each record of the kind in turn to read its name, so do not
/// call them while holding the lock of a record of that kind.
///
/// # Examples
///
/// ```no_run
/// use hue_bridge::{Bridge, Switchable};
///
/// # async fn example() -> hue_bridge::Result<()> {
/// let bridge = Bridge::http("192.168.1.2", "secret-key").build()?;
///
/// for light in bridge.lights().await?.values() {
///     let light = light.lock().await;
///     println!("{}: on={}", light.name(), light.is_on());
/// }
///
/// // Drop everything and load again
/// bridge.refresh().await?;
/// # Ok(())
/// # }
/// ```
pub struct Bridge<T> {
    sync: Synchronizer<T>,
    cache: RwLock<Cache<T>>,
}

impl<T> Bridge<T> {
    /// Creates a bridge talking through `transport`. Nothing is loaded yet.
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self {
            sync: Synchronizer::new(Arc::new(transport)),
            cache: RwLock::new(Cache::default()),
        }
    }

    /// Returns the transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        self.sync.transport()
    }
}

#[cfg(feature = "http")]
impl Bridge<HttpTransport> {
    /// Starts building a bridge reached over HTTP(S).
    ///
    /// # Arguments
    ///
    /// * `address` - Hostname or IP, optionally with scheme and port
    /// * `key` - The API key (bridge "username")
    pub fn http(address: impl AsRef<str>, key: impl Into<String>) -> BridgeBuilder {
        BridgeBuilder::new(HttpConfig::new(address, key))
    }

    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.transport().timeout()
    }

    /// Changes the request timeout. Zero disables it.
    pub fn set_timeout(&self, timeout: Duration) {
        self.transport().set_timeout(timeout);
    }
}

impl<T: Transport> Bridge<T> {
    /// Returns the light with the given ID.
    ///
    /// # Errors
    ///
    /// Returns error if the lights could not be loaded.
    pub async fn light(&self, id: &str) -> Result<Option<Shared<Light<T>>>, Error> {
        Ok(self.lights().await?.get(id).cloned())
    }

    /// Returns the control with the given ID.
    ///
    /// # Errors
    ///
    /// Returns error if the controls could not be loaded.
    pub async fn control(&self, id: &str) -> Result<Option<Shared<Control<T>>>, Error> {
        Ok(self.controls().await?.get(id).cloned())
    }

    /// Returns the sensor with the given ID.
    ///
    /// # Errors
    ///
    /// Returns error if the sensors could not be loaded.
    pub async fn sensor(&self, id: &str) -> Result<Option<Shared<Sensor<T>>>, Error> {
        Ok(self.sensors().await?.get(id).cloned())
    }

    /// Returns the group with the given ID.
    ///
    /// # Errors
    ///
    /// Returns error if the groups could not be loaded.
    pub async fn group(&self, id: &str) -> Result<Option<Shared<Group<T>>>, Error> {
        Ok(self.groups().await?.get(id).cloned())
    }

    /// Returns the first light whose name matches, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns error if the lights could not be loaded.
    pub async fn light_by_name(&self, name: &str) -> Result<Option<Shared<Light<T>>>, Error> {
        let lights = self.lights().await?;
        let name = name.to_lowercase();
        for light in lights.values() {
            if light.lock().await.name().to_lowercase() == name {
                return Ok(Some(Arc::clone(light)));
            }
        }
        Ok(None)
    }

    /// Returns the first control whose name matches, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns error if the controls could not be loaded.
    pub async fn control_by_name(&self, name: &str) -> Result<Option<Shared<Control<T>>>, Error> {
        let controls = self.controls().await?;
        let name = name.to_lowercase();
        for control in controls.values() {
            if control.lock().await.name().to_lowercase() == name {
                return Ok(Some(Arc::clone(control)));
            }
        }
        Ok(None)
    }

    /// Returns the first sensor whose name matches, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns error if the sensors could not be loaded.
    pub async fn sensor_by_name(&self, name: &str) -> Result<Option<Shared<Sensor<T>>>, Error> {
        let sensors = self.sensors().await?;
        let name = name.to_lowercase();
        for sensor in sensors.values() {
            if sensor.lock().await.name().to_lowercase() == name {
                return Ok(Some(Arc::clone(sensor)));
            }
        }
        Ok(None)
    }

    /// Returns the first group whose name matches, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns error if the groups could not be loaded.
    pub async fn group_by_name(&self, name: &str) -> Result<Option<Shared<Group<T>>>, Error> {
        let groups = self.groups().await?;
        let name = name.to_lowercase();
        for group in groups.values() {
            if group.lock().await.name().to_lowercase() == name {
                return Ok(Some(Arc::clone(group)));
            }
        }
        Ok(None)
    }

    /// Returns every light.
    ///
    /// # Errors
    ///
    /// Returns error if the lights could not be loaded.
    pub async fn lights(&self) -> Result<LightMap<T>, Error> {
        if let Some(devices) = &self.cache.read().await.devices {
            return Ok(Arc::clone(&devices.lights));
        }
        let mut cache = self.cache.write().await;
        Ok(cache.devices(&self.sync).await?.lights)
    }

    /// Returns every control.
    ///
    /// # Errors
    ///
    /// Returns error if the controls could not be loaded.
    pub async fn controls(&self) -> Result<ControlMap<T>, Error> {
        if let Some(devices) = &self.cache.read().await.devices {
            return Ok(Arc::clone(&devices.controls));
        }
        let mut cache = self.cache.write().await;
        Ok(cache.devices(&self.sync).await?.controls)
    }

    /// Returns every sensor.
    ///
    /// # Errors
    ///
    /// Returns error if the sensors could not be loaded.
    pub async fn sensors(&self) -> Result<SensorMap<T>, Error> {
        if let Some(sensors) = &self.cache.read().await.sensors {
            return Ok(Arc::clone(sensors));
        }
        let mut cache = self.cache.write().await;
        cache.sensors(&self.sync).await
    }

    /// Returns every group, loading lights, controls and sensors first.
    ///
    /// # Errors
    ///
    /// Returns error if any of the kinds could not be loaded.
    pub async fn groups(&self) -> Result<GroupMap<T>, Error> {
        if let Some(groups) = &self.cache.read().await.groups {
            return Ok(Arc::clone(groups));
        }
        let mut cache = self.cache.write().await;
        cache.groups(&self.sync).await
    }

    /// Returns the group containing every device.
    ///
    /// It is not part of [`groups`](Self::groups); its type is
    /// [`GroupType::All`](crate::types::GroupType::All).
    ///
    /// # Errors
    ///
    /// Returns error if the group or its members could not be loaded.
    pub async fn all(&self) -> Result<Shared<Group<T>>, Error> {
        if let Some(all) = &self.cache.read().await.all {
            return Ok(Arc::clone(all));
        }
        let mut cache = self.cache.write().await;
        cache.all(&self.sync).await
    }

    /// Returns the number of lights.
    ///
    /// # Errors
    ///
    /// Returns error if the lights could not be loaded.
    pub async fn light_count(&self) -> Result<usize, Error> {
        Ok(self.lights().await?.len())
    }

    /// Returns the number of controls.
    ///
    /// # Errors
    ///
    /// Returns error if the controls could not be loaded.
    pub async fn control_count(&self) -> Result<usize, Error> {
        Ok(self.controls().await?.len())
    }

    /// Returns the number of sensors.
    ///
    /// # Errors
    ///
    /// Returns error if the sensors could not be loaded.
    pub async fn sensor_count(&self) -> Result<usize, Error> {
        Ok(self.sensors().await?.len())
    }

    /// Drops every record and loads lights, controls, sensors and groups
    /// again.
    ///
    /// Handles obtained earlier stay usable but are no longer part of the
    /// cache. On error the kinds loaded before the failure are kept and the
    /// rest stay absent until next accessed.
    ///
    /// # Errors
    ///
    /// Returns the first loading error.
    pub async fn refresh(&self) -> Result<(), Error> {
        let mut cache = self.cache.write().await;
        cache.clear();
        cache.devices(&self.sync).await?;
        cache.sensors(&self.sync).await?;
        cache.groups(&self.sync).await?;
        Ok(())
    }
}

impl<T> fmt::Debug for Bridge<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bridge").finish_non_exhaustive()
    }
}

// ============================================================================
// BridgeBuilder
// ============================================================================

/// Builder for a bridge reached over HTTP(S).
///
/// # Examples
///
/// ```
/// use hue_bridge::Bridge;
/// use std::time::Duration;
///
/// let bridge = Bridge::http("192.168.1.2", "secret-key")
///     .with_timeout(Duration::from_secs(3))
///     .build()
///     .unwrap();
/// assert_eq!(bridge.timeout(), Duration::from_secs(3));
/// ```
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct BridgeBuilder {
    config: HttpConfig,
}

#[cfg(feature = "http")]
impl BridgeBuilder {
    pub(crate) fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Sets the request timeout. Zero disables it.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    /// Overrides the port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.config = self.config.with_port(port);
        self
    }

    /// Controls whether self-signed certificates are accepted.
    #[must_use]
    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.config = self.config.with_accept_invalid_certs(accept);
        self
    }

    /// Returns the configuration built so far.
    #[must_use]
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Creates the bridge. No request is made.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::InvalidAddress` for an unusable address, or
    /// `ProtocolError::Http` if the HTTP client cannot be created.
    pub fn build(self) -> Result<Bridge<HttpTransport>, Error> {
        let transport = self.config.into_transport()?;
        Ok(Bridge::new(transport))
    }
}
