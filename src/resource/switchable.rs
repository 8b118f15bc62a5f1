// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Operations common to lights and controls.

use crate::error::Error;
use crate::state::DirtyMask;
use crate::types::{Alert, StartupMode};

use super::{DeviceInfo, Startup};

/// Trait for devices that can be switched on and off.
///
/// Implemented by [`Light`](super::Light) and [`Control`](super::Control).
/// Every mutator stores the value locally and, unless the device is in
/// manual mode, pushes the pending edits to the bridge before returning.
///
/// # Examples
///
/// ```no_run
/// use hue_bridge::{Bridge, Switchable};
///
/// # async fn example() -> hue_bridge::Result<()> {
/// let bridge = Bridge::http("192.168.1.2", "secret-key").build()?;
/// if let Some(plug) = bridge.control_by_name("coffee maker").await? {
///     let mut plug = plug.lock().await;
///     plug.off().await?;
/// }
/// # Ok(())
/// # }
/// ```
#[allow(async_fn_in_trait)]
pub trait Switchable {
    /// Returns the bridge ID.
    fn id(&self) -> &str;

    /// Returns the display name.
    fn name(&self) -> &str;

    /// Returns manufacturer and model metadata.
    fn info(&self) -> &DeviceInfo;

    /// Returns `true` if the device is on.
    fn is_on(&self) -> bool;

    /// Returns the last alert sent.
    fn alert(&self) -> Alert;

    /// Returns `true` if the bridge can reach the device.
    fn is_reachable(&self) -> bool;

    /// Returns the power-on behavior.
    fn startup(&self) -> &Startup;

    /// Returns `true` if edits are held back until [`update`](Self::update).
    fn is_manual(&self) -> bool;

    /// Enables or disables manual mode.
    fn set_manual(&mut self, manual: bool);

    /// Returns the edits not yet confirmed by the bridge.
    fn dirty(&self) -> &DirtyMask;

    /// Switches the device on or off.
    ///
    /// # Errors
    ///
    /// Returns error if the push fails.
    async fn set_on(&mut self, on: bool) -> Result<(), Error>;

    /// Starts or stops an alert effect.
    ///
    /// # Errors
    ///
    /// Returns error if the push fails.
    async fn set_alert(&mut self, alert: Alert) -> Result<(), Error>;

    /// Changes the display name.
    ///
    /// # Errors
    ///
    /// Returns error if the push fails.
    async fn set_name(&mut self, name: &str) -> Result<(), Error>;

    /// Changes the power-on behavior.
    ///
    /// Not every device supports this; mostly first-party bulbs and plugs do.
    ///
    /// # Errors
    ///
    /// Returns error if the push fails.
    async fn set_startup(&mut self, mode: StartupMode) -> Result<(), Error>;

    /// Pushes pending edits, or re-fetches the device if there are none.
    ///
    /// # Errors
    ///
    /// Returns the error of the first request that failed.
    async fn update(&mut self) -> Result<(), Error>;

    /// Switches the device on.
    ///
    /// # Errors
    ///
    /// Returns error if the push fails.
    async fn on(&mut self) -> Result<(), Error> {
        self.set_on(true).await
    }

    /// Switches the device off.
    ///
    /// # Errors
    ///
    /// Returns error if the push fails.
    async fn off(&mut self) -> Result<(), Error> {
        self.set_on(false).await
    }
}

/// Implements [`Switchable`] by delegating to the record's `core`.
macro_rules! delegate_switchable {
    ($record:ident) => {
        impl<T: $crate::protocol::Transport> $crate::resource::Switchable for $record<T> {
            fn id(&self) -> &str {
                &self.core.id
            }

            fn name(&self) -> &str {
                &self.core.name
            }

            fn info(&self) -> &$crate::resource::DeviceInfo {
                &self.core.info
            }

            fn is_on(&self) -> bool {
                self.core.state.on
            }

            fn alert(&self) -> $crate::types::Alert {
                self.core.state.alert
            }

            fn is_reachable(&self) -> bool {
                self.core.state.reachable
            }

            fn startup(&self) -> &$crate::resource::Startup {
                &self.core.startup
            }

            fn is_manual(&self) -> bool {
                self.core.manual
            }

            fn set_manual(&mut self, manual: bool) {
                self.core.manual = manual;
            }

            fn dirty(&self) -> &$crate::state::DirtyMask {
                &self.core.mask
            }

            async fn set_on(&mut self, on: bool) -> Result<(), $crate::error::Error> {
                self.core.state.on = on;
                self.core.commit($crate::state::Attribute::On).await
            }

            async fn set_alert(
                &mut self,
                alert: $crate::types::Alert,
            ) -> Result<(), $crate::error::Error> {
                self.core.state.alert = alert;
                self.core.commit($crate::state::Attribute::Alert).await
            }

            async fn set_name(&mut self, name: &str) -> Result<(), $crate::error::Error> {
                self.core.name = name.to_string();
                self.core.commit($crate::state::Attribute::Name).await
            }

            async fn set_startup(
                &mut self,
                mode: $crate::types::StartupMode,
            ) -> Result<(), $crate::error::Error> {
                self.core.startup = $crate::resource::Startup::new(mode);
                self.core.commit($crate::state::Attribute::Startup).await
            }

            async fn update(&mut self) -> Result<(), $crate::error::Error> {
                self.core.update().await
            }
        }
    };
}

pub(crate) use delegate_switchable;
