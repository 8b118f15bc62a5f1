// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dimmable and colored lights.

use std::time::Duration;

use crate::error::{DeviceError, Error};
use crate::protocol::Transport;
use crate::state::{Attribute, ColorState, LightState};
use crate::types::{Effect, Gamut, RgbColor, Xy};

use super::Startup;
use super::device::DeviceCore;
use super::switchable::delegate_switchable;

/// A light attached to the bridge.
///
/// Besides the [`Switchable`](super::Switchable) operations a light has
/// brightness, effects and, for color-capable lights, hue, saturation,
/// chromaticity and color temperature. Color setters fail with
/// `DeviceError::UnsupportedCapability` on lights that do not report a color
/// mode, without changing anything.
///
/// # Examples
///
/// ```no_run
/// use hue_bridge::{Bridge, Switchable};
///
/// # async fn example() -> hue_bridge::Result<()> {
/// let bridge = Bridge::http("192.168.1.2", "secret-key").build()?;
/// if let Some(light) = bridge.light_by_name("kitchen light").await? {
///     let mut light = light.lock().await;
///
///     // Batch two edits into one request
///     light.set_manual(true);
///     light.set_brightness(200).await?;
///     light.set_hex("#FF8000").await?;
///     light.update().await?;
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Light<T> {
    pub(crate) core: DeviceCore<T>,
    gamut: Gamut,
}

impl<T> Light<T> {
    pub(crate) fn new(core: DeviceCore<T>, gamut: Gamut) -> Self {
        Self { core, gamut }
    }

    /// Returns the full state snapshot.
    #[must_use]
    pub fn state(&self) -> &ColorState {
        &self.core.state
    }

    /// Returns the hue.
    #[must_use]
    pub fn hue(&self) -> u16 {
        self.core.state.hue
    }

    /// Returns the chromaticity coordinate.
    #[must_use]
    pub fn xy(&self) -> Xy {
        self.core.state.xy
    }

    /// Returns the brightness.
    #[must_use]
    pub fn brightness(&self) -> u8 {
        self.core.state.brightness
    }

    /// Returns the saturation.
    #[must_use]
    pub fn saturation(&self) -> u8 {
        self.core.state.saturation
    }

    /// Returns the color temperature in mireds.
    #[must_use]
    pub fn temperature(&self) -> u16 {
        self.core.state.temperature
    }

    /// Returns the active effect.
    #[must_use]
    pub fn effect(&self) -> Effect {
        self.core.state.effect
    }

    /// Returns `true` if the light supports color.
    #[must_use]
    pub fn is_color(&self) -> bool {
        self.core.state.color
    }

    /// Returns the transition time sent with every state change.
    #[must_use]
    pub fn transition(&self) -> Duration {
        self.core.state.transition()
    }

    /// Returns the gamut of the light.
    #[must_use]
    pub fn gamut(&self) -> Gamut {
        self.gamut
    }

    /// Returns the current color as RGB, using the brightness as luminance.
    #[must_use]
    pub fn rgb(&self) -> RgbColor {
        let luminance = f64::from(self.core.state.brightness) / 254.0;
        RgbColor::from_xy(self.core.state.xy, luminance, &self.gamut)
    }

    /// Returns the current color as a hex string without `#`.
    #[must_use]
    pub fn hex(&self) -> String {
        self.rgb().to_hex()
    }

    /// Sets the transition time used for later state changes.
    ///
    /// This only changes the local value; it is sent along with the next
    /// state push. Zero makes changes instantaneous.
    pub fn set_transition(&mut self, transition: Duration) {
        self.core.state.set_transition(transition);
    }

    fn require_color(&self) -> Result<(), Error> {
        if self.core.state.color {
            Ok(())
        } else {
            Err(DeviceError::no_color().into())
        }
    }
}

impl<T: Transport> Light<T> {
    /// Sets the brightness (1-254).
    ///
    /// # Errors
    ///
    /// Returns error if the push fails.
    pub async fn set_brightness(&mut self, brightness: u8) -> Result<(), Error> {
        self.core.state.brightness = brightness;
        self.core.commit(Attribute::Brightness).await
    }

    /// Sets the dynamic effect.
    ///
    /// # Errors
    ///
    /// Returns error if the push fails.
    pub async fn set_effect(&mut self, effect: Effect) -> Result<(), Error> {
        self.core.state.effect = effect;
        self.core.commit(Attribute::Effect).await
    }

    /// Sets the hue (0-65535).
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::UnsupportedCapability` for lights without color,
    /// or the push error.
    pub async fn set_hue(&mut self, hue: u16) -> Result<(), Error> {
        self.require_color()?;
        self.core.state.hue = hue;
        self.core.commit(Attribute::Hue).await
    }

    /// Sets the saturation (0-254).
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::UnsupportedCapability` for lights without color,
    /// or the push error.
    pub async fn set_saturation(&mut self, saturation: u8) -> Result<(), Error> {
        self.require_color()?;
        self.core.state.saturation = saturation;
        self.core.commit(Attribute::Saturation).await
    }

    /// Sets the color temperature in mireds.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::UnsupportedCapability` for lights without color,
    /// or the push error.
    pub async fn set_temperature(&mut self, temperature: u16) -> Result<(), Error> {
        self.require_color()?;
        self.core.state.temperature = temperature;
        self.core.commit(Attribute::Temperature).await
    }

    /// Sets the chromaticity coordinate.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::UnsupportedCapability` for lights without color,
    /// or the push error.
    pub async fn set_xy(&mut self, xy: Xy) -> Result<(), Error> {
        self.require_color()?;
        self.core.state.xy = xy;
        self.core.commit(Attribute::Xy).await
    }

    /// Sets the color from RGB, corrected into the light's gamut.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::UnsupportedCapability` for lights without color,
    /// or the push error.
    pub async fn set_rgb(&mut self, color: RgbColor) -> Result<(), Error> {
        self.require_color()?;
        self.set_xy(color.to_xy(&self.gamut)).await
    }

    /// Sets the color from a hex string such as `#FF8000` or `ff8000`.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::UnsupportedCapability` for lights without color,
    /// `ValueError::InvalidHexColor` for a malformed string, or the push error.
    pub async fn set_hex(&mut self, hex: &str) -> Result<(), Error> {
        self.require_color()?;
        let color = RgbColor::from_hex(hex)?;
        self.set_xy(color.to_xy(&self.gamut)).await
    }

    /// Makes the light restore `settings` when mains power returns.
    ///
    /// # Errors
    ///
    /// Returns error if the push fails.
    pub async fn set_custom_power_on(&mut self, settings: LightState) -> Result<(), Error> {
        self.core.startup = Startup::custom(settings);
        self.core.commit(Attribute::Startup).await
    }
}

delegate_switchable!(Light);
