// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `hue_bridge` - A Rust library mirroring and controlling a Hue bridge.
//!
//! The library keeps a local copy of the lights, outlets, sensors and groups
//! known to a bridge, and pushes local edits back through its REST API.
//!
//! # Features
//!
//! - **Records**: [`Light`], [`Control`] (outlets and other plain switches),
//!   [`Sensor`] and [`Group`], loaded lazily and shared between the cache and
//!   the groups that contain them
//! - **Dirty tracking**: only edited fields are sent, in at most two requests
//! - **Manual mode**: batch several edits into one push
//! - **Color**: RGB and hex colors converted to CIE xy and corrected into the
//!   gamut of each light
//!
//! # Quick Start
//!
//! ```no_run
//! use hue_bridge::{Bridge, Switchable};
//!
//! #[tokio::main]
//! async fn main() -> hue_bridge::Result<()> {
//!     let bridge = Bridge::http("192.168.1.2", "secret-key").build()?;
//!
//!     if let Some(light) = bridge.light_by_name("Desk").await? {
//!         let mut light = light.lock().await;
//!         light.on().await?;
//!         light.set_hex("#FF8000").await?;
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Batching edits
//!
//! ```no_run
//! use hue_bridge::Bridge;
//!
//! # async fn example() -> hue_bridge::Result<()> {
//! let bridge = Bridge::http("192.168.1.2", "secret-key").build()?;
//! if let Some(room) = bridge.group_by_name("Living room").await? {
//!     let mut room = room.lock().await;
//!     room.set_manual(true);
//!     room.set_name("Lounge").await?;
//!     room.set_brightness(80).await?;
//!
//!     // One write for the name, one for the action
//!     room.update().await?;
//! }
//! # Ok(())
//! # }
//! ```

mod bridge;
pub mod error;
pub mod protocol;
pub mod resource;
mod response;
pub mod state;
pub mod sync;
#[cfg(test)]
mod testing;
pub mod types;

#[cfg(feature = "http")]
pub use bridge::BridgeBuilder;
pub use bridge::Bridge;
pub use error::{DeviceError, Error, ParseError, ProtocolError, Result, ValueError};
#[cfg(feature = "http")]
pub use protocol::{HttpConfig, HttpTransport};
pub use protocol::{Method, Transport};
pub use resource::{Control, Device, DeviceInfo, Group, Light, Sensor, Shared, Startup, Switchable};
pub use state::{Attribute, ColorState, DirtyMask, LightState};
pub use sync::Synchronizer;
pub use types::{Alert, Effect, Gamut, GroupClass, GroupType, RgbColor, StartupMode, Xy};
