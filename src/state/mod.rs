// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state types.
//!
//! [`ColorState`] is the last-known state of a light, outlet or group action.
//! [`DirtyMask`] records which [`Attribute`]s were edited locally and still
//! need to be pushed. [`LightState`] stages settings that are not bound to a
//! device, such as a custom power-on state.

mod color_state;
mod dirty;
mod light_state;

pub use color_state::ColorState;
pub use dirty::{Attribute, DirtyMask};
pub use light_state::LightState;
