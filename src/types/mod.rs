// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for bridge resources.
//!
//! # Types
//!
//! - [`Xy`] - CIE 1931 chromaticity coordinate
//! - [`Gamut`] - Triangle of reproducible chromaticities
//! - [`RgbColor`] - 8-bit RGB color with hex and xy conversions
//! - [`Alert`] / [`Effect`] - Temporary alert and dynamic effect modes
//! - [`StartupMode`] - Power-on behavior
//! - [`GroupType`] / [`GroupClass`] - Group formation and room classification

mod effect;
mod gamut;
mod group_class;
mod rgb_color;
mod startup;
mod xy;

pub use effect::{Alert, Effect};
pub use gamut::Gamut;
pub use group_class::{GroupClass, GroupType};
pub use rgb_color::RgbColor;
pub use startup::StartupMode;
pub use xy::Xy;
