// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CIE 1931 chromaticity coordinates.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A point on the CIE 1931 xy chromaticity diagram.
///
/// Chromaticity describes a color independently of its brightness. Both
/// coordinates lie in the unit square. On the wire the point is a two-element
/// array `[x, y]`.
///
/// # Examples
///
/// ```
/// use hue_bridge::types::Xy;
///
/// let white = Xy::new(0.3227, 0.329);
/// assert_eq!(white.x(), 0.3227);
/// assert_eq!(serde_json::to_string(&white).unwrap(), "[0.3227,0.329]");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Xy {
    x: f64,
    y: f64,
}

impl Xy {
    /// Creates a new chromaticity point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x coordinate.
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// Returns the y coordinate.
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(&self, other: Xy) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub(crate) fn sub(self, other: Xy) -> Xy {
        Xy::new(self.x - other.x, self.y - other.y)
    }

    pub(crate) fn cross(self, other: Xy) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub(crate) fn dot(self, other: Xy) -> f64 {
        self.x * other.x + self.y * other.y
    }
}

impl fmt::Display for Xy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.x, self.y)
    }
}

impl From<(f64, f64)> for Xy {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 2]> for Xy {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl Serialize for Xy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.x, self.y].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Xy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <[f64; 2]>::deserialize(deserializer).map(Self::from)
    }
}
