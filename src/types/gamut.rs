// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Color gamut triangles.
//!
//! A light can only reproduce the chromaticities inside the triangle spanned
//! by its red, green and blue primaries. Colors outside the triangle are
//! moved to the nearest point on its boundary before they are sent.

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

use super::Xy;

/// Below this the triangle is considered to have no area.
const MIN_AREA: f64 = 1e-9;

/// The chromaticity triangle a device can physically display.
///
/// # Examples
///
/// ```
/// use hue_bridge::types::{Gamut, Xy};
///
/// let gamut = Gamut::DEFAULT;
/// assert!(gamut.contains(Xy::new(0.4, 0.4)));
///
/// // Far outside: projected onto the nearest edge
/// let origin = Xy::new(0.0, 0.0);
/// assert!(!gamut.contains(origin));
/// assert_eq!(gamut.clamp(origin), gamut.closest_point(origin));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[Xy; 3]", into = "[Xy; 3]")]
pub struct Gamut {
    red: Xy,
    green: Xy,
    blue: Xy,
}

impl Gamut {
    /// Triangle used when a device does not report its own.
    pub const DEFAULT: Self = Self {
        red: Xy::new(0.692, 0.308),
        green: Xy::new(0.17, 0.7),
        blue: Xy::new(0.153, 0.048),
    };

    /// Triangle spanned by the primaries of the RGB conversion matrix.
    ///
    /// Every 8-bit RGB color converts to a point inside it.
    pub const FULL: Self = Self {
        red: Xy::new(0.700_607, 0.299_301),
        green: Xy::new(0.172_416, 0.746_797),
        blue: Xy::new(0.135_503, 0.039_879),
    };

    /// Creates a gamut from its three vertices.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::DegenerateGamut` if two vertices coincide or all
    /// three lie on one line.
    pub fn new(red: Xy, green: Xy, blue: Xy) -> Result<Self, ValueError> {
        let area = green.sub(red).cross(blue.sub(red));
        if area.abs() < MIN_AREA {
            return Err(ValueError::DegenerateGamut);
        }
        Ok(Self { red, green, blue })
    }

    /// Returns the red vertex.
    #[must_use]
    pub const fn red(&self) -> Xy {
        self.red
    }

    /// Returns the green vertex.
    #[must_use]
    pub const fn green(&self) -> Xy {
        self.green
    }

    /// Returns the blue vertex.
    #[must_use]
    pub const fn blue(&self) -> Xy {
        self.blue
    }

    /// Returns `true` if the point lies inside the triangle or on its edges.
    #[must_use]
    pub fn contains(&self, point: Xy) -> bool {
        let a = self.green.sub(self.red);
        let b = self.blue.sub(self.red);
        let c = point.sub(self.red);
        let denominator = a.cross(b);
        let j = c.cross(b) / denominator;
        let k = a.cross(c) / denominator;
        j >= 0.0 && k >= 0.0 && j + k <= 1.0
    }

    /// Returns the point on the triangle's boundary nearest to `point`.
    #[must_use]
    pub fn closest_point(&self, point: Xy) -> Xy {
        [
            closest_on_segment(self.red, self.green, point),
            closest_on_segment(self.green, self.blue, point),
            closest_on_segment(self.blue, self.red, point),
        ]
        .into_iter()
        .min_by(|a, b| a.distance(point).total_cmp(&b.distance(point)))
        .unwrap_or(self.red)
    }

    /// Returns `point` if it is reachable, otherwise its nearest boundary point.
    #[must_use]
    pub fn clamp(&self, point: Xy) -> Xy {
        if self.contains(point) {
            point
        } else {
            self.closest_point(point)
        }
    }
}

impl Default for Gamut {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<[Xy; 3]> for Gamut {
    type Error = ValueError;

    fn try_from([red, green, blue]: [Xy; 3]) -> Result<Self, Self::Error> {
        Self::new(red, green, blue)
    }
}

impl From<Gamut> for [Xy; 3] {
    fn from(gamut: Gamut) -> Self {
        [gamut.red, gamut.green, gamut.blue]
    }
}

fn closest_on_segment(start: Xy, end: Xy, point: Xy) -> Xy {
    let direction = end.sub(start);
    let t = (point.sub(start).dot(direction) / direction.dot(direction)).clamp(0.0, 1.0);
    Xy::new(start.x() + direction.x() * t, start.y() + direction.y() * t)
}
