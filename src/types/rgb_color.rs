// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RGB color type with hex parsing and chromaticity conversion.
//!
//! Bridges address color as a CIE 1931 xy point. This module converts
//! between that representation and the familiar 8-bit RGB and hex forms,
//! correcting results that fall outside a device's [`Gamut`].
//!
//! # Device Methods
//!
//! - [`Light::set_rgb()`](crate::resource::Light::set_rgb)
//! - [`Light::set_hex()`](crate::resource::Light::set_hex)

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

use super::{Gamut, Xy};

/// Linear RGB to XYZ (wide gamut, D65).
const RGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.664_511, 0.154_324, 0.162_028],
    [0.283_881, 0.668_433, 0.047_685],
    [0.000_088, 0.072_310, 0.986_039],
];

/// XYZ to linear RGB, the inverse of [`RGB_TO_XYZ`].
const XYZ_TO_RGB: [[f64; 3]; 3] = [
    [1.656_492, -0.354_851, -0.255_038],
    [-0.707_196, 1.655_397, 0.036_152],
    [0.051_713, -0.121_364, 1.011_530],
];

/// Chromaticity of RGB white under [`RGB_TO_XYZ`]; used for black.
const WHITE_POINT: Xy = Xy::new(0.322_727, 0.329_023);

/// RGB color with 8-bit channels (0-255).
///
/// # Examples
///
/// ```
/// use hue_bridge::types::{Gamut, RgbColor};
///
/// // Parse from hex string
/// let orange = RgbColor::from_hex("#FF8000").unwrap();
/// assert_eq!(orange, RgbColor::new(255, 128, 0));
/// assert_eq!(orange.to_hex_with_hash(), "#FF8000");
///
/// // Convert to a reachable chromaticity and back
/// let color = RgbColor::new(200, 150, 100);
/// let xy = color.to_xy(&Gamut::DEFAULT);
/// let back = RgbColor::from_xy(xy, color.luminance(), &Gamut::DEFAULT);
/// assert_eq!(back, color);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct RgbColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl RgbColor {
    /// Creates a new RGB color.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Parses an RGB color from a hex string.
    ///
    /// Accepts exactly six hex digits, optionally preceded by `#`. Digits
    /// are case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidHexColor` if the string is malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_bridge::types::RgbColor;
    ///
    /// assert_eq!(RgbColor::from_hex("ff8000"), RgbColor::from_hex("#FF8000"));
    /// assert!(RgbColor::from_hex("#FF80").is_err());
    /// assert!(RgbColor::from_hex("GG8000").is_err());
    /// ```
    pub fn from_hex(hex: &str) -> Result<Self, ValueError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ValueError::InvalidHexColor(hex.to_string()));
        }
        let r = parse_hex_pair(&digits[0..2], hex)?;
        let g = parse_hex_pair(&digits[2..4], hex)?;
        let b = parse_hex_pair(&digits[4..6], hex)?;
        Ok(Self::new(r, g, b))
    }

    /// Returns the red component.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Returns the green component.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Returns the blue component.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }

    /// Returns the color as a hex string without the hash prefix.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }

    /// Returns the color as a hex string with the hash prefix.
    #[must_use]
    pub fn to_hex_with_hash(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }

    /// Returns the relative luminance (CIE Y) of this color, in [0, 1].
    ///
    /// Passing it back to [`from_xy`](Self::from_xy) recovers the original
    /// brightness of an in-gamut color.
    #[must_use]
    pub fn luminance(&self) -> f64 {
        rgb_to_xyz(self.red, self.green, self.blue)[1]
    }

    /// Converts this color to the nearest chromaticity the gamut can show.
    ///
    /// Black has no chromaticity and maps to the white point.
    #[must_use]
    pub fn to_xy(&self, gamut: &Gamut) -> Xy {
        let [x, y, z] = rgb_to_xyz(self.red, self.green, self.blue);
        let sum = x + y + z;
        if sum <= 0.0 {
            return gamut.clamp(WHITE_POINT);
        }
        gamut.clamp(Xy::new(x / sum, y / sum))
    }

    /// Creates an RGB color from a chromaticity and reference luminance.
    ///
    /// The point is first moved inside the gamut. Channels that end up above
    /// full scale are normalized by the largest channel, which keeps the hue.
    #[must_use]
    pub fn from_xy(xy: Xy, luminance: f64, gamut: &Gamut) -> Self {
        let (r, g, b) = xy_to_rgb(gamut.clamp(xy), luminance);
        Self::new(r, g, b)
    }

    /// Creates a pure red color.
    #[must_use]
    pub const fn red_color() -> Self {
        Self::new(255, 0, 0)
    }

    /// Creates a pure green color.
    #[must_use]
    pub const fn green_color() -> Self {
        Self::new(0, 255, 0)
    }

    /// Creates a pure blue color.
    #[must_use]
    pub const fn blue_color() -> Self {
        Self::new(0, 0, 255)
    }

    /// Creates a white color.
    #[must_use]
    pub const fn white() -> Self {
        Self::new(255, 255, 255)
    }

    /// Creates a black color.
    #[must_use]
    pub const fn black() -> Self {
        Self::new(0, 0, 0)
    }
}

impl Default for RgbColor {
    fn default() -> Self {
        Self::white()
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex_with_hash())
    }
}

impl FromStr for RgbColor {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<&str> for RgbColor {
    type Error = ValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_hex(value)
    }
}

impl From<(u8, u8, u8)> for RgbColor {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::new(red, green, blue)
    }
}

fn parse_hex_pair(pair: &str, input: &str) -> Result<u8, ValueError> {
    u8::from_str_radix(pair, 16).map_err(|_| ValueError::InvalidHexColor(input.to_string()))
}

fn gamma_expand(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn gamma_compress(linear: f64) -> f64 {
    if linear <= 0.003_130_8 {
        12.92 * linear
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

fn multiply(matrix: [[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    matrix.map(|row| row[0] * v[0] + row[1] * v[1] + row[2] * v[2])
}

fn rgb_to_xyz(r: u8, g: u8, b: u8) -> [f64; 3] {
    multiply(
        RGB_TO_XYZ,
        [gamma_expand(r), gamma_expand(g), gamma_expand(b)],
    )
}

/// Converts a (gamut-corrected) chromaticity at luminance `l` to 8-bit RGB.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn xy_to_rgb(xy: Xy, l: f64) -> (u8, u8, u8) {
    if xy.y() <= 0.0 || l <= 0.0 {
        return (0, 0, 0);
    }
    let x = (l / xy.y()) * xy.x();
    let z = (l / xy.y()) * (1.0 - xy.x() - xy.y());
    let mut rgb = multiply(XYZ_TO_RGB, [x, l, z]).map(|c| gamma_compress(c).max(0.0));

    let max = rgb[0].max(rgb[1]).max(rgb[2]);
    if max > 1.0 {
        rgb = rgb.map(|c| c / max);
    }
    let [r, g, b] = rgb.map(|c| (c * 255.0).round().clamp(0.0, 255.0) as u8);
    (r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(expected: RgbColor, actual: RgbColor) {
        let diff = |a: u8, b: u8| a.abs_diff(b);
        assert!(
            diff(expected.red(), actual.red()) <= 2
                && diff(expected.green(), actual.green()) <= 2
                && diff(expected.blue(), actual.blue()) <= 2,
            "{expected} came back as {actual}"
        );
    }

    #[test]
    fn hex_variants_parse_identically() {
        let expected = RgbColor::new(255, 128, 0);
        assert_eq!(RgbColor::from_hex("#FF8000").unwrap(), expected);
        assert_eq!(RgbColor::from_hex("FF8000").unwrap(), expected);
        assert_eq!(RgbColor::from_hex("ff8000").unwrap(), expected);
    }

    #[test]
    fn hex_rejects_malformed_input() {
        for input in ["FF80", "#FF80000", "GG8000", "", "#", "##FF8000", "+F8000", "ÿÿÿ"] {
            assert_eq!(
                RgbColor::from_hex(input),
                Err(ValueError::InvalidHexColor(input.to_string())),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn rgb_to_hex() {
        let color = RgbColor::new(255, 128, 0);
        assert_eq!(color.to_hex(), "FF8000");
        assert_eq!(color.to_hex_with_hash(), "#FF8000");
        assert_eq!(RgbColor::new(0, 15, 255).to_hex(), "000FFF");
        assert_eq!(color.to_string(), "#FF8000");
    }

    #[test]
    fn rgb_conversions() {
        let color: RgbColor = "#00FF00".parse().unwrap();
        assert_eq!(color, RgbColor::green_color());
        let color: RgbColor = "0000ff".try_into().unwrap();
        assert_eq!(color, RgbColor::blue_color());
        let color: RgbColor = (255u8, 0u8, 0u8).into();
        assert_eq!(color, RgbColor::red_color());
        assert_eq!(RgbColor::default(), RgbColor::white());
    }

    #[test]
    fn white_maps_to_white_point() {
        let xy = RgbColor::white().to_xy(&Gamut::DEFAULT);
        assert!(xy.distance(WHITE_POINT) < 1e-4);
        assert!((RgbColor::white().luminance() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn black_has_a_defined_chromaticity() {
        let xy = RgbColor::black().to_xy(&Gamut::DEFAULT);
        assert!(xy.x().is_finite() && xy.y().is_finite());
        assert_eq!(
            RgbColor::from_xy(xy, 0.0, &Gamut::DEFAULT),
            RgbColor::black()
        );
    }

    #[test]
    fn to_xy_stays_inside_gamut() {
        let gamut = Gamut::DEFAULT;
        for color in [
            RgbColor::red_color(),
            RgbColor::green_color(),
            RgbColor::blue_color(),
            RgbColor::new(255, 128, 0),
        ] {
            let xy = color.to_xy(&gamut);
            assert!(
                gamut.contains(xy) || gamut.closest_point(xy).distance(xy) < 1e-9,
                "{color} mapped outside to {xy}"
            );
        }
    }

    #[test]
    fn in_gamut_colors_roundtrip() {
        let gamut = Gamut::DEFAULT;
        for original in [
            RgbColor::white(),
            RgbColor::new(10, 20, 30),
            RgbColor::new(128, 128, 128),
            RgbColor::new(200, 150, 100),
            RgbColor::new(120, 180, 200),
            RgbColor::new(255, 200, 150),
            RgbColor::new(60, 120, 90),
        ] {
            let xy = original.to_xy(&gamut);
            assert!(gamut.contains(xy), "{original} should be reachable");
            assert_close(original, RgbColor::from_xy(xy, original.luminance(), &gamut));
        }
    }

    #[test]
    fn primaries_roundtrip_in_full_gamut() {
        let gamut = Gamut::FULL;
        for original in [
            RgbColor::red_color(),
            RgbColor::green_color(),
            RgbColor::blue_color(),
            RgbColor::new(255, 255, 0),
            RgbColor::new(0, 255, 255),
            RgbColor::new(255, 0, 255),
        ] {
            let xy = original.to_xy(&gamut);
            assert_close(original, RgbColor::from_xy(xy, original.luminance(), &gamut));
        }
    }

    #[test]
    fn out_of_gamut_red_is_corrected() {
        let gamut = Gamut::DEFAULT;
        let red = RgbColor::red_color();
        let xy = red.to_xy(&gamut);
        assert!(xy.distance(gamut.red()) < 1e-3);

        // The device cannot show pure red, so green leaks in
        let shown = RgbColor::from_xy(xy, red.luminance(), &gamut);
        assert!(shown.red() > 240);
        assert!(shown.green() > 2);
    }

    #[test]
    fn bright_colors_are_normalized_by_max_channel() {
        let rgb = RgbColor::from_xy(Xy::new(0.6, 0.35), 1.0, &Gamut::DEFAULT);
        assert_eq!(rgb.red(), 255);
        assert!(rgb.green() < 255);
    }
}
