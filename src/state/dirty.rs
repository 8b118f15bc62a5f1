// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tracking of local edits that have not reached the bridge yet.
//!
//! Every mutator on a resource inserts the [`Attribute`] it touched into the
//! record's [`DirtyMask`]. Synchronization reads the mask to decide what to
//! send and empties it only after the bridge confirmed the write.
//!
//! # Examples
//!
//! ```
//! use hue_bridge::state::{Attribute, DirtyMask};
//!
//! let mut mask = DirtyMask::new();
//! mask.insert(Attribute::Name);
//! mask.insert(Attribute::Brightness);
//!
//! assert!(mask.has_identity());
//! mask.clear_identity();
//! assert!(!mask.has_identity());
//! assert!(mask.contains(Attribute::Brightness));
//! ```

use std::collections::BTreeSet;
use std::fmt;

/// A settable attribute of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Attribute {
    /// Chromaticity coordinate.
    Xy,
    /// Power state.
    On,
    /// Color hue.
    Hue,
    /// Alert effect.
    Alert,
    /// Dynamic effect.
    Effect,
    /// Brightness level.
    Brightness,
    /// Color saturation.
    Saturation,
    /// Color temperature.
    Temperature,
    /// Display name.
    Name,
    /// Power-on behavior.
    Startup,
    /// Sensor LED indicator.
    Led,
}

impl Attribute {
    /// Returns `true` if the attribute is written to the resource root rather
    /// than to its state sub-resource.
    #[must_use]
    pub const fn is_identity(&self) -> bool {
        matches!(self, Self::Name | Self::Startup)
    }

    /// Returns the short name used in log output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Xy => "xy",
            Self::On => "on",
            Self::Hue => "hue",
            Self::Alert => "alert",
            Self::Effect => "effect",
            Self::Brightness => "bri",
            Self::Saturation => "sat",
            Self::Temperature => "ct",
            Self::Name => "name",
            Self::Startup => "startup",
            Self::Led => "ledindication",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of attributes edited locally since the last confirmed push.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirtyMask {
    attributes: BTreeSet<Attribute>,
}

impl DirtyMask {
    /// Creates an empty mask.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks an attribute as edited.
    pub fn insert(&mut self, attribute: Attribute) {
        self.attributes.insert(attribute);
    }

    /// Returns `true` if the attribute was edited.
    #[must_use]
    pub fn contains(&self, attribute: Attribute) -> bool {
        self.attributes.contains(&attribute)
    }

    /// Returns `true` if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Returns the number of pending attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns `true` if a name or startup edit is pending.
    #[must_use]
    pub fn has_identity(&self) -> bool {
        self.attributes.iter().any(Attribute::is_identity)
    }

    /// Removes the name and startup attributes.
    pub fn clear_identity(&mut self) {
        self.attributes.retain(|attribute| !attribute.is_identity());
    }

    /// Removes every attribute.
    pub fn clear(&mut self) {
        self.attributes.clear();
    }

    /// Iterates over the pending attributes in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = Attribute> + '_ {
        self.attributes.iter().copied()
    }
}

impl fmt::Display for DirtyMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, attribute) in self.attributes.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{attribute}")?;
        }
        f.write_str("]")
    }
}

impl FromIterator<Attribute> for DirtyMask {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        Self {
            attributes: iter.into_iter().collect(),
        }
    }
}

impl Extend<Attribute> for DirtyMask {
    fn extend<I: IntoIterator<Item = Attribute>>(&mut self, iter: I) {
        self.attributes.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_mask_is_clean() {
        let mask = DirtyMask::new();
        assert!(mask.is_empty());
        assert!(!mask.has_identity());
        assert_eq!(mask.len(), 0);
    }

    #[test]
    fn inserting_twice_keeps_one_entry() {
        let mut mask = DirtyMask::new();
        mask.insert(Attribute::Hue);
        mask.insert(Attribute::Hue);
        assert_eq!(mask.len(), 1);
    }

    #[test]
    fn identity_split() {
        let mut mask: DirtyMask = [Attribute::Name, Attribute::Startup, Attribute::On]
            .into_iter()
            .collect();
        assert!(mask.has_identity());

        mask.clear_identity();
        assert_eq!(mask.iter().collect::<Vec<_>>(), vec![Attribute::On]);

        mask.clear();
        assert!(mask.is_empty());
    }

    #[test]
    fn display_lists_wire_names() {
        let mask: DirtyMask = [Attribute::Saturation, Attribute::Brightness]
            .into_iter()
            .collect();
        assert_eq!(mask.to_string(), "[bri, sat]");
    }
}
