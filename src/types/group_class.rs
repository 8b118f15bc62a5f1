// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Group types and room classes.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// How a group was formed.
///
/// # Examples
///
/// ```
/// use hue_bridge::types::GroupType;
///
/// assert_eq!("Room".parse::<GroupType>().unwrap(), GroupType::Room);
/// assert_eq!(GroupType::LightSource.as_str(), "Lightsource");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GroupType {
    /// Bridge-created grouping of a multisource luminaire.
    Luminaire,
    /// Bridge-created group for the light sources of a luminaire.
    LightSource,
    /// User-created group of lights; the default type.
    #[default]
    LightGroup,
    /// Lights physically located in the same place. A light belongs to at
    /// most one room, and a room may be empty.
    Room,
    /// Lights used in an entertainment setup.
    Entertainment,
    /// Lights controlled together; a light may belong to many zones.
    Zone,
    /// The special group containing every device.
    All,
}

impl GroupType {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Luminaire => "Luminaire",
            Self::LightSource => "Lightsource",
            Self::LightGroup | Self::All => "LightGroup",
            Self::Room => "Room",
            Self::Entertainment => "Entertainment",
            Self::Zone => "Zone",
        }
    }
}

impl fmt::Display for GroupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            other => f.write_str(other.as_str()),
        }
    }
}

impl FromStr for GroupType {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "luminaire" => Ok(Self::Luminaire),
            "lightsource" => Ok(Self::LightSource),
            "lightgroup" => Ok(Self::LightGroup),
            "room" => Ok(Self::Room),
            "entertainment" => Ok(Self::Entertainment),
            "zone" => Ok(Self::Zone),
            _ => Err(ValueError::InvalidVariant {
                kind: "group type",
                value: s.to_string(),
            }),
        }
    }
}

/// Room classification of a group, used by apps to pick an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[allow(missing_docs)]
pub enum GroupClass {
    Attic,
    Balcony,
    Barbecue,
    Bathroom,
    Bedroom,
    Carport,
    Closet,
    Computer,
    Dining,
    Downstairs,
    Driveway,
    FrontDoor,
    Garage,
    Garden,
    GuestRoom,
    Gym,
    Hallway,
    Home,
    KidsBedroom,
    Kitchen,
    LaundryRoom,
    LivingRoom,
    Lounge,
    ManCave,
    Music,
    Nursery,
    Office,
    #[default]
    Other,
    Pool,
    Porch,
    Reading,
    Recreation,
    Staircase,
    Storage,
    Studio,
    Tv,
    Terrace,
    Toilet,
    TopFloor,
    Upstairs,
}

const CLASS_NAMES: [(GroupClass, &str); 40] = [
    (GroupClass::Attic, "Attic"),
    (GroupClass::Balcony, "Balcony"),
    (GroupClass::Barbecue, "Barbecue"),
    (GroupClass::Bathroom, "Bathroom"),
    (GroupClass::Bedroom, "Bedroom"),
    (GroupClass::Carport, "Carport"),
    (GroupClass::Closet, "Closet"),
    (GroupClass::Computer, "Computer"),
    (GroupClass::Dining, "Dining"),
    (GroupClass::Downstairs, "Downstairs"),
    (GroupClass::Driveway, "Driveway"),
    (GroupClass::FrontDoor, "Front door"),
    (GroupClass::Garage, "Garage"),
    (GroupClass::Garden, "Garden"),
    (GroupClass::GuestRoom, "Guest room"),
    (GroupClass::Gym, "Gym"),
    (GroupClass::Hallway, "Hallway"),
    (GroupClass::Home, "Home"),
    (GroupClass::KidsBedroom, "Kids bedroom"),
    (GroupClass::Kitchen, "Kitchen"),
    (GroupClass::LaundryRoom, "Laundry room"),
    (GroupClass::LivingRoom, "Living room"),
    (GroupClass::Lounge, "Lounge"),
    (GroupClass::ManCave, "Man cave"),
    (GroupClass::Music, "Music"),
    (GroupClass::Nursery, "Nursery"),
    (GroupClass::Office, "Office"),
    (GroupClass::Other, "Other"),
    (GroupClass::Pool, "Pool"),
    (GroupClass::Porch, "Porch"),
    (GroupClass::Reading, "Reading"),
    (GroupClass::Recreation, "Recreation"),
    (GroupClass::Staircase, "Staircase"),
    (GroupClass::Storage, "Storage"),
    (GroupClass::Studio, "Studio"),
    (GroupClass::Tv, "TV"),
    (GroupClass::Terrace, "Terrace"),
    (GroupClass::Toilet, "Toilet"),
    (GroupClass::TopFloor, "Top floor"),
    (GroupClass::Upstairs, "Upstairs"),
];

impl GroupClass {
    /// Returns the wire representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        CLASS_NAMES
            .iter()
            .find(|(class, _)| class == self)
            .map_or("Other", |(_, name)| name)
    }
}

impl fmt::Display for GroupClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupClass {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CLASS_NAMES
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(s))
            .map(|(class, _)| *class)
            .ok_or_else(|| ValueError::InvalidVariant {
                kind: "group class",
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_type_parsing() {
        assert_eq!(
            "Lightsource".parse::<GroupType>().unwrap(),
            GroupType::LightSource
        );
        assert_eq!(
            "Entertainment".parse::<GroupType>().unwrap(),
            GroupType::Entertainment
        );
        assert!("Building".parse::<GroupType>().is_err());
    }

    #[test]
    fn all_group_displays_distinctly() {
        assert_eq!(GroupType::All.as_str(), "LightGroup");
        assert_eq!(GroupType::All.to_string(), "All");
    }

    #[test]
    fn class_names_roundtrip() {
        for (class, name) in CLASS_NAMES {
            assert_eq!(class.as_str(), name);
            assert_eq!(name.parse::<GroupClass>().unwrap(), class);
        }
        assert_eq!(
            "living ROOM".parse::<GroupClass>().unwrap(),
            GroupClass::LivingRoom
        );
        assert!("Spaceship".parse::<GroupClass>().is_err());
    }
}
