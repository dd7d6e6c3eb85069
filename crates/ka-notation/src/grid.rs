//! Grid model: the eight compass points and the two grid modes
//!
//! Locations sit on a fixed ring ordered clockwise from north:
//!
//! ```text
//!          N(0)
//!    NW(7)      NE(1)
//!  W(6)            E(2)
//!    SW(5)      SE(3)
//!          S(4)
//! ```
//!
//! Diamond grids use the cardinal points (even ring indices), box grids use
//! the intercardinal points (odd ring indices). All rotation and reflection
//! math is done on ring indices modulo 8.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NotationError;
use crate::taxonomy::RotationDirection;

/// Number of points on the location ring
pub const RING_SIZE: u8 = 8;

/// One of the eight compass locations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    #[serde(alias = "N")]
    N,
    #[serde(alias = "NE")]
    NE,
    #[serde(alias = "E")]
    E,
    #[serde(alias = "SE")]
    SE,
    #[serde(alias = "S")]
    S,
    #[serde(alias = "SW")]
    SW,
    #[serde(alias = "W")]
    W,
    #[serde(alias = "NW")]
    NW,
}

impl Location {
    /// All locations in clockwise ring order starting at north
    pub const ALL: [Location; 8] = [
        Location::N,
        Location::NE,
        Location::E,
        Location::SE,
        Location::S,
        Location::SW,
        Location::W,
        Location::NW,
    ];

    /// Position on the clockwise ring (N = 0)
    pub fn ring_index(self) -> u8 {
        self as u8
    }

    /// Location at a ring index (wraps modulo 8)
    pub fn from_ring_index(index: i32) -> Self {
        Self::ALL[index.rem_euclid(RING_SIZE as i32) as usize]
    }

    /// Rotate by a number of 45° ring steps (positive = clockwise)
    pub fn rotated(self, steps: i32) -> Self {
        Self::from_ring_index(self.ring_index() as i32 + steps)
    }

    /// The diametrically opposite location
    pub fn opposite(self) -> Self {
        self.rotated(4)
    }

    /// Reflection across the north–south axis (E ↔ W, NE ↔ NW, SE ↔ SW)
    pub fn mirrored(self) -> Self {
        Self::from_ring_index(RING_SIZE as i32 - self.ring_index() as i32)
    }

    /// Clockwise ring distance from `self` to `other` (0..8)
    pub fn steps_to(self, other: Location) -> u8 {
        (other.ring_index() + RING_SIZE - self.ring_index()) % RING_SIZE
    }

    /// Is this one of N, E, S, W?
    pub fn is_cardinal(self) -> bool {
        self.ring_index() % 2 == 0
    }

    /// Grid mode this location belongs to
    pub fn grid_mode(self) -> GridMode {
        if self.is_cardinal() {
            GridMode::Diamond
        } else {
            GridMode::Box
        }
    }

    /// Direction the hand travels around the ring going from `start` to `end`
    ///
    /// Quarter and eighth moves resolve to cw/ccw; staying put or crossing
    /// through the centre (a dash) has no rotational direction.
    pub fn hand_rotation(start: Location, end: Location) -> RotationDirection {
        match start.steps_to(end) {
            1..=3 => RotationDirection::Cw,
            5..=7 => RotationDirection::Ccw,
            _ => RotationDirection::NoRotation,
        }
    }

    /// Short uppercase label ("N", "NE", ...)
    pub fn as_str(self) -> &'static str {
        match self {
            Location::N => "N",
            Location::NE => "NE",
            Location::E => "E",
            Location::SE => "SE",
            Location::S => "S",
            Location::SW => "SW",
            Location::W => "W",
            Location::NW => "NW",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Location::ALL
            .iter()
            .copied()
            .find(|loc| loc.as_str() == upper)
            .ok_or_else(|| NotationError::UnknownLocation(s.to_string()))
    }
}

/// Grid mode (which four points of the ring are playable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridMode {
    /// Cardinal points N, E, S, W
    #[default]
    Diamond,
    /// Intercardinal points NE, SE, SW, NW
    Box,
}

impl GridMode {
    /// The four playable locations, clockwise
    pub fn locations(self) -> [Location; 4] {
        match self {
            GridMode::Diamond => [Location::N, Location::E, Location::S, Location::W],
            GridMode::Box => [Location::NE, Location::SE, Location::SW, Location::NW],
        }
    }

    /// Does this grid contain the location?
    pub fn contains(self, location: Location) -> bool {
        location.grid_mode() == self
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GridMode::Diamond => "diamond",
            GridMode::Box => "box",
        }
    }
}

impl fmt::Display for GridMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_rotation_wraps() {
        assert_eq!(Location::N.rotated(2), Location::E);
        assert_eq!(Location::W.rotated(2), Location::N);
        assert_eq!(Location::N.rotated(-2), Location::W);
        assert_eq!(Location::NE.rotated(8), Location::NE);
    }

    #[test]
    fn test_opposite_and_mirror() {
        assert_eq!(Location::N.opposite(), Location::S);
        assert_eq!(Location::NE.opposite(), Location::SW);

        assert_eq!(Location::E.mirrored(), Location::W);
        assert_eq!(Location::N.mirrored(), Location::N);
        assert_eq!(Location::S.mirrored(), Location::S);
        assert_eq!(Location::SE.mirrored(), Location::SW);
        for loc in Location::ALL {
            assert_eq!(loc.mirrored().mirrored(), loc);
        }
    }

    #[test]
    fn test_hand_rotation() {
        assert_eq!(Location::hand_rotation(Location::N, Location::E), RotationDirection::Cw);
        assert_eq!(Location::hand_rotation(Location::N, Location::W), RotationDirection::Ccw);
        assert_eq!(
            Location::hand_rotation(Location::N, Location::S),
            RotationDirection::NoRotation
        );
        assert_eq!(
            Location::hand_rotation(Location::E, Location::E),
            RotationDirection::NoRotation
        );
    }

    #[test]
    fn test_grid_membership() {
        assert!(GridMode::Diamond.contains(Location::S));
        assert!(!GridMode::Diamond.contains(Location::SE));
        assert!(GridMode::Box.locations().iter().all(|l| !l.is_cardinal()));
    }

    #[test]
    fn test_location_parse() {
        assert_eq!("ne".parse::<Location>().unwrap(), Location::NE);
        assert_eq!("S".parse::<Location>().unwrap(), Location::S);
        assert!("north".parse::<Location>().is_err());

        let loc: Location = serde_json::from_str("\"SW\"").unwrap();
        assert_eq!(loc, Location::SW);
        assert_eq!(serde_json::to_string(&Location::SW).unwrap(), "\"sw\"");
    }
}
