//! CAP transforms: symmetry operations that extend a base slice
//!
//! A CAP type names a set of components. The components are always applied
//! in one fixed order, because rotation and mirroring do not commute:
//!
//! ```text
//! rotate → mirror → swap → complement
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use ka_notation::{Location, MotionData, MotionPair, MotionType, RotationDirection};

/// One symmetry operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapComponent {
    /// Turn the grid by a fixed number of ring steps
    Rotated,
    /// Reflect across the north–south axis
    Mirrored,
    /// Exchange blue and red
    Swapped,
    /// Pro ↔ anti
    Complementary,
}

impl CapComponent {
    /// Canonical application order
    pub const ORDER: [CapComponent; 4] = [
        CapComponent::Rotated,
        CapComponent::Mirrored,
        CapComponent::Swapped,
        CapComponent::Complementary,
    ];
}

/// Named combination of CAP components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CapType {
    #[default]
    StrictRotated,
    StrictMirrored,
    StrictSwapped,
    StrictComplementary,
    MirroredSwapped,
    MirroredComplementary,
    RotatedSwapped,
    RotatedComplementary,
    SwappedComplementary,
    MirroredRotated,
    MirroredComplementaryRotated,
    RotatedSwappedComplementary,
    MirroredSwappedComplementary,
}

impl CapType {
    pub const ALL: [CapType; 13] = [
        CapType::StrictRotated,
        CapType::StrictMirrored,
        CapType::StrictSwapped,
        CapType::StrictComplementary,
        CapType::MirroredSwapped,
        CapType::MirroredComplementary,
        CapType::RotatedSwapped,
        CapType::RotatedComplementary,
        CapType::SwappedComplementary,
        CapType::MirroredRotated,
        CapType::MirroredComplementaryRotated,
        CapType::RotatedSwappedComplementary,
        CapType::MirroredSwappedComplementary,
    ];

    /// Active components, in canonical order
    pub fn components(self) -> &'static [CapComponent] {
        use CapComponent::*;
        match self {
            CapType::StrictRotated => &[Rotated],
            CapType::StrictMirrored => &[Mirrored],
            CapType::StrictSwapped => &[Swapped],
            CapType::StrictComplementary => &[Complementary],
            CapType::MirroredSwapped => &[Mirrored, Swapped],
            CapType::MirroredComplementary => &[Mirrored, Complementary],
            CapType::RotatedSwapped => &[Rotated, Swapped],
            CapType::RotatedComplementary => &[Rotated, Complementary],
            CapType::SwappedComplementary => &[Swapped, Complementary],
            CapType::MirroredRotated => &[Rotated, Mirrored],
            CapType::MirroredComplementaryRotated => &[Rotated, Mirrored, Complementary],
            CapType::RotatedSwappedComplementary => &[Rotated, Swapped, Complementary],
            CapType::MirroredSwappedComplementary => &[Mirrored, Swapped, Complementary],
        }
    }

    pub fn has(self, component: CapComponent) -> bool {
        self.components().contains(&component)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CapType::StrictRotated => "STRICT_ROTATED",
            CapType::StrictMirrored => "STRICT_MIRRORED",
            CapType::StrictSwapped => "STRICT_SWAPPED",
            CapType::StrictComplementary => "STRICT_COMPLEMENTARY",
            CapType::MirroredSwapped => "MIRRORED_SWAPPED",
            CapType::MirroredComplementary => "MIRRORED_COMPLEMENTARY",
            CapType::RotatedSwapped => "ROTATED_SWAPPED",
            CapType::RotatedComplementary => "ROTATED_COMPLEMENTARY",
            CapType::SwappedComplementary => "SWAPPED_COMPLEMENTARY",
            CapType::MirroredRotated => "MIRRORED_ROTATED",
            CapType::MirroredComplementaryRotated => "MIRRORED_COMPLEMENTARY_ROTATED",
            CapType::RotatedSwappedComplementary => "ROTATED_SWAPPED_COMPLEMENTARY",
            CapType::MirroredSwappedComplementary => "MIRRORED_SWAPPED_COMPLEMENTARY",
        }
    }
}

impl fmt::Display for CapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CapType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase().replace('-', "_");
        CapType::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| format!("unknown CAP type: {s}"))
    }
}

/// How much of the sequence the base slice covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SliceSize {
    #[default]
    Halved,
    Quartered,
}

impl SliceSize {
    /// Number of slice repeats making up the full sequence
    pub fn repeats(self) -> usize {
        match self {
            SliceSize::Halved => 2,
            SliceSize::Quartered => 4,
        }
    }

    /// Ring steps one rotation covers
    pub fn rotation_steps(self) -> i32 {
        8 / self.repeats() as i32
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// TRANSFORM
// ═══════════════════════════════════════════════════════════════════════════

/// The combined per-repeat transform of a CAP type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapTransform {
    cap_type: CapType,
    rotation_steps: i32,
}

impl CapTransform {
    pub fn new(cap_type: CapType, slice_size: SliceSize) -> Self {
        Self {
            cap_type,
            rotation_steps: slice_size.rotation_steps(),
        }
    }

    pub fn cap_type(&self) -> CapType {
        self.cap_type
    }

    /// Map a location pair (blue, red)
    pub fn apply_locations(&self, (blue, red): (Location, Location)) -> (Location, Location) {
        let mut pair = (blue, red);
        for component in self.cap_type.components() {
            pair = match component {
                CapComponent::Rotated => (
                    pair.0.rotated(self.rotation_steps),
                    pair.1.rotated(self.rotation_steps),
                ),
                CapComponent::Mirrored => (pair.0.mirrored(), pair.1.mirrored()),
                CapComponent::Swapped => (pair.1, pair.0),
                CapComponent::Complementary => pair,
            };
        }
        pair
    }

    /// Map a location pair `times` times
    pub fn apply_locations_n(&self, pair: (Location, Location), times: usize) -> (Location, Location) {
        (0..times).fold(pair, |p, _| self.apply_locations(p))
    }

    /// Map both motions of a beat
    ///
    /// End orientations are rederived; callers re-chain start orientations
    /// afterwards.
    pub fn apply(&self, motions: &MotionPair) -> MotionPair {
        let mut pair = motions.clone();
        for component in self.cap_type.components() {
            pair = match component {
                CapComponent::Rotated => pair.map(|m| rotate_motion(m, self.rotation_steps)),
                CapComponent::Mirrored => pair.map(mirror_motion),
                CapComponent::Swapped => pair.swapped(),
                CapComponent::Complementary => pair.map(complement_motion),
            };
        }
        pair
    }

    /// Map both motions `times` times
    pub fn apply_n(&self, motions: &MotionPair, times: usize) -> MotionPair {
        (0..times).fold(motions.clone(), |m, _| self.apply(&m))
    }
}

fn rotate_motion(motion: &MotionData, steps: i32) -> MotionData {
    let mut next = motion.clone();
    next.start_location = motion.start_location.rotated(steps);
    next.end_location = motion.end_location.rotated(steps);
    next.rederive()
}

fn mirror_motion(motion: &MotionData) -> MotionData {
    let mut next = motion.clone();
    next.start_location = motion.start_location.mirrored();
    next.end_location = motion.end_location.mirrored();
    next.prop_rotation_direction = motion.prop_rotation_direction.reversed();
    next.start_orientation = motion.start_orientation.mirrored();
    next.rederive()
}

fn complement_motion(motion: &MotionData) -> MotionData {
    match motion.motion_type {
        MotionType::Pro | MotionType::Anti => {
            let mut next = motion.clone();
            next.motion_type = motion.motion_type.complement();
            next.prop_rotation_direction = match motion.prop_rotation_direction {
                RotationDirection::NoRotation => RotationDirection::NoRotation,
                dir => dir.reversed(),
            };
            next.rederive()
        }
        _ => motion.clone(),
    }
}
