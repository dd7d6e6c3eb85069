//! Motion records
//!
//! `MotionData` is an immutable value. Its end orientation is derived, not
//! stored: deserialization ignores any serialized value and recomputes it,
//! and every `with_*` transform recomputes it again.

use serde::{Deserialize, Serialize};

use crate::error::NotationError;
use crate::grid::Location;
use crate::orientation::calculate_end_orientation;
use crate::taxonomy::{MotionBlend, MotionType, Orientation, RotationDirection};
use crate::turns::Turns;

/// One point of an explicit hand path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
}

impl PathPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One actor's motion during a beat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawMotion")]
pub struct MotionData {
    pub motion_type: MotionType,
    /// Compound pattern split off the raw type string
    #[serde(default, skip_serializing_if = "is_single")]
    pub blend: MotionBlend,
    pub start_location: Location,
    pub end_location: Location,
    pub turns: Turns,
    pub prop_rotation_direction: RotationDirection,
    pub start_orientation: Orientation,
    pub end_orientation: Orientation,
    /// Optional explicit multi-point path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<PathPoint>>,
}

fn is_single(blend: &MotionBlend) -> bool {
    *blend == MotionBlend::Single
}

impl MotionData {
    /// Create a motion; the end orientation is computed
    pub fn new(
        motion_type: MotionType,
        start_location: Location,
        end_location: Location,
        turns: Turns,
        prop_rotation_direction: RotationDirection,
        start_orientation: Orientation,
    ) -> Self {
        Self {
            motion_type,
            blend: MotionBlend::Single,
            start_location,
            end_location,
            turns,
            prop_rotation_direction,
            start_orientation,
            end_orientation: calculate_end_orientation(
                motion_type,
                turns,
                start_orientation,
                prop_rotation_direction,
            ),
            path: None,
        }
    }

    /// Quarter shift with the prop spin implied by the motion type
    ///
    /// Pro spins with the hand path, anti against it.
    pub fn shift(motion_type: MotionType, start: Location, end: Location, start_ori: Orientation) -> Self {
        let hand = Location::hand_rotation(start, end);
        let spin = match motion_type {
            MotionType::Anti => hand.reversed(),
            _ => hand,
        };
        Self::new(motion_type, start, end, Turns::ZERO, spin, start_ori)
    }

    /// Hand stays at `location`
    pub fn static_at(location: Location, start_ori: Orientation) -> Self {
        Self::new(
            MotionType::Static,
            location,
            location,
            Turns::ZERO,
            RotationDirection::NoRotation,
            start_ori,
        )
    }

    /// Hand crosses to the opposite point
    pub fn dash_from(start: Location, start_ori: Orientation) -> Self {
        Self::new(
            MotionType::Dash,
            start,
            start.opposite(),
            Turns::ZERO,
            RotationDirection::NoRotation,
            start_ori,
        )
    }

    /// Parse and validate a JSON record
    pub fn from_json_str(json: &str) -> Result<Self, NotationError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Recompute the end orientation from the other fields
    pub fn rederive(mut self) -> Self {
        self.end_orientation = calculate_end_orientation(
            self.motion_type,
            self.turns,
            self.start_orientation,
            self.prop_rotation_direction,
        );
        self
    }

    pub fn with_start_orientation(mut self, orientation: Orientation) -> Self {
        self.start_orientation = orientation;
        self.rederive()
    }

    pub fn with_turns(mut self, turns: Turns) -> Self {
        self.turns = turns;
        self.rederive()
    }

    pub fn with_rotation(mut self, rotation: RotationDirection) -> Self {
        self.prop_rotation_direction = rotation;
        self.rederive()
    }

    pub fn with_path(mut self, path: Vec<PathPoint>) -> Self {
        self.path = Some(path);
        self
    }

    pub fn with_blend(mut self, blend: MotionBlend) -> Self {
        self.blend = blend;
        self
    }

    /// Convert a shift into a float travelling the same hand path
    pub fn into_float(mut self) -> Self {
        self.motion_type = MotionType::Float;
        self.turns = Turns::Float;
        self.prop_rotation_direction = self.hand_rotation();
        self.rederive()
    }

    /// Direction the hand travels (not the prop)
    pub fn hand_rotation(&self) -> RotationDirection {
        Location::hand_rotation(self.start_location, self.end_location)
    }

    /// Does the stored end orientation match the calculator?
    pub fn is_consistent(&self) -> bool {
        self.end_orientation
            == calculate_end_orientation(
                self.motion_type,
                self.turns,
                self.start_orientation,
                self.prop_rotation_direction,
            )
    }
}

/// Boundary form accepted from JSON before validation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMotion {
    motion_type: Option<String>,
    #[serde(default)]
    blend: Option<MotionBlend>,
    #[serde(alias = "startLoc")]
    start_location: Option<Location>,
    #[serde(alias = "endLoc")]
    end_location: Option<Location>,
    turns: Option<Turns>,
    #[serde(default, alias = "propRotDir")]
    prop_rotation_direction: Option<RotationDirection>,
    #[serde(default, alias = "startOri")]
    start_orientation: Option<String>,
    /// Accepted for compatibility, always recomputed
    #[serde(default, alias = "endOri")]
    #[allow(dead_code)]
    end_orientation: Option<String>,
    #[serde(default)]
    path: Option<Vec<PathPoint>>,
}

impl TryFrom<RawMotion> for MotionData {
    type Error = NotationError;

    fn try_from(raw: RawMotion) -> Result<Self, Self::Error> {
        let type_str = raw.motion_type.ok_or(NotationError::MissingField("motionType"))?;
        let start = raw
            .start_location
            .ok_or(NotationError::MissingField("startLocation"))?;
        let end = raw
            .end_location
            .ok_or(NotationError::MissingField("endLocation"))?;
        let turns = raw.turns.ok_or(NotationError::MissingField("turns"))?;

        let parsed_blend = MotionBlend::from_raw(&type_str);
        let motion_type = if parsed_blend == MotionBlend::Single {
            MotionType::parse_lossy(&type_str)
        } else {
            MotionBlend::base_type(&type_str)
        };

        let start_ori = raw
            .start_orientation
            .as_deref()
            .map(Orientation::parse_lossy)
            .unwrap_or_default();

        let motion = MotionData::new(
            motion_type,
            start,
            end,
            turns,
            raw.prop_rotation_direction.unwrap_or_default(),
            start_ori,
        )
        .with_blend(raw.blend.unwrap_or(parsed_blend));

        Ok(match raw.path {
            Some(path) => motion.with_path(path),
            None => motion,
        })
    }
}
