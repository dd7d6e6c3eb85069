//! Beats: one timed slot of a sequence

use serde::{Deserialize, Serialize};

use crate::grid::{GridMode, Location};
use crate::motion::MotionData;
use crate::pictograph::{Actor, MotionPair, PictographData};
use crate::taxonomy::Orientation;

/// Per-actor reversal flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReversalFlags {
    #[serde(default)]
    pub blue: bool,
    #[serde(default)]
    pub red: bool,
}

impl ReversalFlags {
    pub fn get(&self, actor: Actor) -> bool {
        match actor {
            Actor::Blue => self.blue,
            Actor::Red => self.red,
        }
    }

    pub fn count(&self) -> u8 {
        self.blue as u8 + self.red as u8
    }
}

/// Location and orientation of both actors at a beat boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BeatState {
    pub blue_location: Location,
    pub red_location: Location,
    pub blue_orientation: Orientation,
    pub red_orientation: Orientation,
}

impl BeatState {
    pub fn locations(&self) -> (Location, Location) {
        (self.blue_location, self.red_location)
    }

    pub fn orientations(&self) -> (Orientation, Orientation) {
        (self.blue_orientation, self.red_orientation)
    }
}

/// One beat of a sequence
///
/// Beat 0 is the start-position pseudo-beat; real beats count from 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeatData {
    pub beat_number: usize,
    #[serde(default = "default_duration")]
    pub duration: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter: Option<String>,
    #[serde(default)]
    pub motions: MotionPair,
    #[serde(default)]
    pub reversals: ReversalFlags,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_position: Option<String>,
    #[serde(default)]
    pub is_blank: bool,
}

fn default_duration() -> f64 {
    1.0
}

impl BeatData {
    /// Build a beat from a pictograph
    pub fn from_pictograph(beat_number: usize, pictograph: &PictographData) -> Self {
        Self {
            beat_number,
            duration: default_duration(),
            letter: pictograph.letter.clone(),
            motions: pictograph.motions.clone(),
            reversals: ReversalFlags::default(),
            start_position: pictograph.start_position.clone(),
            end_position: pictograph.end_position.clone(),
            is_blank: pictograph.is_blank,
        }
    }

    /// Start-position pseudo-beat: both actors static at their locations
    pub fn start_position(
        blue: (Location, Orientation),
        red: (Location, Orientation),
        label: Option<String>,
    ) -> Self {
        Self {
            beat_number: 0,
            duration: 0.0,
            letter: None,
            motions: MotionPair::new(
                MotionData::static_at(blue.0, blue.1),
                MotionData::static_at(red.0, red.1),
            ),
            reversals: ReversalFlags::default(),
            start_position: label.clone(),
            end_position: label,
            is_blank: false,
        }
    }

    /// A blank beat
    pub fn blank(beat_number: usize) -> Self {
        Self {
            beat_number,
            duration: default_duration(),
            letter: None,
            motions: MotionPair::default(),
            reversals: ReversalFlags::default(),
            start_position: None,
            end_position: None,
            is_blank: true,
        }
    }

    /// View this beat as a pictograph
    pub fn to_pictograph(&self) -> PictographData {
        let grid_mode = self
            .motions
            .blue
            .as_ref()
            .map(|m| m.start_location.grid_mode())
            .unwrap_or(GridMode::Diamond);
        PictographData {
            id: format!("beat-{}", self.beat_number),
            motions: self.motions.clone(),
            letter: self.letter.clone(),
            start_position: self.start_position.clone(),
            end_position: self.end_position.clone(),
            grid_mode,
            is_blank: self.is_blank,
        }
    }

    pub fn with_number(mut self, beat_number: usize) -> Self {
        self.beat_number = beat_number;
        self
    }

    /// State before the motions run
    pub fn start_state(&self) -> Option<BeatState> {
        let (b, r) = self.motions.both()?;
        Some(BeatState {
            blue_location: b.start_location,
            red_location: r.start_location,
            blue_orientation: b.start_orientation,
            red_orientation: r.start_orientation,
        })
    }

    /// State after the motions run
    pub fn end_state(&self) -> Option<BeatState> {
        let (b, r) = self.motions.both()?;
        Some(BeatState {
            blue_location: b.end_location,
            red_location: r.end_location,
            blue_orientation: b.end_orientation,
            red_orientation: r.end_orientation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::MotionType;

    #[test]
    fn test_start_position_beat() {
        let beat = BeatData::start_position(
            (Location::N, Orientation::In),
            (Location::S, Orientation::Out),
            Some("alpha1".into()),
        );
        assert_eq!(beat.beat_number, 0);
        let end = beat.end_state().unwrap();
        assert_eq!(end.locations(), (Location::N, Location::S));
        assert_eq!(end.orientations(), (Orientation::In, Orientation::Out));
        assert_eq!(beat.start_state(), beat.end_state());
    }

    #[test]
    fn test_end_state_follows_motions() {
        let pic = PictographData::new(
            "b",
            MotionData::shift(MotionType::Anti, Location::N, Location::E, Orientation::In),
            MotionData::shift(MotionType::Anti, Location::S, Location::W, Orientation::In),
        )
        .with_letter("B");
        let beat = BeatData::from_pictograph(1, &pic);
        let end = beat.end_state().unwrap();
        assert_eq!(end.locations(), (Location::E, Location::W));
        assert_eq!(end.orientations(), (Orientation::Out, Orientation::Out));
        assert_eq!(beat.to_pictograph().letter.as_deref(), Some("B"));
    }

    #[test]
    fn test_blank_beat_has_no_state() {
        let beat = BeatData::blank(3);
        assert!(beat.is_blank);
        assert!(beat.start_state().is_none());
    }

    #[test]
    fn test_reversal_flag_count() {
        let flags = ReversalFlags { blue: true, red: false };
        assert_eq!(flags.count(), 1);
        assert!(flags.get(Actor::Blue));
        assert!(!flags.get(Actor::Red));
    }
}
