//! Pictographs: one snapshot of both actors' motions

use serde::{Deserialize, Serialize};

use crate::grid::{GridMode, Location};
use crate::motion::MotionData;

/// Which of the two actors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Actor {
    Blue,
    Red,
}

impl Actor {
    pub const BOTH: [Actor; 2] = [Actor::Blue, Actor::Red];
}

/// The blue and red motions of a pictograph or beat
///
/// Either may be absent on blank or partially specified records.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MotionPair {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blue: Option<MotionData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub red: Option<MotionData>,
}

impl MotionPair {
    pub fn new(blue: MotionData, red: MotionData) -> Self {
        Self {
            blue: Some(blue),
            red: Some(red),
        }
    }

    pub fn get(&self, actor: Actor) -> Option<&MotionData> {
        match actor {
            Actor::Blue => self.blue.as_ref(),
            Actor::Red => self.red.as_ref(),
        }
    }

    /// Both motions, if both are present
    pub fn both(&self) -> Option<(&MotionData, &MotionData)> {
        Some((self.blue.as_ref()?, self.red.as_ref()?))
    }

    pub fn iter(&self) -> impl Iterator<Item = &MotionData> {
        self.blue.iter().chain(self.red.iter())
    }

    /// Exchange the actors
    pub fn swapped(&self) -> Self {
        Self {
            blue: self.red.clone(),
            red: self.blue.clone(),
        }
    }

    /// Apply a transform to every present motion
    pub fn map(&self, f: impl Fn(&MotionData) -> MotionData) -> Self {
        Self {
            blue: self.blue.as_ref().map(&f),
            red: self.red.as_ref().map(&f),
        }
    }

    /// Start locations (blue, red)
    pub fn start_locations(&self) -> Option<(Location, Location)> {
        let (b, r) = self.both()?;
        Some((b.start_location, r.start_location))
    }

    /// End locations (blue, red)
    pub fn end_locations(&self) -> Option<(Location, Location)> {
        let (b, r) = self.both()?;
        Some((b.end_location, r.end_location))
    }
}

/// One symbolic snapshot of both actors for a single beat
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PictographData {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub motions: MotionPair,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_position: Option<String>,
    #[serde(default)]
    pub grid_mode: GridMode,
    #[serde(default)]
    pub is_blank: bool,
}

impl PictographData {
    pub fn new(id: impl Into<String>, blue: MotionData, red: MotionData) -> Self {
        let grid_mode = blue.start_location.grid_mode();
        Self {
            id: id.into(),
            motions: MotionPair::new(blue, red),
            letter: None,
            start_position: None,
            end_position: None,
            grid_mode,
            is_blank: false,
        }
    }

    /// A blank placeholder pictograph
    pub fn blank(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_blank: true,
            ..Default::default()
        }
    }

    pub fn with_letter(mut self, letter: impl Into<String>) -> Self {
        self.letter = Some(letter.into());
        self
    }

    pub fn with_positions(mut self, start: Option<String>, end: Option<String>) -> Self {
        self.start_position = start;
        self.end_position = end;
        self
    }

    /// Letter or empty string
    pub fn letter_str(&self) -> &str {
        self.letter.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::{MotionType, Orientation};

    #[test]
    fn test_empty_motions_parse() {
        let pic: PictographData = serde_json::from_str(r#"{ "motions": {} }"#).unwrap();
        assert!(pic.motions.blue.is_none());
        assert!(pic.motions.red.is_none());
        assert!(pic.motions.both().is_none());
        assert_eq!(pic.letter_str(), "");
    }

    #[test]
    fn test_swap_and_locations() {
        let blue = MotionData::shift(MotionType::Pro, Location::N, Location::E, Orientation::In);
        let red = MotionData::static_at(Location::S, Orientation::Out);
        let pair = MotionPair::new(blue, red);

        assert_eq!(pair.start_locations(), Some((Location::N, Location::S)));
        assert_eq!(pair.end_locations(), Some((Location::E, Location::S)));

        let swapped = pair.swapped();
        assert_eq!(swapped.start_locations(), Some((Location::S, Location::N)));
        assert_eq!(swapped.swapped(), pair);
    }

    #[test]
    fn test_grid_mode_inferred() {
        let pic = PictographData::new(
            "p1",
            MotionData::static_at(Location::NE, Orientation::In),
            MotionData::static_at(Location::SW, Orientation::In),
        );
        assert_eq!(pic.grid_mode, GridMode::Box);
    }
}
