//! Pictograph catalog: every two-motion pictograph on a grid
//!
//! Each actor can make six motions from any grid point: a pro or anti
//! shift in either hand direction, a static or a dash. With sixteen start
//! pairs that gives 16 × 6 × 6 = 576 pictographs per grid, each labelled
//! with its letter and positions. The catalog carries no orientations or
//! turns; generation layers those on.

use std::collections::HashMap;

use ka_notation::{
    GridMode, LetterType, Location, MotionData, MotionType, Orientation, PictographData,
    RotationDirection,
};

use crate::grammar::{identify_letter, shift_target};
use crate::letters::classify_letter;
use crate::positions::position_label;

/// Motions one actor can make from a grid point
pub fn motion_options(start: Location) -> [MotionData; 6] {
    let shift = |motion_type, hand| {
        MotionData::shift(motion_type, start, shift_target(start, hand), Orientation::In)
    };
    [
        shift(MotionType::Pro, RotationDirection::Cw),
        shift(MotionType::Pro, RotationDirection::Ccw),
        shift(MotionType::Anti, RotationDirection::Cw),
        shift(MotionType::Anti, RotationDirection::Ccw),
        MotionData::static_at(start, Orientation::In),
        MotionData::dash_from(start, Orientation::In),
    ]
}

/// All pictographs of one grid, indexed by start locations
#[derive(Debug, Clone)]
pub struct PictographCatalog {
    grid_mode: GridMode,
    entries: Vec<PictographData>,
    by_start: HashMap<(Location, Location), Vec<usize>>,
}

impl PictographCatalog {
    /// Enumerate every pictograph of a grid
    pub fn build(grid_mode: GridMode) -> Self {
        let points = grid_mode.locations();
        let mut entries = Vec::with_capacity(points.len() * points.len() * 36);
        let mut by_start: HashMap<(Location, Location), Vec<usize>> = HashMap::new();

        for blue_start in points {
            for red_start in points {
                for blue in motion_options(blue_start) {
                    for red in motion_options(red_start) {
                        let Some(letter) = identify_letter(&blue, &red) else {
                            continue;
                        };
                        let start = position_label(blue.start_location, red.start_location);
                        let end = position_label(blue.end_location, red.end_location);
                        let id = format!("{}-{}", grid_mode, entries.len());
                        let pic = PictographData::new(id, blue.clone(), red)
                            .with_letter(letter)
                            .with_positions(start, end);

                        by_start
                            .entry((blue_start, red_start))
                            .or_default()
                            .push(entries.len());
                        entries.push(pic);
                    }
                }
            }
        }

        log::debug!("Built {} catalog with {} pictographs", grid_mode, entries.len());

        Self {
            grid_mode,
            entries,
            by_start,
        }
    }

    pub fn grid_mode(&self) -> GridMode {
        self.grid_mode
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn all(&self) -> &[PictographData] {
        &self.entries
    }

    /// Pictographs starting with blue at `blue` and red at `red`
    pub fn starting_at(&self, blue: Location, red: Location) -> Vec<&PictographData> {
        self.by_start
            .get(&(blue, red))
            .map(|indices| indices.iter().map(|&i| &self.entries[i]).collect())
            .unwrap_or_default()
    }

    /// Pictographs spelling a letter
    pub fn with_letter(&self, letter: &str) -> Vec<&PictographData> {
        self.entries
            .iter()
            .filter(|p| p.letter.as_deref() == Some(letter))
            .collect()
    }

    /// Pictographs whose letter belongs to one of `types`
    pub fn with_types(&self, types: &[LetterType]) -> Vec<&PictographData> {
        self.entries
            .iter()
            .filter(|p| types.contains(&classify_letter(p.letter_str())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use crate::letters::all_letters;

    #[test]
    fn test_catalog_size() {
        for grid in [GridMode::Diamond, GridMode::Box] {
            let catalog = PictographCatalog::build(grid);
            assert_eq!(catalog.len(), 576);
            assert_eq!(catalog.grid_mode(), grid);
            for blue in grid.locations() {
                for red in grid.locations() {
                    assert_eq!(catalog.starting_at(blue, red).len(), 36);
                }
            }
        }
    }

    #[test]
    fn test_every_letter_is_reachable() {
        let catalog = PictographCatalog::build(GridMode::Diamond);
        let letters: HashSet<&str> = catalog.all().iter().map(|p| p.letter_str()).collect();
        for letter in all_letters() {
            assert!(letters.contains(letter), "{letter} missing from catalog");
        }
    }

    #[test]
    fn test_entries_are_labelled() {
        let catalog = PictographCatalog::build(GridMode::Box);
        for pic in catalog.all() {
            assert!(pic.letter.is_some());
            assert!(pic.start_position.is_some());
            assert!(pic.end_position.is_some());
            assert_eq!(pic.grid_mode, GridMode::Box);
        }
        assert!(!catalog.with_letter("Λ-").is_empty());
        assert!(catalog.with_letter("nope").is_empty());
    }

    #[test]
    fn test_type_lookup() {
        let catalog = PictographCatalog::build(GridMode::Diamond);
        // Dual statics: one per start pair
        assert_eq!(catalog.with_types(&[LetterType::Type6]).len(), 16);
        // Dual dashes likewise
        assert_eq!(catalog.with_types(&[LetterType::Type5]).len(), 16);
        // Dual shifts: 4 × 4 per start pair
        assert_eq!(catalog.with_types(&[LetterType::Type1]).len(), 256);
    }
}
