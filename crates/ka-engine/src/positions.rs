//! Grid position lookup
//!
//! A position names where both hands are relative to each other:
//!
//! - `beta`: both hands on the same point
//! - `alpha`: hands on opposite points
//! - `gamma`: hands 90° apart
//!
//! The number is the blue hand's ring index plus one. Gamma positions with
//! red counter-clockwise of blue add eight more, so every ordered pair on a
//! grid maps to a distinct label. Pairs with an odd ring distance mix the
//! two grids and have no label.

use ka_notation::{Location, PictographData, PositionGroup};

/// Group of a location pair
pub fn position_group(blue: Location, red: Location) -> Option<PositionGroup> {
    match blue.steps_to(red) {
        0 => Some(PositionGroup::Beta),
        4 => Some(PositionGroup::Alpha),
        2 | 6 => Some(PositionGroup::Gamma),
        _ => None,
    }
}

/// Position label of a location pair ("alpha1", "gamma11", ...)
pub fn position_label(blue: Location, red: Location) -> Option<String> {
    let base = blue.ring_index() + 1;
    match blue.steps_to(red) {
        0 => Some(format!("beta{base}")),
        4 => Some(format!("alpha{base}")),
        2 => Some(format!("gamma{base}")),
        6 => Some(format!("gamma{}", base + 8)),
        _ => None,
    }
}

/// Location pair for a label (inverse of [`position_label`])
pub fn locations_for_label(label: &str) -> Option<(Location, Location)> {
    let group = PositionGroup::from_label(label)?;
    let number: i32 = label.trim()[group.as_str().len()..].parse().ok()?;
    let (blue_index, steps) = match group {
        PositionGroup::Beta if (1..=8).contains(&number) => (number - 1, 0),
        PositionGroup::Alpha if (1..=8).contains(&number) => (number - 1, 4),
        PositionGroup::Gamma if (1..=8).contains(&number) => (number - 1, 2),
        PositionGroup::Gamma if (9..=16).contains(&number) => (number - 9, 6),
        _ => return None,
    };
    let blue = Location::from_ring_index(blue_index);
    Some((blue, blue.rotated(steps)))
}

/// Start position derived from the pictograph's motions
pub fn start_position(pictograph: &PictographData) -> Option<String> {
    let (blue, red) = pictograph.motions.start_locations()?;
    position_label(blue, red)
}

/// End position derived from the pictograph's motions
///
/// Falls back to the stored label when motions are missing.
pub fn end_position(pictograph: &PictographData) -> Option<String> {
    match pictograph.motions.end_locations() {
        Some((blue, red)) => position_label(blue, red),
        None => pictograph.end_position.clone(),
    }
}

/// End position group, derived by prefix from [`end_position`]
pub fn end_position_group(pictograph: &PictographData) -> Option<PositionGroup> {
    end_position(pictograph).as_deref().and_then(PositionGroup::from_label)
}
