//! Letter grammar: which letter a two-motion pictograph spells
//!
//! A letter is fixed by three things:
//!
//! 1. The kind of each hand's motion (shift, dash or static)
//! 2. The start and end position groups
//! 3. The pro/anti pattern of the shifting hands (floats count as pro)
//!
//! Orientations and turns never change the letter.

use ka_notation::{Location, MotionData, MotionType, PictographData, PositionGroup, RotationDirection};

use crate::positions::position_group;

/// Coarse motion kind used by the grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Shift,
    Dash,
    Static,
}

fn kind(motion: &MotionData) -> Kind {
    match motion.motion_type {
        MotionType::Static => Kind::Static,
        MotionType::Dash => Kind::Dash,
        MotionType::Pro | MotionType::Anti | MotionType::Float => Kind::Shift,
    }
}

/// Anti is the only "against the hand" shift
fn is_anti(motion: &MotionData) -> bool {
    motion.motion_type == MotionType::Anti
}

/// Does the motion travel the distance its kind implies?
fn travels_correctly(motion: &MotionData) -> bool {
    let steps = motion.start_location.steps_to(motion.end_location);
    match kind(motion) {
        Kind::Static => steps == 0,
        Kind::Dash => steps == 4,
        Kind::Shift => steps == 2 || steps == 6,
    }
}

/// Identify the letter spelled by a blue and red motion
///
/// Returns `None` when the pair is not a letter of the alphabet (mixed
/// grids, malformed travel).
pub fn identify_letter(blue: &MotionData, red: &MotionData) -> Option<&'static str> {
    if !travels_correctly(blue) || !travels_correctly(red) {
        return None;
    }
    let start = position_group(blue.start_location, red.start_location)?;
    let end = position_group(blue.end_location, red.end_location)?;

    use PositionGroup::{Alpha, Beta, Gamma};

    match (kind(blue), kind(red)) {
        (Kind::Shift, Kind::Shift) => {
            let triplet = match (is_anti(blue), is_anti(red)) {
                (false, false) => 0,
                (true, true) => 1,
                _ => 2,
            };
            let letters: &[&'static str] = match (start, end) {
                (Alpha, Alpha) => &["A", "B", "C"],
                (Beta, Alpha) => &["D", "E", "F"],
                (Beta, Beta) => &["G", "H", "I"],
                (Alpha, Beta) => &["J", "K", "L"],
                (Gamma, Gamma) => {
                    if blue.hand_rotation() == red.hand_rotation() {
                        &["M", "N", "O"]
                    } else if hands_swap(blue, red) {
                        &["P", "Q", "R"]
                    } else {
                        // Diverging hands split the mixed case by actor
                        return Some(match (is_anti(blue), is_anti(red)) {
                            (false, false) => "S",
                            (true, true) => "T",
                            (false, true) => "U",
                            (true, false) => "V",
                        });
                    }
                }
                _ => return None,
            };
            letters.get(triplet).copied()
        }
        (Kind::Shift, Kind::Static) => shift_letter(start, end, is_anti(blue), false),
        (Kind::Static, Kind::Shift) => shift_letter(start, end, is_anti(red), false),
        (Kind::Shift, Kind::Dash) => shift_letter(start, end, is_anti(blue), true),
        (Kind::Dash, Kind::Shift) => shift_letter(start, end, is_anti(red), true),
        (Kind::Dash, Kind::Static) | (Kind::Static, Kind::Dash) => match (start, end) {
            (Beta, Alpha) => Some("Φ"),
            (Alpha, Beta) => Some("Ψ"),
            (Gamma, Gamma) => Some("Λ"),
            _ => None,
        },
        (Kind::Dash, Kind::Dash) => match (start, end) {
            (Alpha, Alpha) => Some("Φ-"),
            (Beta, Beta) => Some("Ψ-"),
            (Gamma, Gamma) => Some("Λ-"),
            _ => None,
        },
        (Kind::Static, Kind::Static) => match (start, end) {
            (Alpha, Alpha) => Some("α"),
            (Beta, Beta) => Some("β"),
            (Gamma, Gamma) => Some("Γ"),
            _ => None,
        },
    }
}

/// One hand shifts while the other holds (static) or crosses (dash)
fn shift_letter(start: PositionGroup, end: PositionGroup, anti: bool, cross: bool) -> Option<&'static str> {
    use PositionGroup::{Alpha, Beta, Gamma};

    let pair: [&'static str; 2] = match (start, end, cross) {
        (Gamma, Alpha, false) => ["W", "X"],
        (Gamma, Beta, false) => ["Y", "Z"],
        (Alpha, Gamma, false) => ["Σ", "Δ"],
        (Beta, Gamma, false) => ["θ", "Ω"],
        (Gamma, Alpha, true) => ["W-", "X-"],
        (Gamma, Beta, true) => ["Y-", "Z-"],
        (Alpha, Gamma, true) => ["Σ-", "Δ-"],
        (Beta, Gamma, true) => ["θ-", "Ω-"],
        _ => return None,
    };
    Some(pair[anti as usize])
}

fn hands_swap(blue: &MotionData, red: &MotionData) -> bool {
    blue.end_location == red.start_location && red.end_location == blue.start_location
}

/// Letter of a pictograph, if both motions are present
pub fn identify_pictograph(pictograph: &PictographData) -> Option<&'static str> {
    let (blue, red) = pictograph.motions.both()?;
    identify_letter(blue, red)
}

/// Hand direction that a shift of `motion_type` needs to spin its prop
/// in `prop_rotation`
pub fn hand_direction_for(motion_type: MotionType, prop_rotation: RotationDirection) -> RotationDirection {
    match motion_type {
        MotionType::Anti => prop_rotation.reversed(),
        _ => prop_rotation,
    }
}

/// End location of a quarter shift from `start` in a hand direction
pub fn shift_target(start: Location, hand: RotationDirection) -> Location {
    match hand {
        RotationDirection::Cw => start.rotated(2),
        RotationDirection::Ccw => start.rotated(-2),
        RotationDirection::NoRotation => start,
    }
}
