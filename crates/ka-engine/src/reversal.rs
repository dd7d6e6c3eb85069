//! Reversal Analyzer: rotation-direction discontinuities
//!
//! Four independent signals are combined by maximum, then capped at two:
//!
//! | signal   | source                                                  |
//! |----------|---------------------------------------------------------|
//! | blend    | pro+anti blend ≥ 1, "both" blend ≥ 2                    |
//! | path     | direction changes along an explicit hand path           |
//! | turns    | `floor(turns / 2)` once turns exceed one                |
//! | context  | 1 per actor whose spin differs from its last real spin  |

use rayon::prelude::*;

use ka_notation::{
    Actor, BeatData, MotionData, PathPoint, PictographData, ReversalFlags, RotationDirection,
};

/// Upper bound on any reversal count
pub const MAX_REVERSALS: u8 = 2;

/// Horizontal displacement below which a path segment is ignored
pub const PATH_THRESHOLD: f64 = 0.01;

/// Count reversals of a pictograph in the context of the beats before it
pub fn count_reversals(pictograph: &PictographData, preceding: &[BeatData]) -> u8 {
    let motion_signal = pictograph
        .motions
        .iter()
        .map(motion_reversals)
        .max()
        .unwrap_or(0);

    let context_signal = reversal_flags(pictograph, preceding).count();

    motion_signal.max(context_signal).min(MAX_REVERSALS)
}

/// Does the pictograph carry any reversal?
pub fn has_reversals(pictograph: &PictographData, preceding: &[BeatData]) -> bool {
    count_reversals(pictograph, preceding) > 0
}

/// Per-actor context flags: does this actor's spin reverse?
pub fn reversal_flags(pictograph: &PictographData, preceding: &[BeatData]) -> ReversalFlags {
    let flag = |actor: Actor| {
        let Some(current) = pictograph.motions.get(actor) else {
            return false;
        };
        if !current.prop_rotation_direction.is_rotating() {
            return false;
        }
        last_rotation(preceding, actor)
            .is_some_and(|previous| previous != current.prop_rotation_direction)
    };

    ReversalFlags {
        blue: flag(Actor::Blue),
        red: flag(Actor::Red),
    }
}

/// Reversal counts for a whole collection, in input order
pub fn precompute_reversals(pictographs: &[PictographData], preceding: &[BeatData]) -> Vec<u8> {
    pictographs
        .par_iter()
        .map(|p| count_reversals(p, preceding))
        .collect()
}

/// Nearest preceding real spin direction for an actor
fn last_rotation(preceding: &[BeatData], actor: Actor) -> Option<RotationDirection> {
    preceding
        .iter()
        .rev()
        .filter_map(|beat| beat.motions.get(actor))
        .map(|m| m.prop_rotation_direction)
        .find(|dir| dir.is_rotating())
}

/// Signals carried by a single motion
fn motion_reversals(motion: &MotionData) -> u8 {
    let blend = motion.blend.reversal_floor();
    let path = motion.path.as_deref().map(path_reversals).unwrap_or(0);
    let turns = turn_reversals(motion);
    blend.max(path).max(turns)
}

/// `floor(turns / 2)` for turns above one
fn turn_reversals(motion: &MotionData) -> u8 {
    match motion.turns.value() {
        Some(turns) if turns > 1.0 => (turns / 2.0).floor().min(MAX_REVERSALS as f64) as u8,
        _ => 0,
    }
}

/// Direction changes along a path, by sign of horizontal displacement
pub fn path_reversals(path: &[PathPoint]) -> u8 {
    let mut changes: u32 = 0;
    let mut previous: Option<bool> = None;

    for pair in path.windows(2) {
        let dx = pair[1].x - pair[0].x;
        if dx.abs() < PATH_THRESHOLD {
            continue;
        }
        let rightward = dx > 0.0;
        if previous.is_some_and(|p| p != rightward) {
            changes += 1;
        }
        previous = Some(rightward);
    }

    changes.min(MAX_REVERSALS as u32) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use ka_notation::{Location, MotionBlend, MotionType, Orientation, Turns};

    fn pic(blue: MotionData, red: MotionData) -> PictographData {
        PictographData::new("t", blue, red)
    }

    fn beat(blue: MotionData, red: MotionData) -> BeatData {
        BeatData::from_pictograph(1, &pic(blue, red))
    }

    fn pro(start: Location, end: Location) -> MotionData {
        MotionData::shift(MotionType::Pro, start, end, Orientation::In)
    }

    fn anti(start: Location, end: Location) -> MotionData {
        MotionData::shift(MotionType::Anti, start, end, Orientation::In)
    }

    fn stat(at: Location) -> MotionData {
        MotionData::static_at(at, Orientation::In)
    }

    #[test]
    fn test_empty_pictograph_has_none() {
        let empty: PictographData = serde_json::from_str(r#"{ "motions": {} }"#).unwrap();
        assert_eq!(count_reversals(&empty, &[]), 0);
        assert!(!has_reversals(&empty, &[]));
    }

    #[test]
    fn test_blend_floor() {
        let blended = pro(Location::N, Location::E).with_blend(MotionBlend::ProAnti);
        assert_eq!(count_reversals(&pic(blended, stat(Location::S)), &[]), 1);
        let both = pro(Location::N, Location::E).with_blend(MotionBlend::Both);
        assert_eq!(count_reversals(&pic(both, stat(Location::S)), &[]), 2);
    }

    #[test]
    fn test_path_changes() {
        let zigzag = vec![
            PathPoint::new(0.0, 0.0),
            PathPoint::new(1.0, 0.0),
            PathPoint::new(1.005, 1.0), // below threshold
            PathPoint::new(0.5, 1.0),
            PathPoint::new(0.9, 2.0),
        ];
        assert_eq!(path_reversals(&zigzag), 2);
        assert_eq!(path_reversals(&zigzag[..4]), 1);
        assert_eq!(path_reversals(&[]), 0);

        let motion = pro(Location::N, Location::E).with_path(zigzag[..4].to_vec());
        assert_eq!(count_reversals(&pic(motion, stat(Location::S)), &[]), 1);
    }

    #[test]
    fn test_turn_signal() {
        let one = pro(Location::N, Location::E).with_turns(Turns::whole(1));
        assert_eq!(count_reversals(&pic(one, stat(Location::S)), &[]), 0);
        let two = pro(Location::N, Location::E).with_turns(Turns::whole(2));
        assert_eq!(count_reversals(&pic(two, stat(Location::S)), &[]), 1);
        let lots = pro(Location::N, Location::E).with_turns(Turns::whole(9));
        assert_eq!(count_reversals(&pic(lots, stat(Location::S)), &[]), 2);
    }

    #[test]
    fn test_sequence_context_per_actor() {
        // Blue pro cw, red pro cw
        let history = vec![
            beat(pro(Location::N, Location::E), pro(Location::S, Location::W)),
            beat(stat(Location::E), stat(Location::W)),
        ];

        // Blue anti N→E spins ccw: reversal for blue only
        let current = pic(anti(Location::E, Location::S), pro(Location::W, Location::N));
        let flags = reversal_flags(&current, &history);
        assert!(flags.blue);
        assert!(!flags.red);
        assert_eq!(count_reversals(&current, &history), 1);

        // Both reverse
        let current = pic(anti(Location::E, Location::S), anti(Location::W, Location::N));
        assert_eq!(count_reversals(&current, &history), 2);

        // Without history nothing reverses
        assert_eq!(count_reversals(&current, &[]), 0);
    }

    #[test]
    fn test_bound_holds() {
        let both = pro(Location::N, Location::E)
            .with_blend(MotionBlend::Both)
            .with_turns(Turns::whole(10));
        let history = vec![beat(anti(Location::N, Location::E), anti(Location::S, Location::W))];
        let current = pic(both, pro(Location::S, Location::W));
        assert!(count_reversals(&current, &history) <= MAX_REVERSALS);

        let counts = precompute_reversals(&[current.clone(), current], &history);
        assert_eq!(counts, vec![2, 2]);
    }
}
