//! Orientation Calculator: end orientation of a prop after one motion
//!
//! A discrete state machine over the four orientations:
//!
//! 1. Whole turns flip the orientation within its pair depending on parity.
//!    Static, dash and pro flip on odd counts; anti flips on even counts
//!    (an anti shift with no turns already turns `in` into `out`).
//! 2. A trailing half turn then moves one quarter step to the other pair,
//!    around `in → counter → out → clock → in` for clockwise spin and the
//!    reverse cycle for counter-clockwise spin.
//!
//! Floating motions ignore both stages and resolve by spin direction alone.

use crate::taxonomy::{MotionType, Orientation, RotationDirection};
use crate::turns::Turns;

/// Compute the end orientation of a motion
///
/// Total over its domain: every combination of inputs yields an orientation.
/// A half turn without a spin direction follows the clockwise cycle.
pub fn calculate_end_orientation(
    motion_type: MotionType,
    turns: Turns,
    start: Orientation,
    rotation: RotationDirection,
) -> Orientation {
    if turns.is_float() || motion_type == MotionType::Float {
        return float_orientation(start, rotation);
    }

    let after_whole = whole_turn_orientation(motion_type, turns.integer_part(), start);

    if turns.has_half() {
        quarter_step(after_whole, rotation)
    } else {
        after_whole
    }
}

/// Stage 1: parity flip within the current pair
fn whole_turn_orientation(motion_type: MotionType, whole_turns: u32, start: Orientation) -> Orientation {
    let even = whole_turns % 2 == 0;
    let flip = match motion_type {
        MotionType::Static | MotionType::Dash => !even,
        MotionType::Pro | MotionType::Float => !even,
        MotionType::Anti => even,
    };

    if flip { start.flipped() } else { start }
}

/// Stage 2: cross from radial to rotational (or back) by one quarter step
fn quarter_step(orientation: Orientation, rotation: RotationDirection) -> Orientation {
    match rotation {
        RotationDirection::Ccw => match orientation {
            Orientation::In => Orientation::Clock,
            Orientation::Clock => Orientation::Out,
            Orientation::Out => Orientation::Counter,
            Orientation::Counter => Orientation::In,
        },
        RotationDirection::Cw | RotationDirection::NoRotation => match orientation {
            Orientation::In => Orientation::Counter,
            Orientation::Counter => Orientation::Out,
            Orientation::Out => Orientation::Clock,
            Orientation::Clock => Orientation::In,
        },
    }
}

/// Float lookup keyed only by spin direction
fn float_orientation(start: Orientation, rotation: RotationDirection) -> Orientation {
    match rotation {
        RotationDirection::Cw => Orientation::Clock,
        RotationDirection::Ccw => Orientation::Counter,
        RotationDirection::NoRotation => start,
    }
}
