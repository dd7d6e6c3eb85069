//! Sequence validity check
//!
//! Checks run in beat order and stop at the first violation:
//!
//! 1. Beat numbers count 1, 2, 3, ...
//! 2. Every non-blank beat has both motions and consistent end orientations
//! 3. Each beat starts where the previous one ended (beat 0 included)
//! 4. Optionally, the last beat ends on the start locations
//!
//! Blank beats are skipped by the continuity checks.

use ka_notation::{Actor, BeatData, BeatState, SequenceData};

use crate::error::SequenceViolation;

/// Validate a sequence, optionally requiring positional closure
pub fn validate_sequence(sequence: &SequenceData, require_closure: bool) -> Result<(), SequenceViolation> {
    let mut previous: Option<BeatState> = match &sequence.start_position {
        Some(start) => Some(check_beat(start)?),
        None => None,
    }
    .map(|(_, end)| end);

    let mut first_start: Option<BeatState> = previous;

    for (i, beat) in sequence.beats.iter().enumerate() {
        if beat.beat_number != i + 1 {
            return Err(SequenceViolation::NonContiguous {
                expected: i + 1,
                found: beat.beat_number,
            });
        }
        if beat.is_blank {
            continue;
        }

        let (start, end) = check_beat(beat)?;
        if let Some(prev) = previous {
            check_continuity(beat.beat_number, &prev, &start)?;
        }
        first_start.get_or_insert(start);
        previous = Some(end);
    }

    if require_closure {
        if let (Some(first), Some(last)) = (first_start, previous) {
            if first.locations() != last.locations() {
                return Err(SequenceViolation::NotClosed);
            }
        }
    }

    Ok(())
}

/// Start and end state of a beat, after checking its motions
fn check_beat(beat: &BeatData) -> Result<(BeatState, BeatState), SequenceViolation> {
    for actor in Actor::BOTH {
        let Some(motion) = beat.motions.get(actor) else {
            return Err(SequenceViolation::MissingMotion {
                beat: beat.beat_number,
            });
        };
        if !motion.is_consistent() {
            return Err(SequenceViolation::OrientationInvariant {
                beat: beat.beat_number,
                actor,
            });
        }
    }
    match (beat.start_state(), beat.end_state()) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(SequenceViolation::MissingMotion {
            beat: beat.beat_number,
        }),
    }
}

fn check_continuity(beat: usize, previous: &BeatState, current: &BeatState) -> Result<(), SequenceViolation> {
    let pairs = [
        (Actor::Blue, previous.blue_location, current.blue_location),
        (Actor::Red, previous.red_location, current.red_location),
    ];
    for (actor, was, now) in pairs {
        if was != now {
            return Err(SequenceViolation::LocationDiscontinuity { beat, actor });
        }
    }

    let orientations = [
        (Actor::Blue, previous.blue_orientation, current.blue_orientation),
        (Actor::Red, previous.red_orientation, current.red_orientation),
    ];
    for (actor, was, now) in orientations {
        if was != now {
            return Err(SequenceViolation::OrientationDiscontinuity { beat, actor });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ka_notation::{Location, MotionData, MotionType, Orientation, PictographData};

    use Location::{E, N, S, W};

    fn beat(blue: MotionData, red: MotionData) -> BeatData {
        BeatData::from_pictograph(1, &PictographData::new("t", blue, red))
    }

    fn start() -> BeatData {
        BeatData::start_position((N, Orientation::In), (S, Orientation::In), Some("alpha1".into()))
    }

    /// A then A again: N/S → E/W → S/N, pro keeps `in`
    fn two_as() -> SequenceData {
        SequenceData::new("t")
            .with_start_position(start())
            .add_beat(beat(
                MotionData::shift(MotionType::Pro, N, E, Orientation::In),
                MotionData::shift(MotionType::Pro, S, W, Orientation::In),
            ))
            .add_beat(beat(
                MotionData::shift(MotionType::Pro, E, S, Orientation::In),
                MotionData::shift(MotionType::Pro, W, N, Orientation::In),
            ))
    }

    #[test]
    fn test_valid_sequence_passes() {
        assert_eq!(validate_sequence(&two_as(), false), Ok(()));
    }

    #[test]
    fn test_closure_is_positional() {
        let seq = two_as();
        assert_eq!(validate_sequence(&seq, true), Err(SequenceViolation::NotClosed));

        let closed = seq
            .add_beat(beat(
                MotionData::shift(MotionType::Pro, S, W, Orientation::In),
                MotionData::shift(MotionType::Pro, N, E, Orientation::In),
            ))
            .add_beat(beat(
                MotionData::shift(MotionType::Pro, W, N, Orientation::In),
                MotionData::shift(MotionType::Pro, E, S, Orientation::In),
            ));
        assert_eq!(validate_sequence(&closed, true), Ok(()));
    }

    #[test]
    fn test_location_break_detected() {
        let seq = two_as()
            .update_beat(
                2,
                beat(
                    MotionData::static_at(W, Orientation::In),
                    MotionData::static_at(E, Orientation::In),
                ),
            )
            .unwrap();
        assert_eq!(
            validate_sequence(&seq, false),
            Err(SequenceViolation::LocationDiscontinuity {
                beat: 2,
                actor: Actor::Blue
            })
        );
    }

    #[test]
    fn test_orientation_break_detected() {
        let seq = two_as()
            .update_beat(
                2,
                beat(
                    MotionData::shift(MotionType::Pro, E, S, Orientation::Out),
                    MotionData::shift(MotionType::Pro, W, N, Orientation::In),
                ),
            )
            .unwrap();
        assert_eq!(
            validate_sequence(&seq, false),
            Err(SequenceViolation::OrientationDiscontinuity {
                beat: 2,
                actor: Actor::Blue
            })
        );
    }

    #[test]
    fn test_tampered_orientation_detected() {
        let mut seq = two_as();
        if let Some(red) = seq.beats[0].motions.red.as_mut() {
            red.end_orientation = Orientation::Clock;
        }
        assert_eq!(
            validate_sequence(&seq, false),
            Err(SequenceViolation::OrientationInvariant {
                beat: 1,
                actor: Actor::Red
            })
        );
    }

    #[test]
    fn test_numbering_and_missing_motion() {
        let mut seq = two_as();
        seq.beats[1].beat_number = 7;
        assert_eq!(
            validate_sequence(&seq, false),
            Err(SequenceViolation::NonContiguous { expected: 2, found: 7 })
        );

        let mut seq = two_as();
        seq.beats[0].motions.red = None;
        assert_eq!(
            validate_sequence(&seq, false),
            Err(SequenceViolation::MissingMotion { beat: 1 })
        );
    }

    #[test]
    fn test_blank_beats_are_skipped() {
        let seq = two_as().insert_beat(2, BeatData::blank(0)).unwrap();
        assert_eq!(validate_sequence(&seq, false), Ok(()));
    }
}
