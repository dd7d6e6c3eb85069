//! Sequence Generation Engine
//!
//! Two modes share one beat picker:
//!
//! - **Freeform** picks every beat from the catalog, restricted to the
//!   allowed letter types.
//! - **Circular** picks a base slice whose last beat lands on the CAP image
//!   of the start position, then appends transformed repeats of the slice.
//!
//! The search is a bounded loop. Each beat gets `max_attempts` draws in
//! freeform; each slice gets `max_attempts` restarts in circular mode.
//! Running out is reported as [`GenerationError::Exhausted`], never
//! papered over.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use ka_notation::{
    Actor, BeatData, BeatState, Location, MotionData, MotionPair, MotionType, Orientation,
    PictographData, RotationDirection, SequenceData, Turns,
};

use crate::cap::CapTransform;
use crate::catalog::PictographCatalog;
use crate::config::{GenerationConfig, GenerationMode, PropContinuity};
use crate::error::{GenerationError, Result};
use crate::loader::ConfigLimits;
use crate::grammar::identify_letter;
use crate::letters::classify_letter;
use crate::positions::position_label;
use crate::reversal::reversal_flags;
use crate::validate::validate_sequence;

/// Chance that a level-3 shift is turned into a float
const FLOAT_CHANCE: f64 = 0.2;

/// Per-actor spin locks for continuous prop continuity
#[derive(Debug, Clone, Copy, Default)]
struct SpinLocks {
    enabled: bool,
    blue: Option<RotationDirection>,
    red: Option<RotationDirection>,
}

impl SpinLocks {
    fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Default::default()
        }
    }

    fn get(&self, actor: Actor) -> Option<RotationDirection> {
        match actor {
            Actor::Blue => self.blue,
            Actor::Red => self.red,
        }
    }

    /// Would these motions break an established lock?
    fn permits(&self, motions: &MotionPair) -> bool {
        if !self.enabled {
            return true;
        }
        Actor::BOTH.iter().all(|&actor| {
            let Some(motion) = motions.get(actor) else {
                return true;
            };
            let dir = motion.prop_rotation_direction;
            !dir.is_rotating() || self.get(actor).is_none_or(|locked| locked == dir)
        })
    }

    fn record(&mut self, motions: &MotionPair) {
        if !self.enabled {
            return;
        }
        for actor in Actor::BOTH {
            let Some(motion) = motions.get(actor) else {
                continue;
            };
            let dir = motion.prop_rotation_direction;
            if dir.is_rotating() {
                let slot = match actor {
                    Actor::Blue => &mut self.blue,
                    Actor::Red => &mut self.red,
                };
                slot.get_or_insert(dir);
            }
        }
    }
}

/// Seeded sequence generator
pub struct SequenceGenerator {
    config: GenerationConfig,
    catalog: PictographCatalog,
    rng: ChaCha8Rng,
}

impl SequenceGenerator {
    /// Check the config invariants and build the catalog for its grid
    ///
    /// Size limits are left to whoever accepted the config (see
    /// [`ConfigLoader`](crate::loader::ConfigLoader)); use
    /// [`with_limits`](Self::with_limits) to enforce them here as well.
    pub fn new(config: GenerationConfig) -> Result<Self> {
        config.check_invariants()?;
        Ok(Self::build(config))
    }

    /// Validate the config against explicit limits, then build
    pub fn with_limits(config: GenerationConfig, limits: &ConfigLimits) -> Result<Self> {
        config.validate_with(limits)?;
        Ok(Self::build(config))
    }

    fn build(config: GenerationConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_os_rng(),
        };
        Self {
            catalog: PictographCatalog::build(config.grid_mode),
            config,
            rng,
        }
    }

    /// Reseed for reproducible results
    pub fn seed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn catalog(&self) -> &PictographCatalog {
        &self.catalog
    }

    /// Generate one validated sequence
    pub fn generate(&mut self) -> Result<SequenceData> {
        let start = self.random_start();
        let (beats, attempts) = match self.config.mode {
            GenerationMode::Freeform => self.generate_freeform(&start)?,
            GenerationMode::Circular => self.generate_circular(&start)?,
        };

        let mut sequence = SequenceData::from_beats("", Some(start), beats);
        sequence.name = sequence.word();
        let sequence = sequence
            .with_metadata("mode", serde_json::json!(self.config.mode))
            .with_metadata("level", serde_json::json!(self.config.level))
            .with_metadata("grid_mode", serde_json::json!(self.config.grid_mode))
            .with_metadata("prop_continuity", serde_json::json!(self.config.prop_continuity));
        let sequence = match self.config.mode {
            GenerationMode::Circular => sequence
                .with_metadata("cap_type", serde_json::json!(self.config.cap_type))
                .with_metadata("slice_size", serde_json::json!(self.config.slice_size)),
            GenerationMode::Freeform => sequence,
        };

        validate_sequence(&sequence, self.config.mode == GenerationMode::Circular)?;

        log::info!(
            "Generated {} sequence '{}' ({} beats, {} attempts)",
            match self.config.mode {
                GenerationMode::Freeform => "freeform",
                GenerationMode::Circular => "circular",
            },
            sequence.name,
            sequence.len(),
            attempts
        );
        Ok(sequence)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // MODES
    // ═══════════════════════════════════════════════════════════════════════════

    fn generate_freeform(&mut self, start: &BeatData) -> Result<(Vec<BeatData>, usize)> {
        let mut beats: Vec<BeatData> = Vec::with_capacity(self.config.length);
        let mut locks = SpinLocks::new(self.config.prop_continuity == PropContinuity::Continuous);
        let mut attempts = 0;

        for beat_number in 1..=self.config.length {
            let picked = self.pick_beat(beat_number, start, &beats, None, &mut locks, &mut attempts);
            match picked {
                Some(beat) => beats.push(beat),
                None => {
                    log::warn!("Freeform generation exhausted at beat {beat_number}");
                    return Err(exhausted(beat_number, start, beats, attempts));
                }
            }
        }
        Ok((beats, attempts))
    }

    fn generate_circular(&mut self, start: &BeatData) -> Result<(Vec<BeatData>, usize)> {
        let repeats = self.config.slice_size.repeats();
        let slice_len = self.config.slice_length();
        let transform = CapTransform::new(self.config.cap_type, self.config.slice_size);

        let start_state = state_of(start)?;
        let target = transform.apply_locations(start_state.locations());

        let mut attempts = 0;
        let mut failure = (1, Vec::new());

        for restart in 0..self.config.max_attempts {
            let mut locks = SpinLocks::new(self.config.prop_continuity == PropContinuity::Continuous);
            let mut slice: Vec<BeatData> = Vec::with_capacity(slice_len);

            for beat_number in 1..=slice_len {
                let goal = (beat_number == slice_len).then_some(target);
                match self.pick_beat(beat_number, start, &slice, goal, &mut locks, &mut attempts) {
                    Some(beat) => slice.push(beat),
                    None => break,
                }
            }

            if slice.len() == slice_len {
                let beats = self.extend_slice(start, &slice, &transform, repeats)?;
                // Repeats re-spell their letters, so exclusions are checked again
                match beats.iter().position(|b| self.is_excluded(b.letter.as_deref())) {
                    None => {
                        log::debug!("Base slice found after {} restarts", restart);
                        return Ok((beats, attempts));
                    }
                    Some(i) => {
                        log::debug!("Repeat beat {} spells an excluded letter, restarting", i + 1);
                        if i + 1 >= failure.0 {
                            failure = (i + 1, beats[..i].to_vec());
                        }
                        continue;
                    }
                }
            }
            if slice.len() + 1 >= failure.0 {
                failure = (slice.len() + 1, slice);
            }
        }

        log::warn!(
            "Circular generation exhausted after {} slice restarts",
            self.config.max_attempts
        );
        let (beat_index, partial) = failure;
        Err(exhausted(beat_index, start, partial, attempts))
    }

    /// Append `repeats - 1` transformed copies of the slice and re-chain
    /// orientations, letters and reversal flags from the start position
    fn extend_slice(
        &self,
        start: &BeatData,
        slice: &[BeatData],
        transform: &CapTransform,
        repeats: usize,
    ) -> Result<Vec<BeatData>> {
        let mut beats: Vec<BeatData> = Vec::with_capacity(slice.len() * repeats);
        let mut previous = state_of(start)?;

        for k in 0..repeats {
            for beat in slice {
                let motions = transform.apply_n(&beat.motions, k);
                let next = self.assemble(beats.len() + 1, motions, &previous, start, &beats);
                previous = state_of(&next)?;
                beats.push(next);
            }
        }
        Ok(beats)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // BEAT PICKING
    // ═══════════════════════════════════════════════════════════════════════════

    /// Pick one beat continuing from the last beat (or the start position)
    fn pick_beat(
        &mut self,
        beat_number: usize,
        start: &BeatData,
        preceding: &[BeatData],
        goal: Option<(Location, Location)>,
        locks: &mut SpinLocks,
        attempts: &mut usize,
    ) -> Option<BeatData> {
        let previous = preceding
            .last()
            .and_then(BeatData::end_state)
            .or_else(|| start.end_state())?;

        let candidates: Vec<PictographData> = self
            .catalog
            .starting_at(previous.blue_location, previous.red_location)
            .into_iter()
            .filter(|p| self.letter_allowed(p))
            .filter(|p| goal.is_none_or(|g| p.motions.end_locations() == Some(g)))
            .cloned()
            .collect();

        if candidates.is_empty() {
            *attempts += 1;
            return None;
        }

        for _ in 0..self.config.max_attempts {
            *attempts += 1;
            let pick = candidates[self.rng.random_range(0..candidates.len())].motions.clone();
            let dressed = MotionPair {
                blue: pick.blue.map(|m| self.dress(m, locks.get(Actor::Blue))),
                red: pick.red.map(|m| self.dress(m, locks.get(Actor::Red))),
            };
            if locks.permits(&dressed) {
                locks.record(&dressed);
                return Some(self.assemble(beat_number, dressed, &previous, start, preceding));
            }
        }
        None
    }

    fn is_excluded(&self, letter: Option<&str>) -> bool {
        letter.is_some_and(|letter| self.config.excluded_letters.iter().any(|l| l == letter))
    }

    /// Is the catalog entry's letter usable under the config?
    fn letter_allowed(&self, pictograph: &PictographData) -> bool {
        let letter = pictograph.letter_str();
        if self.is_excluded(Some(letter)) {
            return false;
        }
        match self.config.mode {
            GenerationMode::Freeform => self.config.letter_types.contains(&classify_letter(letter)),
            GenerationMode::Circular => true,
        }
    }

    /// Layer turns, spin and float conversion onto a catalog motion
    fn dress(&mut self, motion: MotionData, lock: Option<RotationDirection>) -> MotionData {
        let mut motion = motion;
        let intensity = self.config.turn_intensity;

        motion.turns = match self.config.level {
            2 => Turns::whole(self.rng.random_range(0..=intensity.floor() as u16)),
            3 => Turns::Half(self.rng.random_range(0..=(intensity * 2.0).floor() as u32)),
            _ => Turns::ZERO,
        };

        // Statics and dashes only spin once they turn
        if matches!(motion.motion_type, MotionType::Static | MotionType::Dash) {
            motion.prop_rotation_direction = if motion.turns.is_zero() {
                RotationDirection::NoRotation
            } else {
                lock.unwrap_or_else(|| {
                    if self.rng.random_bool(0.5) {
                        RotationDirection::Cw
                    } else {
                        RotationDirection::Ccw
                    }
                })
            };
        }

        if self.config.level >= 3 && motion.motion_type.is_shift() && self.rng.random_bool(FLOAT_CHANCE) {
            motion = motion.into_float();
        }

        motion.rederive()
    }

    /// Chain a motion pair onto the previous state and label it
    fn assemble(
        &self,
        beat_number: usize,
        motions: MotionPair,
        previous: &BeatState,
        start: &BeatData,
        preceding: &[BeatData],
    ) -> BeatData {
        let motions = MotionPair {
            blue: motions
                .blue
                .map(|m| m.with_start_orientation(previous.blue_orientation)),
            red: motions
                .red
                .map(|m| m.with_start_orientation(previous.red_orientation)),
        };

        let letter = motions.both().and_then(|(b, r)| identify_letter(b, r));
        let start_label = motions.start_locations().and_then(|(b, r)| position_label(b, r));
        let end_label = motions.end_locations().and_then(|(b, r)| position_label(b, r));

        let pictograph = PictographData {
            id: format!("beat-{beat_number}"),
            motions,
            letter: letter.map(str::to_string),
            start_position: start_label,
            end_position: end_label,
            grid_mode: self.config.grid_mode,
            is_blank: false,
        };

        let mut context: Vec<BeatData> = Vec::with_capacity(preceding.len() + 1);
        context.push(start.clone());
        context.extend_from_slice(preceding);

        let mut beat = BeatData::from_pictograph(beat_number, &pictograph);
        beat.reversals = reversal_flags(&pictograph, &context);
        beat
    }

    /// Random start position on the configured grid, props pointing in
    fn random_start(&mut self) -> BeatData {
        let points = self.config.grid_mode.locations();
        let blue = points[self.rng.random_range(0..points.len())];
        let red = points[self.rng.random_range(0..points.len())];
        BeatData::start_position(
            (blue, Orientation::In),
            (red, Orientation::In),
            position_label(blue, red),
        )
    }
}

fn state_of(beat: &BeatData) -> Result<BeatState> {
    beat.end_state().ok_or(GenerationError::MissingMotions {
        beat_index: beat.beat_number,
    })
}

fn exhausted(beat_index: usize, start: &BeatData, partial: Vec<BeatData>, attempts: usize) -> GenerationError {
    GenerationError::Exhausted {
        beat_index,
        partial: Box::new(SequenceData::from_beats("partial", Some(start.clone()), partial)),
        attempts,
    }
}
