//! Generation configuration

use serde::{Deserialize, Serialize};

use ka_notation::{GridMode, LetterType};

use crate::cap::{CapComponent, CapType, SliceSize};
use crate::error::ConfigError;
use crate::loader::ConfigLimits;

/// Top-level generation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// Beats picked one after another
    #[default]
    Freeform,
    /// Base slice extended by CAP transforms
    Circular,
}

/// Prop continuity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropContinuity {
    /// Each actor keeps one spin direction through the base slice
    #[default]
    Continuous,
    /// Spin directions are free
    Random,
}

/// Difficulty level
///
/// 1: no turns. 2: whole turns up to the turn intensity. 3: half turns up
/// to the turn intensity, plus floats.
pub type Level = u8;

/// Sequence generation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub mode: GenerationMode,

    /// Number of beats (excluding the start position)
    #[serde(alias = "sequenceLength")]
    pub length: usize,

    /// Difficulty 1–3
    pub level: Level,

    /// Maximum turns per motion at levels 2 and 3
    #[serde(alias = "turnIntensity")]
    pub turn_intensity: f64,

    #[serde(alias = "gridMode")]
    pub grid_mode: GridMode,

    #[serde(alias = "propContinuity")]
    pub prop_continuity: PropContinuity,

    /// Letter types allowed in freeform mode
    #[serde(alias = "letterTypes")]
    pub letter_types: Vec<LetterType>,

    /// Base slice size in circular mode
    #[serde(alias = "sliceSize")]
    pub slice_size: SliceSize,

    /// CAP type in circular mode
    #[serde(alias = "capType")]
    pub cap_type: CapType,

    /// Letters never picked
    #[serde(alias = "excludedLetters")]
    pub excluded_letters: Vec<String>,

    /// RNG seed (None = entropy)
    pub seed: Option<u64>,

    /// Attempts per beat (freeform) or per slice (circular)
    #[serde(alias = "maxAttempts")]
    pub max_attempts: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            mode: GenerationMode::Freeform,
            length: 16,
            level: 1,
            turn_intensity: 1.0,
            grid_mode: GridMode::Diamond,
            prop_continuity: PropContinuity::Continuous,
            letter_types: LetterType::ALL.to_vec(),
            slice_size: SliceSize::Halved,
            cap_type: CapType::StrictRotated,
            excluded_letters: Vec::new(),
            seed: None,
            max_attempts: 256,
        }
    }
}

impl GenerationConfig {
    // ═══════════════════════════════════════════════════════════════════════════
    // PRESETS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Freeform, all letter types, no turns
    pub fn freeform_default() -> Self {
        Self::default()
    }

    /// Halved strict-rotated circular sequence
    pub fn circular_default() -> Self {
        Self {
            mode: GenerationMode::Circular,
            ..Default::default()
        }
    }

    /// Short freeform with dual shifts and statics only
    pub fn beginner() -> Self {
        Self {
            length: 8,
            letter_types: vec![LetterType::Type1, LetterType::Type6],
            ..Default::default()
        }
    }

    /// Long freeform with half turns and free spin
    pub fn advanced() -> Self {
        Self {
            length: 32,
            level: 3,
            turn_intensity: 2.0,
            prop_continuity: PropContinuity::Random,
            ..Default::default()
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // BUILDERS
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn with_mode(mut self, mode: GenerationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_turn_intensity(mut self, intensity: f64) -> Self {
        self.turn_intensity = intensity;
        self
    }

    pub fn with_grid_mode(mut self, grid_mode: GridMode) -> Self {
        self.grid_mode = grid_mode;
        self
    }

    pub fn with_prop_continuity(mut self, continuity: PropContinuity) -> Self {
        self.prop_continuity = continuity;
        self
    }

    pub fn with_letter_types(mut self, types: Vec<LetterType>) -> Self {
        self.letter_types = types;
        self
    }

    /// Switch to circular mode with a CAP type and slice size
    pub fn with_cap(mut self, cap_type: CapType, slice_size: SliceSize) -> Self {
        self.mode = GenerationMode::Circular;
        self.cap_type = cap_type;
        self.slice_size = slice_size;
        self
    }

    pub fn with_excluded_letters(mut self, letters: Vec<String>) -> Self {
        self.excluded_letters = letters;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts;
        self
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // VALIDATION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Beats in the base slice
    pub fn slice_length(&self) -> usize {
        match self.mode {
            GenerationMode::Freeform => self.length,
            GenerationMode::Circular => self.length / self.slice_size.repeats(),
        }
    }

    /// Validate against the default limits
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_with(&ConfigLimits::default())
    }

    /// Validate against explicit limits
    pub fn validate_with(&self, limits: &ConfigLimits) -> Result<(), ConfigError> {
        self.check_invariants()?;

        let invalid = |msg: String| Err(ConfigError::Validation(msg));
        if self.length > limits.max_length {
            return invalid(format!("length too long: {} > {}", self.length, limits.max_length));
        }
        if self.turn_intensity > limits.max_turn_intensity {
            return invalid(format!(
                "turn intensity too high: {} > {}",
                self.turn_intensity, limits.max_turn_intensity
            ));
        }
        if self.max_attempts > limits.max_attempts {
            return invalid(format!(
                "too many attempts: {} > {}",
                self.max_attempts, limits.max_attempts
            ));
        }
        Ok(())
    }

    /// Checks that hold under any limits
    ///
    /// A config failing these cannot be generated at all.
    pub fn check_invariants(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Validation(msg));

        if self.length == 0 {
            return invalid("length must be at least 1".into());
        }
        if !(1..=3).contains(&self.level) {
            return invalid(format!("level must be 1-3, got {}", self.level));
        }
        if !self.turn_intensity.is_finite() || self.turn_intensity < 0.0 {
            return invalid(format!("invalid turn intensity: {}", self.turn_intensity));
        }
        if self.max_attempts == 0 {
            return invalid("max attempts must be at least 1".into());
        }

        match self.mode {
            GenerationMode::Freeform => {
                if self.letter_types.is_empty() {
                    return invalid("freeform mode needs at least one letter type".into());
                }
            }
            GenerationMode::Circular => {
                let repeats = self.slice_size.repeats();
                if self.length % repeats != 0 {
                    return invalid(format!(
                        "length {} is not divisible into {} slices",
                        self.length, repeats
                    ));
                }
                if self.slice_size == SliceSize::Quartered && !self.cap_type.has(CapComponent::Rotated) {
                    return invalid(format!("{} cannot be quartered", self.cap_type));
                }
            }
        }

        Ok(())
    }
}
