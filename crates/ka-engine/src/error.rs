//! Engine errors

use thiserror::Error;

use ka_notation::{Actor, SequenceData};

/// Generation failures
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// No valid continuation under the active constraints
    #[error("No valid beat {beat_index} after {attempts} attempts")]
    Exhausted {
        /// 1-based beat that could not be filled
        beat_index: usize,
        /// Beats generated before the failure
        partial: Box<SequenceData>,
        attempts: usize,
    },

    #[error("Generated sequence is invalid: {0}")]
    InvalidSequence(#[from] SequenceViolation),

    /// A beat built by the generator lost its motions
    #[error("Beat {beat_index} has no motions")]
    MissingMotions { beat_index: usize },
}

/// Configuration loading failures
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    Json(String),

    #[error("YAML parse error: {0}")]
    Yaml(String),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of the sequence validity check
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SequenceViolation {
    #[error("Beat numbers not contiguous: expected {expected}, found {found}")]
    NonContiguous { expected: usize, found: usize },

    #[error("Beat {beat} is missing a motion")]
    MissingMotion { beat: usize },

    #[error("Beat {beat}: {actor:?} end orientation does not follow from its motion")]
    OrientationInvariant { beat: usize, actor: Actor },

    #[error("Beat {beat}: {actor:?} does not start where the previous beat ended")]
    LocationDiscontinuity { beat: usize, actor: Actor },

    #[error("Beat {beat}: {actor:?} orientation does not continue from the previous beat")]
    OrientationDiscontinuity { beat: usize, actor: Actor },

    #[error("Sequence does not return to its start position")]
    NotClosed,
}

pub type Result<T> = std::result::Result<T, GenerationError>;
