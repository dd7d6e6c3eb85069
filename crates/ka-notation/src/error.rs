//! Notation errors

use thiserror::Error;

/// Errors raised at the record boundary
///
/// Everything past the boundary assumes well-typed input; lossy fields
/// (orientation, motion type) never produce these.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NotationError {
    #[error("Invalid turns value: {0} (expected a non-negative multiple of 0.5 or \"fl\")")]
    InvalidTurns(String),

    #[error("Unknown location: {0}")]
    UnknownLocation(String),

    #[error("Unknown rotation direction: {0}")]
    UnknownRotation(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Beat {beat} out of range (sequence has {len} beats)")]
    BeatOutOfRange { beat: usize, len: usize },

    #[error("Malformed record: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for NotationError {
    fn from(e: serde_json::Error) -> Self {
        NotationError::Malformed(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, NotationError>;
