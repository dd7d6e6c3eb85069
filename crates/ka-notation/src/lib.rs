//! # ka-notation: Kinetic Alphabet Notation
//!
//! Shared vocabulary for the kinetic alphabet: a fixed eight-point grid,
//! prop orientations, motion types, turn counts and the immutable records
//! built from them (motions, pictographs, beats, sequences).
//!
//! ## Philosophy
//!
//! Every record is a value. Transforms return new values, derived fields
//! (end orientation, beat numbers) are recomputed by whoever changes the
//! inputs, and nothing holds a reference back to its container.
//!
//! ```text
//! Location / Orientation / MotionType / Turns
//!     │
//!     └── MotionData ×2 → PictographData → BeatData → SequenceData
//! ```

pub mod beat;
pub mod error;
pub mod grid;
pub mod motion;
pub mod orientation;
pub mod pictograph;
pub mod sequence;
pub mod taxonomy;
pub mod turns;

pub use beat::*;
pub use error::{NotationError, Result};
pub use grid::*;
pub use motion::*;
pub use orientation::*;
pub use pictograph::*;
pub use sequence::*;
pub use taxonomy::*;
pub use turns::*;
