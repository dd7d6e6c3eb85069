//! # ka-engine: Kinetic Alphabet Notation Engine
//!
//! Letter classification, the letter grammar, reversal detection, option
//! organisation and seeded sequence generation on top of `ka-notation`.
//!
//! ## Components
//!
//! | module       | role                                                   |
//! |--------------|--------------------------------------------------------|
//! | `letters`    | letter → type tables and statistics                    |
//! | `grammar`    | two motions → letter                                   |
//! | `positions`  | two locations → alpha/beta/gamma position label        |
//! | `reversal`   | reversal counts and per-actor flags                    |
//! | `options`    | sort, section and filter pictograph collections        |
//! | `catalog`    | every pictograph of a grid                             |
//! | `cap`        | rotate / mirror / swap / complement transforms         |
//! | `generator`  | freeform and circular sequence generation              |
//! | `validate`   | continuity and closure checks                          |
//!
//! ## Example
//!
//! ```rust,ignore
//! use ka_engine::{CapType, GenerationConfig, SliceSize, generate_sequence};
//!
//! let config = GenerationConfig::default()
//!     .with_cap(CapType::StrictRotated, SliceSize::Halved)
//!     .with_length(8)
//!     .with_seed(42);
//! let sequence = generate_sequence(config)?;
//! println!("{}", sequence.word());
//! ```

pub mod cap;
pub mod catalog;
pub mod config;
pub mod error;
pub mod generator;
pub mod grammar;
pub mod letters;
pub mod loader;
pub mod options;
pub mod positions;
pub mod reversal;
pub mod validate;

pub use cap::{CapComponent, CapTransform, CapType, SliceSize};
pub use catalog::PictographCatalog;
pub use config::{GenerationConfig, GenerationMode, Level, PropContinuity};
pub use error::{ConfigError, GenerationError, Result, SequenceViolation};
pub use generator::SequenceGenerator;
pub use grammar::{identify_letter, identify_pictograph};
pub use letters::{
    ClassificationStats, alphabet_statistics, classification_statistics, classify_all,
    classify_letter, is_member, letters_for_type,
};
pub use loader::{ConfigLimits, ConfigLoader};
pub use options::{OptionOrganizer, OrganizedSection, ReversalBucket, SectionKind, SortMethod};
pub use positions::{end_position, position_group, position_label};
pub use reversal::{count_reversals, has_reversals, reversal_flags};
pub use validate::validate_sequence;

pub use ka_notation::calculate_end_orientation;

/// Generate one sequence from a config
///
/// Only the config invariants are checked; size limits belong to the
/// loader that accepted it.
pub fn generate_sequence(config: GenerationConfig) -> Result<ka_notation::SequenceData> {
    SequenceGenerator::new(config)?.generate()
}
