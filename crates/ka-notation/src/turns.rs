//! Turn counts
//!
//! A motion turns its prop a whole or half number of times, or floats.
//! Values are kept as a count of half turns so that parity checks never
//! touch floating point.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::NotationError;

/// Serialized marker for floating motions
pub const FLOAT_MARKER: &str = "fl";

/// Number of turns of a motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTurns", into = "RawTurns")]
pub enum Turns {
    /// Count of half turns (3 = 1.5 turns)
    Half(u32),
    /// Float sentinel, no numeric turn count
    Float,
}

/// Wire form: a JSON number or the `"fl"` marker
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTurns {
    Number(f64),
    Text(String),
}

impl Turns {
    pub const ZERO: Turns = Turns::Half(0);

    /// Whole number of turns
    pub fn whole(turns: u16) -> Self {
        Turns::Half(u32::from(turns) * 2)
    }

    /// Validate a numeric turn value
    ///
    /// Negative, non-finite and non-half-step values are rejected rather
    /// than clamped.
    pub fn from_f64(value: f64) -> Result<Self, NotationError> {
        if !value.is_finite() || value < 0.0 {
            return Err(NotationError::InvalidTurns(value.to_string()));
        }
        let doubled = value * 2.0;
        if doubled.fract() != 0.0 || doubled > u32::MAX as f64 {
            return Err(NotationError::InvalidTurns(value.to_string()));
        }
        Ok(Turns::Half(doubled as u32))
    }

    /// Numeric value (None for float)
    pub fn value(self) -> Option<f64> {
        match self {
            Turns::Half(h) => Some(h as f64 / 2.0),
            Turns::Float => None,
        }
    }

    /// Whole-turn part (0 for float)
    pub fn integer_part(self) -> u32 {
        match self {
            Turns::Half(h) => h / 2,
            Turns::Float => 0,
        }
    }

    /// Does the value end in a half turn?
    pub fn has_half(self) -> bool {
        matches!(self, Turns::Half(h) if h % 2 == 1)
    }

    pub fn is_float(self) -> bool {
        matches!(self, Turns::Float)
    }

    /// Any prop rotation at all?
    pub fn is_zero(self) -> bool {
        matches!(self, Turns::Half(0))
    }
}

impl Default for Turns {
    fn default() -> Self {
        Turns::ZERO
    }
}

impl TryFrom<RawTurns> for Turns {
    type Error = NotationError;

    fn try_from(raw: RawTurns) -> Result<Self, Self::Error> {
        match raw {
            RawTurns::Number(n) => Turns::from_f64(n),
            RawTurns::Text(s) => {
                let trimmed = s.trim();
                if trimmed.eq_ignore_ascii_case(FLOAT_MARKER)
                    || trimmed.eq_ignore_ascii_case("float")
                {
                    Ok(Turns::Float)
                } else {
                    let n: f64 = trimmed
                        .parse()
                        .map_err(|_| NotationError::InvalidTurns(s.clone()))?;
                    Turns::from_f64(n)
                }
            }
        }
    }
}

impl From<Turns> for RawTurns {
    fn from(turns: Turns) -> Self {
        match turns {
            Turns::Half(h) => RawTurns::Number(h as f64 / 2.0),
            Turns::Float => RawTurns::Text(FLOAT_MARKER.to_string()),
        }
    }
}

impl fmt::Display for Turns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Turns::Half(h) if h % 2 == 0 => write!(f, "{}", h / 2),
            Turns::Half(h) => write!(f, "{}.5", h / 2),
            Turns::Float => f.write_str(FLOAT_MARKER),
        }
    }
}

impl std::str::FromStr for Turns {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Turns::try_from(RawTurns::Text(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_f64_accepts_half_steps() {
        assert_eq!(Turns::from_f64(0.0).unwrap(), Turns::ZERO);
        assert_eq!(Turns::from_f64(1.5).unwrap(), Turns::Half(3));
        assert_eq!(Turns::from_f64(3.0).unwrap(), Turns::whole(3));
    }

    #[test]
    fn test_from_f64_rejects_invalid() {
        assert!(Turns::from_f64(-1.0).is_err());
        assert!(Turns::from_f64(0.25).is_err());
        assert!(Turns::from_f64(f64::NAN).is_err());
        assert!(Turns::from_f64(f64::INFINITY).is_err());
    }

    #[test]
    fn test_parts() {
        let t = Turns::Half(5);
        assert_eq!(t.integer_part(), 2);
        assert!(t.has_half());
        assert_eq!(t.value(), Some(2.5));
        assert!(!Turns::whole(2).has_half());
        assert_eq!(Turns::Float.value(), None);
        assert_eq!(Turns::Float.integer_part(), 0);
    }

    #[test]
    fn test_serde_wire_form() {
        assert_eq!(serde_json::to_string(&Turns::Half(3)).unwrap(), "1.5");
        assert_eq!(serde_json::to_string(&Turns::Float).unwrap(), "\"fl\"");

        let t: Turns = serde_json::from_str("2").unwrap();
        assert_eq!(t, Turns::whole(2));
        let t: Turns = serde_json::from_str("\"fl\"").unwrap();
        assert_eq!(t, Turns::Float);
        let t: Turns = serde_json::from_str("\"0.5\"").unwrap();
        assert_eq!(t, Turns::Half(1));

        assert!(serde_json::from_str::<Turns>("-0.5").is_err());
        assert!(serde_json::from_str::<Turns>("\"lots\"").is_err());
    }

    #[test]
    fn test_whole_covers_full_range() {
        let most = Turns::whole(u16::MAX);
        assert_eq!(most.integer_part(), u32::from(u16::MAX));
        assert!(!most.has_half());
        assert_eq!(most.value(), Some(65535.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Turns::whole(2).to_string(), "2");
        assert_eq!(Turns::Half(1).to_string(), "0.5");
        assert_eq!(Turns::Float.to_string(), "fl");
        assert_eq!("1.5".parse::<Turns>().unwrap(), Turns::Half(3));
    }
}
