//! Notation Taxonomy: closed enumerations of the kinetic alphabet
//!
//! Orientation and motion type follow the input-defaulting policy: unknown
//! strings never fail, they resolve to `in` and `pro` respectively. Every
//! other enum is strict.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NotationError;

// ═══════════════════════════════════════════════════════════════════════════
// ORIENTATION
// ═══════════════════════════════════════════════════════════════════════════

/// Prop orientation at a location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Orientation {
    #[default]
    In,
    Out,
    Clock,
    Counter,
}

/// Radial (in/out) or rotational (clock/counter) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrientationCategory {
    Radial,
    Rotational,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::In,
        Orientation::Out,
        Orientation::Clock,
        Orientation::Counter,
    ];

    /// Parse an orientation, falling back to `in` for anything unrecognized
    pub fn parse_lossy(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "in" => Orientation::In,
            "out" => Orientation::Out,
            "clock" => Orientation::Clock,
            "counter" => Orientation::Counter,
            _ => Orientation::In,
        }
    }

    pub fn category(self) -> OrientationCategory {
        match self {
            Orientation::In | Orientation::Out => OrientationCategory::Radial,
            Orientation::Clock | Orientation::Counter => OrientationCategory::Rotational,
        }
    }

    /// The other member of the same pair (in ↔ out, clock ↔ counter)
    pub fn flipped(self) -> Self {
        match self {
            Orientation::In => Orientation::Out,
            Orientation::Out => Orientation::In,
            Orientation::Clock => Orientation::Counter,
            Orientation::Counter => Orientation::Clock,
        }
    }

    /// Chirality reversal used by reflections (clock ↔ counter, radial unchanged)
    pub fn mirrored(self) -> Self {
        match self {
            Orientation::Clock => Orientation::Counter,
            Orientation::Counter => Orientation::Clock,
            radial => radial,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::In => "in",
            Orientation::Out => "out",
            Orientation::Clock => "clock",
            Orientation::Counter => "counter",
        }
    }
}

impl From<String> for Orientation {
    fn from(s: String) -> Self {
        Orientation::parse_lossy(&s)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// MOTION TYPE
// ═══════════════════════════════════════════════════════════════════════════

/// How a prop moves during one beat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum MotionType {
    /// Shift with prop spinning the same way as the hand path
    #[default]
    Pro,
    /// Shift with prop spinning against the hand path
    Anti,
    /// Hand stays put
    Static,
    /// Hand crosses through the centre to the opposite point
    Dash,
    /// Shift with no prop spin
    Float,
}

impl MotionType {
    pub const ALL: [MotionType; 5] = [
        MotionType::Pro,
        MotionType::Anti,
        MotionType::Static,
        MotionType::Dash,
        MotionType::Float,
    ];

    /// Parse a motion type; unknown values resolve to `pro`, the nearest
    /// shift motion
    pub fn parse_lossy(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "pro" => MotionType::Pro,
            "anti" => MotionType::Anti,
            "static" => MotionType::Static,
            "dash" => MotionType::Dash,
            "float" => MotionType::Float,
            _ => MotionType::Pro,
        }
    }

    /// Pro, anti and float travel a quarter of the ring
    pub fn is_shift(self) -> bool {
        matches!(self, MotionType::Pro | MotionType::Anti | MotionType::Float)
    }

    /// Pro ↔ anti; every other type is its own complement
    pub fn complement(self) -> Self {
        match self {
            MotionType::Pro => MotionType::Anti,
            MotionType::Anti => MotionType::Pro,
            other => other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MotionType::Pro => "pro",
            MotionType::Anti => "anti",
            MotionType::Static => "static",
            MotionType::Dash => "dash",
            MotionType::Float => "float",
        }
    }
}

impl From<String> for MotionType {
    fn from(s: String) -> Self {
        MotionType::parse_lossy(&s)
    }
}

impl fmt::Display for MotionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compound pattern carried by a motion whose raw type names several motions
///
/// Raw records sometimes describe blended motions ("pro_anti", "both").
/// The blend is split off at the boundary into this tag so that nothing
/// downstream has to inspect strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionBlend {
    #[default]
    Single,
    /// Pro and anti within one motion
    ProAnti,
    /// Explicit "both" pattern
    Both,
}

impl MotionBlend {
    /// Classify a raw motion-type string by its tokens
    ///
    /// Tokens are split on `_`, `-`, `+` and whitespace and compared exactly.
    pub fn from_raw(raw: &str) -> Self {
        let lower = raw.to_ascii_lowercase();
        let tokens: Vec<&str> = lower
            .split(|c: char| c == '_' || c == '-' || c == '+' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .collect();

        if tokens.contains(&"both") {
            MotionBlend::Both
        } else if tokens.contains(&"pro") && tokens.contains(&"anti") {
            MotionBlend::ProAnti
        } else {
            MotionBlend::Single
        }
    }

    /// Base motion type named by a raw string, ignoring blend tokens
    pub fn base_type(raw: &str) -> MotionType {
        let lower = raw.to_ascii_lowercase();
        lower
            .split(|c: char| c == '_' || c == '-' || c == '+' || c.is_whitespace())
            .find(|t| matches!(*t, "pro" | "anti" | "static" | "dash" | "float"))
            .map(MotionType::parse_lossy)
            .unwrap_or_default()
    }

    /// Minimum reversal count implied by the blend
    pub fn reversal_floor(self) -> u8 {
        match self {
            MotionBlend::Single => 0,
            MotionBlend::ProAnti => 1,
            MotionBlend::Both => 2,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// ROTATION DIRECTION
// ═══════════════════════════════════════════════════════════════════════════

/// Prop (or hand-path) rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RotationDirection {
    #[serde(rename = "cw", alias = "clockwise")]
    Cw,
    #[serde(rename = "ccw", alias = "counter_clockwise")]
    Ccw,
    #[default]
    #[serde(rename = "no_rotation", alias = "norotation", alias = "noRotation")]
    NoRotation,
}

impl RotationDirection {
    /// cw ↔ ccw
    pub fn reversed(self) -> Self {
        match self {
            RotationDirection::Cw => RotationDirection::Ccw,
            RotationDirection::Ccw => RotationDirection::Cw,
            RotationDirection::NoRotation => RotationDirection::NoRotation,
        }
    }

    pub fn is_rotating(self) -> bool {
        !matches!(self, RotationDirection::NoRotation)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RotationDirection::Cw => "cw",
            RotationDirection::Ccw => "ccw",
            RotationDirection::NoRotation => "no_rotation",
        }
    }
}

impl fmt::Display for RotationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RotationDirection {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cw" | "clockwise" => Ok(RotationDirection::Cw),
            "ccw" | "counter_clockwise" => Ok(RotationDirection::Ccw),
            "no_rotation" | "norotation" | "none" => Ok(RotationDirection::NoRotation),
            _ => Err(NotationError::UnknownRotation(s.to_string())),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// LETTER TYPE
// ═══════════════════════════════════════════════════════════════════════════

/// Structural letter bucket
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum LetterType {
    #[default]
    Type1,
    Type2,
    Type3,
    Type4,
    Type5,
    Type6,
}

impl LetterType {
    pub const ALL: [LetterType; 6] = [
        LetterType::Type1,
        LetterType::Type2,
        LetterType::Type3,
        LetterType::Type4,
        LetterType::Type5,
        LetterType::Type6,
    ];

    /// 1-based type number
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    /// From a 1-based type number
    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.get((n as usize).checked_sub(1)?).copied()
    }

    /// Structural description of the motions in this bucket
    pub fn description(self) -> &'static str {
        match self {
            LetterType::Type1 => "Dual-Shift",
            LetterType::Type2 => "Shift",
            LetterType::Type3 => "Cross-Shift",
            LetterType::Type4 => "Dash",
            LetterType::Type5 => "Dual-Dash",
            LetterType::Type6 => "Static",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LetterType::Type1 => "Type1",
            LetterType::Type2 => "Type2",
            LetterType::Type3 => "Type3",
            LetterType::Type4 => "Type4",
            LetterType::Type5 => "Type5",
            LetterType::Type6 => "Type6",
        }
    }
}

impl fmt::Display for LetterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// POSITION GROUP
// ═══════════════════════════════════════════════════════════════════════════

/// Relationship between the two hands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionGroup {
    /// Hands at opposite points
    Alpha,
    /// Hands at the same point
    Beta,
    /// Hands 90° apart
    Gamma,
}

impl PositionGroup {
    pub const ALL: [PositionGroup; 3] =
        [PositionGroup::Alpha, PositionGroup::Beta, PositionGroup::Gamma];

    /// Group of a position label by prefix ("alpha3" → Alpha)
    pub fn from_label(label: &str) -> Option<Self> {
        let lower = label.trim().to_ascii_lowercase();
        if lower.starts_with("alpha") {
            Some(PositionGroup::Alpha)
        } else if lower.starts_with("beta") {
            Some(PositionGroup::Beta)
        } else if lower.starts_with("gamma") {
            Some(PositionGroup::Gamma)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PositionGroup::Alpha => "alpha",
            PositionGroup::Beta => "beta",
            PositionGroup::Gamma => "gamma",
        }
    }
}

impl fmt::Display for PositionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_lossy_parse() {
        assert_eq!(Orientation::parse_lossy("OUT"), Orientation::Out);
        assert_eq!(Orientation::parse_lossy("counter"), Orientation::Counter);
        assert_eq!(Orientation::parse_lossy("sideways"), Orientation::In);
        assert_eq!(Orientation::parse_lossy(""), Orientation::In);

        let ori: Orientation = serde_json::from_str("\"banana\"").unwrap();
        assert_eq!(ori, Orientation::In);
        assert_eq!(serde_json::to_string(&Orientation::Clock).unwrap(), "\"clock\"");
    }

    #[test]
    fn test_orientation_pairs() {
        for ori in Orientation::ALL {
            assert_eq!(ori.flipped().flipped(), ori);
            assert_eq!(ori.flipped().category(), ori.category());
        }
        assert_eq!(Orientation::In.mirrored(), Orientation::In);
        assert_eq!(Orientation::Clock.mirrored(), Orientation::Counter);
    }

    #[test]
    fn test_motion_type_defaults_to_pro() {
        assert_eq!(MotionType::parse_lossy("dash"), MotionType::Dash);
        assert_eq!(MotionType::parse_lossy("wobble"), MotionType::Pro);
        let mt: MotionType = serde_json::from_str("\"ANTI\"").unwrap();
        assert_eq!(mt, MotionType::Anti);
    }

    #[test]
    fn test_motion_blend_tokens() {
        assert_eq!(MotionBlend::from_raw("pro"), MotionBlend::Single);
        assert_eq!(MotionBlend::from_raw("pro_anti"), MotionBlend::ProAnti);
        assert_eq!(MotionBlend::from_raw("anti-pro"), MotionBlend::ProAnti);
        assert_eq!(MotionBlend::from_raw("both"), MotionBlend::Both);
        // Substrings do not count as tokens
        assert_eq!(MotionBlend::from_raw("prototype antique"), MotionBlend::Single);

        assert_eq!(MotionBlend::base_type("anti_pro"), MotionType::Anti);
        assert_eq!(MotionBlend::base_type("both"), MotionType::Pro);
    }

    #[test]
    fn test_rotation_direction_serde() {
        let dir: RotationDirection = serde_json::from_str("\"no_rotation\"").unwrap();
        assert_eq!(dir, RotationDirection::NoRotation);
        let dir: RotationDirection = serde_json::from_str("\"clockwise\"").unwrap();
        assert_eq!(dir, RotationDirection::Cw);
        assert!(serde_json::from_str::<RotationDirection>("\"sideways\"").is_err());
        assert_eq!(RotationDirection::Cw.reversed(), RotationDirection::Ccw);
    }

    #[test]
    fn test_letter_type_numbers() {
        assert_eq!(LetterType::Type1.number(), 1);
        assert_eq!(LetterType::from_number(6), Some(LetterType::Type6));
        assert_eq!(LetterType::from_number(0), None);
        assert_eq!(LetterType::from_number(7), None);
        assert_eq!(LetterType::Type3.description(), "Cross-Shift");
        assert_eq!(serde_json::to_string(&LetterType::Type4).unwrap(), "\"Type4\"");
    }

    #[test]
    fn test_position_group_prefix() {
        assert_eq!(PositionGroup::from_label("alpha3"), Some(PositionGroup::Alpha));
        assert_eq!(PositionGroup::from_label("Gamma12"), Some(PositionGroup::Gamma));
        assert_eq!(PositionGroup::from_label("delta1"), None);
    }
}
