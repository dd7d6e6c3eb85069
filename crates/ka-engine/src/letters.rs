//! Letter Type Classifier: static membership tables for the alphabet
//!
//! Six disjoint tables partition every known letter. The reverse index is
//! built once on first use; lookups after that are a single hash probe.

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use ka_notation::LetterType;

// ═══════════════════════════════════════════════════════════════════════════
// TABLES
// ═══════════════════════════════════════════════════════════════════════════

const TYPE1: &[&str] = &[
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R", "S",
    "T", "U", "V",
];
const TYPE2: &[&str] = &["W", "X", "Y", "Z", "Σ", "Δ", "θ", "Ω"];
const TYPE3: &[&str] = &["W-", "X-", "Y-", "Z-", "Σ-", "Δ-", "θ-", "Ω-"];
const TYPE4: &[&str] = &["Φ", "Ψ", "Λ"];
const TYPE5: &[&str] = &["Φ-", "Ψ-", "Λ-"];
const TYPE6: &[&str] = &["α", "β", "Γ"];

/// Letters of each type in canonical order
pub fn letters_for_type(letter_type: LetterType) -> &'static [&'static str] {
    match letter_type {
        LetterType::Type1 => TYPE1,
        LetterType::Type2 => TYPE2,
        LetterType::Type3 => TYPE3,
        LetterType::Type4 => TYPE4,
        LetterType::Type5 => TYPE5,
        LetterType::Type6 => TYPE6,
    }
}

/// Letter → (type, canonical position)
static REVERSE_INDEX: LazyLock<HashMap<&'static str, (LetterType, usize)>> = LazyLock::new(|| {
    LetterType::ALL
        .iter()
        .flat_map(|&t| letters_for_type(t).iter().map(move |&l| (l, t)))
        .enumerate()
        .map(|(order, (letter, t))| (letter, (t, order)))
        .collect()
});

// ═══════════════════════════════════════════════════════════════════════════
// LOOKUPS
// ═══════════════════════════════════════════════════════════════════════════

/// Classify a letter; unknown and empty input resolve to Type1
pub fn classify_letter(letter: &str) -> LetterType {
    REVERSE_INDEX
        .get(letter.trim())
        .map(|&(t, _)| t)
        .unwrap_or_default()
}

/// Is the letter in any table?
pub fn is_known_letter(letter: &str) -> bool {
    REVERSE_INDEX.contains_key(letter.trim())
}

/// Is the letter a member of the given type's table?
pub fn is_member(letter: &str, letter_type: LetterType) -> bool {
    REVERSE_INDEX
        .get(letter.trim())
        .is_some_and(|&(t, _)| t == letter_type)
}

/// Canonical alphabet position (unknown letters sort last)
pub fn letter_order(letter: &str) -> usize {
    REVERSE_INDEX
        .get(letter.trim())
        .map(|&(_, order)| order)
        .unwrap_or(usize::MAX)
}

/// Every known letter in canonical order
pub fn all_letters() -> impl Iterator<Item = &'static str> {
    LetterType::ALL
        .into_iter()
        .flat_map(|t| letters_for_type(t).iter().copied())
}

/// Classify a batch of letters in parallel
pub fn classify_all<S: AsRef<str> + Sync>(letters: &[S]) -> Vec<LetterType> {
    letters
        .par_iter()
        .map(|l| classify_letter(l.as_ref()))
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════
// STATISTICS
// ═══════════════════════════════════════════════════════════════════════════

/// Per-type letter counts
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClassificationStats {
    pub per_type: BTreeMap<LetterType, usize>,
    pub total: usize,
    /// Inputs not found in any table (counted under Type1)
    pub unknown: usize,
}

impl ClassificationStats {
    pub fn count(&self, letter_type: LetterType) -> usize {
        self.per_type.get(&letter_type).copied().unwrap_or(0)
    }
}

/// Table sizes for the whole alphabet
pub fn alphabet_statistics() -> ClassificationStats {
    let per_type: BTreeMap<_, _> = LetterType::ALL
        .iter()
        .map(|&t| (t, letters_for_type(t).len()))
        .collect();
    let total = per_type.values().sum();
    ClassificationStats {
        per_type,
        total,
        unknown: 0,
    }
}

/// Counts per type over a collection of letters
pub fn classification_statistics<S: AsRef<str>>(letters: &[S]) -> ClassificationStats {
    let mut stats = ClassificationStats {
        per_type: LetterType::ALL.iter().map(|&t| (t, 0)).collect(),
        ..Default::default()
    };
    for letter in letters {
        let letter = letter.as_ref();
        *stats.per_type.entry(classify_letter(letter)).or_insert(0) += 1;
        stats.total += 1;
        if !is_known_letter(letter) {
            stats.unknown += 1;
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_scenarios() {
        assert_eq!(classify_letter("A"), LetterType::Type1);
        assert_eq!(classify_letter("W-"), LetterType::Type3);
        assert_eq!(classify_letter("W"), LetterType::Type2);
        assert_eq!(classify_letter("Λ-"), LetterType::Type5);
        assert_eq!(classify_letter("Γ"), LetterType::Type6);
        assert_eq!(classify_letter("θ"), LetterType::Type2);
    }

    #[test]
    fn test_totality_defaults_to_type1() {
        assert_eq!(classify_letter(""), LetterType::Type1);
        assert_eq!(classify_letter("?"), LetterType::Type1);
        assert_eq!(classify_letter("a"), LetterType::Type1);
        assert!(!is_known_letter(""));
    }

    #[test]
    fn test_tables_are_disjoint_partition() {
        let mut seen = HashSet::new();
        for t in LetterType::ALL {
            for letter in letters_for_type(t) {
                assert!(seen.insert(*letter), "{letter} appears twice");
            }
        }
        assert_eq!(seen.len(), all_letters().count());
        assert_eq!(alphabet_statistics().total, 22 + 8 + 8 + 3 + 3 + 3);
    }

    #[test]
    fn test_round_trip_is_idempotent() {
        for t in LetterType::ALL {
            for letter in letters_for_type(t) {
                assert_eq!(classify_letter(letter), t);
                assert!(is_member(letter, t));
                assert!(letters_for_type(classify_letter(letter)).contains(letter));
            }
        }
    }

    #[test]
    fn test_letter_order_follows_tables() {
        assert_eq!(letter_order("A"), 0);
        assert!(letter_order("V") < letter_order("W"));
        assert!(letter_order("Ω") < letter_order("W-"));
        assert!(letter_order("Γ") < letter_order("unknown"));
    }

    #[test]
    fn test_statistics_and_batch() {
        let input = ["A", "B", "W-", "Φ", "zzz"];
        let stats = classification_statistics(&input);
        assert_eq!(stats.count(LetterType::Type1), 3);
        assert_eq!(stats.count(LetterType::Type3), 1);
        assert_eq!(stats.count(LetterType::Type4), 1);
        assert_eq!(stats.count(LetterType::Type6), 0);
        assert_eq!(stats.unknown, 1);

        let batch = classify_all(&input);
        assert_eq!(
            batch,
            vec![
                LetterType::Type1,
                LetterType::Type1,
                LetterType::Type3,
                LetterType::Type4,
                LetterType::Type1
            ]
        );
    }
}
