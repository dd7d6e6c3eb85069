//! Option Organizer: sort, section and filter pictograph collections
//!
//! Every operation returns a new collection. Sorting is stable and always
//! falls back to canonical letter order.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use ka_notation::{BeatData, LetterType, PictographData, PositionGroup};

use crate::letters::{classify_letter, letter_order};
use crate::positions::{end_position, end_position_group, start_position};
use crate::reversal::precompute_reversals;

/// How options are ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMethod {
    /// Canonical letter order
    #[default]
    #[serde(alias = "type")]
    Type,
    /// Derived end position label
    #[serde(alias = "endPosition")]
    EndPosition,
    /// Pictographs with reversals first
    Reversals,
    /// Generic grouping by start position group
    #[serde(alias = "startPosition")]
    StartPosition,
}

/// Display kind of a section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    /// One letter type shown on its own
    Section,
    /// Several minor types merged
    Grouped,
}

/// A named group of pictographs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizedSection {
    pub name: String,
    pub kind: SectionKind,
    /// Letter types the section covers (empty for generic grouping)
    pub letter_types: Vec<LetterType>,
    pub pictographs: Vec<PictographData>,
}

impl OrganizedSection {
    pub fn len(&self) -> usize {
        self.pictographs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pictographs.is_empty()
    }
}

/// Reversal-count bucket used by filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReversalBucket {
    /// No reversals
    Continuous,
    OneReversal,
    TwoReversals,
}

impl ReversalBucket {
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => ReversalBucket::Continuous,
            1 => ReversalBucket::OneReversal,
            _ => ReversalBucket::TwoReversals,
        }
    }
}

/// Organizes option pictographs against an optional sequence context
///
/// The context only matters for reversal counts.
#[derive(Debug, Clone, Default)]
pub struct OptionOrganizer {
    context: Vec<BeatData>,
}

impl OptionOrganizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the beats so far as reversal context
    pub fn with_context(mut self, beats: Vec<BeatData>) -> Self {
        self.context = beats;
        self
    }

    pub fn context(&self) -> &[BeatData] {
        &self.context
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // SORT
    // ═══════════════════════════════════════════════════════════════════════════

    /// Stable sort by method, ties broken by letter order
    pub fn sort(&self, pictographs: &[PictographData], method: SortMethod) -> Vec<PictographData> {
        let reversals = match method {
            SortMethod::Reversals => precompute_reversals(pictographs, &self.context),
            _ => Vec::new(),
        };

        let mut indexed: Vec<(usize, &PictographData)> = pictographs.iter().enumerate().collect();
        indexed.sort_by(|(ia, a), (ib, b)| {
            let primary = match method {
                SortMethod::Type => Ordering::Equal,
                SortMethod::EndPosition => end_position(a).cmp(&end_position(b)),
                SortMethod::StartPosition => start_position(a).cmp(&start_position(b)),
                // Reversals first
                SortMethod::Reversals => (reversals[*ib] > 0).cmp(&(reversals[*ia] > 0)),
            };
            primary.then_with(|| letter_cmp(a, b))
        });

        indexed.into_iter().map(|(_, p)| p.clone()).collect()
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ORGANIZE
    // ═══════════════════════════════════════════════════════════════════════════

    /// Sort and group into display sections
    ///
    /// Type, end-position and reversal sorts always yield Type1, Type2 and
    /// Type3 sections (even when empty) followed by one grouped section for
    /// Types 4–6. Start-position sorting groups by start position group.
    pub fn organize(&self, pictographs: &[PictographData], method: SortMethod) -> Vec<OrganizedSection> {
        let sorted = self.sort(pictographs, method);

        match method {
            SortMethod::Type | SortMethod::EndPosition | SortMethod::Reversals => {
                let mut sections: Vec<OrganizedSection> = [LetterType::Type1, LetterType::Type2, LetterType::Type3]
                    .into_iter()
                    .map(|t| OrganizedSection {
                        name: t.as_str().to_string(),
                        kind: SectionKind::Section,
                        letter_types: vec![t],
                        pictographs: Vec::new(),
                    })
                    .collect();
                sections.push(OrganizedSection {
                    name: "Types4-6".to_string(),
                    kind: SectionKind::Grouped,
                    letter_types: vec![LetterType::Type4, LetterType::Type5, LetterType::Type6],
                    pictographs: Vec::new(),
                });

                for pic in sorted {
                    let index = match classify_letter(pic.letter_str()) {
                        LetterType::Type1 => 0,
                        LetterType::Type2 => 1,
                        LetterType::Type3 => 2,
                        _ => 3,
                    };
                    sections[index].pictographs.push(pic);
                }
                sections
            }
            SortMethod::StartPosition => {
                let mut groups: BTreeMap<Option<PositionGroup>, Vec<PictographData>> = BTreeMap::new();
                for pic in sorted {
                    let group = start_position(&pic)
                        .as_deref()
                        .and_then(PositionGroup::from_label);
                    groups.entry(group).or_default().push(pic);
                }
                groups
                    .into_iter()
                    .map(|(group, pictographs)| OrganizedSection {
                        name: group.map(|g| g.as_str()).unwrap_or("unpositioned").to_string(),
                        kind: SectionKind::Section,
                        letter_types: Vec::new(),
                        pictographs,
                    })
                    .collect()
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // FILTER
    // ═══════════════════════════════════════════════════════════════════════════

    /// Keep pictographs whose letter is one of `types`
    pub fn filter_by_type(&self, pictographs: &[PictographData], types: &[LetterType]) -> Vec<PictographData> {
        pictographs
            .iter()
            .filter(|p| types.contains(&classify_letter(p.letter_str())))
            .cloned()
            .collect()
    }

    /// Keep pictographs ending in one of `groups`
    pub fn filter_by_end_position(
        &self,
        pictographs: &[PictographData],
        groups: &[PositionGroup],
    ) -> Vec<PictographData> {
        pictographs
            .iter()
            .filter(|p| end_position_group(p).is_some_and(|g| groups.contains(&g)))
            .cloned()
            .collect()
    }

    /// Keep pictographs whose reversal count falls in one of `buckets`
    pub fn filter_by_reversals(
        &self,
        pictographs: &[PictographData],
        buckets: &[ReversalBucket],
    ) -> Vec<PictographData> {
        let counts = precompute_reversals(pictographs, &self.context);
        pictographs
            .iter()
            .zip(counts)
            .filter(|(_, count)| buckets.contains(&ReversalBucket::from_count(*count)))
            .map(|(p, _)| p.clone())
            .collect()
    }
}

fn letter_cmp(a: &PictographData, b: &PictographData) -> Ordering {
    letter_order(a.letter_str()).cmp(&letter_order(b.letter_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ka_notation::{Location, MotionData, MotionType, Orientation};

    fn lettered(id: &str, letter: &str, blue: MotionData, red: MotionData) -> PictographData {
        PictographData::new(id, blue, red).with_letter(letter)
    }

    fn pro(start: Location, end: Location) -> MotionData {
        MotionData::shift(MotionType::Pro, start, end, Orientation::In)
    }

    fn anti(start: Location, end: Location) -> MotionData {
        MotionData::shift(MotionType::Anti, start, end, Orientation::In)
    }

    fn stat(at: Location) -> MotionData {
        MotionData::static_at(at, Orientation::In)
    }

    fn dash(from: Location) -> MotionData {
        MotionData::dash_from(from, Orientation::In)
    }

    use Location::{E, N, S, W};

    fn sample() -> Vec<PictographData> {
        vec![
            lettered("w", "W", pro(E, S), stat(N)),
            lettered("b", "B", anti(N, E), anti(S, W)),
            lettered("phi", "Φ", dash(N), stat(N)),
            lettered("a", "A", pro(N, E), pro(S, W)),
            lettered("g", "G", pro(N, E), pro(N, E)),
        ]
    }

    fn ids(pics: &[PictographData]) -> Vec<&str> {
        pics.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_sort_by_type() {
        let sorted = OptionOrganizer::new().sort(&sample(), SortMethod::Type);
        assert_eq!(ids(&sorted), vec!["a", "b", "g", "w", "phi"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_letters() {
        let pics = vec![
            lettered("first", "A", pro(N, E), pro(S, W)),
            lettered("second", "A", pro(E, S), pro(W, N)),
            lettered("third", "A", pro(S, W), pro(N, E)),
        ];
        let sorted = OptionOrganizer::new().sort(&pics, SortMethod::Type);
        assert_eq!(ids(&sorted), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_sort_by_end_position() {
        let sorted = OptionOrganizer::new().sort(&sample(), SortMethod::EndPosition);
        // alpha3 (a, b), alpha5 (w), alpha5 (phi: S/N), beta3 (g)
        assert_eq!(ids(&sorted), vec!["a", "b", "w", "phi", "g"]);
    }

    #[test]
    fn test_sort_by_reversals_uses_context() {
        let history = vec![BeatData::from_pictograph(1, &sample()[3])];
        let organizer = OptionOrganizer::new().with_context(history);
        let sorted = organizer.sort(&sample(), SortMethod::Reversals);
        // B reverses both actors against A's clockwise spin
        assert_eq!(sorted[0].id, "b");
        assert_eq!(ids(&sorted[1..]), vec!["a", "g", "w", "phi"]);
    }

    #[test]
    fn test_organize_keeps_stable_shape() {
        let sections = OptionOrganizer::new().organize(&sample(), SortMethod::Type);
        assert_eq!(sections.len(), 4);
        assert_eq!(sections[0].name, "Type1");
        assert_eq!(ids(&sections[0].pictographs), vec!["a", "b", "g"]);
        assert_eq!(ids(&sections[1].pictographs), vec!["w"]);
        assert!(sections[2].is_empty());
        assert_eq!(sections[2].kind, SectionKind::Section);
        assert_eq!(sections[3].kind, SectionKind::Grouped);
        assert_eq!(ids(&sections[3].pictographs), vec!["phi"]);

        let empty = OptionOrganizer::new().organize(&[], SortMethod::Reversals);
        assert_eq!(empty.len(), 4);
        assert!(empty.iter().all(|s| s.is_empty()));
    }

    #[test]
    fn test_organize_by_start_position() {
        let sections = OptionOrganizer::new().organize(&sample(), SortMethod::StartPosition);
        let names: Vec<&str> = sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta", "gamma"]);
        assert_eq!(ids(&sections[0].pictographs), vec!["a", "b"]);
        assert_eq!(ids(&sections[1].pictographs), vec!["g", "phi"]);
    }

    #[test]
    fn test_filters() {
        let organizer = OptionOrganizer::new();
        let pics = sample();

        let type1 = organizer.filter_by_type(&pics, &[LetterType::Type1]);
        assert_eq!(ids(&type1), vec!["b", "a", "g"]);

        let beta = organizer.filter_by_end_position(&pics, &[PositionGroup::Beta]);
        assert_eq!(ids(&beta), vec!["g"]);

        let history = vec![BeatData::from_pictograph(1, &pics[3])];
        let organizer = organizer.with_context(history);
        let two = organizer.filter_by_reversals(&pics, &[ReversalBucket::TwoReversals]);
        assert_eq!(ids(&two), vec!["b"]);
        let none = organizer.filter_by_reversals(&pics, &[ReversalBucket::Continuous]);
        assert_eq!(ids(&none), vec!["w", "phi", "a", "g"]);
    }
}
