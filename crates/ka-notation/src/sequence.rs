//! Sequences: ordered beats plus a start position
//!
//! Every mutating operation returns a new value with beats renumbered
//! contiguously from 1.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::beat::{BeatData, BeatState};
use crate::error::NotationError;

/// An ordered list of beats
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceData {
    #[serde(default)]
    pub name: String,
    /// Beat 0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_position: Option<BeatData>,
    #[serde(default)]
    pub beats: Vec<BeatData>,
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl SequenceData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Build from beats, renumbering them
    pub fn from_beats(name: impl Into<String>, start_position: Option<BeatData>, beats: Vec<BeatData>) -> Self {
        Self {
            name: name.into(),
            start_position: start_position.map(|b| b.with_number(0)),
            beats: renumber(beats),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_start_position(&self, beat: BeatData) -> Self {
        let mut next = self.clone();
        next.start_position = Some(beat.with_number(0));
        next
    }

    pub fn with_metadata(&self, key: impl Into<String>, value: serde_json::Value) -> Self {
        let mut next = self.clone();
        next.metadata.insert(key.into(), value);
        next
    }

    pub fn len(&self) -> usize {
        self.beats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beats.is_empty()
    }

    /// Beat by 1-based number
    pub fn beat(&self, beat_number: usize) -> Option<&BeatData> {
        beat_number.checked_sub(1).and_then(|i| self.beats.get(i))
    }

    /// Concatenated beat letters
    pub fn word(&self) -> String {
        self.beats
            .iter()
            .filter_map(|b| b.letter.as_deref())
            .collect()
    }

    /// Append a beat
    pub fn add_beat(&self, beat: BeatData) -> Self {
        let mut beats = self.beats.clone();
        beats.push(beat);
        self.with_beats(beats)
    }

    /// Insert so the new beat takes `beat_number` (1..=len+1)
    pub fn insert_beat(&self, beat_number: usize, beat: BeatData) -> Result<Self, NotationError> {
        if beat_number == 0 || beat_number > self.beats.len() + 1 {
            return Err(self.out_of_range(beat_number));
        }
        let mut beats = self.beats.clone();
        beats.insert(beat_number - 1, beat);
        Ok(self.with_beats(beats))
    }

    /// Remove a beat by number
    pub fn remove_beat(&self, beat_number: usize) -> Result<Self, NotationError> {
        if beat_number == 0 || beat_number > self.beats.len() {
            return Err(self.out_of_range(beat_number));
        }
        let mut beats = self.beats.clone();
        beats.remove(beat_number - 1);
        Ok(self.with_beats(beats))
    }

    /// Replace a beat by number
    pub fn update_beat(&self, beat_number: usize, beat: BeatData) -> Result<Self, NotationError> {
        if beat_number == 0 || beat_number > self.beats.len() {
            return Err(self.out_of_range(beat_number));
        }
        let mut beats = self.beats.clone();
        beats[beat_number - 1] = beat;
        Ok(self.with_beats(beats))
    }

    /// End state of the last beat, or of the start position when empty
    pub fn end_state(&self) -> Option<BeatState> {
        match self.beats.last() {
            Some(beat) => beat.end_state(),
            None => self.start_position.as_ref()?.end_state(),
        }
    }

    fn with_beats(&self, beats: Vec<BeatData>) -> Self {
        Self {
            name: self.name.clone(),
            start_position: self.start_position.clone(),
            beats: renumber(beats),
            metadata: self.metadata.clone(),
        }
    }

    fn out_of_range(&self, beat: usize) -> NotationError {
        NotationError::BeatOutOfRange {
            beat,
            len: self.beats.len(),
        }
    }
}

fn renumber(beats: Vec<BeatData>) -> Vec<BeatData> {
    beats
        .into_iter()
        .enumerate()
        .map(|(i, b)| b.with_number(i + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lettered(letter: &str) -> BeatData {
        let mut beat = BeatData::blank(99);
        beat.letter = Some(letter.to_string());
        beat
    }

    fn numbers(seq: &SequenceData) -> Vec<usize> {
        seq.beats.iter().map(|b| b.beat_number).collect()
    }

    #[test]
    fn test_add_renumbers_and_builds_word() {
        let seq = SequenceData::new("test")
            .add_beat(lettered("A"))
            .add_beat(lettered("W-"))
            .add_beat(lettered("Φ"));
        assert_eq!(numbers(&seq), vec![1, 2, 3]);
        assert_eq!(seq.word(), "AW-Φ");
    }

    #[test]
    fn test_insert_and_remove_keep_numbers_contiguous() {
        let seq = SequenceData::new("test")
            .add_beat(lettered("A"))
            .add_beat(lettered("B"));

        let inserted = seq.insert_beat(1, lettered("C")).unwrap();
        assert_eq!(inserted.word(), "CAB");
        assert_eq!(numbers(&inserted), vec![1, 2, 3]);

        let removed = inserted.remove_beat(2).unwrap();
        assert_eq!(removed.word(), "CB");
        assert_eq!(numbers(&removed), vec![1, 2]);

        // Original untouched
        assert_eq!(seq.word(), "AB");
    }

    #[test]
    fn test_out_of_range_operations() {
        let seq = SequenceData::new("test").add_beat(lettered("A"));
        assert!(seq.remove_beat(0).is_err());
        assert!(seq.remove_beat(2).is_err());
        assert!(seq.update_beat(5, lettered("B")).is_err());
        assert!(seq.insert_beat(3, lettered("B")).is_err());
        assert!(seq.insert_beat(2, lettered("B")).is_ok());
    }

    #[test]
    fn test_update_beat() {
        let seq = SequenceData::new("test")
            .add_beat(lettered("A"))
            .add_beat(lettered("B"));
        let updated = seq.update_beat(2, lettered("Z")).unwrap();
        assert_eq!(updated.word(), "AZ");
        assert_eq!(updated.beat(2).unwrap().beat_number, 2);
        assert!(updated.beat(0).is_none());
    }
}
