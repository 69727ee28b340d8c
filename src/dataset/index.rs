// Recording index and label vocabulary
//
// A recording is a contiguous half-open range into the flat feature table,
// together with its label and verification flag. The label vocabulary is a
// bidirectional mapping between label strings and contiguous indices, built
// once from the training labels; lookups of unknown strings fail rather
// than silently extending the vocabulary.

use std::collections::HashMap;

use crate::error::{ConfigError, DataError};

/// One source audio item: a frame range plus its metadata
///
/// Immutable after load; `begin <= end <= total_frames` is enforced by
/// `validate_ranges` before any record is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingRecord {
    /// Source filename, used as the key for test-set iteration
    pub filename: String,
    /// Index into the label vocabulary
    pub label: usize,
    /// Whether the label was manually verified
    pub verified: bool,
    /// First frame of the recording in the flat feature table
    pub begin: usize,
    /// One past the last frame of the recording
    pub end: usize,
}

impl RecordingRecord {
    pub fn frames(&self) -> usize {
        self.end - self.begin
    }
}

/// Bidirectional label-string <-> contiguous-index mapping
///
/// Built once at load time from the sorted, de-duplicated training label
/// strings, so the index assignment is stable across runs.
#[derive(Debug, Clone)]
pub struct LabelVocabulary {
    names: Vec<String>,
    indices: HashMap<String, usize>,
}

impl LabelVocabulary {
    /// Build the vocabulary from raw label strings (duplicates welcome)
    pub fn from_labels<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut names: Vec<String> = labels.into_iter().map(str::to_owned).collect();
        names.sort();
        names.dedup();
        let indices = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Self { names, indices }
    }

    /// Map a label string to its index
    ///
    /// # Returns
    /// * `Err(ConfigError::UnknownLabel)` - if the string was not part of
    ///   the training vocabulary
    pub fn index_of(&self, label: &str) -> Result<usize, ConfigError> {
        self.indices
            .get(label)
            .copied()
            .ok_or_else(|| ConfigError::UnknownLabel {
                label: label.to_owned(),
            })
    }

    /// Map an index back to its label string
    pub fn name_of(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Check every offset range against the feature table bounds
///
/// Fails fast at load time with the index of the first offending range.
pub fn validate_ranges(ranges: &[(usize, usize)], total_frames: usize) -> Result<(), DataError> {
    for (index, &(begin, end)) in ranges.iter().enumerate() {
        if begin > end || end > total_frames {
            return Err(DataError::RangeOutOfBounds {
                index,
                begin,
                end,
                total_frames,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_is_sorted_and_deduplicated() {
        let vocab = LabelVocabulary::from_labels(["snare", "kick", "snare", "hihat"]);
        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.index_of("hihat").unwrap(), 0);
        assert_eq!(vocab.index_of("kick").unwrap(), 1);
        assert_eq!(vocab.index_of("snare").unwrap(), 2);
    }

    #[test]
    fn test_vocabulary_roundtrip() {
        let vocab = LabelVocabulary::from_labels(["b", "a", "c"]);
        for index in 0..vocab.len() {
            let name = vocab.name_of(index).unwrap();
            assert_eq!(vocab.index_of(name).unwrap(), index);
        }
        assert!(vocab.name_of(vocab.len()).is_none());
    }

    #[test]
    fn test_unknown_label_is_rejected() {
        let vocab = LabelVocabulary::from_labels(["kick"]);
        assert_eq!(
            vocab.index_of("cowbell"),
            Err(ConfigError::UnknownLabel {
                label: "cowbell".to_string()
            })
        );
    }

    #[test]
    fn test_validate_ranges_accepts_full_and_empty_ranges() {
        assert!(validate_ranges(&[(0, 10), (10, 10), (10, 20)], 20).is_ok());
    }

    #[test]
    fn test_validate_ranges_rejects_out_of_bounds() {
        let err = validate_ranges(&[(0, 10), (10, 21)], 20).unwrap_err();
        assert_eq!(
            err,
            DataError::RangeOutOfBounds {
                index: 1,
                begin: 10,
                end: 21,
                total_frames: 20
            }
        );
    }

    #[test]
    fn test_validate_ranges_rejects_inverted_range() {
        assert!(validate_ranges(&[(5, 3)], 20).is_err());
    }
}
