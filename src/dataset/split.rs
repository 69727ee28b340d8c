// Train/validation split resolution
//
// Partitions recording indices into training and validation sets, either by
// an externally supplied fold assignment or trivially (all recordings go to
// training). The two sets are disjoint; in holdout mode together they cover
// every recording, in no-validation mode training alone does.

use crate::error::{ConfigError, DataError, EngineError};

/// How to partition recordings between training and validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitMode {
    /// Every recording trains; the validation set is empty
    NoValidation,
    /// Recordings whose fold equals the configured holdout fold validate,
    /// the rest train. One fold id per recording, in load order.
    Holdout { folds: Vec<u32> },
}

/// Resolved split: disjoint training and validation index sets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSplit {
    pub train_ids: Vec<usize>,
    pub val_ids: Vec<usize>,
}

impl AudioSplit {
    /// Partition `[0, files_number)` according to the split mode
    ///
    /// # Arguments
    /// * `files_number` - Total recording count N
    /// * `mode` - Fold-based holdout or trivial all-train split
    /// * `holdout_fold` - Fold id reserved for validation (holdout mode only)
    ///
    /// # Returns
    /// * `Err(ConfigError::EmptyValidationFold)` - holdout requested but no
    ///   recording carries the holdout fold (the eval ratio divides by the
    ///   validation count)
    /// * `Err(DataError::LengthMismatch)` - fold table does not parallel the
    ///   loaded recordings
    pub fn resolve(
        files_number: usize,
        mode: &SplitMode,
        holdout_fold: u32,
    ) -> Result<Self, EngineError> {
        let split = match mode {
            SplitMode::NoValidation => AudioSplit {
                train_ids: (0..files_number).collect(),
                val_ids: Vec::new(),
            },
            SplitMode::Holdout { folds } => {
                if folds.len() != files_number {
                    return Err(DataError::LengthMismatch {
                        field: "fold",
                        expected: files_number,
                        actual: folds.len(),
                    }
                    .into());
                }
                let (val_ids, train_ids): (Vec<usize>, Vec<usize>) =
                    (0..files_number).partition(|&i| folds[i] == holdout_fold);
                if val_ids.is_empty() {
                    return Err(ConfigError::EmptyValidationFold { holdout_fold }.into());
                }
                AudioSplit { train_ids, val_ids }
            }
        };

        log::info!(
            "[Split] Number of audio files for training: {}",
            split.train_ids.len()
        );
        log::info!(
            "[Split] Number of audio files for validation: {}",
            split.val_ids.len()
        );
        if !split.val_ids.is_empty() {
            log::info!(
                "[Split] Train-validation split ratio is approximately {:.6}:1",
                split.train_ids.len() as f64 / split.val_ids.len() as f64
            );
        }
        Ok(split)
    }
}
