// Configuration errors
//
// These errors cover invalid engine parameters, split requests that cannot
// be satisfied, and label-vocabulary misses. All of them are fatal and are
// surfaced immediately; there is no retry path.

use std::fmt;

/// Configuration-related errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Chunk length must be at least 2 frames (the overlap stride is L / 2,
    /// which degenerates to a zero step below that)
    ChunkLengthTooSmall { input_frames_number: usize },

    /// Batch size must be at least 1 (epoch length divides by it)
    BatchSizeZero,

    /// Validation was requested but no recording belongs to the holdout fold
    EmptyValidationFold { holdout_fold: u32 },

    /// A label string is not present in the training label vocabulary
    UnknownLabel { label: String },

    /// The test stream was requested before a test corpus was installed
    TestDataNotLoaded,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ChunkLengthTooSmall {
                input_frames_number,
            } => {
                write!(
                    f,
                    "input_frames_number must be at least 2 (got {})",
                    input_frames_number
                )
            }
            ConfigError::BatchSizeZero => write!(f, "batch_size must be at least 1"),
            ConfigError::EmptyValidationFold { holdout_fold } => {
                write!(
                    f,
                    "validation requested but holdout fold {} contains no recordings",
                    holdout_fold
                )
            }
            ConfigError::UnknownLabel { label } => {
                write!(f, "label '{}' is not in the training vocabulary", label)
            }
            ConfigError::TestDataNotLoaded => {
                write!(f, "test corpus not loaded. Call load_test() first.")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
