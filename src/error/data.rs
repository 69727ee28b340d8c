// Data-shape errors
//
// These errors cover offset tables that do not fit the feature table they
// index into, parallel metadata arrays of mismatched length, and degenerate
// zero-frame chunks reaching materialization.

use std::fmt;

/// Data-shape errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// An offset range violates `begin <= end <= total_frames`
    RangeOutOfBounds {
        index: usize,
        begin: usize,
        end: usize,
        total_frames: usize,
    },

    /// A per-recording metadata array does not match the recording count
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A zero-frame chunk cannot be tiled to the target length
    EmptyChunk { begin: usize, end: usize },
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::RangeOutOfBounds {
                index,
                begin,
                end,
                total_frames,
            } => {
                write!(
                    f,
                    "range [{}, {}) at index {} violates begin <= end <= total_frames ({})",
                    begin, end, index, total_frames
                )
            }
            DataError::LengthMismatch {
                field,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "'{}' has {} entries but {} recordings were loaded",
                    field, actual, expected
                )
            }
            DataError::EmptyChunk { begin, end } => {
                write!(f, "chunk [{}, {}) has no frames to tile", begin, end)
            }
        }
    }
}

impl std::error::Error for DataError {}
