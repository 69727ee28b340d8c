// Dataset module - segmentation, indexing, and normalization primitives
//
// This module holds the leaf components of the batching engine:
// - index: recording records and the label vocabulary
// - split: train/validation partitioning
// - chunk: fixed-length segmentation of ragged frame ranges
// - stats: per-channel normalization statistics
// - batch: materialization of chunk descriptors into fixed-shape arrays
//
// The engine module wires these together and owns the iteration policies.

use ndarray::Array2;

pub mod batch;
pub mod chunk;
pub mod index;
pub mod split;
pub mod stats;

pub use chunk::ChunkDescriptor;
pub use index::{LabelVocabulary, RecordingRecord};
pub use split::{AudioSplit, SplitMode};
pub use stats::NormalizationStats;

/// In-memory training corpus handed over by the storage collaborator
///
/// `features` is the flat table of shape (total_frames, channels); the
/// remaining fields are parallel per-recording arrays. A scalar-per-frame
/// representation is a table with a single channel column.
#[derive(Debug, Clone)]
pub struct TrainCorpus {
    pub features: Array2<f32>,
    pub filenames: Vec<String>,
    pub labels: Vec<String>,
    pub manually_verified: Vec<bool>,
    pub begin_end: Vec<(usize, usize)>,
}

/// In-memory test corpus: keyed by filename, no fold or verification data
#[derive(Debug, Clone)]
pub struct TestCorpus {
    pub features: Array2<f32>,
    pub filenames: Vec<String>,
    pub labels: Vec<String>,
    pub begin_end: Vec<(usize, usize)>,
}
