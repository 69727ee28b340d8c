// Audioset Batcher - chunking, indexing, and streaming engine
//
// Prepares variable-length audio feature sequences for fixed-input-size
// model training: segments ragged per-recording frame ranges into a flat
// pool of fixed-length chunks, splits recordings into train/validation
// subsets, computes normalization statistics from the training subset, and
// streams shuffled or sequential batches to a consumer.

// Module declarations
pub mod config;
pub mod dataset;
pub mod engine;
pub mod error;

// Re-exports for convenience
pub use config::EngineConfig;
pub use dataset::{SplitMode, TestCorpus, TrainCorpus};
pub use engine::{
    DataEngine, EvalBatches, EvalItem, EvalMode, TestBatches, TestItem, TrainBatch, TrainBatches,
};
pub use error::{ConfigError, DataError, EngineError};
