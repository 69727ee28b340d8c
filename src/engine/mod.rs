// Engine module - construction and the three iteration policies
//
// DataEngine owns everything the streams share read-only: the feature
// table, the recording records, the label vocabulary, the resolved split,
// the normalization statistics, and the canonical chunk pool. Construction
// runs the full validation pipeline so that every structural error surfaces
// before a stream is handed to the caller:
//   validate config -> build vocabulary -> validate ranges -> resolve split
//   -> compute stats -> build chunk pool
//
// Streams: TrainBatches (infinite, shuffled), EvalBatches (finite,
// per-recording), TestBatches (finite, deterministic order).

use ndarray::Array2;

use crate::config::EngineConfig;
use crate::dataset::chunk::{self, ChunkDescriptor};
use crate::dataset::index::{validate_ranges, LabelVocabulary, RecordingRecord};
use crate::dataset::split::{AudioSplit, SplitMode};
use crate::dataset::stats::NormalizationStats;
use crate::dataset::{TestCorpus, TrainCorpus};
use crate::error::{ConfigError, DataError, EngineError};

pub mod eval;
pub mod test;
pub mod train;

pub use eval::{EvalBatches, EvalItem, EvalMode};
pub use test::{TestBatches, TestItem};
pub use train::{GeneratorState, TrainBatch, TrainBatches};

/// Test corpus after label mapping, keyed by filename
#[derive(Debug)]
pub(crate) struct TestSet {
    features: Array2<f32>,
    filenames: Vec<String>,
    labels: Vec<usize>,
    begin_end: Vec<(usize, usize)>,
}

/// The chunking, indexing, and streaming engine
///
/// Built once from an in-memory corpus; everything it owns is immutable
/// afterwards except the optional test corpus installed by `load_test`.
/// The streams it hands out keep their mutable state (shuffle copies, RNGs,
/// cursors) inside the stream instance, never in the engine.
#[derive(Debug)]
pub struct DataEngine {
    config: EngineConfig,
    features: Array2<f32>,
    records: Vec<RecordingRecord>,
    vocabulary: LabelVocabulary,
    split: AudioSplit,
    stats: NormalizationStats,
    chunk_pool: Vec<ChunkDescriptor>,
    test_set: Option<TestSet>,
}

impl DataEngine {
    /// Build the engine from a training corpus
    ///
    /// # Arguments
    /// * `corpus` - Flat feature table plus parallel per-recording metadata
    /// * `split_mode` - Fold-based holdout or trivial all-train split
    /// * `config` - Engine parameters; validated here
    ///
    /// # Returns
    /// * `Err(EngineError)` - invalid config, mismatched metadata arrays,
    ///   out-of-bounds offset ranges, or an unsatisfiable split
    pub fn new(
        corpus: TrainCorpus,
        split_mode: SplitMode,
        config: EngineConfig,
    ) -> Result<Self, EngineError> {
        config.validate()?;

        let files_number = corpus.filenames.len();
        check_parallel("label", files_number, corpus.labels.len())?;
        check_parallel(
            "manually_verified",
            files_number,
            corpus.manually_verified.len(),
        )?;
        check_parallel("begin_end_ind", files_number, corpus.begin_end.len())?;
        validate_ranges(&corpus.begin_end, corpus.features.nrows())?;

        let vocabulary = LabelVocabulary::from_labels(corpus.labels.iter().map(String::as_str));
        let mut records = Vec::with_capacity(files_number);
        for i in 0..files_number {
            let (begin, end) = corpus.begin_end[i];
            records.push(RecordingRecord {
                filename: corpus.filenames[i].clone(),
                label: vocabulary.index_of(&corpus.labels[i])?,
                verified: corpus.manually_verified[i],
                begin,
                end,
            });
        }
        log::info!(
            "[Engine] Loaded {} recordings, {} labels, {} frames x {} channels",
            files_number,
            vocabulary.len(),
            corpus.features.nrows(),
            corpus.features.ncols()
        );

        let split = AudioSplit::resolve(files_number, &split_mode, config.holdout_fold)?;

        // Statistics come from the raw training frame ranges, before any
        // chunking or padding touches them.
        let train_ranges: Vec<(usize, usize)> = split
            .train_ids
            .iter()
            .map(|&i| (records[i].begin, records[i].end))
            .collect();
        let stats = NormalizationStats::from_ranges(&corpus.features, &train_ranges);

        let mut chunk_pool = Vec::new();
        for &i in &split.train_ids {
            let record = &records[i];
            chunk_pool.extend(chunk::segment(
                record.begin,
                record.end,
                record.label,
                config.input_frames_number,
            ));
        }
        log::info!(
            "[Engine] Number of chunks for training: {}",
            chunk_pool.len()
        );

        Ok(Self {
            config,
            features: corpus.features,
            records,
            vocabulary,
            split,
            stats,
            chunk_pool,
            test_set: None,
        })
    }

    /// Install the test corpus, mapping its labels through the training
    /// vocabulary
    ///
    /// # Returns
    /// * `Err(ConfigError::UnknownLabel)` - a test label string is absent
    ///   from the training vocabulary
    /// * `Err(DataError)` - mismatched metadata arrays or offset ranges that
    ///   escape the test feature table
    pub fn load_test(&mut self, corpus: TestCorpus) -> Result<(), EngineError> {
        let files_number = corpus.filenames.len();
        check_parallel("label", files_number, corpus.labels.len())?;
        check_parallel("begin_end_ind", files_number, corpus.begin_end.len())?;
        validate_ranges(&corpus.begin_end, corpus.features.nrows())?;

        let labels = corpus
            .labels
            .iter()
            .map(|label| self.vocabulary.index_of(label))
            .collect::<Result<Vec<usize>, ConfigError>>()?;

        log::info!(
            "[Engine] Loaded {} test recordings, {} frames",
            files_number,
            corpus.features.nrows()
        );
        self.test_set = Some(TestSet {
            features: corpus.features,
            filenames: corpus.filenames,
            labels,
            begin_end: corpus.begin_end,
        });
        Ok(())
    }

    /// Start an infinite training stream with its own RNG and shuffle copy
    pub fn train_batches(&self) -> TrainBatches<'_> {
        TrainBatches::new(self)
    }

    /// Start a finite evaluation pass at recording granularity
    pub fn eval_batches(&self, mode: EvalMode, verified_only: bool, shuffle: bool) -> EvalBatches<'_> {
        EvalBatches::new(self, mode, verified_only, shuffle)
    }

    /// Start the deterministic test stream
    ///
    /// # Returns
    /// * `Err(ConfigError::TestDataNotLoaded)` - `load_test` was never called
    pub fn test_batches(&self) -> Result<TestBatches<'_>, ConfigError> {
        let test_set = self.test_set.as_ref().ok_or(ConfigError::TestDataNotLoaded)?;
        Ok(TestBatches::new(self, test_set))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn vocabulary(&self) -> &LabelVocabulary {
        &self.vocabulary
    }

    pub fn stats(&self) -> &NormalizationStats {
        &self.stats
    }

    pub fn split(&self) -> &AudioSplit {
        &self.split
    }

    pub fn records(&self) -> &[RecordingRecord] {
        &self.records
    }

    /// The canonical chunk pool; training streams shuffle a private copy
    pub fn chunk_pool(&self) -> &[ChunkDescriptor] {
        &self.chunk_pool
    }

    pub(crate) fn features(&self) -> &Array2<f32> {
        &self.features
    }
}

fn check_parallel(field: &'static str, expected: usize, actual: usize) -> Result<(), DataError> {
    if expected != actual {
        return Err(DataError::LengthMismatch {
            field,
            expected,
            actual,
        });
    }
    Ok(())
}
