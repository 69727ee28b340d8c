// Evaluation stream
//
// Finite iterator at recording granularity: each item is one recording's
// full chunk set, materialized as a single batch and normalized with the
// training statistics. Selection (mode, verified filter, shuffle, cap)
// happens once at construction; calling eval_batches again re-selects with
// a fresh RNG seeded from eval_seed, so repeated passes are deterministic.

use ndarray::Array3;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::DataEngine;
use crate::dataset::{batch, chunk};
use crate::error::DataError;

/// Which split an evaluation pass draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalMode {
    Train,
    Validation,
}

/// One evaluated recording: all of its chunks as a single batch
#[derive(Debug, Clone)]
pub struct EvalItem {
    /// Shape (chunks, input_frames_number, channels)
    pub features: Array3<f32>,
    /// One label index per chunk (all equal to the recording label)
    pub labels: Vec<usize>,
    /// Label index of the recording itself
    pub label: usize,
}

/// Finite per-recording evaluation stream
pub struct EvalBatches<'a> {
    engine: &'a DataEngine,
    selected: Vec<usize>,
    position: usize,
}

impl<'a> EvalBatches<'a> {
    pub(crate) fn new(
        engine: &'a DataEngine,
        mode: EvalMode,
        verified_only: bool,
        shuffle: bool,
    ) -> Self {
        let ids = match mode {
            EvalMode::Train => &engine.split().train_ids,
            EvalMode::Validation => &engine.split().val_ids,
        };
        let mut selected: Vec<usize> = ids
            .iter()
            .copied()
            .filter(|&id| !verified_only || engine.records()[id].verified)
            .collect();
        if shuffle {
            let mut rng = StdRng::seed_from_u64(engine.config().eval_seed);
            selected.shuffle(&mut rng);
        }
        selected.truncate(engine.config().eval_audios_number);

        log::info!(
            "[Eval] Number of audios used for evaluation: {}",
            selected.len()
        );
        Self {
            engine,
            selected,
            position: 0,
        }
    }
}

impl Iterator for EvalBatches<'_> {
    type Item = Result<EvalItem, DataError>;

    fn next(&mut self) -> Option<Self::Item> {
        let &id = self.selected.get(self.position)?;
        self.position += 1;

        let record = &self.engine.records()[id];
        let chunks = chunk::segment(
            record.begin,
            record.end,
            record.label,
            self.engine.config().input_frames_number,
        );
        let result = batch::materialize(
            self.engine.features(),
            &chunks,
            self.engine.config().input_frames_number,
        )
        .map(|(mut features, labels)| {
            self.engine.stats().apply(&mut features);
            EvalItem {
                features,
                labels,
                label: record.label,
            }
        });
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.selected.len() - self.position;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for EvalBatches<'_> {}
