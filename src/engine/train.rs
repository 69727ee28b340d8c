// Training stream
//
// Infinite pull-based iterator over shuffled chunk batches. The stream owns
// a private copy of the canonical chunk pool and a dedicated RNG seeded
// from the training seed, so two streams with the same seed produce
// identical batch sequences and never interfere with evaluation shuffling.
//
// Epochs: the cursor walks the shuffled copy in batch_size steps; the final
// slice of an epoch may be short and is yielded as-is, never padded with
// the next epoch's chunks. On wraparound the copy is reshuffled with the
// same RNG instance (the stream continues, it is not re-seeded) and the
// epoch counter increments. Termination is entirely caller-driven.

use ndarray::Array3;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::DataEngine;
use crate::dataset::batch;
use crate::dataset::chunk::ChunkDescriptor;
use crate::error::DataError;

/// Lifecycle of a training stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorState {
    /// Constructed and shuffled, nothing pulled yet
    Initialized,
    /// At least one batch has been pulled
    Iterating,
}

/// One normalized training batch
#[derive(Debug, Clone)]
pub struct TrainBatch {
    /// Shape (batch, input_frames_number, channels)
    pub features: Array3<f32>,
    /// One label index per chunk, aligned with the batch axis
    pub labels: Vec<usize>,
}

/// Infinite training batch stream
pub struct TrainBatches<'a> {
    engine: &'a DataEngine,
    pool: Vec<ChunkDescriptor>,
    rng: StdRng,
    state: GeneratorState,
    cursor: usize,
    epoch: usize,
    epoch_len: usize,
}

impl<'a> TrainBatches<'a> {
    pub(crate) fn new(engine: &'a DataEngine) -> Self {
        let mut rng = StdRng::seed_from_u64(engine.config().seed);
        let mut pool = engine.chunk_pool().to_vec();
        pool.shuffle(&mut rng);

        let batch_size = engine.config().batch_size;
        let epoch_len = pool.len() / batch_size + 1;
        log::info!("[Train] Batch size: {}", batch_size);
        log::info!("[Train] One epoch lasts {} iterations", epoch_len);

        Self {
            engine,
            pool,
            rng,
            state: GeneratorState::Initialized,
            cursor: 0,
            epoch: 1,
            epoch_len,
        }
    }

    pub fn state(&self) -> GeneratorState {
        self.state
    }

    /// Current epoch, starting at 1
    pub fn epoch(&self) -> usize {
        self.epoch
    }

    /// Position of the next batch within the shuffled pool copy
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Iterations per epoch: `pool_len / batch_size + 1`
    pub fn epoch_len(&self) -> usize {
        self.epoch_len
    }
}

impl Iterator for TrainBatches<'_> {
    type Item = Result<TrainBatch, DataError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.state = GeneratorState::Iterating;

        if self.cursor >= self.pool.len() {
            // Epoch boundary: rewind and reshuffle, continuing the RNG stream.
            self.cursor = 0;
            self.pool.shuffle(&mut self.rng);
            self.epoch += 1;
        }

        let batch_size = self.engine.config().batch_size;
        let upper = (self.cursor + batch_size).min(self.pool.len());
        let slice = &self.pool[self.cursor..upper];

        let result = batch::materialize(
            self.engine.features(),
            slice,
            self.engine.config().input_frames_number,
        )
        .map(|(mut features, labels)| {
            self.engine.stats().apply(&mut features);
            TrainBatch { features, labels }
        });

        self.cursor += batch_size;
        Some(result)
    }
}
