// Test stream
//
// Finite, deterministic iterator over every test recording in table order:
// no shuffling, no cap. Features are normalized with the TRAINING mean and
// std. Recomputing statistics from test data would leak the test
// distribution into the transform, so the training statistics are
// authoritative here by design.

use ndarray::Array3;

use super::{DataEngine, TestSet};
use crate::dataset::{batch, chunk};
use crate::error::DataError;

/// One test recording: all of its chunks as a single batch
#[derive(Debug, Clone)]
pub struct TestItem {
    /// Shape (chunks, input_frames_number, channels)
    pub features: Array3<f32>,
    /// Source filename of the recording
    pub filename: String,
    /// Label index of the recording
    pub label: usize,
}

/// Finite test stream in table order
pub struct TestBatches<'a> {
    engine: &'a DataEngine,
    test_set: &'a TestSet,
    position: usize,
}

impl<'a> TestBatches<'a> {
    pub(crate) fn new(engine: &'a DataEngine, test_set: &'a TestSet) -> Self {
        Self {
            engine,
            test_set,
            position: 0,
        }
    }
}

impl Iterator for TestBatches<'_> {
    type Item = Result<TestItem, DataError>;

    fn next(&mut self) -> Option<Self::Item> {
        let &(begin, end) = self.test_set.begin_end.get(self.position)?;
        let label = self.test_set.labels[self.position];
        let filename = self.test_set.filenames[self.position].clone();
        self.position += 1;

        let chunks = chunk::segment(begin, end, label, self.engine.config().input_frames_number);
        let result = batch::materialize(
            &self.test_set.features,
            &chunks,
            self.engine.config().input_frames_number,
        )
        .map(|(mut features, _)| {
            self.engine.stats().apply(&mut features);
            TestItem {
                features,
                filename,
                label,
            }
        });
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.test_set.begin_end.len() - self.position;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TestBatches<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::dataset::{SplitMode, TestCorpus, TrainCorpus};
    use ndarray::Array2;

    fn build_engine_with_test(test_value: f32) -> DataEngine {
        // Training frames alternate 0 and 2 per channel: mean 1, std 1.
        let features = Array2::from_shape_fn((8, 2), |(f, _)| ((f % 2) * 2) as f32);
        let corpus = TrainCorpus {
            features,
            filenames: vec!["a.wav".into(), "b.wav".into()],
            labels: vec!["kick".into(), "snare".into()],
            manually_verified: vec![true, true],
            begin_end: vec![(0, 4), (4, 8)],
        };
        let config = EngineConfig {
            input_frames_number: 4,
            batch_size: 2,
            eval_audios_number: 10,
            ..EngineConfig::default()
        };
        let mut engine = DataEngine::new(corpus, SplitMode::NoValidation, config).unwrap();

        let test_corpus = TestCorpus {
            features: Array2::from_elem((10, 2), test_value),
            filenames: vec!["t0.wav".into(), "t1.wav".into()],
            labels: vec!["snare".into(), "kick".into()],
            begin_end: vec![(0, 4), (4, 10)],
        };
        engine.load_test(test_corpus).unwrap();
        engine
    }

    #[test]
    fn test_iterates_in_table_order_with_filenames() {
        let engine = build_engine_with_test(5.0);
        let items: Vec<TestItem> = engine
            .test_batches()
            .unwrap()
            .map(|item| item.unwrap())
            .collect();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].filename, "t0.wav");
        assert_eq!(items[1].filename, "t1.wav");
        assert_eq!(
            items[0].label,
            engine.vocabulary().index_of("snare").unwrap()
        );
    }

    #[test]
    fn test_normalizes_with_training_statistics() {
        // Constant test table c = 5, train mean 1, train std 1:
        // every normalized frame equals (5 - 1) / 1 = 4.
        let engine = build_engine_with_test(5.0);
        for item in engine.test_batches().unwrap() {
            let item = item.unwrap();
            for &value in item.features.iter() {
                assert!((value - 4.0).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_stream_is_restartable_and_deterministic() {
        let engine = build_engine_with_test(3.0);
        let first: Vec<String> = engine
            .test_batches()
            .unwrap()
            .map(|item| item.unwrap().filename)
            .collect();
        let second: Vec<String> = engine
            .test_batches()
            .unwrap()
            .map(|item| item.unwrap().filename)
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_chunk_counts_follow_segmentation() {
        let engine = build_engine_with_test(1.0);
        let items: Vec<TestItem> = engine
            .test_batches()
            .unwrap()
            .map(|item| item.unwrap())
            .collect();
        // Recording 0 spans 4 frames -> 1 chunk; recording 1 spans 6 frames
        // -> starts [4, 6] -> 2 chunks.
        assert_eq!(items[0].features.dim(), (1, 4, 2));
        assert_eq!(items[1].features.dim(), (2, 4, 2));
    }
}
