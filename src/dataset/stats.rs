// Normalization statistics
//
// Per-channel mean and standard deviation over the raw frame ranges of the
// training recordings (full frames, not chunks, no padding). Computed once
// at engine construction and shared read-only by all three streams,
// including test, which must never recompute from its own data.

use ndarray::{s, Array1, Array2, Array3};

/// Per-channel mean and standard deviation of the training frames
#[derive(Debug, Clone)]
pub struct NormalizationStats {
    pub mean: Array1<f32>,
    pub std: Array1<f32>,
}

impl NormalizationStats {
    /// Compute statistics over the given frame ranges of the feature table
    ///
    /// Accumulates in f64 and uses the population standard deviation (no
    /// Bessel correction). Zero-variance channels are not floored; a later
    /// normalization divides by their zero std, so the condition is logged
    /// here where it is first observable.
    pub fn from_ranges(table: &Array2<f32>, ranges: &[(usize, usize)]) -> Self {
        let channels = table.ncols();
        let mut sum = vec![0f64; channels];
        let mut sum_sq = vec![0f64; channels];
        let mut frames = 0usize;

        for &(begin, end) in ranges {
            for row in table.slice(s![begin..end, ..]).rows() {
                for (c, &value) in row.iter().enumerate() {
                    let value = value as f64;
                    sum[c] += value;
                    sum_sq[c] += value * value;
                }
                frames += 1;
            }
        }

        if frames == 0 {
            log::warn!("[Stats] No training frames; statistics are undefined");
        }

        let n = frames as f64;
        let mut mean = Array1::<f32>::zeros(channels);
        let mut std = Array1::<f32>::zeros(channels);
        for c in 0..channels {
            let m = sum[c] / n;
            let variance = (sum_sq[c] / n - m * m).max(0.0);
            mean[c] = m as f32;
            std[c] = variance.sqrt() as f32;
            if std[c] == 0.0 {
                log::warn!(
                    "[Stats] Channel {} has zero variance over {} training frames; \
                     normalization will divide by zero",
                    c,
                    frames
                );
            }
        }

        log::info!(
            "[Stats] Computed mean/std over {} training frames, {} channels",
            frames,
            channels
        );
        Self { mean, std }
    }

    /// Normalize a materialized batch in place
    ///
    /// Subtracts the per-channel mean and divides by the per-channel std,
    /// broadcast over the batch and frame axes.
    pub fn apply(&self, batch: &mut Array3<f32>) {
        *batch -= &self.mean;
        *batch /= &self.std;
    }
}
