// Batch materialization
//
// Converts a list of chunk descriptors into two aligned fixed-shape arrays:
// features of shape (batch, chunk_len, channels) and one label per chunk.
// Short chunks are tiled along the frame axis until they reach the target
// length, then truncated, so every output chunk has exactly chunk_len
// frames. Normalization is the caller's job; keeping this transform raw
// lets the test stream reuse it with training statistics.

use ndarray::{s, Array2, Array3};

use crate::dataset::chunk::ChunkDescriptor;
use crate::error::DataError;

/// Materialize chunk descriptors into a feature batch and aligned labels
///
/// Row `i` of a short chunk's output repeats source row `i mod n` where `n`
/// is the source length, which reproduces tile-then-truncate semantics
/// without allocating the intermediate repetitions.
///
/// # Arguments
/// * `table` - Flat feature table the descriptors index into
/// * `chunks` - Descriptors to materialize; order is preserved
/// * `chunk_len` - Target chunk length L
///
/// # Returns
/// * `Err(DataError::RangeOutOfBounds)` - a descriptor escapes the table
/// * `Err(DataError::EmptyChunk)` - a zero-frame descriptor cannot be tiled
pub fn materialize(
    table: &Array2<f32>,
    chunks: &[ChunkDescriptor],
    chunk_len: usize,
) -> Result<(Array3<f32>, Vec<usize>), DataError> {
    let channels = table.ncols();
    let mut features = Array3::<f32>::zeros((chunks.len(), chunk_len, channels));
    let mut labels = Vec::with_capacity(chunks.len());

    for (b, chunk) in chunks.iter().enumerate() {
        if chunk.begin > chunk.end || chunk.end > table.nrows() {
            return Err(DataError::RangeOutOfBounds {
                index: b,
                begin: chunk.begin,
                end: chunk.end,
                total_frames: table.nrows(),
            });
        }
        let frames = chunk.end - chunk.begin;
        if frames == 0 {
            return Err(DataError::EmptyChunk {
                begin: chunk.begin,
                end: chunk.end,
            });
        }

        let source = table.slice(s![chunk.begin..chunk.end, ..]);
        let mut target = features.slice_mut(s![b, .., ..]);
        for i in 0..chunk_len {
            target.row_mut(i).assign(&source.row(i % frames));
        }
        labels.push(chunk.label);
    }

    Ok((features, labels))
}
