// Chunk segmentation
//
// Turns one recording's half-open frame range into fixed-length chunk
// descriptors with 50% overlap. Recordings at or below the target length
// produce a single (possibly short) descriptor; materialization tiles those
// up to the full length later.

/// One fixed-length window of frames, addressed into the flat feature table
///
/// Invariant: `end > begin`, and `end - begin == chunk_len` for every
/// descriptor except the single descriptor of a recording shorter than
/// `chunk_len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkDescriptor {
    /// Absolute frame index where the chunk starts
    pub begin: usize,
    /// Absolute frame index one past the last frame
    pub end: usize,
    /// Label index of the recording the chunk was cut from
    pub label: usize,
}

impl ChunkDescriptor {
    pub fn frames(&self) -> usize {
        self.end - self.begin
    }
}

/// Split a recording's `[begin, end)` range into chunk descriptors
///
/// Start offsets form an arithmetic sequence from `begin` with step
/// `chunk_len / 2`, stopping once a start would exceed `end - chunk_len`.
/// The stop bound is inclusive: with `chunk_len = 4` the range `[0, 10)`
/// yields starts `[0, 2, 4, 6]`. Up to `chunk_len / 2 - 1` trailing frames
/// may stay uncovered; that remainder is accepted, not corrected.
///
/// # Arguments
/// * `begin` - First frame of the recording in the flat feature table
/// * `end` - One past the last frame of the recording
/// * `label` - Label index carried into every descriptor
/// * `chunk_len` - Target chunk length L; must be >= 2 (config-validated)
pub fn segment(begin: usize, end: usize, label: usize, chunk_len: usize) -> Vec<ChunkDescriptor> {
    debug_assert!(begin <= end, "offset ranges are validated at load time");
    debug_assert!(chunk_len >= 2, "chunk length is validated at construction");

    if end - begin <= chunk_len {
        return vec![ChunkDescriptor { begin, end, label }];
    }

    let step = chunk_len / 2;
    let last_start = end - chunk_len;
    let mut chunks = Vec::with_capacity((last_start - begin) / step + 1);
    let mut start = begin;
    while start <= last_start {
        chunks.push(ChunkDescriptor {
            begin: start,
            end: start + chunk_len,
            label,
        });
        start += step;
    }
    chunks
}
