//! Process-wide engine configuration.
//!
//! One immutable value constructed at init. Callers that need different
//! thresholds (tests, embedders) build their own instance; nothing in the
//! crate mutates a global.

use crate::constants::{
    CHUNK_LADDER_BIG_THRESHOLD, CHUNK_SIZE_BIG, CHUNK_SIZE_DEFAULT, CHUNK_SIZE_HUGE,
    DEFAULT_BUFFER_SIZE, LARGE_FILE_THRESHOLD, SEGMENT_SIZE, VERY_LARGE_FILE_THRESHOLD,
};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Buffered reader/writer capacity, and the whole-file threshold for
    /// padding reconciliation.
    pub buffer_size: usize,
    /// Payloads above this stream through the bounded-parallel chunk path.
    pub large_file_threshold: u64,
    /// Payloads above this go through the segmented random-access path.
    pub very_large_file_threshold: u64,
    /// Fixed segment stride for the segmented path.
    pub segment_size: u64,
    /// Upper bound on in-flight cipher tasks.
    pub max_parallelism: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            large_file_threshold: LARGE_FILE_THRESHOLD,
            very_large_file_threshold: VERY_LARGE_FILE_THRESHOLD,
            segment_size: SEGMENT_SIZE,
            max_parallelism: num_cpus::get().max(1),
        }
    }
}

impl EngineConfig {
    /// Chunk size ladder for the streaming mode.
    ///
    /// Keyed on payload length (not container length) so encryption and
    /// decryption of the same stream always agree on chunk boundaries.
    pub fn chunk_size_for(&self, payload_len: u64) -> usize {
        if payload_len > self.very_large_file_threshold {
            CHUNK_SIZE_HUGE
        } else if payload_len > CHUNK_LADDER_BIG_THRESHOLD {
            CHUNK_SIZE_BIG
        } else {
            CHUNK_SIZE_DEFAULT
        }
    }
}
