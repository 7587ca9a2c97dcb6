//! Chunk configuration.

use manualqa_core::config::ChunkingConfig;

/// Separators tried in order, coarsest first. The empty separator splits
/// into single characters and always succeeds.
pub const DEFAULT_SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

/// Configuration for the chunking engine. Lengths are in characters.
#[derive(Debug, Clone)]
pub struct ChunkConfig {
    /// Maximum characters per chunk (default: 1000).
    pub chunk_size: usize,
    /// Characters carried over between adjacent chunks (default: 200).
    pub chunk_overlap: usize,
    /// Split points, coarsest first.
    pub separators: Vec<String>,
}

impl ChunkConfig {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
            separators: DEFAULT_SEPARATORS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self::new(1000, 200)
    }
}

impl From<&ChunkingConfig> for ChunkConfig {
    fn from(config: &ChunkingConfig) -> Self {
        Self::new(config.chunk_size, config.chunk_overlap)
    }
}
