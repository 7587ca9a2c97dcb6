use std::path::PathBuf;

use manualqa_ingest::{EmbeddingError, IngestError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("no index at {0}; run `manualqa ingest` first")]
    NotBuilt(PathBuf),

    #[error("index is corrupt: {0}")]
    Corrupt(String),

    #[error("vector dimension mismatch: index has {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("index was built with embedding model '{indexed}' but '{configured}' is configured")]
    ModelMismatch { indexed: String, configured: String },

    #[error("k must be at least 1")]
    InvalidK,
}
