//! Persisted flat vector index over manual chunks.

pub mod builder;
pub mod error;
pub mod store;
pub mod vector;

pub use builder::{open_index, BuildOutcome, IndexBuilder};
pub use error::IndexError;
pub use store::{read_meta, IndexEntry, IndexMeta};
pub use vector::{cosine_similarity, ScoredChunk, VectorIndex};
