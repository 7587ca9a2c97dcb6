//! Turning a directory of PDF manuals into embedded chunks.

pub mod document;
pub mod embedding;
pub mod pipeline;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;

pub use document::chunker::ChunkConfig;
pub use embedding::{create_embedder, Embedder, EmbeddingBatcher, EmbeddingError};
pub use pipeline::{fingerprint_sources, load_corpus, Corpus, IngestError, SourceManual};
