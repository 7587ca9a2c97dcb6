//! Recursive character chunking.
//!
//! Splits each extracted page into overlapping chunks of bounded length.
//! Text is cut at the coarsest separator present (paragraph, line, word,
//! then character), and the resulting pieces are greedily merged back up to
//! the chunk size, carrying a tail of each emitted chunk into the next.
//!
//! Separators are not preserved verbatim: empty fragments between repeated
//! separators are dropped, so a run such as `"\n\n\n\n"` comes back as a
//! single `"\n\n"` in the chunk text.

mod helpers;
mod strategies;
mod types;

pub use strategies::{chunk_document, chunk_text};
pub use types::ChunkConfig;
