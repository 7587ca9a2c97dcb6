//! Retrieval-augmented answering over the manual index.

pub mod assistant;
pub mod error;
pub mod prompt;
pub mod retriever;
pub mod transcript;

#[cfg(test)]
mod testing;

pub use assistant::{Answer, Assistant};
pub use error::RagError;
pub use prompt::build_messages;
pub use retriever::Retriever;
pub use transcript::{Transcript, Turn};
