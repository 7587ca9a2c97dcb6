use manualqa_index::IndexError;
use manualqa_ingest::EmbeddingError;
use manualqa_llm::LlmError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RagError {
    #[error(transparent)]
    Index(#[from] IndexError),

    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("answer generation failed: {0}")]
    Llm(#[from] LlmError),
}
