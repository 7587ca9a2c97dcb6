use std::sync::Arc;

use tracing::debug;

use super::traits::{Embedder, EmbeddingError};

/// Feeds texts to an embedder in fixed-size batches, preserving order.
pub struct EmbeddingBatcher {
    embedder: Arc<dyn Embedder>,
    batch_size: usize,
}

impl EmbeddingBatcher {
    pub fn new(embedder: Arc<dyn Embedder>, batch_size: usize) -> Self {
        Self {
            embedder,
            batch_size: batch_size.max(1),
        }
    }

    /// Embed every text, one request per batch. Returns one vector per input.
    pub async fn embed_all(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut vectors = Vec::with_capacity(texts.len());
        for (n, batch) in texts.chunks(self.batch_size).enumerate() {
            let refs: Vec<&str> = batch.iter().map(String::as_str).collect();
            let embedded = self.embedder.embed_batch(&refs).await?;
            if embedded.len() != refs.len() {
                return Err(EmbeddingError::CountMismatch {
                    expected: refs.len(),
                    actual: embedded.len(),
                });
            }
            debug!(batch = n, size = refs.len(), "Embedded batch");
            vectors.extend(embedded);
        }
        Ok(vectors)
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }
}
