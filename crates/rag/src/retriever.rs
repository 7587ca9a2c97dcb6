use std::sync::Arc;

use tracing::debug;

use manualqa_index::{ScoredChunk, VectorIndex};
use manualqa_ingest::Embedder;

use crate::error::RagError;

/// Embeds questions and looks them up in a loaded index.
#[derive(Clone)]
pub struct Retriever {
    index: Arc<VectorIndex>,
    embedder: Arc<dyn Embedder>,
}

impl Retriever {
    /// Fails if the index was built with a different embedding model.
    pub fn new(index: Arc<VectorIndex>, embedder: Arc<dyn Embedder>) -> Result<Self, RagError> {
        index.check_model(embedder.model_name())?;
        Ok(Self { index, embedder })
    }

    pub fn index(&self) -> &VectorIndex {
        &self.index
    }

    /// The `k` chunks closest to `question`, best first.
    pub async fn retrieve(&self, question: &str, k: usize) -> Result<Vec<ScoredChunk>, RagError> {
        if k == 0 {
            return Err(manualqa_index::IndexError::InvalidK.into());
        }
        let query = self.embedder.embed_query(question).await?;
        let hits = self.index.search(&query, k)?;
        for hit in &hits {
            debug!(score = hit.score, source = %hit.chunk.citation(), "Retrieved chunk");
        }
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{build_index, KeywordEmbedder};
    use manualqa_index::IndexError;

    #[tokio::test]
    async fn returns_k_or_everything() {
        let (_dir, index) = build_index(&[
            "Torque spec: 25 Nm",
            "Oil capacity 2.5 L",
            "Chain slack 20 mm",
        ])
        .await;
        let retriever = Retriever::new(index, Arc::new(KeywordEmbedder::new())).unwrap();

        for k in 1..=3 {
            assert_eq!(retriever.retrieve("oil change", k).await.unwrap().len(), k);
        }
        assert_eq!(retriever.retrieve("oil change", 10).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn best_match_comes_first() {
        let (_dir, index) = build_index(&["Oil capacity 2.5 L", "Torque spec: 25 Nm"]).await;
        let retriever = Retriever::new(index, Arc::new(KeywordEmbedder::new())).unwrap();

        let hits = retriever.retrieve("What is the torque spec?", 1).await.unwrap();
        assert!(hits[0].chunk.content.contains("Torque spec: 25 Nm"));
    }

    #[tokio::test]
    async fn zero_k_is_rejected_before_embedding() {
        let (_dir, index) = build_index(&["Oil capacity 2.5 L"]).await;
        let embedder = Arc::new(KeywordEmbedder::new());
        let retriever = Retriever::new(index, embedder.clone()).unwrap();

        let err = retriever.retrieve("oil", 0).await.unwrap_err();
        assert!(matches!(err, RagError::Index(IndexError::InvalidK)));
        assert_eq!(embedder.calls(), 0);
    }

    #[tokio::test]
    async fn other_model_is_refused() {
        let (_dir, index) = build_index(&["Oil capacity 2.5 L"]).await;
        let err = Retriever::new(index, Arc::new(KeywordEmbedder::named("bge-small-en-v1.5")))
            .err()
            .unwrap();
        assert!(matches!(err, RagError::Index(IndexError::ModelMismatch { .. })));
    }
}
