//! In-process sentence embeddings via fastembed (ONNX runtime).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use tracing::info;

use super::traits::{Embedder, EmbeddingError};

/// Local embedder; the model is downloaded once into the fastembed cache.
pub struct FastEmbedder {
    /// `embed` needs `&mut`, and runs on the blocking pool.
    model: Arc<Mutex<TextEmbedding>>,
    model_name: String,
}

impl FastEmbedder {
    /// Load a model by its sentence-transformers name, e.g. `all-MiniLM-L6-v2`.
    pub fn new(model_name: &str) -> Result<Self, EmbeddingError> {
        let model = resolve_model(model_name)?;
        info!("Loading embedding model {}", model_name);
        let text_model = TextEmbedding::try_new(
            InitOptions::new(model).with_show_download_progress(true),
        )
        .map_err(|e| EmbeddingError::Model(e.to_string()))?;

        Ok(Self {
            model: Arc::new(Mutex::new(text_model)),
            model_name: model_name.to_string(),
        })
    }
}

/// Map a configured model name onto a fastembed model.
pub fn resolve_model(name: &str) -> Result<EmbeddingModel, EmbeddingError> {
    let lowered = name.to_ascii_lowercase();
    let short = lowered
        .strip_prefix("sentence-transformers/")
        .or_else(|| lowered.strip_prefix("baai/"))
        .unwrap_or(&lowered);
    match short {
        "all-minilm-l6-v2" => Ok(EmbeddingModel::AllMiniLML6V2),
        "all-minilm-l12-v2" => Ok(EmbeddingModel::AllMiniLML12V2),
        "bge-small-en-v1.5" => Ok(EmbeddingModel::BGESmallENV15),
        "bge-base-en-v1.5" => Ok(EmbeddingModel::BGEBaseENV15),
        _ => Err(EmbeddingError::NotConfigured(format!(
            "unsupported fastembed model '{name}'"
        ))),
    }
}

#[async_trait]
impl Embedder for FastEmbedder {
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let model = Arc::clone(&self.model);
        let owned: Vec<String> = texts.iter().map(|t| t.to_string()).collect();

        tokio::task::spawn_blocking(move || {
            let mut model = model
                .lock()
                .map_err(|_| EmbeddingError::Model("embedding model lock poisoned".into()))?;
            model
                .embed(owned, None)
                .map_err(|e| EmbeddingError::Model(e.to_string()))
        })
        .await
        .map_err(|e| EmbeddingError::Model(e.to_string()))?
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_sentence_transformer_names() {
        assert!(matches!(
            resolve_model("all-MiniLM-L6-v2"),
            Ok(EmbeddingModel::AllMiniLML6V2)
        ));
        assert!(matches!(
            resolve_model("sentence-transformers/all-MiniLM-L6-v2"),
            Ok(EmbeddingModel::AllMiniLML6V2)
        ));
        assert!(matches!(
            resolve_model("BAAI/bge-small-en-v1.5"),
            Ok(EmbeddingModel::BGESmallENV15)
        ));
    }

    #[test]
    fn unknown_model_is_not_configured() {
        assert!(matches!(
            resolve_model("word2vec"),
            Err(EmbeddingError::NotConfigured(_))
        ));
    }
}
