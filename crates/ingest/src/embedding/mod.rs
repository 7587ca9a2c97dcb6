pub mod azure;
pub mod batcher;
pub mod local;
pub mod ollama;
pub mod traits;

use std::sync::Arc;

use manualqa_core::Config;

pub use azure::AzureEmbedder;
pub use batcher::EmbeddingBatcher;
pub use local::FastEmbedder;
pub use ollama::OllamaEmbedder;
pub use traits::{Embedder, EmbeddingError};

/// Create the embedding backend selected by `EMBEDDING_PROVIDER`.
pub fn create_embedder(config: &Config) -> Result<Arc<dyn Embedder>, EmbeddingError> {
    match config.embedding.provider.as_str() {
        "fastembed" | "local" => Ok(Arc::new(FastEmbedder::new(&config.embedding.model)?)),
        "ollama" => Ok(Arc::new(OllamaEmbedder::new(
            config.ollama.url.clone(),
            config.ollama.embedding_model.clone(),
        ))),
        "azure" => {
            let deployment = config.embedding.deployment_id.clone().ok_or_else(|| {
                EmbeddingError::NotConfigured("EMBEDDING_DEPLOYMENT_ID not set".into())
            })?;
            Ok(Arc::new(AzureEmbedder::new(&config.azure, deployment)))
        }
        other => Err(EmbeddingError::NotConfigured(format!(
            "unknown embedding provider: '{}'",
            other
        ))),
    }
}
