use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use manualqa_core::config::AzureConfig;

use super::traits::{Embedder, EmbeddingError};

/// Azure OpenAI embeddings deployment, sharing the chat credentials.
pub struct AzureEmbedder {
    client: Client,
    endpoint: String,
    api_key: String,
    api_version: String,
    deployment: String,
}

impl AzureEmbedder {
    pub fn new(azure: &AzureConfig, deployment: String) -> Self {
        let endpoint = format!(
            "{}/openai/deployments/{}/embeddings",
            azure.api_base.trim_end_matches('/'),
            deployment
        );
        Self {
            client: Client::new(),
            endpoint,
            api_key: azure.api_key.clone(),
            api_version: azure.api_version.clone(),
            deployment,
        }
    }
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    input: &'a [&'a str],
}

#[derive(Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedItem>,
}

#[derive(Deserialize)]
struct EmbedItem {
    embedding: Vec<f32>,
    index: usize,
}

#[async_trait]
impl Embedder for AzureEmbedder {
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        debug!("Azure embed request to {} ({} texts)", self.endpoint, texts.len());

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("api-version", self.api_version.as_str())])
            .header("api-key", &self.api_key)
            .json(&EmbedRequest { input: texts })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Api(format!("{status}: {body}")));
        }

        let mut resp: EmbedResponse = response.json().await?;

        // Sort by index to maintain input order.
        resp.data.sort_by_key(|item| item.index);

        if resp.data.len() != texts.len() {
            return Err(EmbeddingError::CountMismatch {
                expected: texts.len(),
                actual: resp.data.len(),
            });
        }
        Ok(resp.data.into_iter().map(|item| item.embedding).collect())
    }

    fn model_name(&self) -> &str {
        &self.deployment
    }
}
