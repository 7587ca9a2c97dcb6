use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::provider::{LlmError, LlmProvider, Message};

pub struct OllamaProvider {
    client: reqwest::Client,
    url: String,
    model: String,
}

impl OllamaProvider {
    pub fn new(url: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.trim_end_matches('/').to_string(),
            model,
        }
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    async fn complete(&self, messages: Vec<Message>) -> Result<String, LlmError> {
        let url = format!("{}/api/chat", self.url);

        let body = json!({
            "model": self.model,
            "messages": messages,
            "stream": false,
        });

        debug!("Ollama request to {}", url);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let resp: serde_json::Value = response.json().await?;
        let content = resp["message"]["content"]
            .as_str()
            .ok_or_else(|| LlmError::ParseError("missing message.content".into()))?
            .to_string();

        Ok(content)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::mock::MockEndpoint;

    #[tokio::test]
    async fn posts_non_streaming_chat() {
        let endpoint = MockEndpoint::start(
            200,
            json!({ "message": { "role": "assistant", "content": "Use 15W-50 oil." } }),
        )
        .await;
        let provider = OllamaProvider::new(endpoint.base_url.clone(), "llama3.2".into());

        let answer = provider
            .complete(vec![Message::user("Which oil?")])
            .await
            .unwrap();
        assert_eq!(answer, "Use 15W-50 oil.");

        let req = &endpoint.requests()[0];
        assert_eq!(req.path, "/api/chat");
        assert_eq!(req.body["model"], "llama3.2");
        assert_eq!(req.body["stream"], false);
        assert_eq!(req.body["messages"][0]["role"], "user");
    }

    #[tokio::test]
    async fn server_error_propagates() {
        let endpoint = MockEndpoint::start(500, json!({ "error": "model not loaded" })).await;
        let provider = OllamaProvider::new(endpoint.base_url.clone(), "llama3.2".into());
        let err = provider.complete(vec![Message::user("Which oil?")]).await.unwrap_err();
        assert!(matches!(err, LlmError::ApiError { status: 500, .. }));
    }
}
