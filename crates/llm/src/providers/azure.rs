use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use manualqa_core::config::AzureConfig;

use crate::provider::{LlmError, LlmProvider, Message};

/// Azure OpenAI chat completions against a named deployment.
pub struct AzureOpenAiProvider {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    api_version: String,
    deployment: String,
}

impl AzureOpenAiProvider {
    pub fn new(config: &AzureConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            api_version: config.api_version.clone(),
            deployment: config.deployment_id.clone(),
        }
    }
}

#[async_trait]
impl LlmProvider for AzureOpenAiProvider {
    async fn complete(&self, messages: Vec<Message>) -> Result<String, LlmError> {
        let url = format!(
            "{}/openai/deployments/{}/chat/completions",
            self.api_base, self.deployment
        );
        debug!("Azure OpenAI request to {} ({} messages)", url, messages.len());

        let body = json!({ "messages": messages });

        let response = self
            .client
            .post(&url)
            .query(&[("api-version", self.api_version.as_str())])
            .header("api-key", &self.api_key)
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
        let content = resp["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| LlmError::ParseError("missing choices[0].message.content".into()))?
            .to_string();

        Ok(content)
    }

    fn model(&self) -> &str {
        &self.deployment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::mock::MockEndpoint;

    fn provider_for(endpoint: &MockEndpoint) -> AzureOpenAiProvider {
        AzureOpenAiProvider::new(&AzureConfig {
            api_base: format!("{}/", endpoint.base_url),
            api_key: "secret-key".into(),
            api_version: "2023-05-15".into(),
            deployment_id: "gpt-4o".into(),
        })
    }

    fn conversation() -> Vec<Message> {
        vec![
            Message::system("You are a mechanic."),
            Message::assistant("Context 1:\nTorque spec: 25 Nm"),
            Message::user("What is the torque spec?"),
        ]
    }

    #[tokio::test]
    async fn returns_first_choice_verbatim() {
        let reply = "  Step 1: tighten to 25 Nm.\n\nStep 2: recheck.  ";
        let endpoint = MockEndpoint::start(
            200,
            json!({ "choices": [
                { "message": { "role": "assistant", "content": reply } },
                { "message": { "role": "assistant", "content": "ignored" } }
            ]}),
        )
        .await;

        let answer = provider_for(&endpoint).complete(conversation()).await.unwrap();
        assert_eq!(answer, reply);
    }

    #[tokio::test]
    async fn request_matches_azure_contract() {
        let endpoint = MockEndpoint::start(
            200,
            json!({ "choices": [{ "message": { "content": "ok" } }] }),
        )
        .await;
        provider_for(&endpoint).complete(conversation()).await.unwrap();

        let requests = endpoint.requests();
        assert_eq!(requests.len(), 1);
        let req = &requests[0];
        assert_eq!(req.path, "/openai/deployments/gpt-4o/chat/completions");
        assert_eq!(req.query.as_deref(), Some("api-version=2023-05-15"));
        assert_eq!(req.api_key.as_deref(), Some("secret-key"));

        let messages = req.body["messages"].as_array().unwrap();
        let roles: Vec<&str> = messages.iter().map(|m| m["role"].as_str().unwrap()).collect();
        assert_eq!(roles, vec!["system", "assistant", "user"]);
        assert_eq!(messages[2]["content"], "What is the torque spec?");
    }

    #[tokio::test]
    async fn non_success_status_is_api_error() {
        let endpoint =
            MockEndpoint::start(401, json!({ "error": { "code": "Unauthorized" } })).await;
        let err = provider_for(&endpoint).complete(conversation()).await.unwrap_err();
        match err {
            LlmError::ApiError { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("Unauthorized"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn missing_content_is_parse_error() {
        let endpoint = MockEndpoint::start(200, json!({ "choices": [] })).await;
        let err = provider_for(&endpoint).complete(conversation()).await.unwrap_err();
        assert!(matches!(err, LlmError::ParseError(_)));
    }
}
