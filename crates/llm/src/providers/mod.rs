pub mod azure;
pub mod ollama;

#[cfg(test)]
pub(crate) mod mock;

use manualqa_core::Config;

use crate::provider::{LlmError, LlmProvider};

/// Create the appropriate LLM provider based on config.
pub fn create_provider(config: &Config) -> Result<Box<dyn LlmProvider>, LlmError> {
    match config.llm.provider.as_str() {
        "azure" | "azure-openai" => Ok(Box::new(azure::AzureOpenAiProvider::new(&config.azure))),
        "ollama" => Ok(Box::new(ollama::OllamaProvider::new(
            config.ollama.url.clone(),
            config.ollama.model.clone(),
        ))),
        other => Err(LlmError::NotConfigured(format!(
            "unknown LLM provider: '{}'",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_provider_by_name() {
        let mut config = Config::for_profile("MQA_TEST_LLM_FACTORY");
        config.llm.provider = "azure".into();
        config.azure.deployment_id = "gpt-4o".into();
        assert_eq!(create_provider(&config).unwrap().model(), "gpt-4o");

        config.llm.provider = "ollama".into();
        config.ollama.model = "llama3.2".into();
        assert_eq!(create_provider(&config).unwrap().model(), "llama3.2");
    }

    #[test]
    fn unknown_provider_is_not_configured() {
        let mut config = Config::for_profile("MQA_TEST_LLM_FACTORY");
        config.llm.provider = "gemini".into();
        assert!(matches!(
            create_provider(&config),
            Err(LlmError::NotConfigured(_))
        ));
    }
}
