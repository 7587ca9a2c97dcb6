use std::sync::Arc;

use tracing::info;

use manualqa_core::Config;
use manualqa_index::{open_index, BuildOutcome, IndexBuilder, ScoredChunk};
use manualqa_ingest::create_embedder;
use manualqa_llm::{create_provider, LlmProvider};

use crate::error::RagError;
use crate::prompt::build_messages;
use crate::retriever::Retriever;
use crate::transcript::Transcript;

/// A generated answer and the passages it was grounded on.
#[derive(Debug, Clone)]
pub struct Answer {
    pub text: String,
    pub sources: Vec<ScoredChunk>,
}

/// Retrieve-then-generate over the manual index.
pub struct Assistant {
    retriever: Retriever,
    provider: Box<dyn LlmProvider>,
    system_prompt: String,
}

impl Assistant {
    pub fn new(
        retriever: Retriever,
        provider: Box<dyn LlmProvider>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            retriever,
            provider,
            system_prompt: system_prompt.into(),
        }
    }

    /// Build the index if needed, load it, and connect to the configured endpoint.
    pub async fn open(config: &Config) -> Result<(Self, BuildOutcome), RagError> {
        let embedder = create_embedder(config)?;
        let outcome = IndexBuilder::from_config(config)
            .ensure(embedder.clone())
            .await?;
        let index = open_index(&config.paths.index_dir, embedder.as_ref())?;
        info!(
            "Loaded {} chunks from {}",
            index.len(),
            config.paths.index_dir.display()
        );

        let retriever = Retriever::new(Arc::new(index), embedder)?;
        let provider = create_provider(config)?;
        info!("Answering with {} via {}", provider.model(), config.llm.provider);
        Ok((
            Self::new(retriever, provider, config.llm.system_prompt.clone()),
            outcome,
        ))
    }

    pub fn retriever(&self) -> &Retriever {
        &self.retriever
    }

    /// Answer one question from the `k` most relevant passages.
    pub async fn answer(&self, question: &str, k: usize) -> Result<Answer, RagError> {
        let sources = self.retriever.retrieve(question, k).await?;
        let messages = build_messages(&self.system_prompt, &sources, question);
        let text = self.provider.complete(messages).await?;
        Ok(Answer { text, sources })
    }

    /// Answer and append the turn to `transcript`. Failed questions are not recorded.
    pub async fn ask(
        &self,
        transcript: &mut Transcript,
        question: &str,
        k: usize,
    ) -> Result<Answer, RagError> {
        let answer = self.answer(question, k).await?;
        transcript.record(question, answer.text.clone(), k);
        Ok(answer)
    }
}
