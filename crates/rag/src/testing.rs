//! Stand-ins for the embedding model and the chat endpoint.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use manualqa_index::{open_index, IndexBuilder, VectorIndex};
pub use manualqa_ingest::fixtures::KeywordEmbedder;
use manualqa_ingest::fixtures::pdf_with_pages;
use manualqa_llm::{LlmError, LlmProvider, Message};
use tempfile::TempDir;

/// Index one single-page manual per passage.
pub async fn build_index(passages: &[&str]) -> (TempDir, Arc<VectorIndex>) {
    let root = tempfile::tempdir().unwrap();
    let pdf_dir = root.path().join("raw");
    let index_dir = root.path().join("index_store");
    std::fs::create_dir_all(&pdf_dir).unwrap();
    for (i, passage) in passages.iter().enumerate() {
        write_manual(&pdf_dir, &format!("manual-{i:02}.pdf"), passage);
    }

    let embedder = Arc::new(KeywordEmbedder::new());
    IndexBuilder::new(&pdf_dir, &index_dir)
        .ensure(embedder.clone())
        .await
        .unwrap();
    let index = open_index(&index_dir, &*embedder).unwrap();
    (root, Arc::new(index))
}

fn write_manual(dir: &Path, name: &str, text: &str) {
    std::fs::write(dir.join(name), pdf_with_pages(&[text])).unwrap();
}

/// Replies with a fixed answer, or a fixed HTTP status, and records every request.
pub struct ScriptedProvider {
    reply: Result<String, u16>,
    pub requests: Arc<Mutex<Vec<Vec<Message>>>>,
}

impl ScriptedProvider {
    pub fn answering(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            reply: Err(status),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn complete(&self, messages: Vec<Message>) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(messages);
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(status) => Err(LlmError::ApiError {
                status: *status,
                body: "upstream unavailable".into(),
            }),
        }
    }

    fn model(&self) -> &str {
        "scripted"
    }
}
