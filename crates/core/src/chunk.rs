use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A bounded span of extracted page text, the unit of retrieval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentChunk {
    /// 0-based position in the ingestion run (across all manuals).
    pub index: usize,
    /// The chunk text content.
    pub content: String,
    /// PDF the text was extracted from.
    pub source: PathBuf,
    /// 1-based page number within `source`.
    pub page_number: usize,
}

impl DocumentChunk {
    /// Short `file.pdf p.3` label for logs and transcripts.
    pub fn citation(&self) -> String {
        let name = self
            .source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source.display().to_string());
        format!("{name} p.{}", self.page_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn citation_uses_file_name_and_page() {
        let chunk = DocumentChunk {
            index: 0,
            content: "Torque spec: 25 Nm".into(),
            source: PathBuf::from("raw/classic-350.pdf"),
            page_number: 12,
        };
        assert_eq!(chunk.citation(), "classic-350.pdf p.12");
    }
}
