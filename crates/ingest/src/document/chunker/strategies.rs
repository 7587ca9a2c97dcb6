//! Page-aware chunking of extracted manuals.

use manualqa_core::DocumentChunk;

use super::helpers::split_recursive;
use super::types::ChunkConfig;
use crate::document::ExtractedDocument;

/// Split raw text into chunk strings.
pub fn chunk_text(text: &str, config: &ChunkConfig) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    split_recursive(text, &config.separators, config)
}

/// Chunk a manual page by page. Chunks never span a page boundary, so
/// each keeps the page it came from.
///
/// Indices are 0-based within `doc`; callers combining several manuals
/// renumber them.
pub fn chunk_document(doc: &ExtractedDocument, config: &ChunkConfig) -> Vec<DocumentChunk> {
    let mut chunks = Vec::new();
    for page in &doc.pages {
        for content in chunk_text(&page.text, config) {
            chunks.push(DocumentChunk {
                index: chunks.len(),
                content,
                source: doc.source.clone(),
                page_number: page.page_number,
            });
        }
    }
    chunks
}
