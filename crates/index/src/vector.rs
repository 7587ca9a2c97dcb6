use std::path::Path;

use tracing::debug;

use manualqa_core::DocumentChunk;

use crate::error::IndexError;
use crate::store::{self, IndexEntry, IndexMeta};

/// A retrieved chunk and its similarity to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredChunk {
    pub chunk: DocumentChunk,
    /// Cosine similarity in [-1, 1]; higher is closer.
    pub score: f32,
}

/// In-memory flat index: every query is compared against every entry.
#[derive(Debug, Clone)]
pub struct VectorIndex {
    meta: IndexMeta,
    entries: Vec<IndexEntry>,
}

impl VectorIndex {
    pub fn new(meta: IndexMeta, entries: Vec<IndexEntry>) -> Result<Self, IndexError> {
        if let Some(bad) = entries.iter().find(|e| e.embedding.len() != meta.dimensions) {
            return Err(IndexError::DimensionMismatch {
                expected: meta.dimensions,
                actual: bad.embedding.len(),
            });
        }
        Ok(Self { meta, entries })
    }

    /// Load a previously persisted index.
    pub fn load(dir: &Path) -> Result<Self, IndexError> {
        let (meta, entries) = store::read_index(dir)?;
        debug!(entries = entries.len(), model = %meta.model, "Loaded index");
        Self::new(meta, entries)
    }

    pub fn save(&self, dir: &Path) -> Result<(), IndexError> {
        store::write_index(dir, &self.meta, &self.entries)
    }

    pub fn meta(&self) -> &IndexMeta {
        &self.meta
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Refuse to query with vectors from a different model than the index was built with.
    pub fn check_model(&self, configured: &str) -> Result<(), IndexError> {
        if self.meta.model != configured {
            return Err(IndexError::ModelMismatch {
                indexed: self.meta.model.clone(),
                configured: configured.to_string(),
            });
        }
        Ok(())
    }

    /// The `k` entries most similar to `query`, best first.
    ///
    /// Returns `min(k, len)` results. Ties keep ingestion order.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<ScoredChunk>, IndexError> {
        if k == 0 {
            return Err(IndexError::InvalidK);
        }
        if query.len() != self.meta.dimensions {
            return Err(IndexError::DimensionMismatch {
                expected: self.meta.dimensions,
                actual: query.len(),
            });
        }

        let mut scored: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| (i, cosine_similarity(query, &e.embedding)))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(k);

        Ok(scored
            .into_iter()
            .map(|(i, score)| ScoredChunk {
                chunk: self.entries[i].chunk.clone(),
                score,
            })
            .collect())
    }
}

/// Cosine similarity; zero vectors score 0 rather than NaN.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}
