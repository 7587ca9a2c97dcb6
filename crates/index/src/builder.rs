//! Build-once step: turn the manual directory into a persisted index, or
//! reuse the one already on disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use manualqa_core::Config;
use manualqa_ingest::{load_corpus, ChunkConfig, Embedder, EmbeddingBatcher};

use crate::error::IndexError;
use crate::store::{IndexEntry, IndexMeta, FORMAT_VERSION};
use crate::vector::VectorIndex;

/// What `IndexBuilder::ensure` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    Built { chunks: usize, manuals: usize },
    Reused,
}

pub struct IndexBuilder {
    pdf_dir: PathBuf,
    index_dir: PathBuf,
    chunking: ChunkConfig,
    batch_size: usize,
}

impl IndexBuilder {
    pub fn new(pdf_dir: impl Into<PathBuf>, index_dir: impl Into<PathBuf>) -> Self {
        Self {
            pdf_dir: pdf_dir.into(),
            index_dir: index_dir.into(),
            chunking: ChunkConfig::default(),
            batch_size: 64,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            pdf_dir: config.paths.pdf_dir.clone(),
            index_dir: config.paths.index_dir.clone(),
            chunking: ChunkConfig::from(&config.chunking),
            batch_size: config.embedding.batch_size,
        }
    }

    pub fn with_chunking(mut self, chunking: ChunkConfig) -> Self {
        self.chunking = chunking;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Build the index unless a non-empty index directory already exists.
    pub async fn ensure(&self, embedder: Arc<dyn Embedder>) -> Result<BuildOutcome, IndexError> {
        if is_populated(&self.index_dir)? {
            info!("Using existing index at {}", self.index_dir.display());
            return Ok(BuildOutcome::Reused);
        }
        self.build(embedder).await
    }

    async fn build(&self, embedder: Arc<dyn Embedder>) -> Result<BuildOutcome, IndexError> {
        info!("Building index from {}", self.pdf_dir.display());
        let corpus = load_corpus(&self.pdf_dir, &self.chunking)?;

        let texts: Vec<String> = corpus.chunks.iter().map(|c| c.content.clone()).collect();
        let batcher = EmbeddingBatcher::new(embedder.clone(), self.batch_size);
        let vectors = batcher.embed_all(&texts).await?;

        let dimensions = vectors.first().map(Vec::len).unwrap_or(0);
        let entries: Vec<IndexEntry> = corpus
            .chunks
            .into_iter()
            .zip(vectors)
            .map(|(chunk, embedding)| IndexEntry { chunk, embedding })
            .collect();

        let meta = IndexMeta {
            format_version: FORMAT_VERSION,
            model: embedder.model_name().to_string(),
            dimensions,
            entry_count: entries.len(),
            chunk_size: self.chunking.chunk_size,
            chunk_overlap: self.chunking.chunk_overlap,
            created_at: Utc::now(),
            manuals: corpus.manuals,
        };
        let manuals = meta.manuals.len();
        let index = VectorIndex::new(meta, entries)?;

        let staging = staging_dir(&self.index_dir);
        if staging.exists() {
            warn!("Removing leftover staging directory {}", staging.display());
            fs::remove_dir_all(&staging)?;
        }
        fs::create_dir_all(&staging)?;
        if let Err(e) = index.save(&staging) {
            let _ = fs::remove_dir_all(&staging);
            return Err(e);
        }

        // An empty target directory counts as unbuilt and would block the rename.
        if self.index_dir.exists() {
            fs::remove_dir(&self.index_dir)?;
        }
        fs::rename(&staging, &self.index_dir)?;

        info!(
            "Saved index with {} chunks to {}",
            index.len(),
            self.index_dir.display()
        );
        Ok(BuildOutcome::Built {
            chunks: index.len(),
            manuals,
        })
    }
}

/// Load the index and check it was built with the embedder in use.
pub fn open_index(index_dir: &Path, embedder: &dyn Embedder) -> Result<VectorIndex, IndexError> {
    let index = VectorIndex::load(index_dir)?;
    index.check_model(embedder.model_name())?;
    Ok(index)
}

fn is_populated(dir: &Path) -> Result<bool, IndexError> {
    if !dir.is_dir() {
        return Ok(false);
    }
    Ok(fs::read_dir(dir)?.next().is_some())
}

fn staging_dir(index_dir: &Path) -> PathBuf {
    let name = index_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "index".to_string());
    index_dir.with_file_name(format!(".{name}.staging"))
}
