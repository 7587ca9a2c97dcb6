//! Directory-level ingestion: discover manuals, extract, chunk.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use manualqa_core::DocumentChunk;

use crate::document::chunker::{chunk_document, ChunkConfig};
use crate::document::{discover_pdfs, load_pdf, sha256_hex, ExtractionError};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("cannot read manual directory {dir}: {source}")]
    Discover {
        dir: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to ingest {path}: {source}")]
    Extraction {
        path: PathBuf,
        source: ExtractionError,
    },

    #[error("no text could be extracted from PDFs in {0}")]
    NoDocuments(PathBuf),
}

/// One manual as recorded in the index metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceManual {
    pub path: PathBuf,
    /// SHA-256 of the file bytes, lowercase hex.
    pub sha256: String,
    pub pages: usize,
    pub chunks: usize,
}

/// Every chunk of every manual, in ingestion order.
#[derive(Debug, Clone)]
pub struct Corpus {
    pub chunks: Vec<DocumentChunk>,
    pub manuals: Vec<SourceManual>,
}

/// Extract and chunk every PDF in `pdf_dir`.
///
/// Manuals are processed in sorted path order and chunk indices run across
/// the whole corpus, so the same directory always yields the same sequence.
/// Any unreadable manual aborts the run.
pub fn load_corpus(pdf_dir: &Path, config: &ChunkConfig) -> Result<Corpus, IngestError> {
    let paths = discover_pdfs(pdf_dir).map_err(|source| IngestError::Discover {
        dir: pdf_dir.to_path_buf(),
        source,
    })?;

    let mut chunks: Vec<DocumentChunk> = Vec::new();
    let mut manuals = Vec::with_capacity(paths.len());

    for path in &paths {
        let doc = load_pdf(path).map_err(|source| IngestError::Extraction {
            path: path.clone(),
            source,
        })?;
        let doc_chunks = chunk_document(&doc, config);
        info!(
            "{}: {} pages, {} chars, {} chunks",
            path.display(),
            doc.pages.len(),
            doc.total_chars(),
            doc_chunks.len()
        );

        manuals.push(SourceManual {
            path: path.clone(),
            sha256: doc.sha256.clone(),
            pages: doc.pages.len(),
            chunks: doc_chunks.len(),
        });
        let base = chunks.len();
        chunks.extend(doc_chunks.into_iter().map(|mut c| {
            c.index += base;
            c
        }));
    }

    if chunks.is_empty() {
        return Err(IngestError::NoDocuments(pdf_dir.to_path_buf()));
    }

    info!("Indexed {} chunks from {} manuals", chunks.len(), manuals.len());
    Ok(Corpus { chunks, manuals })
}

/// Hash the manuals currently in `pdf_dir` without extracting them.
pub fn fingerprint_sources(pdf_dir: &Path) -> Result<Vec<(PathBuf, String)>, IngestError> {
    let paths = discover_pdfs(pdf_dir).map_err(|source| IngestError::Discover {
        dir: pdf_dir.to_path_buf(),
        source,
    })?;
    paths
        .into_iter()
        .map(|path| {
            let bytes = fs::read(&path).map_err(|e| IngestError::Extraction {
                path: path.clone(),
                source: ExtractionError::Io(e),
            })?;
            Ok((path, sha256_hex(&bytes)))
        })
        .collect()
}
