//! On-disk layout of a vector index.
//!
//! An index directory holds two files:
//! - `entries.dat`: zstd-compressed stream of length-prefixed msgpack
//!   records, one `IndexEntry` each (4-byte little-endian length, payload)
//! - `meta.json`: `IndexMeta`, written last; its presence marks a complete index

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use manualqa_core::DocumentChunk;
use manualqa_ingest::SourceManual;

use crate::error::IndexError;

pub const ENTRIES_FILE: &str = "entries.dat";
pub const META_FILE: &str = "meta.json";
pub const FORMAT_VERSION: u32 = 1;

/// A chunk paired with its embedding vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub chunk: DocumentChunk,
    pub embedding: Vec<f32>,
}

/// Index metadata stored as meta.json.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexMeta {
    pub format_version: u32,
    /// Embedding model the vectors came from.
    pub model: String,
    pub dimensions: usize,
    pub entry_count: usize,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub created_at: DateTime<Utc>,
    pub manuals: Vec<SourceManual>,
}

pub fn entries_path(dir: &Path) -> PathBuf {
    dir.join(ENTRIES_FILE)
}

pub fn meta_path(dir: &Path) -> PathBuf {
    dir.join(META_FILE)
}

/// Write entries then metadata into `dir`, which must already exist.
pub fn write_index(dir: &Path, meta: &IndexMeta, entries: &[IndexEntry]) -> Result<(), IndexError> {
    let file = fs::File::create(entries_path(dir))?;
    let buf = std::io::BufWriter::new(file);
    let mut encoder = zstd::Encoder::new(buf, 3)?;

    let mut raw_bytes = 0u64;
    for entry in entries {
        let encoded =
            rmp_serde::to_vec(entry).map_err(|e| IndexError::Serialize(e.to_string()))?;
        let len = encoded.len() as u32;
        encoder.write_all(&len.to_le_bytes())?;
        encoder.write_all(&encoded)?;
        raw_bytes += 4 + encoded.len() as u64;
    }

    let buf_writer = encoder.finish()?;
    let mut inner = buf_writer
        .into_inner()
        .map_err(|e| IndexError::Io(e.into_error()))?;
    inner.flush()?;
    inner.sync_all()?;

    let meta_json =
        serde_json::to_string_pretty(meta).map_err(|e| IndexError::Serialize(e.to_string()))?;
    fs::write(meta_path(dir), meta_json)?;

    let compressed = fs::metadata(entries_path(dir)).map(|m| m.len()).unwrap_or(0);
    info!(
        "Index written to {}: {} entries, {} bytes (raw {})",
        dir.display(),
        entries.len(),
        compressed,
        raw_bytes
    );
    Ok(())
}

/// Read metadata only.
pub fn read_meta(dir: &Path) -> Result<IndexMeta, IndexError> {
    let path = meta_path(dir);
    if !path.is_file() {
        return Err(IndexError::NotBuilt(dir.to_path_buf()));
    }
    let content = fs::read_to_string(&path)?;
    let meta: IndexMeta = serde_json::from_str(&content)
        .map_err(|e| IndexError::Corrupt(format!("{}: {e}", path.display())))?;
    if meta.format_version != FORMAT_VERSION {
        return Err(IndexError::Corrupt(format!(
            "unsupported format version {} (expected {FORMAT_VERSION})",
            meta.format_version
        )));
    }
    Ok(meta)
}

/// Read metadata and every entry.
pub fn read_index(dir: &Path) -> Result<(IndexMeta, Vec<IndexEntry>), IndexError> {
    let meta = read_meta(dir)?;

    let compressed = fs::read(entries_path(dir))?;
    let data = zstd::decode_all(compressed.as_slice())?;

    let mut entries = Vec::with_capacity(meta.entry_count);
    let mut pos = 0usize;
    while pos < data.len() {
        let header = data
            .get(pos..pos + 4)
            .ok_or_else(|| IndexError::Corrupt(format!("truncated record header at byte {pos}")))?;
        let len = u32::from_le_bytes([header[0], header[1], header[2], header[3]]) as usize;
        pos += 4;
        let payload = data
            .get(pos..pos + len)
            .ok_or_else(|| IndexError::Corrupt(format!("truncated record at byte {pos}")))?;
        let entry: IndexEntry = rmp_serde::from_slice(payload)
            .map_err(|e| IndexError::Corrupt(e.to_string()))?;
        entries.push(entry);
        pos += len;
    }

    if entries.len() != meta.entry_count {
        return Err(IndexError::Corrupt(format!(
            "meta.json lists {} entries, {} found",
            meta.entry_count,
            entries.len()
        )));
    }
    Ok((meta, entries))
}
