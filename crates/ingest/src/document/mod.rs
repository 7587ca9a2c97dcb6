pub mod chunker;
mod pdf;

use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use thiserror::Error;

pub use pdf::extract_pdf;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF extraction failed: {0}")]
    PdfError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A page of extracted text.
#[derive(Debug, Clone)]
pub struct PageContent {
    /// 1-based page number.
    pub page_number: usize,
    /// The extracted text content.
    pub text: String,
}

/// Result of extracting text from one manual.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    /// Path the manual was read from.
    pub source: PathBuf,
    /// SHA-256 of the raw file bytes, lowercase hex.
    pub sha256: String,
    /// Extracted pages with text. Pages without text are omitted.
    pub pages: Vec<PageContent>,
}

impl ExtractedDocument {
    /// Total character count across all pages.
    pub fn total_chars(&self) -> usize {
        self.pages.iter().map(|p| p.text.chars().count()).sum()
    }
}

/// Read and extract a single PDF from disk.
pub fn load_pdf(path: &Path) -> Result<ExtractedDocument, ExtractionError> {
    let bytes = fs::read(path)?;
    let pages = extract_pdf(&bytes)?;
    Ok(ExtractedDocument {
        source: path.to_path_buf(),
        sha256: sha256_hex(&bytes),
        pages,
    })
}

/// List `*.pdf` files directly inside `dir`, sorted by path.
///
/// The extension match is case-insensitive; subdirectories are not visited.
pub fn discover_pdfs(dir: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if is_pdf && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Lowercase hex SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    format!("{digest:x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discover_is_sorted_and_filters_extensions() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b-manual.pdf"), b"x").unwrap();
        fs::write(dir.path().join("A-manual.PDF"), b"x").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        fs::create_dir(dir.path().join("nested.pdf")).unwrap();

        let found = discover_pdfs(dir.path()).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["A-manual.PDF", "b-manual.pdf"]);
    }

    #[test]
    fn discover_missing_dir_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_pdfs(&dir.path().join("absent")).is_err());
    }

    #[test]
    fn sha256_is_stable() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn load_pdf_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        fs::write(&path, b"definitely not a pdf").unwrap();
        assert!(matches!(load_pdf(&path), Err(ExtractionError::PdfError(_))));
    }
}
