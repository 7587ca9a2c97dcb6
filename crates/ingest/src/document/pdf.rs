use super::{ExtractionError, PageContent};

/// Extract page texts from PDF bytes.
///
/// Page numbers follow the document's page order, starting at 1. Pages with
/// no text are left out, so the numbers can have gaps.
pub fn extract_pdf(bytes: &[u8]) -> Result<Vec<PageContent>, ExtractionError> {
    // pdf-extract panics on some malformed fonts and streams; treat that
    // like any other unreadable file.
    let page_texts = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes))
        .map_err(|_| ExtractionError::PdfError("extractor panicked on malformed PDF".into()))?
        .map_err(|e| ExtractionError::PdfError(e.to_string()))?;

    let pages: Vec<PageContent> = page_texts
        .iter()
        .enumerate()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(i, text)| PageContent {
            page_number: i + 1,
            text: text.trim().to_string(),
        })
        .collect();

    if pages.is_empty() {
        // Scanned/image-only manuals have no text layer.
        tracing::warn!("PDF contains no extractable text");
    }
    Ok(pages)
}
