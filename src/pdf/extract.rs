//! Page-by-page text extraction

use lopdf::Document;

use super::error::PdfError;

/// Capability to pull plain text out of PDF bytes
///
/// Passed to [`extract_text`] explicitly so callers (and tests) choose the
/// engine instead of relying on a global.
pub trait TextExtractor: Send + Sync {
    /// Whether the engine has finished loading
    fn is_ready(&self) -> bool {
        true
    }

    /// Text of every page, in increasing page order
    fn page_texts(&self, bytes: &[u8]) -> Result<Vec<String>, PdfError>;
}

/// Extraction backed by `lopdf`
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfExtractor;

impl TextExtractor for LopdfExtractor {
    fn page_texts(&self, bytes: &[u8]) -> Result<Vec<String>, PdfError> {
        let doc = Document::load_mem(bytes)?;

        let pages = doc.get_pages();
        tracing::debug!("Extracting text from {} pages", pages.len());

        // get_pages is a BTreeMap keyed by page number, so iteration is in order
        let texts = pages
            .keys()
            .map(|&page_num| match doc.extract_text(&[page_num]) {
                Ok(text) => text,
                Err(e) => {
                    tracing::debug!("No text on page {}: {}", page_num, e);
                    String::new()
                }
            })
            .collect();
        Ok(texts)
    }
}

/// Collapse a page's text fragments into one line separated by single spaces
fn join_fragments(page: &str) -> String {
    page.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extract the full document text, one line per page
///
/// Fails with [`PdfError::InsufficientText`] when the trimmed result has
/// fewer than `min_chars` characters.
pub fn extract_text(
    extractor: &dyn TextExtractor,
    bytes: &[u8],
    min_chars: usize,
) -> Result<String, PdfError> {
    if !extractor.is_ready() {
        return Err(PdfError::EngineUnavailable);
    }

    let mut full_text = String::new();
    for page in extractor.page_texts(bytes)? {
        full_text.push_str(&join_fragments(&page));
        full_text.push('\n');
    }

    let found = full_text.trim().chars().count();
    if found < min_chars {
        return Err(PdfError::InsufficientText { found });
    }

    tracing::info!("Extracted {} characters", found);
    Ok(full_text)
}
