use std::path::Path;

use lopdf::Document;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Failed to load PDF: {0}")]
    Load(#[from] lopdf::Error),

    #[error("No text could be extracted from the document")]
    NoText,
}

/// Extracts the plain text of every page, joined with single newlines.
/// Pages that yield nothing are skipped rather than failing the document;
/// a document with no extractable text at all is an error.
pub fn extract_text(path: &Path) -> Result<String, ExtractError> {
    let doc = Document::load(path)?;

    let mut pages = Vec::new();
    for (page_no, _object_id) in doc.get_pages() {
        match doc.extract_text(&[page_no]) {
            Ok(text) if !text.trim().is_empty() => pages.push(text.trim_end().to_string()),
            Ok(_) => log::debug!("page {} has no extractable text, skipping", page_no),
            Err(e) => log::warn!("failed to extract text from page {}: {}", page_no, e),
        }
    }

    if pages.is_empty() {
        return Err(ExtractError::NoText);
    }

    log::info!("extracted {} pages of text from {}", pages.len(), path.display());

    Ok(pages.join("\n"))
}
