//! PDF text extraction via lopdf.
//!
//! Extracts per-page text and classifies each non-empty line through the
//! structure strategy. Page images are produced separately by
//! [`super::raster`].

use std::path::Path;

use crate::models::Document;
use super::structure::StructureStrategy;
use super::NormalizeError;

/// Read a PDF into a normalized document (text blocks only).
pub fn read_document(
    path: &Path,
    strategy: &dyn StructureStrategy,
) -> Result<Document, NormalizeError> {
    let doc = lopdf::Document::load(path).map_err(|e| NormalizeError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut blocks = Vec::new();
    for &page_no in doc.get_pages().keys() {
        let text = doc
            .extract_text(&[page_no])
            .map_err(|e| NormalizeError::Parse {
                path: path.to_path_buf(),
                reason: format!("page {page_no}: {e}"),
            })?;
        for line in text.lines() {
            let line = line.trim();
            if !line.is_empty() {
                blocks.push(strategy.classify_line(line));
            }
        }
    }

    Ok(Document::new(file_name(path), blocks))
}

pub(super) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
