//! Document normalizer: turns PDF and Word files into ordered content
//! blocks, and lists the eligible documents in a working directory.
//!
//! Structure recovery (headings, tables) is heuristic and pluggable via
//! [`structure::StructureStrategy`]; the parsing itself is delegated to
//! format libraries.

pub mod docx;
pub mod pdf;
pub mod raster;
pub mod structure;

use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use crate::models::Document;
use structure::{NumberedHeadingStrategy, StructureStrategy};

/// Errors from document normalization.
#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("unsupported document type: {0}")]
    Unsupported(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("failed to write {path}: {reason}")]
    Write { path: PathBuf, reason: String },
}

/// Recognized source formats, matched case-insensitively on extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "docx" => Some(DocumentKind::Docx),
            _ => None,
        }
    }
}

/// List eligible document file names in `dir`, sorted for stable menu
/// indices. Files with unrecognized extensions are silently excluded.
pub fn list_documents(dir: &Path) -> Result<Vec<String>, NormalizeError> {
    let mut names = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| NormalizeError::Io {
            path: dir.to_path_buf(),
            source: e.into(),
        })?;
        let path = entry.path();
        if entry.file_type().is_file() && DocumentKind::from_path(path).is_some() {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

/// Converts source documents into [`Document`]s using a pluggable
/// structure-recovery strategy.
pub struct Normalizer {
    strategy: Box<dyn StructureStrategy>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self {
            strategy: Box::new(NumberedHeadingStrategy::default()),
        }
    }

    pub fn with_strategy(strategy: Box<dyn StructureStrategy>) -> Self {
        Self { strategy }
    }

    /// Normalize one document. Deterministic: the same file always
    /// yields the same block sequence, so diffs are meaningful across
    /// repeated runs.
    pub fn normalize(&self, path: &Path) -> Result<Document, NormalizeError> {
        match DocumentKind::from_path(path) {
            Some(DocumentKind::Pdf) => pdf::read_document(path, self.strategy.as_ref()),
            Some(DocumentKind::Docx) => docx::read_document(path, self.strategy.as_ref()),
            None => Err(NormalizeError::Unsupported(path.to_path_buf())),
        }
    }
}
