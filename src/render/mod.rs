//! Report projections: the AI-facing diff summary input, per-side
//! highlighted views, and the static two-pane HTML report.

pub mod highlight;
pub mod html;
pub mod summary;

use std::path::PathBuf;

use thiserror::Error;

/// Errors from report rendering and persistence.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to write report {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
