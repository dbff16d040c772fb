//! PDF page rasterization via pdfium.
//!
//! Renders each page to a PNG under a per-comparison cache directory.
//! The directory is recreated on every run; stale images from a previous
//! comparison never leak into the report. pdfium is not async-safe, so
//! callers run this on a blocking thread.

use std::path::Path;

use pdfium_render::prelude::*;

use crate::constants::{PDF_POINTS_PER_INCH, RENDER_DPI};
use crate::models::PageImage;
use super::NormalizeError;

/// Render every page of `pdf_path` into `cache_dir`, one PNG per page,
/// named by zero-based index. Returns image references relative to the
/// cache directory's parent (the report output directory).
pub fn render_pages(pdf_path: &Path, cache_dir: &Path) -> Result<Vec<PageImage>, NormalizeError> {
    if cache_dir.exists() {
        std::fs::remove_dir_all(cache_dir).map_err(|e| NormalizeError::Io {
            path: cache_dir.to_path_buf(),
            source: e,
        })?;
    }
    std::fs::create_dir_all(cache_dir).map_err(|e| NormalizeError::Io {
        path: cache_dir.to_path_buf(),
        source: e,
    })?;

    let pdfium = bind_pdfium(pdf_path)?;
    let document = pdfium
        .load_pdf_from_file(pdf_path, None)
        .map_err(|e| NormalizeError::Parse {
            path: pdf_path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let dir_name = cache_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let render_config =
        PdfRenderConfig::new().scale_page_by_factor(RENDER_DPI / PDF_POINTS_PER_INCH);

    let mut images = Vec::new();
    for (index, page) in document.pages().iter().enumerate() {
        let bitmap = page
            .render_with_config(&render_config)
            .map_err(|e| NormalizeError::Parse {
                path: pdf_path.to_path_buf(),
                reason: format!("page {index}: {e}"),
            })?;
        let file_name = format!("p_{index}.png");
        let out_path = cache_dir.join(&file_name);
        bitmap
            .as_image()
            .save(&out_path)
            .map_err(|e| NormalizeError::Write {
                path: out_path.clone(),
                reason: e.to_string(),
            })?;
        images.push(PageImage {
            rel_path: format!("{dir_name}/{file_name}"),
        });
    }

    Ok(images)
}

/// Bind to a bundled pdfium next to the binary first, then fall back to
/// the system library.
fn bind_pdfium(pdf_path: &Path) -> Result<Pdfium, NormalizeError> {
    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./lib"))
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|e| NormalizeError::Parse {
            path: pdf_path.to_path_buf(),
            reason: format!("pdfium unavailable: {e}"),
        })?;
    Ok(Pdfium::new(bindings))
}
