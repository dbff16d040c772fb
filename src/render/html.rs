//! Static two-pane HTML report assembly and persistence.
//!
//! Left pane is the base revision, right pane the revised one; each pane
//! lists its page images in order followed by the highlighted text view.
//! Pane names and image paths are escaped; report inputs come from
//! arbitrary uploaded files.

use std::path::{Path, PathBuf};

use crate::models::PageImage;
use super::RenderError;

/// Everything one pane needs: document name, ordered page images, and
/// the already-escaped highlighted body HTML.
#[derive(Debug, Clone)]
pub struct Pane {
    pub name: String,
    pub images: Vec<PageImage>,
    pub body_html: String,
}

/// Deterministic report file name for a document pair.
pub fn report_file_name(old_name: &str, new_name: &str) -> String {
    format!("Analysis_{old_name}_VS_{new_name}.html")
}

/// Render the full report document.
pub fn render_report(old: &Pane, new: &Pane) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8">
<title>docdelta comparison report</title>
<style>
  body {{ font-family: 'Segoe UI', sans-serif; margin: 0; display: flex; flex-direction: column; height: 100vh; background: #f0f2f5; }}
  .header {{ background: #24292e; color: white; padding: 15px; text-align: center; font-size: 1.2em; }}
  .main {{ display: flex; flex: 1; overflow: hidden; padding: 12px; gap: 12px; }}
  .pane {{ flex: 1; display: flex; flex-direction: column; background: white; border: 1px solid #d1d5da; border-radius: 6px; overflow: hidden; }}
  .pane-header {{ background: #f6f8fa; padding: 12px; font-weight: 600; border-bottom: 1px solid #d1d5da; }}
  .scroll {{ flex: 1; overflow-y: auto; padding: 20px; }}
  img {{ width: 100%; border: 1px solid #e1e4e8; margin-bottom: 15px; border-radius: 4px; }}
  .diff-area {{ margin-top: 20px; padding-top: 20px; border-top: 2px dashed #e1e4e8; line-height: 1.6; color: #24292e; }}
  .ins {{ background: #e6ffed; color: #22863a; border-bottom: 1px solid #22863a; text-decoration: none; }}
  .del {{ background: #ffeef0; color: #b31d28; text-decoration: line-through; }}
</style>
</head>
<body>
<div class="header">docdelta · visual &amp; semantic comparison report</div>
<div class="main">
{old_pane}
{new_pane}
</div>
</body>
</html>
"#,
        old_pane = render_pane("Base revision", old),
        new_pane = render_pane("Revised version", new),
    )
}

fn render_pane(role: &str, pane: &Pane) -> String {
    let mut images = String::new();
    for image in &pane.images {
        images.push_str("      <img src=\"");
        images.push_str(&html_escape::encode_double_quoted_attribute(
            &image.rel_path,
        ));
        images.push_str("\">\n");
    }
    format!(
        r#"  <div class="pane">
    <div class="pane-header">{role}: {name}</div>
    <div class="scroll">
{images}      <div class="diff-area">{body}</div>
    </div>
  </div>"#,
        name = html_escape::encode_text(&pane.name),
        body = pane.body_html,
    )
}

/// Render and persist the report, returning its path. Write failures
/// surface immediately; there is no retry.
pub async fn write_report(
    out_dir: &Path,
    old: &Pane,
    new: &Pane,
) -> Result<PathBuf, RenderError> {
    let path = out_dir.join(report_file_name(&old.name, &new.name));
    let html = render_report(old, new);
    tokio::fs::write(&path, html)
        .await
        .map_err(|e| RenderError::Write {
            path: path.clone(),
            source: e,
        })?;
    Ok(path)
}
