//! Per-side highlighted views of a diff sequence.
//!
//! Equal text passes through, the side's own mutations are wrapped in a
//! highlight span, and the opposite side's mutations are omitted.
//! Document content is untrusted, so everything is HTML-escaped before
//! line breaks are substituted.

use crate::models::{DiffOp, DiffTag, Side};

/// Render one side's highlighted HTML body.
pub fn view(ops: &[DiffOp], side: Side) -> String {
    let mut out = String::new();
    for op in ops {
        if op.tag == DiffTag::Equal {
            out.push_str(&escape_with_breaks(&op.text));
        } else if op.tag == side.mutation_tag() {
            out.push_str("<span class=\"");
            out.push_str(side.highlight_class());
            out.push_str("\">");
            out.push_str(&escape_with_breaks(&op.text));
            out.push_str("</span>");
        }
    }
    out
}

/// Escape first, then substitute line breaks, so the inserted `<br>`
/// tags survive and everything else cannot break the markup.
fn escape_with_breaks(text: &str) -> String {
    html_escape::encode_text(text).replace('\n', "<br>")
}
