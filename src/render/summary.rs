//! AI-facing diff projection: labeled Insert/Delete chunks under a
//! character budget.

use crate::constants::TRUNCATION_MARKER;
use crate::models::{DiffOp, DiffTag};

/// Label prefixed to inserted chunks.
pub const ADDED_LABEL: &str = "[content added]: ";

/// Label prefixed to removed chunks.
pub const REMOVED_LABEL: &str = "[content removed]: ";

/// Project a diff sequence into the text handed to the model.
///
/// Equal chunks are skipped and never count toward the budget. Once the
/// cumulative length exceeds `limit`, the truncation marker is appended
/// and the remaining chunks are dropped unprocessed. An empty or
/// mutation-free sequence yields an empty string.
pub fn for_ai(ops: &[DiffOp], limit: usize) -> String {
    let mut out = String::new();
    for op in ops {
        let label = match op.tag {
            DiffTag::Insert => ADDED_LABEL,
            DiffTag::Delete => REMOVED_LABEL,
            DiffTag::Equal => continue,
        };
        out.push_str(label);
        out.push_str(&op.text);
        out.push('\n');
        if out.len() > limit {
            out.push_str(TRUNCATION_MARKER);
            break;
        }
    }
    out
}
