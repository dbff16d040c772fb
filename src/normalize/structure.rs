//! Heuristic structure recovery: deciding which raw lines and styles
//! denote headings.
//!
//! Format-dependent and intentionally replaceable: the diff/report core
//! never depends on how levels are detected.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::Block;

/// Deepest heading level emitted.
pub const MAX_HEADING_LEVEL: u8 = 6;

/// Strategy for recovering document structure from raw library output.
pub trait StructureStrategy: Send + Sync {
    /// Classify one raw text line (PDF extraction output) into a block.
    fn classify_line(&self, line: &str) -> Block;

    /// Heading level for a Word paragraph style id, if the style denotes
    /// a heading.
    fn heading_level_for_style(&self, style_id: &str) -> Option<u8>;
}

/// Matches numbered section titles such as `1 Scope` or `3.1.2 Limits`.
static NUMBERING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(\.\d+)*)\s+\S").expect("numbering pattern is valid"));

/// Default strategy: numbering depth for PDF lines, `Heading*` style ids
/// for Word paragraphs.
#[derive(Debug, Default)]
pub struct NumberedHeadingStrategy;

impl StructureStrategy for NumberedHeadingStrategy {
    fn classify_line(&self, line: &str) -> Block {
        if let Some(caps) = NUMBERING_RE.captures(line) {
            let dots = caps
                .get(1)
                .map(|m| m.as_str().matches('.').count())
                .unwrap_or(0);
            let level = ((dots + 1) as u8).min(MAX_HEADING_LEVEL);
            return Block::Heading {
                level,
                text: line.to_string(),
            };
        }
        Block::Paragraph(line.to_string())
    }

    fn heading_level_for_style(&self, style_id: &str) -> Option<u8> {
        let rest = style_id.strip_prefix("Heading")?;
        let level = rest
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect::<String>()
            .parse::<u8>()
            .unwrap_or(1);
        Some(level.clamp(1, MAX_HEADING_LEVEL))
    }
}
