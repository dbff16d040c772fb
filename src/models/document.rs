//! Normalized document types: content blocks, page images, and the
//! linear markdown projection used for diffing.

use serde::{Deserialize, Serialize};

/// One structural unit recovered from a source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Block {
    /// Plain body text.
    Paragraph(String),
    /// Heading at level 1..=6.
    Heading { level: u8, text: String },
    /// Table rows; the first row is treated as the header.
    Table(Vec<Vec<String>>),
}

impl Block {
    fn render_markdown(&self, out: &mut String) {
        match self {
            Block::Paragraph(text) => out.push_str(text),
            Block::Heading { level, text } => {
                let level = (*level).clamp(1, 6) as usize;
                for _ in 0..level {
                    out.push('#');
                }
                out.push(' ');
                out.push_str(text);
            }
            Block::Table(rows) => render_table(rows, out),
        }
    }
}

/// Pipe-table rendering; header row first, then a separator, then the body.
fn render_table(rows: &[Vec<String>], out: &mut String) {
    let Some(header) = rows.first() else {
        return;
    };
    if header.is_empty() {
        return;
    }
    out.push_str("| ");
    out.push_str(&header.join(" | "));
    out.push_str(" |\n| ");
    out.push_str(&vec!["---"; header.len()].join(" | "));
    out.push_str(" |");
    for row in &rows[1..] {
        out.push_str("\n| ");
        out.push_str(&row.join(" | "));
        out.push_str(" |");
    }
}

/// Reference to one rasterized page image, relative to the output
/// directory so the HTML report can embed it directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageImage {
    pub rel_path: String,
}

/// A normalized document: file name, ordered content blocks, and (for
/// PDF sources) ordered page images. Immutable once assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub name: String,
    pub blocks: Vec<Block>,
    pub pages: Vec<PageImage>,
}

impl Document {
    pub fn new(name: impl Into<String>, blocks: Vec<Block>) -> Self {
        Self {
            name: name.into(),
            blocks,
            pages: Vec::new(),
        }
    }

    /// The linear text representation used for diffing: each block
    /// rendered as markdown, blocks separated by a blank line.
    /// Deterministic for a given block sequence.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                out.push_str("\n\n");
            }
            block.render_markdown(&mut out);
        }
        out
    }
}
