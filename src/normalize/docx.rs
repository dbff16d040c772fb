//! Word (.docx) extraction: streams `word/document.xml` out of the OOXML
//! archive and recovers paragraphs, heading styles, and tables.

use std::io::Read;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::models::{Block, Document};
use super::structure::StructureStrategy;
use super::NormalizeError;

/// Read a .docx file into a normalized document.
pub fn read_document(
    path: &Path,
    strategy: &dyn StructureStrategy,
) -> Result<Document, NormalizeError> {
    let file = std::fs::File::open(path).map_err(|e| NormalizeError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| NormalizeError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| NormalizeError::Parse {
            path: path.to_path_buf(),
            reason: format!("word/document.xml: {e}"),
        })?
        .read_to_string(&mut xml)
        .map_err(|e| NormalizeError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

    let blocks = parse_body(&xml, strategy).map_err(|reason| NormalizeError::Parse {
        path: path.to_path_buf(),
        reason,
    })?;

    Ok(Document::new(super::pdf::file_name(path), blocks))
}

/// Stream the document body into blocks.
///
/// Paragraph text lives in `w:t` runs; the paragraph style id (`w:pStyle
/// w:val="Heading1"`) decides heading level via the strategy. `w:tbl`
/// subtrees collect into table rows instead of paragraphs.
fn parse_body(xml: &str, strategy: &dyn StructureStrategy) -> Result<Vec<Block>, String> {
    let mut reader = Reader::from_str(xml);

    let mut blocks = Vec::new();
    let mut in_text = false;
    let mut table_depth = 0usize;
    let mut para_text = String::new();
    let mut para_style: Option<String> = None;
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut cell = String::new();

    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Eof => break,
            Event::Start(e) => match e.local_name().as_ref() {
                b"tbl" => {
                    table_depth += 1;
                    if table_depth == 1 {
                        rows.clear();
                    }
                }
                b"tr" if table_depth > 0 => row.clear(),
                b"tc" if table_depth > 0 => cell.clear(),
                b"p" if table_depth == 0 => {
                    para_text.clear();
                    para_style = None;
                }
                b"pStyle" if table_depth == 0 => {
                    para_style = style_attr(&e);
                }
                b"t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) => {
                if e.local_name().as_ref() == b"pStyle" && table_depth == 0 {
                    para_style = style_attr(&e);
                }
            }
            Event::Text(t) => {
                if in_text {
                    let text = t.unescape().map_err(|e| e.to_string())?;
                    if table_depth > 0 {
                        cell.push_str(&text);
                    } else {
                        para_text.push_str(&text);
                    }
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => {
                    if table_depth > 0 {
                        // Separate multiple paragraphs within one cell.
                        cell.push(' ');
                    } else {
                        flush_paragraph(&mut para_text, &para_style, strategy, &mut blocks);
                    }
                }
                b"tc" if table_depth > 0 => row.push(cell.trim().to_string()),
                b"tr" if table_depth > 0 => rows.push(std::mem::take(&mut row)),
                b"tbl" => {
                    table_depth = table_depth.saturating_sub(1);
                    if table_depth == 0 && !rows.is_empty() {
                        blocks.push(Block::Table(std::mem::take(&mut rows)));
                    }
                }
                _ => {}
            },
            _ => {}
        }
    }

    Ok(blocks)
}

fn flush_paragraph(
    para_text: &mut String,
    para_style: &Option<String>,
    strategy: &dyn StructureStrategy,
    blocks: &mut Vec<Block>,
) {
    let text = para_text.trim();
    if text.is_empty() {
        return;
    }
    let block = match para_style
        .as_deref()
        .and_then(|s| strategy.heading_level_for_style(s))
    {
        Some(level) => Block::Heading {
            level,
            text: text.to_string(),
        },
        None => Block::Paragraph(text.to_string()),
    };
    blocks.push(block);
    para_text.clear();
}

/// Pull the `w:val` attribute off a style element.
fn style_attr(e: &quick_xml::events::BytesStart<'_>) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref().ends_with(b"val") {
            return Some(String::from_utf8_lossy(&attr.value).into_owned());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::structure::NumberedHeadingStrategy;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"<?xml version="1.0"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p>
      <w:pPr><w:pStyle w:val="Heading1"/></w:pPr>
      <w:r><w:t>Scope</w:t></w:r>
    </w:p>
    <w:p><w:r><w:t>The limit is </w:t></w:r><w:r><w:t>100 units.</w:t></w:r></w:p>
    <w:tbl>
      <w:tr>
        <w:tc><w:p><w:r><w:t>Name</w:t></w:r></w:p></w:tc>
        <w:tc><w:p><w:r><w:t>Limit</w:t></w:r></w:p></w:tc>
      </w:tr>
      <w:tr>
        <w:tc><w:p><w:r><w:t>Flow</w:t></w:r></w:p></w:tc>
        <w:tc><w:p><w:r><w:t>100</w:t></w:r></w:p></w:tc>
      </w:tr>
    </w:tbl>
    <w:p><w:r><w:t></w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    #[test]
    fn body_parses_headings_paragraphs_and_tables() {
        let blocks = parse_body(SAMPLE, &NumberedHeadingStrategy).unwrap();
        assert_eq!(
            blocks,
            vec![
                Block::Heading { level: 1, text: "Scope".into() },
                Block::Paragraph("The limit is 100 units.".into()),
                Block::Table(vec![
                    vec!["Name".into(), "Limit".into()],
                    vec!["Flow".into(), "100".into()],
                ]),
            ]
        );
    }

    #[test]
    fn split_runs_concatenate_within_a_paragraph() {
        let xml = r#"<w:p xmlns:w="ns"><w:r><w:t>a</w:t></w:r><w:r><w:t>b</w:t></w:r></w:p>"#;
        let blocks = parse_body(xml, &NumberedHeadingStrategy).unwrap();
        assert_eq!(blocks, vec![Block::Paragraph("ab".into())]);
    }

    #[test]
    fn missing_archive_entry_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.docx");
        // A zip with no word/document.xml inside.
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        use std::io::Write;
        writer
            .start_file("other.txt", zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"hello").unwrap();
        writer.finish().unwrap();

        let result = read_document(&path, &NumberedHeadingStrategy);
        assert!(matches!(result, Err(NormalizeError::Parse { .. })));
    }
}
