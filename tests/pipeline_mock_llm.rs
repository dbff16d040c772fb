//! Integration test using a mock LLM provider.
//!
//! Validates the compare pipeline end-to-end without real API calls by
//! using a mock implementation of SummaryProvider, and without pdfium by
//! feeding .docx inputs (which have no page images).

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use pretty_assertions::assert_eq;

use docdelta::config::Config;
use docdelta::pipeline::{ComparePipeline, PipelineError};
use docdelta::progress::StepTracker;
use docdelta::providers::{ProviderError, SummaryProvider};

/// A mock summary provider that returns a canned report.
struct MockProvider {
    canned: String,
}

#[async_trait]
impl SummaryProvider for MockProvider {
    async fn summarize(&self, _diff_text: &str) -> Result<String, ProviderError> {
        Ok(self.canned.clone())
    }
}

/// A provider whose inference always fails.
struct FailingProvider;

#[async_trait]
impl SummaryProvider for FailingProvider {
    async fn summarize(&self, _diff_text: &str) -> Result<String, ProviderError> {
        Err(ProviderError::Inference("model exploded".to_string()))
    }
}

/// A provider that records the diff text it was handed.
struct CapturingProvider {
    seen: std::sync::Mutex<Vec<String>>,
}

#[async_trait]
impl SummaryProvider for CapturingProvider {
    async fn summarize(&self, diff_text: &str) -> Result<String, ProviderError> {
        self.seen.lock().unwrap().push(diff_text.to_string());
        Ok("ok".to_string())
    }
}

/// Write a minimal .docx: one archive entry holding the document body.
fn write_docx(path: &Path, paragraphs: &[&str]) {
    let mut body = String::new();
    for text in paragraphs {
        body.push_str("<w:p><w:r><w:t>");
        body.push_str(text);
        body.push_str("</w:t></w:r></w:p>");
    }
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:body>{body}</w:body>
</w:document>"#
    );

    let file = std::fs::File::create(path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    writer
        .start_file("word/document.xml", zip::write::SimpleFileOptions::default())
        .unwrap();
    writer.write_all(xml.as_bytes()).unwrap();
    writer.finish().unwrap();
}

/// Config pointed at temp input/output directories.
fn test_config(input: &Path, output: &Path) -> Config {
    let mut config = Config::default();
    config.paths.input_dir = input.to_path_buf();
    config.paths.output_dir = output.to_path_buf();
    config
}

fn pipeline(config: &Config, provider: Option<Arc<dyn SummaryProvider>>) -> ComparePipeline {
    ComparePipeline::new(config, provider, Arc::new(StepTracker::new(false)))
}

#[tokio::test]
async fn compare_writes_report_and_returns_summary() {
    let dir = tempfile::tempdir().unwrap();
    let old_path = dir.path().join("contract_v1.docx");
    let new_path = dir.path().join("contract_v2.docx");
    write_docx(&old_path, &["The limit is 100 units."]);
    write_docx(&new_path, &["The limit is 150 units."]);

    let config = test_config(dir.path(), &dir.path().join("out"));
    let provider = Arc::new(MockProvider {
        canned: "Limit raised from 100 to 150.".to_string(),
    });
    let outcome = pipeline(&config, Some(provider))
        .compare(&old_path, &new_path)
        .await
        .unwrap();

    assert_eq!(
        outcome.summary.as_deref(),
        Some("Limit raised from 100 to 150.")
    );
    assert_eq!(
        outcome.report_path.file_name().unwrap().to_str().unwrap(),
        "Analysis_contract_v1.docx_VS_contract_v2.docx.html"
    );

    let html = std::fs::read_to_string(&outcome.report_path).unwrap();
    assert!(html.contains("contract_v1.docx"));
    assert!(html.contains("contract_v2.docx"));
    assert!(html.contains(r#"<span class="del">100</span>"#));
    assert!(html.contains(r#"<span class="ins">150</span>"#));
}

#[tokio::test]
async fn self_compare_produces_identical_unmarked_panes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("same.docx");
    write_docx(&path, &["Alpha paragraph.", "Beta paragraph."]);

    let config = test_config(dir.path(), &dir.path().join("out"));
    let outcome = pipeline(&config, None).compare(&path, &path).await.unwrap();

    let html = std::fs::read_to_string(&outcome.report_path).unwrap();
    let bodies: Vec<&str> = html
        .split(r#"<div class="diff-area">"#)
        .skip(1)
        .map(|rest| rest.split("</div>").next().unwrap())
        .collect();
    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[0], bodies[1]);
    assert!(!bodies[0].contains("<span"));
    assert!(outcome.summary.is_none());
}

#[tokio::test]
async fn failed_inference_surfaces_after_the_report_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let old_path = dir.path().join("a.docx");
    let new_path = dir.path().join("b.docx");
    write_docx(&old_path, &["one"]);
    write_docx(&new_path, &["two"]);

    let out_dir = dir.path().join("out");
    let config = test_config(dir.path(), &out_dir);
    let result = pipeline(&config, Some(Arc::new(FailingProvider)))
        .compare(&old_path, &new_path)
        .await;

    assert!(matches!(
        result,
        Err(PipelineError::Provider(ProviderError::Inference(_)))
    ));
    // The visual report does not depend on the AI stage.
    assert!(out_dir.join("Analysis_a.docx_VS_b.docx.html").exists());
}

#[tokio::test]
async fn summarizer_receives_labeled_mutations_only() {
    let dir = tempfile::tempdir().unwrap();
    let old_path = dir.path().join("a.docx");
    let new_path = dir.path().join("b.docx");
    write_docx(&old_path, &["Shared intro.", "Old clause applies."]);
    write_docx(&new_path, &["Shared intro.", "New clause applies."]);

    let config = test_config(dir.path(), &dir.path().join("out"));
    let provider = Arc::new(CapturingProvider {
        seen: std::sync::Mutex::new(Vec::new()),
    });
    pipeline(&config, Some(provider.clone()))
        .compare(&old_path, &new_path)
        .await
        .unwrap();

    let seen = provider.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].contains("[content removed]: "));
    assert!(seen[0].contains("[content added]: "));
    assert!(!seen[0].contains("Shared intro."));
}

#[tokio::test]
async fn unreadable_document_aborts_the_operation() {
    let dir = tempfile::tempdir().unwrap();
    let old_path = dir.path().join("broken.docx");
    let new_path = dir.path().join("fine.docx");
    std::fs::write(&old_path, b"this is not a zip archive").unwrap();
    write_docx(&new_path, &["content"]);

    let config = test_config(dir.path(), &dir.path().join("out"));
    let result = pipeline(&config, None).compare(&old_path, &new_path).await;
    assert!(matches!(result, Err(PipelineError::Normalize(_))));
}

#[tokio::test]
async fn convert_all_writes_markdown_per_document() {
    let dir = tempfile::tempdir().unwrap();
    write_docx(&dir.path().join("b.docx"), &["Body text."]);
    write_docx(&dir.path().join("a.docx"), &["First.", "Second."]);
    std::fs::write(dir.path().join("ignored.txt"), b"skip").unwrap();

    let out_dir = dir.path().join("out");
    let config = test_config(dir.path(), &out_dir);
    let written = pipeline(&config, None)
        .convert_all(dir.path())
        .await
        .unwrap();

    assert_eq!(written.len(), 2);
    assert_eq!(
        std::fs::read_to_string(out_dir.join("a.docx.md")).unwrap(),
        "First.\n\nSecond."
    );
    assert_eq!(
        std::fs::read_to_string(out_dir.join("b.docx.md")).unwrap(),
        "Body text."
    );
}
