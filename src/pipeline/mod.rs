//! Compare and convert orchestration.
//!
//! Runs the stages strictly in sequence (normalize, rasterize, diff,
//! render, summarize) with no state carried between invocations. Each
//! hard failure aborts only the current operation; callers (the menu,
//! the CLI) decide whether to continue the session.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::config::Config;
use crate::constants::{NEW_CACHE_DIR, OLD_CACHE_DIR};
use crate::diff::DiffEngine;
use crate::models::{DiffOp, Document, Side};
use crate::normalize::{self, DocumentKind, NormalizeError, Normalizer};
use crate::progress::StepTracker;
use crate::providers::{ProviderError, SummaryProvider};
use crate::render::{highlight, html, summary, RenderError};

/// Errors from pipeline operations.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("need at least two documents in {dir}, found {found}")]
    MissingInput { dir: PathBuf, found: usize },

    #[error("document index {index} is out of range (0..{len})")]
    BadIndex { index: usize, len: usize },

    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Result of a compare run.
#[derive(Debug)]
pub struct CompareOutcome {
    pub report_path: PathBuf,
    pub summary: Option<String>,
    pub ops: Vec<DiffOp>,
}

/// Sequential document comparison pipeline.
///
/// Services are injected explicitly; the provider is `None` when the
/// summary stage is disabled. A fresh pipeline per operation is cheap;
/// the expensive model handle lives behind the provider's lazy wrapper.
pub struct ComparePipeline {
    normalizer: Normalizer,
    engine: DiffEngine,
    provider: Option<Arc<dyn SummaryProvider>>,
    progress: Arc<StepTracker>,
    output_dir: PathBuf,
    summary_budget: usize,
}

impl ComparePipeline {
    pub fn new(
        config: &Config,
        provider: Option<Arc<dyn SummaryProvider>>,
        progress: Arc<StepTracker>,
    ) -> Self {
        Self {
            normalizer: Normalizer::new(),
            engine: DiffEngine::new(std::time::Duration::from_secs(config.diff.timeout_secs)),
            provider,
            progress,
            output_dir: config.paths.output_dir.clone(),
            summary_budget: config.summary.char_budget,
        }
    }

    /// Compare two documents and write the HTML report.
    pub async fn compare(
        &self,
        old_path: &Path,
        new_path: &Path,
    ) -> Result<CompareOutcome, PipelineError> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| NormalizeError::Io {
                path: self.output_dir.clone(),
                source: e,
            })?;

        let old_doc = self
            .normalize_step("normalize base document", old_path, OLD_CACHE_DIR)
            .await?;
        let new_doc = self
            .normalize_step("normalize revised document", new_path, NEW_CACHE_DIR)
            .await?;

        self.progress.start("compute diff");
        let ops = self
            .engine
            .compare(&old_doc.to_markdown(), &new_doc.to_markdown())
            .await;
        self.progress.done("compute diff");

        self.progress.start("write report");
        let old_pane = html::Pane {
            name: old_doc.name.clone(),
            images: old_doc.pages.clone(),
            body_html: highlight::view(&ops, Side::Old),
        };
        let new_pane = html::Pane {
            name: new_doc.name.clone(),
            images: new_doc.pages.clone(),
            body_html: highlight::view(&ops, Side::New),
        };
        let report_path = match html::write_report(&self.output_dir, &old_pane, &new_pane).await {
            Ok(path) => {
                self.progress.done("write report");
                path
            }
            Err(e) => {
                self.progress.fail("write report", &e.to_string());
                return Err(e.into());
            }
        };

        let summary = match &self.provider {
            Some(provider) => {
                self.progress.start("audit summary");
                let input = summary::for_ai(&ops, self.summary_budget);
                match provider.summarize(&input).await {
                    Ok(text) => {
                        self.progress.done("audit summary");
                        Some(text)
                    }
                    Err(e) => {
                        self.progress.fail("audit summary", &e.to_string());
                        return Err(e.into());
                    }
                }
            }
            None => None,
        };

        Ok(CompareOutcome {
            report_path,
            summary,
            ops,
        })
    }

    /// Normalize every eligible document in `input_dir` into markdown
    /// files under the output directory.
    pub async fn convert_all(&self, input_dir: &Path) -> Result<Vec<PathBuf>, PipelineError> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| NormalizeError::Io {
                path: self.output_dir.clone(),
                source: e,
            })?;

        let names = normalize::list_documents(input_dir)?;
        let mut written = Vec::new();
        for name in names {
            let step = format!("convert {name}");
            self.progress.start(&step);
            let source = input_dir.join(&name);
            let markdown = match self.normalizer.normalize(&source) {
                Ok(doc) => doc.to_markdown(),
                Err(e) => {
                    self.progress.fail(&step, &e.to_string());
                    return Err(e.into());
                }
            };
            let out_path = self.output_dir.join(format!("{name}.md"));
            if let Err(e) = tokio::fs::write(&out_path, markdown).await {
                let err = NormalizeError::Write {
                    path: out_path,
                    reason: e.to_string(),
                };
                self.progress.fail(&step, &err.to_string());
                return Err(err.into());
            }
            self.progress.done(&step);
            written.push(out_path);
        }
        Ok(written)
    }

    async fn normalize_step(
        &self,
        label: &str,
        path: &Path,
        cache_dir_name: &str,
    ) -> Result<Document, PipelineError> {
        self.progress.start(label);
        match self.normalize_with_pages(path, cache_dir_name).await {
            Ok(doc) => {
                self.progress.done(label);
                Ok(doc)
            }
            Err(e) => {
                self.progress.fail(label, &e.to_string());
                Err(e)
            }
        }
    }

    async fn normalize_with_pages(
        &self,
        path: &Path,
        cache_dir_name: &str,
    ) -> Result<Document, PipelineError> {
        let mut doc = self.normalizer.normalize(path)?;
        if DocumentKind::from_path(path) == Some(DocumentKind::Pdf) {
            let cache_dir = self.output_dir.join(cache_dir_name);
            let pdf_path = path.to_path_buf();
            // pdfium is not async-safe; keep it off the runtime threads.
            let pages = tokio::task::spawn_blocking(move || {
                normalize::raster::render_pages(&pdf_path, &cache_dir)
            })
            .await
            .map_err(|e| NormalizeError::Parse {
                path: path.to_path_buf(),
                reason: format!("page render task failed: {e}"),
            })??;
            doc.pages = pages;
        }
        Ok(doc)
    }
}

/// Resolve an index pair from a document listing, enforcing the
/// two-document minimum.
pub fn pick_pair(
    input_dir: &Path,
    names: &[String],
    old_index: usize,
    new_index: usize,
) -> Result<(PathBuf, PathBuf), PipelineError> {
    if names.len() < 2 {
        return Err(PipelineError::MissingInput {
            dir: input_dir.to_path_buf(),
            found: names.len(),
        });
    }
    let old = names.get(old_index).ok_or(PipelineError::BadIndex {
        index: old_index,
        len: names.len(),
    })?;
    let new = names.get(new_index).ok_or(PipelineError::BadIndex {
        index: new_index,
        len: names.len(),
    })?;
    Ok((input_dir.join(old), input_dir.join(new)))
}
