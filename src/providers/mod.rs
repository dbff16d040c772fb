//! SummaryProvider trait and LLM integration.
//!
//! Provides an abstraction layer over rig-core to decouple the pipeline
//! from the specific LLM library, plus a lazy initialize-once wrapper so
//! the expensive model handle is only set up on first use.

pub mod rig;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::OnceCell;

use crate::config::ProviderConfig;
use self::rig::RigSummarizer;

/// Errors from the summary provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The model endpoint cannot be reached or is not configured.
    /// Raised before any inference attempt.
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    /// The inference call itself failed. Surfaced as-is; no retry, no
    /// fabricated fallback summary.
    #[error("inference failed: {0}")]
    Inference(String),

    #[error("provider not configured: {0}")]
    NotConfigured(String),
}

/// Trait for LLM-backed audit summaries.
///
/// Implementations hold whatever state the backing model needs and are
/// treated by the pipeline as a single opaque blocking call.
#[async_trait]
pub trait SummaryProvider: Send + Sync {
    /// Summarize a labeled diff text into a natural-language audit report.
    async fn summarize(&self, diff_text: &str) -> Result<String, ProviderError>;
}

/// Initialize-once wrapper around [`RigSummarizer`].
///
/// Connecting validates configuration and probes the endpoint, which can
/// take a while for local model servers; it happens on the first
/// `summarize` call and is reused for the rest of the session.
pub struct LazySummarizer {
    config: ProviderConfig,
    inner: OnceCell<RigSummarizer>,
}

impl LazySummarizer {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            inner: OnceCell::new(),
        }
    }

    async fn get(&self) -> Result<&RigSummarizer, ProviderError> {
        self.inner
            .get_or_try_init(|| RigSummarizer::connect(self.config.clone()))
            .await
    }
}

#[async_trait]
impl SummaryProvider for LazySummarizer {
    async fn summarize(&self, diff_text: &str) -> Result<String, ProviderError> {
        self.get().await?.summarize(diff_text).await
    }
}
