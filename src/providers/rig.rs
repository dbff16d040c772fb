//! rig-core integration for LLM-backed audit summaries.
//!
//! Uses rig-core's provider clients for multi-provider support. The
//! default target is a locally hosted OpenAI-compatible endpoint
//! (llama.cpp server, Ollama); hosted OpenAI and Anthropic work through
//! the same path with an API key.

use std::time::Duration;

use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers;
use serde_json::json;

use crate::config::ProviderConfig;
use crate::constants::{SUMMARY_MAX_TOKENS, SUMMARY_STOP_MARKER, SUMMARY_TEMPERATURE};
use crate::models::ProviderName;

use super::{ProviderError, SummaryProvider};

/// Fixed role instruction for the audit persona. Output language is
/// fixed to English; scope covers quantitative, procedural, and
/// clause-logic changes while formatting noise is ignored.
pub const SYSTEM_PROMPT: &str = "\
You are a senior document-audit expert. Always answer in English. \
Summarize the changes between two document revisions, focusing on: \
1. changed quantities, limits, and numeric indicators; \
2. adjusted procedures and technical parameters; \
3. logic changes in key clauses. \
Ignore formatting and whitespace differences and deliver a concise, \
decision-ready audit report.";

/// Timeout for the reachability probe against local endpoints.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Build a rig-core agent from a client and prompt it.
///
/// Low temperature and a hard output cap keep audit output terse and
/// near-deterministic; the stop marker covers chat-template models
/// served raw from local endpoints.
macro_rules! prompt_summary {
    ($client:expr, $model:expr, $user:expr, $label:expr) => {{
        let agent = $client
            .agent($model)
            .preamble(SYSTEM_PROMPT)
            .temperature(SUMMARY_TEMPERATURE)
            .max_tokens(SUMMARY_MAX_TOKENS)
            .additional_params(json!({ "stop": [SUMMARY_STOP_MARKER] }))
            .build();
        agent
            .prompt($user)
            .await
            .map(|text: String| text.trim().to_string())
            .map_err(|e| ProviderError::Inference(format!("{} API error: {e}", $label)))
    }};
}

/// rig-core based summary provider.
///
/// Holds the validated provider configuration; `connect` fails fast on
/// unreachable or unconfigured endpoints so no inference is attempted
/// against a missing model.
pub struct RigSummarizer {
    config: ProviderConfig,
}

impl RigSummarizer {
    /// Validate configuration and probe the endpoint.
    pub async fn connect(config: ProviderConfig) -> Result<Self, ProviderError> {
        if config.model.is_empty() {
            return Err(ProviderError::NotConfigured(
                "no model configured".to_string(),
            ));
        }
        if config.name.requires_api_key() && config.api_key.is_none() {
            return Err(ProviderError::NotConfigured(format!(
                "no API key found for provider '{}'. Set {} or the provider-specific env var.",
                config.name,
                crate::constants::ENV_API_KEY,
            )));
        }
        if config.name == ProviderName::OpenAICompatible {
            let base_url = config.base_url.as_deref().ok_or_else(|| {
                ProviderError::NotConfigured(
                    "openai-compatible provider requires base_url to be set".to_string(),
                )
            })?;
            probe_endpoint(base_url).await?;
        }
        Ok(Self { config })
    }

    fn api_key(&self) -> String {
        match self.config.api_key.clone() {
            Some(key) => key,
            // Local endpoints accept any key.
            None => "local".to_string(),
        }
    }

    async fn call(&self, user_prompt: &str) -> Result<String, ProviderError> {
        let api_key = self.api_key();
        let model = self.config.model.as_str();

        match self.config.name {
            ProviderName::OpenAI | ProviderName::OpenAICompatible => {
                let mut builder =
                    providers::openai::CompletionsClient::builder().api_key(&api_key);
                if let Some(ref base_url) = self.config.base_url {
                    builder = builder.base_url(base_url);
                }
                let client: providers::openai::CompletionsClient =
                    builder.build().map_err(|e| {
                        ProviderError::ModelUnavailable(format!(
                            "failed to create OpenAI client: {e}"
                        ))
                    })?;
                prompt_summary!(client, model, user_prompt, "OpenAI")
            }
            ProviderName::Anthropic => {
                let client: providers::anthropic::Client =
                    providers::anthropic::Client::builder()
                        .api_key(&api_key)
                        .build()
                        .map_err(|e| {
                            ProviderError::ModelUnavailable(format!(
                                "failed to create Anthropic client: {e}"
                            ))
                        })?;
                prompt_summary!(client, model, user_prompt, "Anthropic")
            }
        }
    }
}

#[async_trait]
impl SummaryProvider for RigSummarizer {
    async fn summarize(&self, diff_text: &str) -> Result<String, ProviderError> {
        let user_prompt = format!(
            "The following labeled fragments were extracted from the document diff. \
             Produce the audit summary:\n\n{diff_text}"
        );
        self.call(&user_prompt).await
    }
}

/// Cheap GET against the endpoint's model listing so a dead local server
/// fails before any inference attempt.
async fn probe_endpoint(base_url: &str) -> Result<(), ProviderError> {
    let client = reqwest::Client::builder()
        .timeout(PROBE_TIMEOUT)
        .build()
        .map_err(|e| ProviderError::ModelUnavailable(e.to_string()))?;
    let url = format!("{}/models", base_url.trim_end_matches('/'));
    let response = client.get(&url).send().await.map_err(|e| {
        ProviderError::ModelUnavailable(format!("endpoint {base_url} unreachable: {e}"))
    })?;
    if !response.status().is_success() {
        return Err(ProviderError::ModelUnavailable(format!(
            "endpoint {base_url} answered {}",
            response.status()
        )));
    }
    Ok(())
}
