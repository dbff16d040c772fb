//! Shared types used across all modules.
//!
//! Defines the core data structures for documents, diff sequences, and
//! provider selection. Other modules import from here rather than
//! reaching into each other's internals.

pub mod diff;
pub mod document;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use diff::{DiffOp, DiffTag};
pub use document::{Block, Document, PageImage};

/// Which side of a comparison a derived view belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    /// The base revision (left pane).
    Old,
    /// The revised version (right pane).
    New,
}

impl Side {
    /// The diff tag that counts as this side's own mutation.
    ///
    /// Old text owns deletions; new text owns insertions. The opposite
    /// tag is omitted entirely from that side's view.
    pub fn mutation_tag(self) -> DiffTag {
        match self {
            Side::Old => DiffTag::Delete,
            Side::New => DiffTag::Insert,
        }
    }

    /// CSS class used to highlight this side's mutations in the report.
    pub fn highlight_class(self) -> &'static str {
        match self {
            Side::Old => "del",
            Side::New => "ins",
        }
    }
}

/// Supported LLM provider backends for the audit summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderName {
    /// Any OpenAI-compatible endpoint (llama.cpp server, Ollama, local
    /// inference gateways). The default: the summarizer is designed to
    /// run against a locally hosted model.
    #[default]
    #[serde(rename = "openai-compatible")]
    OpenAICompatible,
    #[serde(rename = "openai")]
    OpenAI,
    Anthropic,
}

impl fmt::Display for ProviderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderName::OpenAICompatible => write!(f, "openai-compatible"),
            ProviderName::OpenAI => write!(f, "openai"),
            ProviderName::Anthropic => write!(f, "anthropic"),
        }
    }
}

impl std::str::FromStr for ProviderName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai-compatible" | "local" => Ok(ProviderName::OpenAICompatible),
            "openai" => Ok(ProviderName::OpenAI),
            "anthropic" => Ok(ProviderName::Anthropic),
            other => Err(format!(
                "unsupported provider: '{other}'. Supported: openai-compatible, openai, anthropic"
            )),
        }
    }
}

impl ProviderName {
    /// Provider-specific environment variable name for the API key.
    pub fn api_key_env_var(self) -> &'static str {
        match self {
            ProviderName::OpenAI | ProviderName::OpenAICompatible => "OPENAI_API_KEY",
            ProviderName::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    /// Local endpoints generally ignore the API key, so one is not
    /// required to be configured.
    pub fn requires_api_key(self) -> bool {
        !matches!(self, ProviderName::OpenAICompatible)
    }
}
