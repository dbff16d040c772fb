//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables
//! 3. `.docdelta.toml` in the working directory
//! 4. `~/.config/docdelta/config.toml` (global defaults)
//! 5. Built-in defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants;
use crate::env::Env;
use crate::models::ProviderName;

/// Errors during config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub diff: DiffConfig,
    pub summary: SummaryConfig,
    pub provider: ProviderConfig,
}

/// Input and output directory locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("output"),
        }
    }
}

/// Diff engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Wall-clock budget in seconds before the engine falls back to a
    /// coarse diff.
    pub timeout_secs: u64,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            timeout_secs: constants::DIFF_TIMEOUT_SECS,
        }
    }
}

/// AI summary configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Whether a compare run asks the model for an audit summary.
    pub enabled: bool,
    /// Character budget for the diff text handed to the model.
    pub char_budget: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            char_budget: constants::AI_DIFF_BUDGET,
        }
    }
}

/// LLM provider configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub name: ProviderName,
    pub model: String,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("name", &self.name)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: ProviderName::OpenAICompatible,
            model: "qwen2.5-7b-instruct".to_string(),
            base_url: Some("http://localhost:8080/v1".to_string()),
            api_key: None,
        }
    }
}

impl Config {
    /// Load configuration with proper layering.
    ///
    /// Reads from global config, then local config in `work_dir`, then
    /// applies environment variable overrides.
    pub fn load(work_dir: Option<&Path>, env: &Env) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                config.merge(global);
            }
        }

        let local_path = work_dir
            .unwrap_or(Path::new("."))
            .join(constants::CONFIG_FILENAME);
        if local_path.exists() {
            let local = Self::load_file(&local_path)?;
            config.merge(local);
        }

        config.apply_env_vars(env);

        Ok(config)
    }

    /// Load a config from a specific file.
    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the global config file path.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(constants::CONFIG_DIR).join("config.toml"))
    }

    /// Merge another config into this one (other takes precedence for
    /// non-default values).
    fn merge(&mut self, other: Config) {
        let default_paths = PathsConfig::default();
        if other.paths.input_dir != default_paths.input_dir {
            self.paths.input_dir = other.paths.input_dir;
        }
        if other.paths.output_dir != default_paths.output_dir {
            self.paths.output_dir = other.paths.output_dir;
        }

        if other.diff.timeout_secs != DiffConfig::default().timeout_secs {
            self.diff.timeout_secs = other.diff.timeout_secs;
        }

        let default_summary = SummaryConfig::default();
        if other.summary.enabled != default_summary.enabled {
            self.summary.enabled = other.summary.enabled;
        }
        if other.summary.char_budget != default_summary.char_budget {
            self.summary.char_budget = other.summary.char_budget;
        }

        let default_provider = ProviderConfig::default();
        if other.provider.name != default_provider.name {
            self.provider.name = other.provider.name;
        }
        if other.provider.model != default_provider.model {
            self.provider.model = other.provider.model;
        }
        if other.provider.base_url != default_provider.base_url {
            self.provider.base_url = other.provider.base_url;
        }
        if other.provider.api_key.is_some() {
            self.provider.api_key = other.provider.api_key;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_vars(&mut self, env: &Env) {
        if let Some(val) = env.get(constants::ENV_PROVIDER) {
            if let Ok(name) = val.parse::<ProviderName>() {
                self.provider.name = name;
            } else {
                eprintln!(
                    "Warning: ignoring invalid {} value: {val}",
                    constants::ENV_PROVIDER
                );
            }
        }
        if let Some(val) = env.get(constants::ENV_MODEL) {
            self.provider.model = val;
        }
        if let Some(val) = env.get(constants::ENV_BASE_URL) {
            self.provider.base_url = Some(val);
        }

        // Provider-specific API key resolution
        let api_key = env
            .get(constants::ENV_API_KEY)
            .or_else(|| env.get(self.provider.name.api_key_env_var()));
        if api_key.is_some() {
            self.provider.api_key = api_key;
        }

        if let Some(val) = env.get(constants::ENV_INPUT_DIR) {
            self.paths.input_dir = PathBuf::from(val);
        }
        if let Some(val) = env.get(constants::ENV_OUTPUT_DIR) {
            self.paths.output_dir = PathBuf::from(val);
        }
    }
}
