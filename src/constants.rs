//! App-wide constants.
//!
//! Centralises the tool name, config paths, environment variable names,
//! and pipeline tunables so a rename only requires changing this file.

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "docdelta";

/// Local config filename (e.g. `.docdelta.toml` in the working directory).
pub const CONFIG_FILENAME: &str = ".docdelta.toml";

/// Directory name under `~/.config/` for the global config.
pub const CONFIG_DIR: &str = "docdelta";

/// Crate version, for the `version` subcommand and `--version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compilation target triple (set by build.rs).
pub const TARGET: &str = env!("TARGET");

// ── Environment variable names ──────────────────────────────────────

pub const ENV_PROVIDER: &str = "DOCDELTA_PROVIDER";
pub const ENV_MODEL: &str = "DOCDELTA_MODEL";
pub const ENV_API_KEY: &str = "DOCDELTA_API_KEY";
pub const ENV_BASE_URL: &str = "DOCDELTA_BASE_URL";
pub const ENV_INPUT_DIR: &str = "DOCDELTA_INPUT_DIR";
pub const ENV_OUTPUT_DIR: &str = "DOCDELTA_OUTPUT_DIR";

// ── Pipeline tunables ───────────────────────────────────────────────

/// Page image cache directory for the base document, under the output dir.
/// Recreated (not merged) on every comparison.
pub const OLD_CACHE_DIR: &str = "cache_old";

/// Page image cache directory for the revised document.
pub const NEW_CACHE_DIR: &str = "cache_new";

/// Resolution for rasterized PDF pages.
pub const RENDER_DPI: f32 = 150.0;

/// PDF user-space unit density; pdfium takes a scale factor, not DPI.
pub const PDF_POINTS_PER_INCH: f32 = 72.0;

/// Wall-clock budget for the character diff. Exceeding it yields a
/// coarser (still valid) diff, never an error.
pub const DIFF_TIMEOUT_SECS: u64 = 5;

/// Character budget for the AI-facing diff summary input.
pub const AI_DIFF_BUDGET: usize = 3000;

/// Appended once when the AI-facing diff input is cut at the budget.
pub const TRUNCATION_MARKER: &str = "\n[diff truncated: remaining changes omitted]";

/// Stop marker for chat-template models served over local endpoints.
pub const SUMMARY_STOP_MARKER: &str = "<|im_end|>";

/// Output cap for the audit summary completion.
pub const SUMMARY_MAX_TOKENS: u64 = 1024;

/// Near-deterministic sampling for audit output.
pub const SUMMARY_TEMPERATURE: f64 = 0.1;
