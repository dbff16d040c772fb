//! Step progress reporting for terminal output.
//!
//! Prints one colored status line per pipeline stage transition on
//! stderr. Designed for interactive terminals; silenced with
//! `--no-progress` or when stderr is not a TTY.

use std::io::{self, Write};
use std::sync::Mutex;

use colored::Colorize;

/// Status of a single pipeline step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Pending,
    Running,
    Done,
    Failed(String),
}

/// Tracks and prints pipeline step progress.
///
/// Thread-safe; shared across the pipeline via `Arc`.
pub struct StepTracker {
    steps: Mutex<Vec<(String, StepStatus)>>,
    /// If false, all output is suppressed.
    enabled: bool,
}

impl StepTracker {
    pub fn new(enabled: bool) -> Self {
        Self {
            steps: Mutex::new(Vec::new()),
            enabled,
        }
    }

    /// Mark a step as running and announce it.
    pub fn start(&self, step: &str) {
        self.record(step, StepStatus::Running);
        self.print(format!("  {} {}", "…".dimmed(), step.dimmed()));
    }

    /// Mark a step as completed.
    pub fn done(&self, step: &str) {
        self.record(step, StepStatus::Done);
        self.print(format!("  {} {}", "✔".green().bold(), step));
    }

    /// Mark a step as failed with a reason.
    pub fn fail(&self, step: &str, reason: &str) {
        self.record(step, StepStatus::Failed(reason.to_string()));
        self.print(format!(
            "  {} {} {}",
            "✖".red().bold(),
            step,
            reason.red()
        ));
    }

    /// Statuses recorded so far, in order of first transition.
    pub fn snapshot(&self) -> Vec<(String, StepStatus)> {
        self.steps.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn record(&self, step: &str, status: StepStatus) {
        let mut steps = self.steps.lock().unwrap_or_else(|e| e.into_inner());
        match steps.iter_mut().find(|(name, _)| name == step) {
            Some((_, existing)) => *existing = status,
            None => steps.push((step.to_string(), status)),
        }
    }

    fn print(&self, line: String) {
        if !self.enabled {
            return;
        }
        let stderr = io::stderr();
        let mut handle = stderr.lock();
        let _ = writeln!(handle, "{line}");
        let _ = handle.flush();
    }
}
