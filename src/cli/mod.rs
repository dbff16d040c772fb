//! CLI command definitions, banner, and interactive menu.
//!
//! Uses clap derive macros for ergonomic argument definitions.

pub mod args;
pub mod menu;

use colored::Colorize;
use std::io::Write;

/// Print the startup banner to stderr.
pub fn print_banner() {
    let stderr = std::io::stderr();
    let mut handle = stderr.lock();
    let _ = writeln!(handle);
    let _ = writeln!(
        handle,
        "  {} {}",
        docdelta::constants::APP_NAME.bold(),
        "· local document comparison with AI audit summaries".dimmed(),
    );
    let _ = writeln!(handle);
    let _ = handle.flush();
}

/// Print the AI audit summary in a framed panel on stdout.
pub fn print_summary_panel(summary: &str) {
    println!();
    println!("{}", "── AI audit summary ─────────────────────────".green().bold());
    for line in summary.lines() {
        println!("  {line}");
    }
    println!("{}", "─────────────────────────────────────────────".green());
}

/// Print an operation failure without leaving the session.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("  {} {}", "✖".red().bold(), format!("{err:#}").red());
}

#[cfg(test)]
mod tests {
    #[test]
    fn banner_and_panel_do_not_panic() {
        super::print_banner();
        super::print_summary_panel("line one\nline two");
    }
}
