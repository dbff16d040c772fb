//! docdelta — AI-assisted document comparison CLI.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use docdelta::config::Config;
use docdelta::constants;
use docdelta::env::Env;
use docdelta::normalize;
use docdelta::pipeline::{ComparePipeline, PipelineError};
use docdelta::progress::StepTracker;
use docdelta::providers::{LazySummarizer, SummaryProvider};

use cli::args::{Cli, Command, CompareArgs, DocSelector};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args = Cli::parse();

    let mut config = Config::load(None, &Env::real()).context("failed to load configuration")?;
    if let Some(dir) = args.input_dir {
        config.paths.input_dir = dir;
    }
    if let Some(dir) = args.output_dir {
        config.paths.output_dir = dir;
    }

    let show_progress = !args.no_progress && atty::is(atty::Stream::Stderr);

    match args.command.unwrap_or(Command::Menu) {
        Command::Convert => run_convert(&config, show_progress).await,
        Command::Compare(compare_args) => {
            run_compare(&config, compare_args, show_progress).await
        }
        Command::List => run_list(&config),
        Command::Menu => cli::menu::run(&config, show_progress).await,
        Command::Version => run_version(),
    }
}

/// Print detailed version and build information.
fn run_version() -> Result<()> {
    use colored::Colorize;

    println!(
        "{} {}",
        constants::APP_NAME.bold(),
        constants::VERSION.green().bold()
    );
    println!("{}  {}", "target:".dimmed(), constants::TARGET);
    Ok(())
}

/// List eligible documents with their menu/compare indices.
fn run_list(config: &Config) -> Result<()> {
    let names = normalize::list_documents(&config.paths.input_dir)
        .context("failed to list input documents")?;
    if names.is_empty() {
        println!(
            "No documents found in {}.",
            config.paths.input_dir.display()
        );
        return Ok(());
    }
    for (i, name) in names.iter().enumerate() {
        println!("{i:>3}  {name}");
    }
    Ok(())
}

/// Convert every eligible document to markdown.
async fn run_convert(config: &Config, show_progress: bool) -> Result<()> {
    let progress = Arc::new(StepTracker::new(show_progress));
    let pipeline = ComparePipeline::new(config, None, progress);
    let written = pipeline
        .convert_all(&config.paths.input_dir)
        .await
        .context("conversion failed")?;

    if written.is_empty() {
        println!(
            "No documents found in {}.",
            config.paths.input_dir.display()
        );
    } else {
        for path in written {
            println!("{}", path.display());
        }
    }
    Ok(())
}

/// Compare two documents, write the report, and print the audit summary.
async fn run_compare(config: &Config, args: CompareArgs, show_progress: bool) -> Result<()> {
    let names = normalize::list_documents(&config.paths.input_dir)
        .context("failed to list input documents")?;

    let old_name = resolve_selector(&args.old, &names, config)?;
    let new_name = resolve_selector(&args.new, &names, config)?;
    let old_path = config.paths.input_dir.join(&old_name);
    let new_path = config.paths.input_dir.join(&new_name);

    let provider: Option<Arc<dyn SummaryProvider>> =
        if config.summary.enabled && !args.no_summary {
            Some(Arc::new(LazySummarizer::new(config.provider.clone())))
        } else {
            None
        };

    let progress = Arc::new(StepTracker::new(show_progress));
    let pipeline = ComparePipeline::new(config, provider, progress);
    let outcome = pipeline.compare(&old_path, &new_path).await?;

    println!("{}", outcome.report_path.display());
    if let Some(summary) = &outcome.summary {
        cli::print_summary_panel(summary);
    }
    if !args.no_open {
        if let Err(e) = open::that(&outcome.report_path) {
            eprintln!("Warning: could not open the report in a browser: {e}");
        }
    }
    Ok(())
}

/// Turn a CLI selector (index or file name) into a listed document name.
fn resolve_selector(raw: &str, names: &[String], config: &Config) -> Result<String> {
    if names.len() < 2 {
        return Err(PipelineError::MissingInput {
            dir: config.paths.input_dir.clone(),
            found: names.len(),
        }
        .into());
    }
    DocSelector::parse(raw)
        .resolve(names)
        .map(|s| s.to_string())
        .with_context(|| {
            format!(
                "'{raw}' does not match any document in {} (use `list`)",
                config.paths.input_dir.display()
            )
        })
}
