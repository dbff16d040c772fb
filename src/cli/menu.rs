//! Interactive console menu: convert, compare by index, quit.
//!
//! Hard failures abort only the requested operation; the user returns to
//! the menu and may retry.

use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use docdelta::config::Config;
use docdelta::normalize;
use docdelta::pipeline::{pick_pair, ComparePipeline};
use docdelta::progress::StepTracker;
use docdelta::providers::{LazySummarizer, SummaryProvider};

/// Run the menu loop until the user quits or stdin closes.
pub async fn run(config: &Config, show_progress: bool) -> Result<()> {
    super::print_banner();

    // One lazy summarizer for the whole session: the model handle is
    // initialized on the first compare and reused afterwards.
    let provider: Option<Arc<dyn SummaryProvider>> = if config.summary.enabled {
        Some(Arc::new(LazySummarizer::new(config.provider.clone())))
    } else {
        None
    };

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        println!();
        println!("  {}", "[1] Convert documents (PDF/Word -> Markdown)".cyan());
        println!("  {}", "[2] Compare two documents (visual + AI audit)".cyan());
        println!("  {}", "[q] Quit".cyan());

        let Some(choice) = prompt(&mut lines, "Select an option").await? else {
            return Ok(());
        };

        match choice.trim().to_lowercase().as_str() {
            "1" => {
                if let Err(err) = handle_convert(config, show_progress).await {
                    super::print_error(&err);
                }
            }
            "2" => {
                if let Err(err) =
                    handle_compare(config, provider.clone(), show_progress, &mut lines).await
                {
                    super::print_error(&err);
                }
            }
            "q" => {
                println!("  {}", "Bye.".dimmed());
                return Ok(());
            }
            other => {
                eprintln!("  {} unknown option: {other}", "✖".red().bold());
            }
        }
    }
}

async fn handle_convert(config: &Config, show_progress: bool) -> Result<()> {
    let progress = Arc::new(StepTracker::new(show_progress));
    let pipeline = ComparePipeline::new(config, None, progress);
    let written = pipeline
        .convert_all(&config.paths.input_dir)
        .await
        .context("conversion failed")?;

    if written.is_empty() {
        println!(
            "  No documents found in {}.",
            config.paths.input_dir.display()
        );
    } else {
        println!("  Converted {} document(s):", written.len());
        for path in written {
            println!("    {}", path.display());
        }
    }
    Ok(())
}

async fn handle_compare(
    config: &Config,
    provider: Option<Arc<dyn SummaryProvider>>,
    show_progress: bool,
    lines: &mut Lines<BufReader<Stdin>>,
) -> Result<()> {
    let names = normalize::list_documents(&config.paths.input_dir)
        .context("failed to list input documents")?;
    if names.len() < 2 {
        anyhow::bail!(
            "need at least two documents in {}, found {}",
            config.paths.input_dir.display(),
            names.len()
        );
    }

    print_listing(&names);

    let Some(old_index) = prompt_index(lines, "Base revision index", names.len()).await? else {
        return Ok(());
    };
    let Some(new_index) = prompt_index(lines, "Revised version index", names.len()).await? else {
        return Ok(());
    };

    let (old_path, new_path) =
        pick_pair(&config.paths.input_dir, &names, old_index, new_index)?;

    let progress = Arc::new(StepTracker::new(show_progress));
    let pipeline = ComparePipeline::new(config, provider, progress);
    let outcome = pipeline.compare(&old_path, &new_path).await?;

    println!("  Report: {}", outcome.report_path.display());
    if let Some(summary) = &outcome.summary {
        super::print_summary_panel(summary);
    }
    if let Err(e) = open::that(&outcome.report_path) {
        eprintln!("  Warning: could not open the report in a browser: {e}");
    }
    Ok(())
}

fn print_listing(names: &[String]) {
    println!();
    println!("  {:<7} {}", "index".bold(), "document".bold());
    for (i, name) in names.iter().enumerate() {
        println!("  {i:<7} {name}");
    }
}

async fn prompt(
    lines: &mut Lines<BufReader<Stdin>>,
    label: &str,
) -> Result<Option<String>> {
    use std::io::Write;
    print!("  {label}: ");
    std::io::stdout().flush().ok();
    Ok(lines.next_line().await?)
}

async fn prompt_index(
    lines: &mut Lines<BufReader<Stdin>>,
    label: &str,
    len: usize,
) -> Result<Option<usize>> {
    loop {
        let Some(raw) = prompt(lines, label).await? else {
            return Ok(None);
        };
        match raw.trim().parse::<usize>() {
            Ok(index) if index < len => return Ok(Some(index)),
            _ => eprintln!(
                "  {} enter a number between 0 and {}",
                "✖".red().bold(),
                len - 1
            ),
        }
    }
}
