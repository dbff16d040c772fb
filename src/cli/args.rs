//! Clap argument types and selector parsing.

use clap::Parser;
use std::path::PathBuf;

/// AI-assisted document comparison CLI.
#[derive(Parser, Debug)]
#[command(
    name = docdelta::constants::APP_NAME,
    version = docdelta::constants::VERSION,
    about = "Compare PDF/Word revisions: visual HTML report plus an AI audit summary.",
)]
pub struct Cli {
    /// Directory containing the input documents (overrides config).
    #[arg(long, global = true)]
    pub input_dir: Option<PathBuf>,

    /// Directory for reports, markdown, and page images (overrides config).
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Disable the live step progress display.
    #[arg(long, global = true, default_value_t = false)]
    pub no_progress: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands. Without one, the interactive menu starts.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Convert every eligible document to markdown.
    Convert,

    /// Compare two documents and write the HTML report.
    Compare(CompareArgs),

    /// List eligible documents in the input directory.
    List,

    /// Start the interactive console menu.
    Menu,

    /// Print version and build information.
    Version,
}

/// Arguments for the `compare` subcommand.
#[derive(Parser, Debug)]
pub struct CompareArgs {
    /// Base document: a file name from the input directory or its index
    /// in `list` output.
    pub old: String,

    /// Revised document: file name or listing index.
    pub new: String,

    /// Skip the AI audit summary (the HTML report does not depend on it).
    #[arg(long, default_value_t = false)]
    pub no_summary: bool,

    /// Do not open the report in the default browser.
    #[arg(long, default_value_t = false)]
    pub no_open: bool,
}

/// How the user referred to a document on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocSelector {
    /// Zero-based index into the sorted listing.
    Index(usize),
    /// File name within the input directory.
    Name(String),
}

impl DocSelector {
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<usize>() {
            Ok(index) => DocSelector::Index(index),
            Err(_) => DocSelector::Name(raw.to_string()),
        }
    }

    /// Resolve against the sorted listing, returning the file name.
    pub fn resolve<'a>(&'a self, names: &'a [String]) -> Option<&'a str> {
        match self {
            DocSelector::Index(i) => names.get(*i).map(|s| s.as_str()),
            DocSelector::Name(name) => names
                .iter()
                .find(|n| n.as_str() == name)
                .map(|s| s.as_str()),
        }
    }
}
