//! Command-line interface definitions for Awful Lit Search.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! The config path can also be provided via an environment variable.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// How results are printed to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Per-source listing of titles and links
    #[default]
    Text,
    /// JSON object keyed by source name
    Json,
}

/// Command-line arguments for the Awful Lit Search application.
///
/// # Examples
///
/// ```sh
/// # Query each keyword separately against every source
/// awful_lit_search "ecology, evolution"
///
/// # Combine keywords into a single query
/// awful_lit_search --narrow "quantum, gravity"
///
/// # JSON output with a custom config
/// awful_lit_search -c ./search.yaml -f json "crispr"
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Keywords separated by commas
    pub keywords: String,

    /// Combine all keywords into one query instead of searching each separately
    #[arg(short, long)]
    pub narrow: bool,

    /// Optional path to a YAML config file
    #[arg(short, long, env = "AWFUL_LIT_SEARCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}
