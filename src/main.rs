//! # Awful Lit Search
//!
//! Searches six scholarly and open-book sources for a set of keywords and
//! prints the title/link results grouped by source.
//!
//! ## Sources
//!
//! Google Scholar, Project Gutenberg (via Gutendex), Library Genesis, PubMed,
//! PDFDrive and Open Library.
//!
//! ## Usage
//!
//! ```sh
//! awful_lit_search "ecology, evolution"
//! awful_lit_search --narrow "quantum, gravity"
//! ```
//!
//! ## Architecture
//!
//! 1. **Input**: comma-separated keywords become a `SearchRequest` (Broad or Narrow)
//! 2. **Run**: a background task queries every source in a fixed order, one
//!    request at a time, reporting progress after each
//! 3. **Output**: the finished `ResultSet` is rendered as text or JSON on stdout

use clap::Parser;
use std::error::Error;
use std::io::Write;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod error;
mod fetch;
mod models;
mod outputs;
mod search;
mod sources;
mod utils;

use cli::{Cli, OutputFormat};
use config::SearchConfig;
use models::{SearchMode, SearchRequest};
use search::{SearchRunner, SearchSession};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.config, narrow = args.narrow, format = ?args.format, "Parsed CLI arguments");

    let config = SearchConfig::load(args.config.as_deref())?;

    let mode = if args.narrow {
        SearchMode::Narrow
    } else {
        SearchMode::Broad
    };
    let request = match SearchRequest::parse(&args.keywords, mode) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("Warning: {e}");
            error!(error = %e, "Rejected search input");
            std::process::exit(2);
        }
    };
    info!(keywords = ?request.keywords(), ?mode, "Starting search");

    let runner = SearchRunner::new(&config)?;
    debug!(steps = runner.total_steps(&request), "Planned extractor calls");
    let mut session = SearchSession::new(runner);
    let mut handle = session.start_search(request);

    // ---- Progress ----
    while let Some(percent) = handle.progress.recv().await {
        eprint!("\rProgress: {percent:>3}%");
        let _ = std::io::stderr().flush();
    }
    eprintln!();

    let results = handle.result.await?;
    debug!(state = ?session.state(), "Search finished");

    // ---- Output ----
    let rendered = match args.format {
        OutputFormat::Text => outputs::text::render(&results),
        OutputFormat::Json => outputs::json::render(&results)?,
    };
    println!("{rendered}");

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        records = results.total_records(),
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
