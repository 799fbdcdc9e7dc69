//! # news_bias
//!
//! Scrapes the AllSides media bias ratings table, follows each outlet to its
//! profile page for the outlet's homepage, and writes the results as JSON
//! records and a flat CSV table.
//!
//! ## Usage
//!
//! ```sh
//! news_bias -c ./CSV -j ./JSON -l ./LOGS
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Scraping**: Fetch each of the three ratings pages in order
//! 2. **Extraction**: Parse every table row and fetch its profile page
//! 3. **Store**: Write all records to `allsides.json`
//! 4. **Export**: Read the store back and write `allsides_bias.csv`
//!
//! Requests are made one at a time with a fixed delay, as the site's
//! robots.txt asks. A failed page or row is logged and skipped.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};

mod classify;
mod cli;
mod config;
mod error;
mod logging;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod utils;

use cli::Cli;
use config::{ScrapeConfig, load_config};
use scrapers::HttpFetcher;
use scrapers::allsides::Scraper;
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::parse();

    logging::init(&args.log_output_dir)?;
    let start_time = std::time::Instant::now();
    info!(target: "main", "news_bias starting up");
    debug!(target: "main", ?args, "Parsed CLI arguments");

    for dir in [&args.csv_output_dir, &args.json_output_dir] {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(
                target: "main",
                path = %dir.display(),
                error = %e,
                "Output directory is not writable (fix perms or choose a different path)"
            );
            return Err(e);
        }
    }

    let mut config = match args.config.as_deref() {
        Some(path) => load_config(path)?,
        None => ScrapeConfig::default(),
    };
    if let Some(delay_secs) = args.delay_secs {
        config.delay_secs = delay_secs;
    }
    info!(
        target: "main",
        pages = config.pages.len(),
        delay_secs = config.delay_secs,
        "Configuration ready"
    );

    // ---- Scrape ----
    let fetcher = HttpFetcher::new(&config)?;
    let scraper = Scraper::new(&fetcher, config.base_url()?, config.delay());
    let records = pipeline::run(&scraper, &config.pages).await;
    info!(target: "main", count = records.len(), "Data collection completed");

    // ---- Store ----
    let stored = outputs::json::persist_raw(&records, &args.json_output_dir);

    // ---- Export ----
    let from_store = match stored {
        Some(path) => outputs::json::load_raw(&path),
        None => Vec::new(),
    };
    let table = outputs::csv::to_table(&from_store);
    if let Some(path) = outputs::csv::persist_table(&table, &args.csv_output_dir) {
        info!(target: "main", path = %path.display(), rows = table.len(), "CSV saved, check folder");
    }

    let elapsed = start_time.elapsed();
    info!(
        target: "main",
        ?elapsed,
        secs = elapsed.as_secs(),
        records = records.len(),
        "Execution complete"
    );

    Ok(())
}
