//! Collection pipeline: scrape every ratings page in order.
//!
//! Pages are processed strictly one after another with the crawl delay in
//! between. Whatever fails (a page, a row) is logged and skipped; the
//! pipeline always returns what it collected.

use crate::models::OutletRecord;
use crate::scrapers::Fetch;
use crate::scrapers::allsides::Scraper;
use crate::utils::progress_bar;
use tracing::{info, instrument, warn};

/// Scrape `pages` in order and collect every successful record.
///
/// Records come out in page order, then row order. After each page,
/// including the last, the scraper's delay is waited.
#[instrument(target = "main", level = "info", skip_all, fields(pages = pages.len()))]
pub async fn run<F: Fetch>(scraper: &Scraper<'_, F>, pages: &[String]) -> Vec<OutletRecord> {
    info!(target: "main", "Starting collection");
    let mut records = Vec::new();
    let mut failed_rows = 0usize;
    let progress = progress_bar(pages.len() as u64, "pages");

    for (index, page) in pages.iter().enumerate() {
        let outcomes = scraper.scrape(page).await;
        if outcomes.is_empty() {
            warn!(target: "main", page = index + 1, url = %page, "Page contributed no rows");
        }

        let before = records.len();
        for outcome in outcomes {
            match outcome {
                Ok(record) => records.push(record),
                Err(_) => failed_rows += 1,
            }
        }
        info!(
            target: "main",
            page = index + 1,
            collected = records.len() - before,
            total = records.len(),
            "Page complete"
        );

        tokio::time::sleep(scraper.delay()).await;
        progress.inc(1);
    }
    progress.finish_and_clear();

    info!(
        target: "main",
        records = records.len(),
        failed_rows,
        "Collection complete"
    );
    records
}
