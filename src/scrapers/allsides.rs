//! AllSides media bias ratings scraper.
//!
//! Each ratings page is a table with one outlet per `tbody tr`. A row gives
//! the outlet name, its profile link, a bias link whose last path segment
//! is the bias tag, and the community agree/disagree counts. The outlet's
//! homepage is only on its profile page, so every row costs one more
//! request.
//!
//! # Markup
//!
//! ```text
//! tbody tr
//! ├── .source-title            name (text)
//! │   └── a[href]              /news-source/<slug>
//! ├── .views-field-field-bias-image a[href]   /media-bias/<bias>
//! ├── .agree                   integer
//! └── .disagree                integer
//!
//! profile page
//! └── .dynamic-grid a[href]    first link = outlet homepage
//! ```

use super::Fetch;
use crate::classify::classify;
use crate::error::{ExtractionError, ScrapeError};
use crate::models::OutletRecord;
use crate::utils::progress_bar;
use futures::stream::{self, StreamExt};
use itertools::Itertools;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Outcome of extracting a single table row.
pub type RowOutcome = Result<OutletRecord, ScrapeError>;

/// Raw values read off one table row, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedRow {
    pub name: Option<String>,
    pub profile_href: Option<String>,
    pub bias_href: Option<String>,
    pub agree: Option<String>,
    pub disagree: Option<String>,
}

fn selector(css: &'static str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Parse {
        url: String::new(),
        reason: format!("invalid selector {css:?}: {e}"),
    })
}

fn first_text(row: &ElementRef<'_>, sel: &Selector) -> Option<String> {
    row.select(sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

fn first_href(row: &ElementRef<'_>, sel: &Selector) -> Option<String> {
    row.select(sel)
        .next()
        .and_then(|el| el.value().attr("href"))
        .map(str::to_string)
}

/// Read the raw field values out of one `tr` element.
pub fn parse_row(row: ElementRef<'_>) -> Result<ParsedRow, ScrapeError> {
    let title = selector(".source-title")?;
    let title_link = selector(".source-title a")?;
    let bias_link = selector(".views-field-field-bias-image a")?;
    let agree = selector(".agree")?;
    let disagree = selector(".disagree")?;

    Ok(ParsedRow {
        name: first_text(&row, &title),
        profile_href: first_href(&row, &title_link),
        bias_href: first_href(&row, &bias_link),
        agree: first_text(&row, &agree),
        disagree: first_text(&row, &disagree),
    })
}

/// Last non-empty path segment of a bias link, e.g. `/media-bias/left` -> `left`.
fn bias_tag(href: &str) -> Option<String> {
    let path = href.split(['?', '#']).next().unwrap_or(href);
    path.rsplit('/')
        .find(|seg| !seg.is_empty())
        .map(str::to_string)
}

fn parse_count(field: &'static str, raw: Option<&str>) -> Result<u64, ExtractionError> {
    let raw = raw.ok_or(ExtractionError::MissingField(field))?;
    raw.trim()
        .parse::<u64>()
        .map_err(|_| ExtractionError::NotACount {
            field,
            value: raw.to_string(),
        })
}

/// Href of the first link inside the profile page's content grid.
pub fn parse_homepage(body: &str) -> Result<String, ScrapeError> {
    let grid_link = selector(".dynamic-grid a")?;
    let document = Html::parse_document(body);
    document
        .select(&grid_link)
        .next()
        .and_then(|el| el.value().attr("href"))
        .map(str::to_string)
        .ok_or_else(|| ExtractionError::MissingField("news_page").into())
}

/// Scrapes ratings pages through a [`Fetch`] implementation.
pub struct Scraper<'a, F> {
    fetcher: &'a F,
    base_url: Url,
    delay: Duration,
}

impl<'a, F: Fetch> Scraper<'a, F> {
    /// `base_url` resolves the relative profile links; `delay` is waited
    /// before every profile page request.
    pub fn new(fetcher: &'a F, base_url: Url, delay: Duration) -> Self {
        Self {
            fetcher,
            base_url,
            delay,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Build a full [`OutletRecord`] from a parsed row.
    ///
    /// Validates the row first, so a malformed row costs no request. Then
    /// waits the crawl delay and fetches the outlet's profile page for its
    /// homepage link.
    ///
    /// # Errors
    ///
    /// [`ExtractionError`] when a field is missing or malformed, when
    /// `disagree` is zero, when the profile page request fails, or when the
    /// profile page's first grid link has no `href`.
    #[instrument(target = "scraper", level = "debug", skip_all, fields(name = ?row.name))]
    pub async fn extract(&self, row: ParsedRow) -> RowOutcome {
        let name = row.name.filter(|n| !n.is_empty()).ok_or(ExtractionError::MissingField("name"))?;
        let profile_href = row
            .profile_href
            .ok_or(ExtractionError::MissingField("allsides_page"))?;
        let bias_href = row.bias_href.ok_or(ExtractionError::MissingField("bias"))?;
        let bias = bias_tag(&bias_href).ok_or_else(|| ExtractionError::BadLink {
            href: bias_href.clone(),
            reason: "no path segment".to_string(),
        })?;

        let allsides_page = self
            .base_url
            .join(&profile_href)
            .map_err(|e| ExtractionError::BadLink {
                href: profile_href.clone(),
                reason: e.to_string(),
            })?
            .to_string();

        let agree = parse_count("agree", row.agree.as_deref())?;
        let disagree = parse_count("disagree", row.disagree.as_deref())?;
        if disagree == 0 {
            return Err(ExtractionError::ZeroDisagree.into());
        }
        let agree_ratio = agree as f64 / disagree as f64;
        let agreeance_text = classify(agree_ratio);

        debug!(
            target: "scraper",
            url = %allsides_page,
            agree_ratio,
            agreeance = %agreeance_text,
            "Requesting outlet profile page"
        );
        tokio::time::sleep(self.delay).await;
        let body = self
            .fetcher
            .fetch(&allsides_page)
            .await
            .map_err(|e| match e {
                ScrapeError::Fetch { url, reason } => {
                    ScrapeError::from(ExtractionError::ProfileUnavailable { url, reason })
                }
                other => other,
            })?;
        let news_page = parse_homepage(&body)?;

        let record = OutletRecord {
            name,
            allsides_page,
            bias,
            agree,
            disagree,
            agree_ratio,
            agreeance_text,
            news_page,
        };
        debug!(target: "scraper", ?record, "Outlet record complete");
        Ok(record)
    }

    /// Fetch one ratings page and pull its rows.
    async fn fetch_rows(&self, page: &str) -> Result<Vec<Result<ParsedRow, ScrapeError>>, ScrapeError> {
        let body = self.fetcher.fetch(page).await?;
        debug!(target: "scraper", %page, bytes = body.len(), "Ratings page fetched");

        let table = selector("table")?;
        let rows = selector("tbody tr")?;
        let document = Html::parse_document(&body);
        if document.select(&table).next().is_none() {
            return Err(ScrapeError::Parse {
                url: page.to_string(),
                reason: "no ratings table in page".to_string(),
            });
        }

        let parsed = document.select(&rows).map(parse_row).collect::<Vec<_>>();
        debug!(target: "scraper", %page, rows = parsed.len(), "Table rows extracted");
        Ok(parsed)
    }

    /// Scrape every row of one ratings page.
    ///
    /// Never fails: a page that cannot be fetched or parsed is logged and
    /// yields no outcomes, and each bad row is logged and kept as an `Err`.
    #[instrument(target = "scraper", level = "info", skip(self))]
    pub async fn scrape(&self, page: &str) -> Vec<RowOutcome> {
        info!(target: "scraper", %page, "Considering page");
        let rows = match self.fetch_rows(page).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(target: "scraper", %page, error = %e, "Failed to get page");
                return Vec::new();
            }
        };

        let progress = progress_bar(rows.len() as u64, "rows");
        let progress = &progress;
        let outcomes: Vec<RowOutcome> = stream::iter(rows)
            .then(|row| async move {
                let outcome = match row {
                    Ok(row) => self.extract(row).await,
                    Err(e) => Err(e),
                };
                if let Err(ref e) = outcome {
                    warn!(target: "scraper", %page, error = %e, "Failed to extract outlet row");
                }
                progress.inc(1);
                outcome
            })
            .collect()
            .await;
        progress.finish_and_clear();

        let (ok, failed): (Vec<&OutletRecord>, Vec<&ScrapeError>) =
            outcomes.iter().map(|o| o.as_ref()).partition_result();
        info!(
            target: "scraper",
            %page,
            extracted = ok.len(),
            failed = failed.len(),
            "Page scraped"
        );
        outcomes
    }
}
