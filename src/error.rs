//! Error types for scraping and exporting.
//!
//! Scrape-side failures ([`ScrapeError`]) never escape the page scraper;
//! export-side failures ([`SerializationError`]) never escape the exporter.
//! Both are logged where they stop.

use thiserror::Error;

/// Failure while fetching, parsing, or extracting from the ratings site.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The request could not be made or came back with a non-success status.
    #[error("request to {url} failed: {reason}")]
    Fetch { url: String, reason: String },

    /// The response was not shaped like the markup we expect.
    #[error("unexpected markup from {url}: {reason}")]
    Parse { url: String, reason: String },

    /// A row (or its profile page) was missing a required field.
    #[error("could not extract outlet: {0}")]
    Extraction(#[from] ExtractionError),
}

/// A required outlet field was absent or malformed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` is not a count: {value:?}")]
    NotACount { field: &'static str, value: String },

    /// Ratio would be infinite or NaN.
    #[error("disagree count is zero, agree ratio is undefined")]
    ZeroDisagree,

    #[error("invalid link {href:?}: {reason}")]
    BadLink { href: String, reason: String },

    /// The outlet's profile page could not be fetched.
    #[error("profile page {url} unavailable: {reason}")]
    ProfileUnavailable { url: String, reason: String },
}

/// Failure writing or reading one of the output sinks.
#[derive(Debug, Error)]
pub enum SerializationError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl From<reqwest::Error> for ScrapeError {
    fn from(err: reqwest::Error) -> Self {
        ScrapeError::Fetch {
            url: err
                .url()
                .map(|u| u.to_string())
                .unwrap_or_else(|| "<unknown>".to_string()),
            reason: err.to_string(),
        }
    }
}
