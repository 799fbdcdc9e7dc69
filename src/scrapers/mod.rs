//! Scraping the media bias ratings table.
//!
//! Fetching goes through the [`Fetch`] trait so the scraper never talks to
//! `reqwest` directly. [`HttpFetcher`] is the production implementation.
//!
//! # Submodules
//!
//! - [`allsides`]: row extraction and page scraping for the ratings table
//!
//! # Request pattern
//!
//! | Request | Count | Delay before |
//! |---------|-------|--------------|
//! | ratings page | 3 (fixed) | configured delay after the previous page |
//! | outlet profile page | one per table row | configured delay |

pub mod allsides;

use crate::config::ScrapeConfig;
use crate::error::ScrapeError;
use crate::utils::truncate_for_log;
use std::time::Duration;
use tracing::{debug, instrument};

/// Source of page bodies.
pub trait Fetch {
    /// GET `url` and return the response body as text.
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError>;
}

/// [`Fetch`] over HTTP(S). One attempt per call, no retry.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &ScrapeConfig) -> Result<Self, ScrapeError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    #[instrument(target = "scraper", level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        let resp = self.client.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ScrapeError::Fetch {
                url: url.to_string(),
                reason: format!("HTTP {}: {}", status.as_u16(), truncate_for_log(&body, 200)),
            });
        }

        let body = resp.text().await?;
        debug!(target: "scraper", %url, bytes = body.len(), "Response received");
        Ok(body)
    }
}
