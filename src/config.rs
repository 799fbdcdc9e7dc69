//! Scrape configuration.
//!
//! Every key is optional; a YAML file only needs the keys it overrides:
//!
//! ```yaml
//! delay_secs: 10
//! timeout_secs: 30
//! pages:
//!   - https://www.allsides.com/media-bias/media-bias-ratings
//!   - https://www.allsides.com/media-bias/media-bias-ratings?page=1
//!   - https://www.allsides.com/media-bias/media-bias-ratings?page=2
//! ```

use serde::Deserialize;
use std::error::Error;
use std::time::Duration;
use tracing::{info, instrument};
use url::Url;

/// Site root used to resolve relative profile links.
pub const DEFAULT_BASE_URL: &str = "https://www.allsides.com";

/// The ratings table has exactly three pages.
pub const DEFAULT_PAGES: [&str; 3] = [
    "https://www.allsides.com/media-bias/media-bias-ratings",
    "https://www.allsides.com/media-bias/media-bias-ratings?page=1",
    "https://www.allsides.com/media-bias/media-bias-ratings?page=2",
];

/// robots.txt allows one request every 10 seconds.
pub const DEFAULT_DELAY_SECS: u64 = 10;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScrapeConfig {
    pub base_url: String,
    pub pages: Vec<String>,
    /// Wait before each profile request and after each ratings page.
    pub delay_secs: u64,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            pages: DEFAULT_PAGES.iter().map(|p| p.to_string()).collect(),
            delay_secs: DEFAULT_DELAY_SECS,
            timeout_secs: 30,
            user_agent: format!("news_bias/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ScrapeConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }

    pub fn base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.base_url)
    }
}

/// Load a [`ScrapeConfig`] from a YAML file.
#[instrument(target = "main", level = "info")]
pub fn load_config(path: &str) -> Result<ScrapeConfig, Box<dyn Error>> {
    let text = std::fs::read_to_string(path)?;
    let config = parse_config(&text)?;
    info!(target: "main", pages = config.pages.len(), delay_secs = config.delay_secs, "Loaded configuration");
    Ok(config)
}

fn parse_config(text: &str) -> Result<ScrapeConfig, serde_yaml::Error> {
    if text.trim().is_empty() {
        return Ok(ScrapeConfig::default());
    }
    serde_yaml::from_str(text)
}
