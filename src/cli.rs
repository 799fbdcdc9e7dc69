//! Command-line interface definitions for news_bias.
//!
//! All arguments can be provided via command-line flags or environment
//! variables, and all have defaults.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the news_bias scraper.
///
/// # Examples
///
/// ```sh
/// # Defaults: ./CSV, ./JSON, ./LOGS
/// news_bias
///
/// # Custom output locations and a one second crawl delay
/// news_bias -c out/csv -j out/json -l out/logs --delay-secs 1
///
/// # Pages and timeouts from a YAML file
/// news_bias --config news_bias.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Output directory for the CSV table
    #[arg(short, long, env = "NEWS_BIAS_CSV_DIR", default_value = "./CSV")]
    pub csv_output_dir: PathBuf,

    /// Output directory for the JSON records
    #[arg(short, long, env = "NEWS_BIAS_JSON_DIR", default_value = "./JSON")]
    pub json_output_dir: PathBuf,

    /// Output directory for main.log and scraper.log
    #[arg(short, long, env = "NEWS_BIAS_LOG_DIR", default_value = "./LOGS")]
    pub log_output_dir: PathBuf,

    /// Optional path to a YAML scrape config
    #[arg(long)]
    pub config: Option<String>,

    /// Seconds to wait between requests (overrides the config file)
    #[arg(long)]
    pub delay_secs: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "news_bias",
            "--csv-output-dir",
            "./csv",
            "--json-output-dir",
            "./json",
            "--log-output-dir",
            "./logs",
        ]);

        assert_eq!(cli.csv_output_dir, PathBuf::from("./csv"));
        assert_eq!(cli.json_output_dir, PathBuf::from("./json"));
        assert_eq!(cli.log_output_dir, PathBuf::from("./logs"));
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["news_bias", "-c", "/tmp/csv", "-j", "/tmp/json", "-l", "/tmp/logs"]);

        assert_eq!(cli.csv_output_dir, PathBuf::from("/tmp/csv"));
        assert_eq!(cli.json_output_dir, PathBuf::from("/tmp/json"));
        assert_eq!(cli.log_output_dir, PathBuf::from("/tmp/logs"));
    }

    #[test]
    fn test_cli_config_and_delay() {
        let cli = Cli::parse_from(["news_bias", "--config", "scrape.yaml", "--delay-secs", "0"]);

        assert_eq!(cli.config.as_deref(), Some("scrape.yaml"));
        assert_eq!(cli.delay_secs, Some(0));
    }
}
