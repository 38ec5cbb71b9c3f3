// src/config.rs

use std::env;
use std::time::Duration;

use dotenvy::dotenv;
use url::Url;

use crate::error::ConfigError;
use crate::models::stats::StatsLayout;

pub const DEFAULT_API_BASE_URL: &str = "https://gre-vocab-backend-apjd.onrender.com";
pub const DEFAULT_SUMMARY_DELAY_MS: u64 = 1500;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: Url,
    /// How long the last round's feedback stays up before the summary.
    pub summary_delay: Duration,
    pub stats_layout: StatsLayout,
    pub rust_log: String,
    pub enable_file_logs: bool,
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = lookup("API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let api_base_url = Url::parse(raw_url.trim()).map_err(|e| ConfigError {
            key: "API_BASE_URL",
            message: e.to_string(),
        })?;

        let summary_delay = match lookup("SUMMARY_DELAY_MS") {
            Some(ms) => ms.trim().parse::<u64>().map_err(|e| ConfigError {
                key: "SUMMARY_DELAY_MS",
                message: e.to_string(),
            })?,
            None => DEFAULT_SUMMARY_DELAY_MS,
        };

        let stats_layout = match lookup("STATS_LAYOUT") {
            Some(layout) => layout.parse::<StatsLayout>().map_err(|message| ConfigError {
                key: "STATS_LAYOUT",
                message,
            })?,
            None => StatsLayout::default(),
        };

        let rust_log = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());

        let enable_file_logs = lookup("ENABLE_FILE_LOGS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let log_dir = lookup("LOG_DIR").unwrap_or_else(|| "./logs".to_string());

        Ok(Self {
            api_base_url,
            summary_delay: Duration::from_millis(summary_delay),
            stats_layout,
            rust_log,
            enable_file_logs,
            log_dir,
        })
    }
}
