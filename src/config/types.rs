//! Configuration types

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::common::errors::{Result, ScreenerError};
use crate::strategy::RiskParameters;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// CSV file with the day's gapping candidates
    pub input_path: PathBuf,
    /// Account capital used to size positions
    pub account_balance: Decimal,
    /// Where the JSON report is written
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    /// Fraction of the balance risked per trade
    #[serde(default = "default_loss_tolerance")]
    pub loss_tolerance: Decimal,
    /// Fraction of the gap the strategy expects to fill
    #[serde(default = "default_profit_capture_fraction")]
    pub profit_capture_fraction: Decimal,
    /// Minimum absolute gap for a candidate to be evaluated
    #[serde(default = "default_min_gap")]
    pub min_gap: Decimal,
    /// News service configuration
    #[serde(default)]
    pub news: NewsConfig,
    /// Enrichment pipeline tuning
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// General application settings
    #[serde(default)]
    pub settings: AppSettings,
}

fn default_output_path() -> PathBuf {
    PathBuf::from("opg.json")
}

fn default_loss_tolerance() -> Decimal {
    dec!(0.02)
}

fn default_profit_capture_fraction() -> Decimal {
    dec!(0.8)
}

fn default_min_gap() -> Decimal {
    dec!(0.1)
}

impl AppConfig {
    /// Build the validated risk parameters for this run
    pub fn risk_parameters(&self) -> Result<RiskParameters> {
        RiskParameters::new(
            self.account_balance,
            self.loss_tolerance,
            self.profit_capture_fraction,
        )
    }

    /// Check every value that deserialization alone cannot
    pub fn validate(&self) -> Result<()> {
        if self.input_path.as_os_str().is_empty() {
            return Err(ScreenerError::Configuration(
                "input_path must not be empty".to_string(),
            ));
        }
        if self.min_gap < Decimal::ZERO {
            return Err(ScreenerError::Configuration(format!(
                "min_gap must not be negative, got {}",
                self.min_gap
            )));
        }
        if self.news.page_size == 0 {
            return Err(ScreenerError::Configuration(
                "news.page_size must be at least 1".to_string(),
            ));
        }
        if self.pipeline.max_concurrency == 0 {
            return Err(ScreenerError::Configuration(
                "pipeline.max_concurrency must be at least 1".to_string(),
            ));
        }
        self.risk_parameters()?;
        Ok(())
    }
}

/// News service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsConfig {
    /// Base URL of the RapidAPI gateway
    #[serde(default = "default_news_base_url")]
    pub base_url: String,
    /// RapidAPI key
    #[serde(default)]
    pub api_key: Option<String>,
    /// Articles requested per ticker
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            base_url: default_news_base_url(),
            api_key: None,
            page_size: default_page_size(),
        }
    }
}

fn default_news_base_url() -> String {
    "https://seeking-alpha.p.rapidapi.com".to_string()
}

fn default_page_size() -> u32 {
    crate::news::rest::DEFAULT_PAGE_SIZE
}

/// Enrichment pipeline tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Maximum number of news requests in flight at once
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
    /// Overall budget for all news requests in seconds (none = unbounded)
    #[serde(default)]
    pub deadline_seconds: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_concurrency: default_max_concurrency(),
            deadline_seconds: None,
        }
    }
}

impl PipelineConfig {
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_seconds.map(Duration::from_secs)
    }
}

fn default_max_concurrency() -> usize {
    8
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl AppSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_request_timeout() -> u64 {
    30
}
