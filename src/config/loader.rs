//! Configuration loader

use config::{Config, Environment, File};
use std::path::Path;

use super::types::AppConfig;
use crate::common::errors::Result;

/// Values supplied on the command line
///
/// Every field is optional; `None` leaves the file/environment value alone.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub input_path: Option<String>,
    pub output_path: Option<String>,
    pub account_balance: Option<String>,
    pub loss_tolerance: Option<String>,
    pub profit_capture_fraction: Option<String>,
    pub min_gap: Option<String>,
    pub max_concurrency: Option<String>,
    pub deadline_seconds: Option<String>,
    pub log_level: Option<String>,
}

/// Load configuration from file, environment variables and CLI overrides
///
/// Priority (highest to lowest):
/// 1. Command line overrides
/// 2. Environment variables (prefixed with GAP__, `__` between sections)
/// 3. Configuration file (TOML format)
/// 4. Default values
pub fn load_config(config_path: Option<&str>, overrides: &ConfigOverrides) -> Result<AppConfig> {
    load_layers(config_path, environment(), overrides)
}

fn environment() -> Environment {
    Environment::with_prefix("GAP")
        .separator("__")
        .try_parsing(true)
}

fn load_layers(
    config_path: Option<&str>,
    environment: Environment,
    overrides: &ConfigOverrides,
) -> Result<AppConfig> {
    let mut builder = Config::builder();

    if let Some(path) = config_path {
        if Path::new(path).exists() {
            builder = builder.add_source(File::with_name(path).required(false));
        }
    }

    builder = builder.add_source(environment);

    builder = builder
        .set_override_option("input_path", overrides.input_path.clone())?
        .set_override_option("output_path", overrides.output_path.clone())?
        .set_override_option("account_balance", overrides.account_balance.clone())?
        .set_override_option("loss_tolerance", overrides.loss_tolerance.clone())?
        .set_override_option(
            "profit_capture_fraction",
            overrides.profit_capture_fraction.clone(),
        )?
        .set_override_option("min_gap", overrides.min_gap.clone())?
        .set_override_option("pipeline.max_concurrency", overrides.max_concurrency.clone())?
        .set_override_option("pipeline.deadline_seconds", overrides.deadline_seconds.clone())?
        .set_override_option("settings.log_level", overrides.log_level.clone())?;

    let config: AppConfig = builder.build()?.try_deserialize()?;
    config.validate()?;
    Ok(config)
}
