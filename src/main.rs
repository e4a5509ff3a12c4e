//! Gap Screener - Main Entry Point
//!
//! Loads the day's gap candidates, sizes a trade plan for each one that
//! passes the filter, attaches recent news and writes a JSON report.

use anyhow::{Context, Result};
use clap::Parser;
use rust_decimal::Decimal;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use gap_screener::config::{load_config, ConfigOverrides};
use gap_screener::ScreenRunner;

/// CLI arguments for the application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// CSV file of candidates (ticker, gap, opening price)
    #[arg(short, long)]
    input: Option<String>,

    /// Where to write the JSON report
    #[arg(short, long)]
    output: Option<String>,

    /// Account balance used to size positions
    #[arg(long)]
    account_balance: Option<Decimal>,

    /// Fraction of the balance risked per trade
    #[arg(long)]
    loss_tolerance: Option<Decimal>,

    /// Fraction of the gap expected to fill
    #[arg(long)]
    profit_capture: Option<Decimal>,

    /// Minimum absolute gap fraction to evaluate
    #[arg(long)]
    min_gap: Option<Decimal>,

    /// Maximum number of concurrent news requests
    #[arg(long)]
    max_concurrency: Option<usize>,

    /// Give up on outstanding news requests after this many seconds
    #[arg(long)]
    deadline_seconds: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            input_path: self.input.clone(),
            output_path: self.output.clone(),
            account_balance: self.account_balance.map(|d| d.to_string()),
            loss_tolerance: self.loss_tolerance.map(|d| d.to_string()),
            profit_capture_fraction: self.profit_capture.map(|d| d.to_string()),
            min_gap: self.min_gap.map(|d| d.to_string()),
            max_concurrency: self.max_concurrency.map(|n| n.to_string()),
            deadline_seconds: self.deadline_seconds.map(|n| n.to_string()),
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();

    // Parse command line arguments
    let args = Args::parse();

    let config = load_config(Some(args.config.as_str()), &args.overrides())
        .context("failed to load configuration")?;

    // Initialize logging
    let level = match config.settings.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting gap screener");
    info!("Configuration file: {}", args.config);
    info!(
        "Screening {} with min gap {}",
        config.input_path.display(),
        config.min_gap
    );

    let runner = ScreenRunner::from_config(&config)?;
    let summary = runner.run().await?;

    info!(
        "Run complete: {} loaded, {} passed filter, {} delivered to {}",
        summary.loaded,
        summary.filtered,
        summary.delivered,
        config.output_path.display()
    );

    Ok(())
}
