//! Layered configuration: TOML file, environment, command line

pub mod loader;
pub mod types;

pub use loader::{load_config, ConfigOverrides};
pub use types::{AppConfig, AppSettings, NewsConfig, PipelineConfig};
