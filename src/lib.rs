//! Gap Screener Library
//!
//! Screens a daily list of gapping equities, sizes a risk-bounded trade
//! plan for each survivor, and enriches every plan with recent news.

pub mod common;
pub mod config;
pub mod io;
pub mod news;
pub mod pipeline;
pub mod strategy;

// Re-export commonly used types
pub use common::errors::{Result, ScreenerError};
pub use common::traits::{CandidateLoader, NewsFetcher, ReportDeliverer};
pub use common::types::{Article, Candidate, Diagnostic, Report, Selection};
pub use config::types::AppConfig;
pub use io::{CsvCandidateLoader, JsonReportWriter};
pub use news::SeekingAlphaClient;
pub use pipeline::{Enrichment, EnrichmentPipeline, PipelineOptions, RunSummary, ScreenRunner};

// Strategy types
pub use strategy::{
    CalculationError, Filterer, GapFillCalculator, GapFilter, PositionPlan, RiskParameters,
    SizeCalculator, Side,
};
