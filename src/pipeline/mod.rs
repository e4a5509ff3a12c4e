//! Enrichment pipeline and the run that drives it

pub mod enrich;
pub mod runner;

pub use enrich::{Enrichment, EnrichmentPipeline, PipelineOptions};
pub use runner::{RunSummary, ScreenRunner};
