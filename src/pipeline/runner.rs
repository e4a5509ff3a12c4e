//! One screening run: load, filter, enrich, deliver

use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::enrich::{Enrichment, EnrichmentPipeline, PipelineOptions};
use crate::common::errors::Result;
use crate::common::traits::{CandidateLoader, ReportDeliverer};
use crate::config::types::AppConfig;
use crate::io::{CsvCandidateLoader, JsonReportWriter};
use crate::news::SeekingAlphaClient;
use crate::strategy::{Filterer, GapFillCalculator, GapFilter};

/// Counts reported at the end of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub loaded: usize,
    pub filtered: usize,
    pub delivered: usize,
    pub rejected: usize,
    pub fetch_failures: usize,
}

/// Wires the collaborators of a run together
pub struct ScreenRunner {
    loader: Box<dyn CandidateLoader>,
    filterer: Box<dyn Filterer>,
    pipeline: EnrichmentPipeline,
    deliverer: Box<dyn ReportDeliverer>,
}

impl ScreenRunner {
    pub fn new(
        loader: Box<dyn CandidateLoader>,
        filterer: Box<dyn Filterer>,
        pipeline: EnrichmentPipeline,
        deliverer: Box<dyn ReportDeliverer>,
    ) -> Self {
        Self {
            loader,
            filterer,
            pipeline,
            deliverer,
        }
    }

    /// Build the production collaborators from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let calculator = GapFillCalculator::new(config.risk_parameters()?);
        let fetcher =
            SeekingAlphaClient::from_config(&config.news, config.settings.request_timeout())?;
        let pipeline = EnrichmentPipeline::new(
            Arc::new(calculator),
            Arc::new(fetcher),
            PipelineOptions::from(&config.pipeline),
        )?;

        Ok(Self::new(
            Box::new(CsvCandidateLoader::new(&config.input_path)),
            Box::new(GapFilter::new(config.min_gap)?),
            pipeline,
            Box::new(JsonReportWriter::new(&config.output_path)),
        ))
    }

    /// Run once
    ///
    /// Loader and deliverer failures end the run with an error; nothing is
    /// delivered if loading fails. Per-ticker problems are logged and
    /// counted but never fail the run.
    #[instrument(skip(self))]
    pub async fn run(&self) -> Result<RunSummary> {
        let candidates = self.loader.load()?;
        let loaded = candidates.len();

        let filtered = self.filterer.filter(candidates);
        info!(
            "{} of {} candidates pass the gap filter",
            filtered.len(),
            loaded
        );

        let enrichment = self.pipeline.enrich(&filtered).await;
        log_enrichment(&enrichment);

        self.deliverer.deliver(&enrichment.report)?;

        let summary = RunSummary {
            loaded,
            filtered: filtered.len(),
            delivered: enrichment.report.len(),
            rejected: enrichment.rejected(),
            fetch_failures: enrichment.fetch_failures(),
        };
        info!(
            "Delivered {} selections ({} rejected, {} without news)",
            summary.delivered, summary.rejected, summary.fetch_failures
        );
        Ok(summary)
    }
}

fn log_enrichment(enrichment: &Enrichment) {
    for diagnostic in &enrichment.diagnostics {
        warn!("{}", diagnostic);
    }
    for selection in enrichment.report.selections() {
        if !selection.articles.is_empty() {
            info!(
                "Found {} articles about {}",
                selection.articles.len(),
                selection.ticker
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::errors::ScreenerError;
    use crate::common::traits::{MockCandidateLoader, MockNewsFetcher, MockReportDeliverer};
    use crate::common::types::Candidate;
    use crate::strategy::RiskParameters;
    use rust_decimal_macros::dec;
    use std::path::PathBuf;

    fn pipeline_with(fetcher: MockNewsFetcher) -> EnrichmentPipeline {
        let params = RiskParameters::new(dec!(10000), dec!(0.02), dec!(0.8)).unwrap();
        EnrichmentPipeline::new(
            Arc::new(GapFillCalculator::new(params)),
            Arc::new(fetcher),
            PipelineOptions::default(),
        )
        .unwrap()
    }

    fn quiet_fetcher() -> MockNewsFetcher {
        let mut fetcher = MockNewsFetcher::new();
        fetcher.expect_source_name().return_const("mock");
        fetcher
    }

    #[tokio::test]
    async fn test_run_filters_enriches_and_delivers() {
        let mut loader = MockCandidateLoader::new();
        loader.expect_load().times(1).returning(|| {
            Ok(vec![
                Candidate::new("ACME", dec!(-0.2), dec!(50)),
                Candidate::new("FLAT", dec!(0.01), dec!(20)),
                Candidate::new("DOWN", dec!(-1), dec!(3)),
                Candidate::new("JUMP", dec!(0.25), dec!(12.5)),
            ])
        });

        let mut fetcher = quiet_fetcher();
        fetcher
            .expect_fetch()
            .times(2)
            .returning(|ticker| {
                if ticker.starts_with("JUMP") {
                    Err(ScreenerError::Timeout("news request for JUMP".to_string()))
                } else {
                    Ok(Vec::new())
                }
            });

        let mut deliverer = MockReportDeliverer::new();
        deliverer
            .expect_deliver()
            .withf(|report| {
                report.len() == 2
                    && report.selections()[0].ticker == "ACME"
                    && report.selections()[1].ticker == "JUMP"
            })
            .times(1)
            .returning(|_| Ok(()));

        let runner = ScreenRunner::new(
            Box::new(loader),
            Box::new(GapFilter::new(dec!(0.1)).unwrap()),
            pipeline_with(fetcher),
            Box::new(deliverer),
        );

        let summary = runner.run().await.unwrap();
        assert_eq!(
            summary,
            RunSummary {
                loaded: 4,
                filtered: 3,
                delivered: 2,
                rejected: 1,
                fetch_failures: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_load_failure_delivers_nothing() {
        let mut loader = MockCandidateLoader::new();
        loader.expect_load().returning(|| {
            Err(ScreenerError::Load {
                path: PathBuf::from("opg.csv"),
                reason: "No such file or directory".to_string(),
            })
        });

        let mut fetcher = quiet_fetcher();
        fetcher.expect_fetch().never();
        let mut deliverer = MockReportDeliverer::new();
        deliverer.expect_deliver().never();

        let runner = ScreenRunner::new(
            Box::new(loader),
            Box::new(GapFilter::new(dec!(0.1)).unwrap()),
            pipeline_with(fetcher),
            Box::new(deliverer),
        );

        let err = runner.run().await.unwrap_err();
        assert!(matches!(err, ScreenerError::Load { .. }));
    }

    #[tokio::test]
    async fn test_deliver_failure_is_surfaced() {
        let mut loader = MockCandidateLoader::new();
        loader
            .expect_load()
            .returning(|| Ok(vec![Candidate::new("ACME", dec!(-0.2), dec!(50))]));

        let mut fetcher = quiet_fetcher();
        fetcher.expect_fetch().returning(|_| Ok(Vec::new()));

        let mut deliverer = MockReportDeliverer::new();
        deliverer.expect_deliver().times(1).returning(|_| {
            Err(ScreenerError::Deliver {
                path: PathBuf::from("/readonly/opg.json"),
                reason: "Permission denied".to_string(),
            })
        });

        let runner = ScreenRunner::new(
            Box::new(loader),
            Box::new(GapFilter::new(dec!(0.1)).unwrap()),
            pipeline_with(fetcher),
            Box::new(deliverer),
        );

        let err = runner.run().await.unwrap_err();
        assert!(matches!(err, ScreenerError::Deliver { .. }));
    }
}
