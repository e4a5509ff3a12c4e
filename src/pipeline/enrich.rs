//! Concurrent news enrichment of sized candidates
//!
//! Each candidate is sized inline, then its news fetch runs as its own
//! tokio task. Tasks report through a channel tagged with their slot index;
//! a single coordinator writes each outcome into a slot vector sized up
//! front, so the report order always matches the input order.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, instrument};

use crate::common::channels::{create_outcome_channel, SlotOutcome};
use crate::common::errors::{Result, ScreenerError};
use crate::common::traits::NewsFetcher;
use crate::common::types::{Article, Candidate, Diagnostic, Report, Selection};
use crate::config::types::PipelineConfig;
use crate::strategy::{PositionPlan, SizeCalculator};

/// Concurrency limits for one enrichment run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Maximum number of fetches in flight at once
    pub max_concurrency: usize,
    /// Budget for all fetches, measured from the start of the run
    pub deadline: Option<Duration>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            max_concurrency: 8,
            deadline: None,
        }
    }
}

impl From<&PipelineConfig> for PipelineOptions {
    fn from(config: &PipelineConfig) -> Self {
        Self {
            max_concurrency: config.max_concurrency,
            deadline: config.deadline(),
        }
    }
}

/// Output of an enrichment run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrichment {
    pub report: Report,
    /// Rejections first, then fetch failures, each in input order
    pub diagnostics: Vec<Diagnostic>,
}

impl Enrichment {
    pub fn rejected(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_rejection()).count()
    }

    pub fn fetch_failures(&self) -> usize {
        self.diagnostics.iter().filter(|d| !d.is_rejection()).count()
    }
}

/// Fans each candidate out to the calculator and the news fetcher and
/// joins the results into one ordered report
pub struct EnrichmentPipeline {
    calculator: Arc<dyn SizeCalculator>,
    fetcher: Arc<dyn NewsFetcher>,
    options: PipelineOptions,
}

impl EnrichmentPipeline {
    pub fn new(
        calculator: Arc<dyn SizeCalculator>,
        fetcher: Arc<dyn NewsFetcher>,
        options: PipelineOptions,
    ) -> Result<Self> {
        if options.max_concurrency == 0 || options.max_concurrency > Semaphore::MAX_PERMITS {
            return Err(ScreenerError::Configuration(format!(
                "max_concurrency must be between 1 and {}, got {}",
                Semaphore::MAX_PERMITS,
                options.max_concurrency
            )));
        }

        Ok(Self {
            calculator,
            fetcher,
            options,
        })
    }

    pub fn options(&self) -> PipelineOptions {
        self.options
    }

    /// Size every candidate and attach its news
    ///
    /// Never fails as a whole. A candidate that cannot be sized is left out
    /// and reported as [`Diagnostic::Rejected`]; a candidate whose news
    /// cannot be fetched keeps its selection with no articles and is
    /// reported as [`Diagnostic::FetchFailed`].
    #[instrument(
        skip(self, candidates),
        fields(candidates = candidates.len(), source = self.fetcher.source_name())
    )]
    pub async fn enrich(&self, candidates: &[Candidate]) -> Enrichment {
        let mut diagnostics = Vec::new();
        let mut planned: Vec<(String, PositionPlan)> = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            match self
                .calculator
                .calculate(candidate.gap, candidate.opening_price)
            {
                Ok(plan) => planned.push((candidate.ticker.clone(), plan)),
                Err(e) => diagnostics.push(Diagnostic::Rejected {
                    ticker: candidate.ticker.clone(),
                    error: e.to_string(),
                }),
            }
        }

        let deadline = self.options.deadline.map(|budget| Instant::now() + budget);
        let limiter = Arc::new(Semaphore::new(self.options.max_concurrency));
        let (tx, mut rx) = create_outcome_channel(planned.len());

        for (slot, (ticker, _)) in planned.iter().enumerate() {
            let tx = tx.clone();
            let fetcher = Arc::clone(&self.fetcher);
            let limiter = Arc::clone(&limiter);
            let ticker = ticker.clone();

            tokio::spawn(async move {
                let articles = fetch_bounded(fetcher.as_ref(), &ticker, &limiter, deadline).await;
                // the coordinator holds the receiver until every sender is gone
                let _ = tx.send(SlotOutcome { slot, articles }).await;
            });
        }
        drop(tx);

        let mut slots: Vec<Option<Result<Vec<Article>>>> =
            std::iter::repeat_with(|| None).take(planned.len()).collect();
        while let Some(outcome) = rx.recv().await {
            if let Some(slot) = slots.get_mut(outcome.slot) {
                *slot = Some(outcome.articles);
            }
        }

        let mut selections = Vec::with_capacity(planned.len());
        for ((ticker, plan), slot) in planned.into_iter().zip(slots) {
            let articles = match slot {
                Some(Ok(articles)) => articles,
                Some(Err(e)) => {
                    diagnostics.push(Diagnostic::FetchFailed {
                        ticker: ticker.clone(),
                        error: e.to_string(),
                    });
                    Vec::new()
                }
                // task panicked before reporting
                None => {
                    diagnostics.push(Diagnostic::FetchFailed {
                        ticker: ticker.clone(),
                        error: "fetch task ended without a result".to_string(),
                    });
                    Vec::new()
                }
            };
            selections.push(Selection {
                ticker,
                plan,
                articles,
            });
        }

        debug!(
            "Enriched {} selections with {} diagnostics",
            selections.len(),
            diagnostics.len()
        );

        Enrichment {
            report: Report::new(selections),
            diagnostics,
        }
    }
}

/// Fetch under the concurrency limit, giving up once the deadline passes
///
/// Time spent waiting for a permit counts against the deadline.
async fn fetch_bounded(
    fetcher: &dyn NewsFetcher,
    ticker: &str,
    limiter: &Semaphore,
    deadline: Option<Instant>,
) -> Result<Vec<Article>> {
    let work = async {
        let _permit = limiter
            .acquire()
            .await
            .map_err(|_| ScreenerError::Internal("fetch limiter closed".to_string()))?;
        fetcher.fetch(ticker).await
    };

    match deadline {
        Some(deadline) => timeout_at(deadline, work).await.unwrap_or_else(|_| {
            Err(ScreenerError::Timeout(format!(
                "news deadline passed before {} completed",
                ticker
            )))
        }),
        None => work.await,
    }
}
