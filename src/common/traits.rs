//! Trait definitions for the screener's external collaborators

use async_trait::async_trait;

use super::errors::Result;
use super::types::{Article, Candidate, Report};

/// Source of the raw daily candidate list
#[cfg_attr(test, mockall::automock)]
pub trait CandidateLoader: Send + Sync {
    /// Read every candidate from the source
    ///
    /// Failure here is fatal for the run; nothing is delivered.
    fn load(&self) -> Result<Vec<Candidate>>;
}

/// Trait for news clients (Seeking Alpha, test stubs, etc.)
///
/// Implementations are shared across concurrently running tasks,
/// so they must be cheap to call through a shared reference.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsFetcher: Send + Sync {
    /// Fetch recent articles for a ticker
    ///
    /// # Arguments
    /// * `ticker` - Exchange symbol to look up
    ///
    /// # Returns
    /// Articles in the order the source returned them. An empty list
    /// is a valid answer, not an error.
    async fn fetch(&self, ticker: &str) -> Result<Vec<Article>>;

    /// Name of the news source, used in log lines
    fn source_name(&self) -> &'static str;
}

/// Sink that receives the finished report exactly once per run
#[cfg_attr(test, mockall::automock)]
pub trait ReportDeliverer: Send + Sync {
    fn deliver(&self, report: &Report) -> Result<()>;
}
