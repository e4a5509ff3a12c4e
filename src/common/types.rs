//! Domain types shared across the loader, pipeline and report writer

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::strategy::PositionPlan;

/// A gapping equity read from the daily source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Exchange symbol
    pub ticker: String,
    /// Signed overnight gap as a fraction (-0.15 is a 15% gap down)
    pub gap: Decimal,
    /// Opening price for the session
    pub opening_price: Decimal,
}

impl Candidate {
    pub fn new(ticker: impl Into<String>, gap: Decimal, opening_price: Decimal) -> Self {
        Self {
            ticker: ticker.into(),
            gap,
            opening_price,
        }
    }
}

/// A news headline attached to a selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub published_at: DateTime<Utc>,
    pub headline: String,
}

impl Article {
    pub fn new(published_at: DateTime<Utc>, headline: impl Into<String>) -> Self {
        Self {
            published_at,
            headline: headline.into(),
        }
    }
}

/// One candidate's finished trade plan plus any associated news
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub ticker: String,
    #[serde(flatten)]
    pub plan: PositionPlan,
    /// Articles in the order the news source returned them
    #[serde(default)]
    pub articles: Vec<Article>,
}

/// Ordered collection of selections handed to the deliverer
///
/// Serializes as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Report {
    selections: Vec<Selection>,
}

impl Report {
    pub fn new(selections: Vec<Selection>) -> Self {
        Self { selections }
    }

    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Look up a selection by ticker
    pub fn get(&self, ticker: &str) -> Option<&Selection> {
        self.selections.iter().find(|s| s.ticker == ticker)
    }

    pub fn into_selections(self) -> Vec<Selection> {
        self.selections
    }
}

/// Non-fatal per-ticker problem reported alongside a report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// News could not be fetched; the selection carries no articles
    FetchFailed { ticker: String, error: String },
    /// The candidate could not be sized and was left out of the report
    Rejected { ticker: String, error: String },
}

impl Diagnostic {
    pub fn ticker(&self) -> &str {
        match self {
            Diagnostic::FetchFailed { ticker, .. } => ticker,
            Diagnostic::Rejected { ticker, .. } => ticker,
        }
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, Diagnostic::Rejected { .. })
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::FetchFailed { ticker, error } => {
                write!(f, "error loading news for {}: {}", ticker, error)
            }
            Diagnostic::Rejected { ticker, error } => {
                write!(f, "rejected {}: {}", ticker, error)
            }
        }
    }
}
