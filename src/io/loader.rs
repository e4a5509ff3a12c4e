//! CSV candidate source

use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, instrument, warn};

use crate::common::errors::{Result, ScreenerError};
use crate::common::traits::CandidateLoader;
use crate::common::types::Candidate;

/// Reads candidates from a CSV file with a header row
///
/// Columns are positional: ticker, gap fraction, opening price. Rows that
/// cannot be parsed are skipped with a warning.
#[derive(Debug, Clone)]
pub struct CsvCandidateLoader {
    path: PathBuf,
}

impl CsvCandidateLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_error(&self, reason: impl ToString) -> ScreenerError {
        ScreenerError::Load {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}

impl CandidateLoader for CsvCandidateLoader {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<Vec<Candidate>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(|e| self.load_error(e))?;

        let mut candidates = Vec::new();
        let mut skipped = 0usize;

        for (index, record) in reader.records().enumerate() {
            // header is line 1
            let line = index + 2;
            let record = record.map_err(|e| self.load_error(e))?;

            match parse_record(&record) {
                Ok(candidate) => candidates.push(candidate),
                Err(reason) => {
                    skipped += 1;
                    warn!("Skipping line {}: {}", line, reason);
                }
            }
        }

        info!(
            "Loaded {} candidates ({} rows skipped)",
            candidates.len(),
            skipped
        );
        Ok(candidates)
    }
}

fn parse_record(record: &csv::StringRecord) -> std::result::Result<Candidate, String> {
    let ticker = record.get(0).unwrap_or_default();
    if ticker.is_empty() {
        return Err("empty ticker".to_string());
    }

    let gap = parse_decimal(record.get(1), "gap")?;
    let opening_price = parse_decimal(record.get(2), "opening price")?;

    Ok(Candidate::new(ticker, gap, opening_price))
}

fn parse_decimal(field: Option<&str>, name: &str) -> std::result::Result<Decimal, String> {
    let raw = field.ok_or_else(|| format!("missing {} column", name))?;
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|e| format!("invalid {} {:?}: {}", name, raw, e))
}
