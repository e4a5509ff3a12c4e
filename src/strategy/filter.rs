use rust_decimal::Decimal;

use crate::common::errors::{Result, ScreenerError};
use crate::common::types::Candidate;

/// Decides which candidates are worth sizing
pub trait Filterer: Send + Sync {
    /// Keep the candidates that pass, preserving their relative order
    fn filter(&self, candidates: Vec<Candidate>) -> Vec<Candidate>;
}

/// Keeps candidates whose absolute gap is at least `min_gap`
#[derive(Debug, Clone, Copy)]
pub struct GapFilter {
    min_gap: Decimal,
}

impl GapFilter {
    pub fn new(min_gap: Decimal) -> Result<Self> {
        if min_gap < Decimal::ZERO {
            return Err(ScreenerError::Configuration(format!(
                "min_gap must not be negative, got {}",
                min_gap
            )));
        }
        Ok(Self { min_gap })
    }

    pub fn min_gap(&self) -> Decimal {
        self.min_gap
    }

    pub fn passes(&self, candidate: &Candidate) -> bool {
        candidate.gap.abs() >= self.min_gap
    }
}

impl Filterer for GapFilter {
    fn filter(&self, mut candidates: Vec<Candidate>) -> Vec<Candidate> {
        candidates.retain(|c| self.passes(c));
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn candidates() -> Vec<Candidate> {
        vec![
            Candidate::new("AAA", dec!(-0.15), dec!(10)),
            Candidate::new("BBB", dec!(0.05), dec!(10)),
            Candidate::new("CCC", dec!(0.10), dec!(10)),
            Candidate::new("DDD", dec!(-0.09999), dec!(10)),
            Candidate::new("EEE", dec!(0.42), dec!(10)),
        ]
    }

    #[test]
    fn test_keeps_large_gaps_in_order() {
        let filter = GapFilter::new(dec!(0.1)).unwrap();
        let kept: Vec<_> = filter
            .filter(candidates())
            .into_iter()
            .map(|c| c.ticker)
            .collect();

        assert_eq!(kept, vec!["AAA", "CCC", "EEE"]);
    }

    #[test]
    fn test_threshold_is_inclusive_both_directions() {
        let filter = GapFilter::new(dec!(0.1)).unwrap();
        assert!(filter.passes(&Candidate::new("UP", dec!(0.1), dec!(1))));
        assert!(filter.passes(&Candidate::new("DOWN", dec!(-0.1), dec!(1))));
    }

    #[test]
    fn test_partition_matches_predicate() {
        let filter = GapFilter::new(dec!(0.1)).unwrap();
        let input = candidates();
        let kept = filter.filter(input.clone());

        for candidate in &input {
            let retained = kept.iter().any(|k| k.ticker == candidate.ticker);
            assert_eq!(retained, candidate.gap.abs() >= dec!(0.1), "{}", candidate.ticker);
        }
    }

    #[test]
    fn test_empty_input() {
        let filter = GapFilter::new(dec!(0.1)).unwrap();
        assert!(filter.filter(Vec::new()).is_empty());
    }

    #[test]
    fn test_zero_threshold_keeps_everything() {
        let filter = GapFilter::new(Decimal::ZERO).unwrap();
        assert_eq!(filter.filter(candidates()).len(), 5);
    }

    #[test]
    fn test_negative_threshold_is_rejected() {
        assert!(GapFilter::new(dec!(-0.1)).is_err());
    }
}
