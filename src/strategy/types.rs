use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::common::errors::{Result, ScreenerError};

/// Direction of the planned trade
///
/// The strategy bets on the gap partially filling, so a gap down is
/// bought and a gap up is sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// Account-level risk settings, fixed for a run
///
/// Fields are private so the derived per-trade loss can never drift from
/// the balance and tolerance it was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskParameters {
    account_balance: Decimal,
    loss_tolerance: Decimal,
    profit_capture_fraction: Decimal,
    max_loss_per_trade: Decimal,
}

impl RiskParameters {
    /// Validate and build risk parameters
    ///
    /// # Arguments
    /// * `account_balance` - Capital available, must be positive
    /// * `loss_tolerance` - Fraction of the balance risked per trade, in (0, 1]
    /// * `profit_capture_fraction` - Fraction of the gap expected to fill, in (0, 1]
    pub fn new(
        account_balance: Decimal,
        loss_tolerance: Decimal,
        profit_capture_fraction: Decimal,
    ) -> Result<Self> {
        if account_balance <= Decimal::ZERO {
            return Err(ScreenerError::Configuration(format!(
                "account_balance must be positive, got {}",
                account_balance
            )));
        }
        if !in_unit_interval(loss_tolerance) {
            return Err(ScreenerError::Configuration(format!(
                "loss_tolerance must be in (0, 1], got {}",
                loss_tolerance
            )));
        }
        if !in_unit_interval(profit_capture_fraction) {
            return Err(ScreenerError::Configuration(format!(
                "profit_capture_fraction must be in (0, 1], got {}",
                profit_capture_fraction
            )));
        }

        let max_loss_per_trade = account_balance
            .checked_mul(loss_tolerance)
            .ok_or_else(|| ScreenerError::Configuration("account_balance is too large".to_string()))?;

        Ok(Self {
            account_balance,
            loss_tolerance,
            profit_capture_fraction,
            max_loss_per_trade,
        })
    }

    pub fn account_balance(&self) -> Decimal {
        self.account_balance
    }

    pub fn loss_tolerance(&self) -> Decimal {
        self.loss_tolerance
    }

    pub fn profit_capture_fraction(&self) -> Decimal {
        self.profit_capture_fraction
    }

    /// Largest loss a single trade may take: balance * tolerance
    pub fn max_loss_per_trade(&self) -> Decimal {
        self.max_loss_per_trade
    }
}

fn in_unit_interval(value: Decimal) -> bool {
    value > Decimal::ZERO && value <= Decimal::ONE
}

/// Sized trade plan for one candidate
///
/// Prices and profit are rounded to cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionPlan {
    pub side: Side,
    pub entry_price: Decimal,
    pub stop_loss_price: Decimal,
    pub take_profit_price: Decimal,
    pub shares: u64,
    pub projected_profit: Decimal,
}

/// Errors raised while sizing a single candidate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalculationError {
    /// The inputs cannot describe a real gap
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Intermediate value left the representable decimal range
    #[error("arithmetic overflow while computing {0}")]
    Overflow(&'static str),
}
