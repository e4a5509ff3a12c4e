use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::strategy::types::{CalculationError, PositionPlan, RiskParameters, Side};

/// Decimal places kept on every monetary output
const MONEY_SCALE: u32 = 2;

/// SizeCalculator trait
///
/// Turns a candidate's gap and opening price into a full position plan.
/// Implementations own their risk parameters and hold no mutable state,
/// so one instance is shared by every task in a run.
pub trait SizeCalculator: Send + Sync {
    /// Size a position for one candidate
    ///
    /// # Arguments
    /// * `gap` - Signed gap fraction (-0.20 for a 20% gap down)
    /// * `opening_price` - Session open, used as the entry price
    fn calculate(
        &self,
        gap: Decimal,
        opening_price: Decimal,
    ) -> Result<PositionPlan, CalculationError>;
}

/// Gap-fill sizing: risk a fixed fraction of the account on a bet that
/// the price reverts part of the way to the prior close.
#[derive(Debug, Clone)]
pub struct GapFillCalculator {
    params: RiskParameters,
}

impl GapFillCalculator {
    pub fn new(params: RiskParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &RiskParameters {
        &self.params
    }
}

impl SizeCalculator for GapFillCalculator {
    fn calculate(
        &self,
        gap: Decimal,
        opening_price: Decimal,
    ) -> Result<PositionPlan, CalculationError> {
        calculate_position(gap, opening_price, &self.params)
    }
}

/// Compute a position plan from a gap, an opening price and risk settings
///
/// ```text
/// prior_close  = open / (1 + gap)
/// capture      = capture_fraction * (prior_close - open)
/// stop_loss    = open - capture
/// take_profit  = open + capture
/// shares       = floor(max_loss / |stop_loss - open|)
/// ```
///
/// Inputs that would divide by zero (`gap <= -1`) or describe a free
/// stock (`open <= 0`) are rejected before any arithmetic. A zero risk
/// per share yields zero shares.
pub fn calculate_position(
    gap: Decimal,
    opening_price: Decimal,
    params: &RiskParameters,
) -> Result<PositionPlan, CalculationError> {
    if opening_price <= Decimal::ZERO {
        return Err(CalculationError::InvalidInput(format!(
            "opening price must be positive, got {}",
            opening_price
        )));
    }

    let growth = Decimal::ONE
        .checked_add(gap)
        .ok_or(CalculationError::Overflow("gap growth factor"))?;
    if growth <= Decimal::ZERO {
        return Err(CalculationError::InvalidInput(format!(
            "gap {} implies a non-positive prior close",
            gap
        )));
    }

    let implied_prior_close = opening_price
        .checked_div(growth)
        .ok_or(CalculationError::Overflow("implied prior close"))?;
    let gap_value = implied_prior_close
        .checked_sub(opening_price)
        .ok_or(CalculationError::Overflow("gap value"))?;
    let capture = params
        .profit_capture_fraction()
        .checked_mul(gap_value)
        .ok_or(CalculationError::Overflow("capture amount"))?;

    let stop_loss = opening_price
        .checked_sub(capture)
        .ok_or(CalculationError::Overflow("stop loss"))?;
    let take_profit = opening_price
        .checked_add(capture)
        .ok_or(CalculationError::Overflow("take profit"))?;

    let risk_per_share = (stop_loss - opening_price).abs();
    let shares = if risk_per_share.is_zero() {
        0
    } else {
        params
            .max_loss_per_trade()
            .checked_div(risk_per_share)
            .and_then(|n| n.floor().to_u64())
            .ok_or(CalculationError::Overflow("share count"))?
    };

    let projected_profit = (opening_price - take_profit)
        .abs()
        .checked_mul(Decimal::from(shares))
        .ok_or(CalculationError::Overflow("projected profit"))?;

    let side = if capture < Decimal::ZERO {
        Side::Sell
    } else {
        Side::Buy
    };

    Ok(PositionPlan {
        side,
        entry_price: round_money(opening_price),
        stop_loss_price: round_money(stop_loss),
        take_profit_price: round_money(take_profit),
        shares,
        projected_profit: round_money(projected_profit),
    })
}

/// Round to cents, halves away from zero
pub(crate) fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}
