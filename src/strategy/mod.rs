//! Strategy module for screening and sizing gap trades
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    PURE (no I/O)                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Filterer                                                   │
//! │    - Drops candidates whose |gap| is below the threshold    │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  SizeCalculator                                             │
//! │    - Implied prior close from open and gap                  │
//! │    - Stop/target at a fraction of the expected fill         │
//! │    - Shares sized so a stop-out loses max_loss_per_trade    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`Filterer`] / [`GapFilter`]: minimum-gap screen
//! - [`SizeCalculator`] / [`GapFillCalculator`]: position sizing
//! - [`RiskParameters`]: validated, immutable account risk settings
//! - [`PositionPlan`]: sized plan with prices rounded to cents
//!
//! # Example
//!
//! ```
//! use gap_screener::strategy::{GapFillCalculator, RiskParameters, SizeCalculator};
//! use rust_decimal_macros::dec;
//!
//! let params = RiskParameters::new(dec!(10000), dec!(0.02), dec!(0.8)).unwrap();
//! let calculator = GapFillCalculator::new(params);
//!
//! let plan = calculator.calculate(dec!(-0.20), dec!(50)).unwrap();
//! assert_eq!(plan.shares, 20);
//! assert_eq!(plan.take_profit_price, dec!(60.00));
//! ```

mod filter;
mod size_calculator;
mod types;

pub use types::{CalculationError, PositionPlan, RiskParameters, Side};

pub use filter::{Filterer, GapFilter};

pub use size_calculator::{calculate_position, GapFillCalculator, SizeCalculator};
