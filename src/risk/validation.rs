//! Input validation
//!
//! Checks run in a fixed order and the first failure wins.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

use super::types::{PriceInput, RiskInputs};

/// Largest accepted risk per trade (10%)
pub const MAX_RISK_PERCENT: Decimal = dec!(0.10);
/// Largest accepted stop distance in percent mode (20%)
pub const MAX_STOP_PERCENT: Decimal = dec!(0.20);

/// Blocking input errors
///
/// The display strings are shown to the trader verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("equity must be positive.")]
    NonPositiveEquity,
    /// Enforced bound is (0, 10%]; the message cites the recommended floor
    #[error("risk percent must be between 0.5% and 10%.")]
    RiskPercentOutOfRange,
    #[error("entry price must be positive.")]
    NonPositiveEntry,
    #[error("stop price must be positive.")]
    NonPositiveStop,
    #[error("entry and stop price cannot be equal.")]
    StopEqualsEntry,
    #[error("stop percent must be between 0.1% and 20%.")]
    StopPercentOutOfRange,
    #[error("notional exposure must be positive.")]
    NonPositiveNotional,
    #[error("computed quantity is zero — adjust parameters.")]
    ZeroQuantity,
    #[error("computed values exceed numeric range — adjust parameters.")]
    NumericOverflow,
}

/// Validate inputs before any arithmetic
///
/// Covers everything except the zero-quantity check, which needs the sized
/// position and is applied by the engine.
pub fn validate(inputs: &RiskInputs) -> Result<(), ValidationError> {
    if inputs.equity <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveEquity);
    }

    if inputs.risk_percent <= Decimal::ZERO || inputs.risk_percent > MAX_RISK_PERCENT {
        return Err(ValidationError::RiskPercentOutOfRange);
    }

    if inputs.entry_price <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveEntry);
    }

    match inputs.price {
        PriceInput::EntryStop { stop_price } => {
            if stop_price <= Decimal::ZERO {
                return Err(ValidationError::NonPositiveStop);
            }
            if stop_price == inputs.entry_price {
                return Err(ValidationError::StopEqualsEntry);
            }
        }
        PriceInput::EntryStopPercent { stop_percent } => {
            if stop_percent <= Decimal::ZERO || stop_percent > MAX_STOP_PERCENT {
                return Err(ValidationError::StopPercentOutOfRange);
            }
        }
        PriceInput::EntryNotional { notional_usd } => {
            if notional_usd <= Decimal::ZERO {
                return Err(ValidationError::NonPositiveNotional);
            }
        }
    }

    Ok(())
}
