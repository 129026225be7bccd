//! Risk module
//!
//! 1R position sizing, multi-target profit plans and scale-in checks

mod engine;
mod rounding;
mod types;
mod validation;

pub use engine::{calculate, validate, PositionRiskEngine};
pub use rounding::{floor_to_step, round2, round_to_tick};
pub use types::{
    Calculation, CalculationOutcome, PriceInput, RiskInputs, RiskResult, ScaleInResult,
    ScaleInSpec, Side, SoftWarning, TargetResult, TargetSpec, DEFAULT_MIN_NOTIONAL,
    DEFAULT_PRICE_TICK, DEFAULT_QUANTITY_STEP,
};
pub use validation::{ValidationError, MAX_RISK_PERCENT, MAX_STOP_PERCENT};
