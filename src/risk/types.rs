//! Risk calculation types
//!
//! Inputs gathered from the trader, and the sized position produced for them.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default lot-size granularity
pub const DEFAULT_QUANTITY_STEP: Decimal = dec!(0.0001);
/// Default price tick for target prices
pub const DEFAULT_PRICE_TICK: Decimal = dec!(0.01);
/// Default minimum position notional in USD
pub const DEFAULT_MIN_NOTIONAL: Decimal = dec!(5);

/// Position direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Profit when price rises
    Long,
    /// Profit when price falls
    Short,
}

impl Side {
    /// Sign of a favourable price move (+1 long, -1 short)
    pub fn direction(&self) -> Decimal {
        match self {
            Side::Long => Decimal::ONE,
            Side::Short => Decimal::NEGATIVE_ONE,
        }
    }

    /// Stop price a given fraction away from entry, on the losing side
    ///
    /// `None` if the result overflows.
    pub fn stop_from_percent(
        &self,
        entry_price: Decimal,
        stop_percent: Decimal,
    ) -> Option<Decimal> {
        let factor = match self {
            Side::Long => Decimal::ONE.checked_sub(stop_percent)?,
            Side::Short => Decimal::ONE.checked_add(stop_percent)?,
        };
        entry_price.checked_mul(factor)
    }

    /// Price change in the profit direction when moving from `entry` to `price`
    pub fn favourable_change(&self, entry: Decimal, price: Decimal) -> Option<Decimal> {
        match self {
            Side::Long => price.checked_sub(entry),
            Side::Short => entry.checked_sub(price),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Long => write!(f, "long"),
            Side::Short => write!(f, "short"),
        }
    }
}

/// How the stop (and therefore the size) is specified
///
/// Only the field belonging to the chosen mode is ever consulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PriceInput {
    /// Explicit stop price
    EntryStop { stop_price: Decimal },
    /// Stop as a fraction of entry (0.02 = 2%)
    EntryStopPercent { stop_percent: Decimal },
    /// Fixed notional exposure; the stop is implied by 1R / notional
    EntryNotional { notional_usd: Decimal },
}

impl PriceInput {
    /// Mode name as used in config and plan files
    pub fn mode_name(&self) -> &'static str {
        match self {
            PriceInput::EntryStop { .. } => "entry_stop",
            PriceInput::EntryStopPercent { .. } => "entry_stop_percent",
            PriceInput::EntryNotional { .. } => "entry_notional",
        }
    }
}

/// A take-profit level expressed in R
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetSpec {
    /// Distance from entry in multiples of the stop distance
    pub r_multiple: Decimal,
    /// Fraction (0-1) of the quantity still open when this target is hit
    pub allocation: Decimal,
}

impl TargetSpec {
    pub fn new(r_multiple: Decimal, allocation: Decimal) -> Self {
        Self {
            r_multiple,
            allocation,
        }
    }
}

/// Scale-in configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleInSpec {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Target R that must be part of the plan before adding
    pub trigger_r_multiple: Decimal,
    /// Size of the add as a fraction of the base quantity
    pub additional_fraction: Decimal,
}

fn default_true() -> bool {
    true
}

/// Inputs for a single position-size calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskInputs {
    /// Account equity in quote currency
    pub equity: Decimal,
    /// Fraction of equity risked (0.01 = 1%)
    pub risk_percent: Decimal,
    pub side: Side,
    pub entry_price: Decimal,
    pub price: PriceInput,
    #[serde(default = "default_quantity_step")]
    pub quantity_step: Decimal,
    #[serde(default = "default_price_tick")]
    pub price_tick: Decimal,
    #[serde(default = "default_min_notional")]
    pub min_notional: Decimal,
    #[serde(default)]
    pub targets: Vec<TargetSpec>,
    #[serde(default)]
    pub scale_in: Option<ScaleInSpec>,
}

fn default_quantity_step() -> Decimal {
    DEFAULT_QUANTITY_STEP
}
fn default_price_tick() -> Decimal {
    DEFAULT_PRICE_TICK
}
fn default_min_notional() -> Decimal {
    DEFAULT_MIN_NOTIONAL
}

impl RiskInputs {
    /// Create inputs with default step, tick and minimum notional and no targets
    pub fn new(
        equity: Decimal,
        risk_percent: Decimal,
        side: Side,
        entry_price: Decimal,
        price: PriceInput,
    ) -> Self {
        Self {
            equity,
            risk_percent,
            side,
            entry_price,
            price,
            quantity_step: DEFAULT_QUANTITY_STEP,
            price_tick: DEFAULT_PRICE_TICK,
            min_notional: DEFAULT_MIN_NOTIONAL,
            targets: vec![],
            scale_in: None,
        }
    }

    /// Append a take-profit target
    pub fn with_target(mut self, r_multiple: Decimal, allocation: Decimal) -> Self {
        self.targets.push(TargetSpec::new(r_multiple, allocation));
        self
    }

    /// Enable scale-in planning
    pub fn with_scale_in(mut self, trigger_r_multiple: Decimal, additional_fraction: Decimal) -> Self {
        self.scale_in = Some(ScaleInSpec {
            enabled: true,
            trigger_r_multiple,
            additional_fraction,
        });
        self
    }

    /// Override lot size and tick
    pub fn with_steps(mut self, quantity_step: Decimal, price_tick: Decimal) -> Self {
        self.quantity_step = quantity_step;
        self.price_tick = price_tick;
        self
    }

    /// Override the minimum notional
    pub fn with_min_notional(mut self, min_notional: Decimal) -> Self {
        self.min_notional = min_notional;
        self
    }
}

/// One computed take-profit leg
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetResult {
    pub r_multiple: Decimal,
    /// Target price, rounded to the price tick
    pub price: Decimal,
    /// Quantity closed at this target
    pub partial_quantity: Decimal,
    /// Realised PnL of this leg, rounded to cents
    pub partial_pnl_usd: Decimal,
    pub remaining_before: Decimal,
    pub remaining_after: Decimal,
}

/// Outcome of scale-in planning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleInResult {
    pub enabled: bool,
    /// `None` when scale-in is disabled
    pub allowed: Option<bool>,
    pub new_quantity_if_applied: Option<Decimal>,
    pub new_notional: Option<Decimal>,
    pub note: String,
}

impl ScaleInResult {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            allowed: None,
            new_quantity_if_applied: None,
            new_notional: None,
            note: String::new(),
        }
    }
}

/// A sized position with its profit plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskResult {
    /// Dollar risk of one R
    pub one_r_usd: Decimal,
    pub quantity: Decimal,
    pub notional_usd: Decimal,
    pub stop_price: Decimal,
    pub stop_distance: Decimal,
    /// Stop percent implied by 1R / notional (notional mode only)
    pub implied_stop_percent: Option<Decimal>,
    pub targets: Vec<TargetResult>,
    pub planned_total_pnl_usd: Decimal,
    pub risk_reward_ratio: Decimal,
    pub scale_in: ScaleInResult,
}

/// Condition that does not block a result but deserves attention
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SoftWarning {
    /// Position notional is under the exchange minimum
    BelowMinNotional {
        notional: Decimal,
        min_notional: Decimal,
    },
    /// Tick rounding left a target on or behind the entry price
    TargetNotBeyondEntry { r_multiple: Decimal, price: Decimal },
}

impl fmt::Display for SoftWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoftWarning::BelowMinNotional {
                notional,
                min_notional,
            } => write!(
                f,
                "notional {} USD is below the minimum of {} USD.",
                notional.normalize(),
                min_notional.normalize()
            ),
            SoftWarning::TargetNotBeyondEntry { r_multiple, price } => write!(
                f,
                "target R{} rounds to {}, which is not beyond the entry price.",
                r_multiple.normalize(),
                price.normalize()
            ),
        }
    }
}

/// A successful calculation together with its soft warnings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Calculation {
    pub result: RiskResult,
    pub warnings: Vec<SoftWarning>,
}

/// Flat "result or warnings" shape handed to presentation layers
///
/// `result` is `None` whenever a validation check failed; in that case
/// `warnings` holds exactly that check's message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationOutcome {
    pub result: Option<RiskResult>,
    pub warnings: Vec<String>,
}

impl CalculationOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_some()
    }
}

impl From<Result<Calculation, super::ValidationError>> for CalculationOutcome {
    fn from(outcome: Result<Calculation, super::ValidationError>) -> Self {
        match outcome {
            Ok(calc) => Self {
                result: Some(calc.result),
                warnings: calc.warnings.iter().map(ToString::to_string).collect(),
            },
            Err(e) => Self {
                result: None,
                warnings: vec![e.to_string()],
            },
        }
    }
}
