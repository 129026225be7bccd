//! Position risk engine
//!
//! Sizes a position so that a stop-out costs exactly one R (floored to the
//! lot step), then lays out a multi-target profit plan and an optional
//! scale-in. Pure and stateless: identical inputs give identical results.

use rust_decimal::Decimal;
use tracing::debug;

use super::rounding::{floor_to_step, round2, round_to_tick};
use super::types::{
    Calculation, CalculationOutcome, PriceInput, RiskInputs, RiskResult, ScaleInResult,
    ScaleInSpec, SoftWarning, TargetResult,
};
use super::validation::{self, ValidationError};

/// Stop and size resolved from the price input
#[derive(Debug, Clone, PartialEq)]
struct Sizing {
    stop_price: Decimal,
    stop_distance: Decimal,
    quantity: Decimal,
    notional_usd: Decimal,
    implied_stop_percent: Option<Decimal>,
}

/// Stateless position-size and profit-plan calculator
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionRiskEngine;

impl PositionRiskEngine {
    pub fn new() -> Self {
        Self
    }

    /// Run the input checks without sizing anything
    pub fn validate(&self, inputs: &RiskInputs) -> Result<(), ValidationError> {
        validation::validate(inputs)
    }

    /// Size the position and build its target plan
    pub fn calculate(&self, inputs: &RiskInputs) -> Result<Calculation, ValidationError> {
        calculate(inputs)
    }

    /// Calculate, flattening the outcome to "result or messages"
    pub fn evaluate(&self, inputs: &RiskInputs) -> CalculationOutcome {
        calculate(inputs).into()
    }
}

/// Validate inputs; see [`validation::validate`]
pub fn validate(inputs: &RiskInputs) -> Result<(), ValidationError> {
    validation::validate(inputs)
}

/// Maps a failed checked operation to a calculation error
trait OrOverflow {
    fn or_overflow(self) -> Result<Decimal, ValidationError>;
}

impl OrOverflow for Option<Decimal> {
    fn or_overflow(self) -> Result<Decimal, ValidationError> {
        self.ok_or(ValidationError::NumericOverflow)
    }
}

/// Size a position and build its target and scale-in plan
pub fn calculate(inputs: &RiskInputs) -> Result<Calculation, ValidationError> {
    validation::validate(inputs)?;

    let one_r_usd = round2(inputs.equity.checked_mul(inputs.risk_percent).or_overflow()?);
    let sizing = size_position(inputs, one_r_usd).inspect_err(|_| {
        debug!(mode = inputs.price.mode_name(), "Sizing overflowed");
    })?;

    if sizing.quantity <= Decimal::ZERO {
        debug!(
            mode = inputs.price.mode_name(),
            stop_distance = %sizing.stop_distance,
            "Computed quantity floored to zero"
        );
        return Err(ValidationError::ZeroQuantity);
    }

    let mut warnings = Vec::new();
    if sizing.notional_usd < inputs.min_notional {
        warnings.push(SoftWarning::BelowMinNotional {
            notional: sizing.notional_usd,
            min_notional: inputs.min_notional,
        });
    }

    let targets = plan_targets(inputs, &sizing)?;
    for target in &targets {
        let beyond_entry = inputs
            .side
            .favourable_change(inputs.entry_price, target.price)
            .or_overflow()?
            > Decimal::ZERO;
        if target.r_multiple > Decimal::ZERO && !beyond_entry {
            warnings.push(SoftWarning::TargetNotBeyondEntry {
                r_multiple: target.r_multiple,
                price: target.price,
            });
        }
    }

    let planned_total_pnl_usd = targets
        .iter()
        .try_fold(Decimal::ZERO, |acc, t| acc.checked_add(t.partial_pnl_usd))
        .or_overflow()?;

    let risk_reward_ratio = if one_r_usd > Decimal::ZERO {
        planned_total_pnl_usd.checked_div(one_r_usd).or_overflow()?
    } else {
        Decimal::ZERO
    };

    let scale_in = match inputs.scale_in {
        Some(spec) if spec.enabled => plan_scale_in(inputs, &spec, sizing.quantity)?,
        _ => ScaleInResult::disabled(),
    };

    debug!(
        side = %inputs.side,
        mode = inputs.price.mode_name(),
        one_r = %one_r_usd,
        quantity = %sizing.quantity,
        notional = %sizing.notional_usd,
        stop = %sizing.stop_price,
        planned_pnl = %planned_total_pnl_usd,
        "Position sized"
    );

    Ok(Calculation {
        result: RiskResult {
            one_r_usd,
            quantity: sizing.quantity,
            notional_usd: sizing.notional_usd,
            stop_price: sizing.stop_price,
            stop_distance: sizing.stop_distance,
            implied_stop_percent: sizing.implied_stop_percent,
            targets,
            planned_total_pnl_usd,
            risk_reward_ratio,
            scale_in,
        },
        warnings,
    })
}

fn size_position(inputs: &RiskInputs, one_r_usd: Decimal) -> Result<Sizing, ValidationError> {
    let entry = inputs.entry_price;

    match inputs.price {
        PriceInput::EntryStop { stop_price } => size_from_stop(inputs, one_r_usd, stop_price),
        PriceInput::EntryStopPercent { stop_percent } => {
            let stop_price = inputs
                .side
                .stop_from_percent(entry, stop_percent)
                .or_overflow()?;
            size_from_stop(inputs, one_r_usd, stop_price)
        }
        PriceInput::EntryNotional { notional_usd } => {
            // Quantity is a straight division here, not floored to the lot step
            let quantity = notional_usd.checked_div(entry).or_overflow()?;
            let implied = one_r_usd.checked_div(notional_usd).or_overflow()?;
            let stop_price = inputs.side.stop_from_percent(entry, implied).or_overflow()?;
            Ok(Sizing {
                stop_price,
                stop_distance: entry.checked_sub(stop_price).or_overflow()?.abs(),
                quantity,
                notional_usd: round2(notional_usd),
                implied_stop_percent: Some(implied),
            })
        }
    }
}

fn size_from_stop(
    inputs: &RiskInputs,
    one_r_usd: Decimal,
    stop_price: Decimal,
) -> Result<Sizing, ValidationError> {
    let stop_distance = inputs.entry_price.checked_sub(stop_price).or_overflow()?.abs();
    let raw_quantity = one_r_usd.checked_div(stop_distance).or_overflow()?;
    let quantity = floor_to_step(raw_quantity, inputs.quantity_step).or_overflow()?;
    let notional = quantity.checked_mul(inputs.entry_price).or_overflow()?;

    Ok(Sizing {
        stop_price,
        stop_distance,
        quantity,
        notional_usd: round2(notional),
        implied_stop_percent: None,
    })
}

/// Each target closes a fraction of whatever is still open
fn plan_targets(
    inputs: &RiskInputs,
    sizing: &Sizing,
) -> Result<Vec<TargetResult>, ValidationError> {
    let entry = inputs.entry_price;
    let direction = inputs.side.direction();
    let mut remaining = sizing.quantity;

    inputs
        .targets
        .iter()
        .map(|target| {
            let partial_quantity = remaining.checked_mul(target.allocation).or_overflow()?;
            let offset = target
                .r_multiple
                .checked_mul(sizing.stop_distance)
                .or_overflow()?
                * direction;
            let raw_price = entry.checked_add(offset).or_overflow()?;
            let price = round_to_tick(raw_price, inputs.price_tick).or_overflow()?;
            let price_change = inputs.side.favourable_change(entry, price).or_overflow()?;
            let pnl = partial_quantity.checked_mul(price_change).or_overflow()?;

            let remaining_before = remaining;
            remaining = remaining.checked_sub(partial_quantity).or_overflow()?;

            Ok(TargetResult {
                r_multiple: target.r_multiple,
                price,
                partial_quantity,
                partial_pnl_usd: round2(pnl),
                remaining_before,
                remaining_after: remaining,
            })
        })
        .collect()
}

fn plan_scale_in(
    inputs: &RiskInputs,
    spec: &ScaleInSpec,
    quantity: Decimal,
) -> Result<ScaleInResult, ValidationError> {
    let trigger = spec.trigger_r_multiple;
    let trigger_reached = inputs.targets.iter().any(|t| t.r_multiple >= trigger);

    if !trigger_reached {
        return Ok(ScaleInResult {
            enabled: true,
            allowed: Some(false),
            new_quantity_if_applied: None,
            new_notional: None,
            note: format!(
                "scale-in activates only once target R{} is reached.",
                trigger.normalize()
            ),
        });
    }

    let added = quantity.checked_mul(spec.additional_fraction).or_overflow()?;
    let new_quantity = quantity.checked_add(added).or_overflow()?;
    let new_notional = new_quantity.checked_mul(inputs.entry_price).or_overflow()?;
    Ok(ScaleInResult {
        enabled: true,
        allowed: Some(true),
        new_quantity_if_applied: Some(new_quantity),
        new_notional: Some(round2(new_notional)),
        note: format!("scale-in approved at R{}.", trigger.normalize()),
    })
}
