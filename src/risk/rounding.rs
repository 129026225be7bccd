//! Decimal rounding helpers
//!
//! Dollar amounts round to cents at the point they are computed. Quantity
//! is floored to the lot step so realised risk never exceeds 1R; target
//! prices round to the nearest tick. Exact halves round toward positive
//! infinity, so -1.235 becomes -1.23 and 1.235 becomes 1.24.

use rust_decimal::{Decimal, RoundingStrategy};

/// Half-up strategy for the sign of `value`
fn half_up(value: Decimal) -> RoundingStrategy {
    if value.is_sign_negative() {
        RoundingStrategy::MidpointTowardZero
    } else {
        RoundingStrategy::MidpointAwayFromZero
    }
}

/// Round to 2 decimal places, halves toward positive infinity
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, half_up(value))
}

/// Floor `value` to a multiple of `step`
///
/// A non-positive step leaves the value unchanged. `None` on overflow.
pub fn floor_to_step(value: Decimal, step: Decimal) -> Option<Decimal> {
    if step <= Decimal::ZERO {
        return Some(value);
    }
    let steps = value.checked_div(step)?.floor();
    Some(steps.checked_mul(step)?.normalize())
}

/// Round `value` to the nearest multiple of `tick`
///
/// A non-positive tick leaves the value unchanged. `None` on overflow.
pub fn round_to_tick(value: Decimal, tick: Decimal) -> Option<Decimal> {
    if tick <= Decimal::ZERO {
        return Some(value);
    }
    let ticks = value.checked_div(tick)?;
    let ticks = ticks.round_dp_with_strategy(0, half_up(ticks));
    Some(ticks.checked_mul(tick)?.normalize())
}
