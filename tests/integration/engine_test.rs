//! Integration tests for the position risk engine

use invsio_risk::risk::{
    calculate, CalculationOutcome, PositionRiskEngine, PriceInput, RiskInputs, Side, SoftWarning,
    ValidationError,
};
use rust_decimal_macros::dec;

#[test]
fn test_basic_long_entry_stop() {
    let inputs = RiskInputs::new(
        dec!(10000),
        dec!(0.01),
        Side::Long,
        dec!(100000),
        PriceInput::EntryStop {
            stop_price: dec!(98000),
        },
    )
    .with_target(dec!(2), dec!(1.0));

    let calc = calculate(&inputs).unwrap();
    let result = &calc.result;

    assert_eq!(result.one_r_usd, dec!(100));
    assert_eq!(result.stop_distance, dec!(2000));
    assert_eq!(result.quantity, dec!(0.05));
    assert_eq!(result.notional_usd, dec!(5000));
    assert_eq!(result.targets[0].price, dec!(104000));
    assert_eq!(result.targets[0].partial_pnl_usd, dec!(200));
    assert_eq!(result.planned_total_pnl_usd, dec!(200));
    assert_eq!(result.risk_reward_ratio, dec!(2.0));
    assert!(calc.warnings.is_empty());
}

#[test]
fn test_short_with_percent_stop() {
    let inputs = RiskInputs::new(
        dec!(5000),
        dec!(0.02),
        Side::Short,
        dec!(50000),
        PriceInput::EntryStopPercent {
            stop_percent: dec!(0.02),
        },
    )
    .with_target(dec!(3), dec!(1));

    let result = calculate(&inputs).unwrap().result;

    assert_eq!(result.one_r_usd, dec!(100));
    assert_eq!(result.stop_price, dec!(51000));
    assert_eq!(result.stop_distance, dec!(1000));
    assert_eq!(result.quantity, dec!(0.1));
    assert_eq!(result.targets[0].price, dec!(47000));
}

#[test]
fn test_zero_computed_quantity() {
    let inputs = RiskInputs::new(
        dec!(10000),
        dec!(0.01),
        Side::Long,
        dec!(100),
        PriceInput::EntryStop {
            stop_price: dec!(100.00001),
        },
    )
    .with_steps(dec!(1000000000), dec!(0.01));

    assert_eq!(calculate(&inputs), Err(ValidationError::ZeroQuantity));

    let outcome = PositionRiskEngine::new().evaluate(&inputs);
    assert!(outcome.result.is_none());
    assert_eq!(outcome.warnings.len(), 1);
    assert!(outcome.warnings[0].starts_with("computed quantity is zero"));
}

#[test]
fn test_out_of_range_sizing_is_rejected() {
    let near_entry_stop = RiskInputs::new(
        dec!(10000),
        dec!(0.01),
        Side::Long,
        dec!(1),
        PriceInput::EntryStop {
            stop_price: dec!(0.9999999999999999999999999999),
        },
    );
    let tiny_entry = RiskInputs::new(
        dec!(10000),
        dec!(0.01),
        Side::Long,
        dec!(0.0000000000000000000001),
        PriceInput::EntryNotional {
            notional_usd: dec!(100000000000),
        },
    );

    let engine = PositionRiskEngine::new();
    for inputs in [near_entry_stop, tiny_entry] {
        assert_eq!(calculate(&inputs), Err(ValidationError::NumericOverflow));

        let outcome = engine.evaluate(&inputs);
        assert!(outcome.result.is_none());
        assert_eq!(
            outcome.warnings,
            vec!["computed values exceed numeric range — adjust parameters.".to_string()]
        );
    }
}

#[test]
fn test_target_rounded_onto_entry_is_flagged() {
    let inputs = RiskInputs::new(
        dec!(10000),
        dec!(0.01),
        Side::Short,
        dec!(100),
        PriceInput::EntryStop {
            stop_price: dec!(100.001),
        },
    )
    .with_target(dec!(1), dec!(0.5))
    .with_target(dec!(20), dec!(1));

    let outcome = PositionRiskEngine::new().evaluate(&inputs);
    let result = outcome.result.unwrap();
    // 100 - 0.001 rounds back to 100; 100 - 0.02 stays below entry
    assert_eq!(result.targets[0].price, dec!(100));
    assert_eq!(result.targets[0].partial_pnl_usd, dec!(0));
    assert_eq!(result.targets[1].price, dec!(99.98));
    assert_eq!(
        outcome.warnings,
        vec!["target R1 rounds to 100, which is not beyond the entry price.".to_string()]
    );
}

#[test]
fn test_scale_in_not_triggered_keeps_targets() {
    let inputs = RiskInputs::new(
        dec!(10000),
        dec!(0.01),
        Side::Long,
        dec!(100000),
        PriceInput::EntryStop {
            stop_price: dec!(98000),
        },
    )
    .with_target(dec!(1), dec!(0.5))
    .with_target(dec!(2), dec!(1))
    .with_scale_in(dec!(3), dec!(0.5));

    let result = calculate(&inputs).unwrap().result;

    assert_eq!(result.targets.len(), 2);
    assert_eq!(result.targets[0].price, dec!(102000));
    assert_eq!(result.targets[1].price, dec!(104000));
    assert_eq!(result.scale_in.allowed, Some(false));
    assert!(result
        .scale_in
        .note
        .starts_with("scale-in activates only once target R3"));
}

#[test]
fn test_validation_order_and_messages() {
    let engine = PositionRiskEngine::new();
    let base = RiskInputs::new(
        dec!(10000),
        dec!(0.01),
        Side::Long,
        dec!(100),
        PriceInput::EntryStop {
            stop_price: dec!(95),
        },
    );

    let mut inputs = base.clone();
    inputs.risk_percent = dec!(0.5);
    inputs.entry_price = dec!(-1);
    let outcome = engine.evaluate(&inputs);
    assert_eq!(
        outcome.warnings,
        vec!["risk percent must be between 0.5% and 10%.".to_string()]
    );

    let mut inputs = base.clone();
    inputs.price = PriceInput::EntryStop {
        stop_price: dec!(100),
    };
    assert_eq!(
        engine.evaluate(&inputs).warnings,
        vec!["entry and stop price cannot be equal.".to_string()]
    );

    let mut inputs = base.clone();
    inputs.price = PriceInput::EntryStopPercent {
        stop_percent: dec!(0.25),
    };
    assert_eq!(
        engine.evaluate(&inputs).warnings,
        vec!["stop percent must be between 0.1% and 20%.".to_string()]
    );

    let mut inputs = base;
    inputs.price = PriceInput::EntryNotional {
        notional_usd: dec!(-5),
    };
    assert_eq!(
        engine.evaluate(&inputs).warnings,
        vec!["notional exposure must be positive.".to_string()]
    );
}

#[test]
fn test_min_notional_warning_coexists_with_result() {
    let inputs = RiskInputs::new(
        dec!(200),
        dec!(0.01),
        Side::Long,
        dec!(100),
        PriceInput::EntryStop {
            stop_price: dec!(80),
        },
    );

    let calc = calculate(&inputs).unwrap();
    // 1R = 2, distance 20 -> qty 0.1, notional 10 (above 5)
    assert!(calc.warnings.is_empty());

    let inputs = inputs.with_min_notional(dec!(25));
    let calc = calculate(&inputs).unwrap();
    assert_eq!(
        calc.warnings,
        vec![SoftWarning::BelowMinNotional {
            notional: dec!(10),
            min_notional: dec!(25),
        }]
    );

    let outcome: CalculationOutcome = calculate(&inputs).into();
    assert!(outcome.result.is_some());
    assert_eq!(
        outcome.warnings,
        vec!["notional 10 USD is below the minimum of 25 USD.".to_string()]
    );
}

#[test]
fn test_result_serializes_for_callers() {
    let inputs = RiskInputs::new(
        dec!(10000),
        dec!(0.01),
        Side::Short,
        dec!(2000),
        PriceInput::EntryNotional {
            notional_usd: dec!(4000),
        },
    )
    .with_target(dec!(1), dec!(0.5));

    let outcome = PositionRiskEngine::new().evaluate(&inputs);
    let json = serde_json::to_value(&outcome).unwrap();

    assert!(json["result"]["targets"].is_array());
    assert_eq!(json["result"]["scale_in"]["enabled"], false);
    assert!(json["result"]["implied_stop_percent"].is_string());
    assert!(json["warnings"].as_array().unwrap().is_empty());
}
