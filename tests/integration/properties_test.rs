//! Invariants that hold across many calculator inputs

use invsio_risk::risk::{calculate, Calculation, PriceInput, RiskInputs, Side};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// A spread of accounts, entries and stops in both directions
fn scenarios() -> Vec<RiskInputs> {
    let mut out = Vec::new();
    let accounts = [
        (dec!(10000), dec!(0.01)),
        (dec!(2500), dec!(0.005)),
        (dec!(123456.78), dec!(0.1)),
    ];
    let entries = [dec!(0.5432), dec!(27.31), dec!(3150.5), dec!(98765.43)];
    let stop_pcts = [dec!(0.003), dec!(0.0175), dec!(0.2)];

    for (equity, risk) in accounts {
        for entry in entries {
            for pct in stop_pcts {
                for side in [Side::Long, Side::Short] {
                    let targets = [
                        (dec!(1), dec!(0.3)),
                        (dec!(2.5), dec!(0.5)),
                        (dec!(4), dec!(1)),
                    ];
                    let mut by_percent = RiskInputs::new(
                        equity,
                        risk,
                        side,
                        entry,
                        PriceInput::EntryStopPercent { stop_percent: pct },
                    )
                    .with_steps(dec!(0.0001), dec!(0.0001));
                    for (r, alloc) in targets {
                        by_percent = by_percent.with_target(r, alloc);
                    }

                    let mut by_stop = by_percent.clone();
                    by_stop.price = PriceInput::EntryStop {
                        stop_price: side.stop_from_percent(entry, pct).unwrap(),
                    };

                    out.push(by_percent);
                    out.push(by_stop);
                }
            }
        }
    }
    out
}

/// Every generated scenario is valid and sizes to a non-zero quantity
fn sized(inputs: &RiskInputs) -> Calculation {
    calculate(inputs).unwrap_or_else(|e| panic!("{e}: {inputs:?}"))
}

#[test]
fn test_quantity_never_exceeds_one_r() {
    for inputs in scenarios() {
        let calc = sized(&inputs);
        let r = calc.result;
        assert!(r.quantity * r.stop_distance <= r.one_r_usd, "{inputs:?}");
        assert!(r.quantity >= Decimal::ZERO);
        assert_eq!(r.quantity % inputs.quantity_step, Decimal::ZERO, "{inputs:?}");
    }
}

#[test]
fn test_targets_move_in_profit_direction() {
    for inputs in scenarios() {
        let calc = sized(&inputs);
        for target in &calc.result.targets {
            match inputs.side {
                Side::Long => assert!(target.price > inputs.entry_price, "{inputs:?}"),
                Side::Short => assert!(target.price < inputs.entry_price, "{inputs:?}"),
            }
        }
    }
}

#[test]
fn test_remaining_quantity_is_chained_and_non_increasing() {
    for inputs in scenarios() {
        let calc = sized(&inputs);
        let targets = &calc.result.targets;
        assert_eq!(targets[0].remaining_before, calc.result.quantity);
        for t in targets {
            assert!(t.remaining_after <= t.remaining_before);
        }
        for pair in targets.windows(2) {
            assert_eq!(pair[0].remaining_after, pair[1].remaining_before);
        }
    }
}

#[test]
fn test_planned_pnl_is_sum_of_legs() {
    for inputs in scenarios() {
        let calc = sized(&inputs);
        let r = calc.result;
        let sum: Decimal = r.targets.iter().map(|t| t.partial_pnl_usd).sum();
        assert_eq!(r.planned_total_pnl_usd, sum);
        assert_eq!(r.risk_reward_ratio, sum / r.one_r_usd);
    }
}

#[test]
fn test_notional_implied_stop_round_trips_through_percent_mode() {
    let cases = [
        (Side::Long, dec!(100000), dec!(5000)),
        (Side::Short, dec!(3150.5), dec!(2500)),
        (Side::Long, dec!(27.31), dec!(800)),
    ];

    for (side, entry, notional) in cases {
        let notional_inputs = RiskInputs::new(
            dec!(10000),
            dec!(0.01),
            side,
            entry,
            PriceInput::EntryNotional {
                notional_usd: notional,
            },
        );
        let from_notional = calculate(&notional_inputs).unwrap().result;
        let implied = from_notional.implied_stop_percent.unwrap();

        let mut percent_inputs = notional_inputs.clone();
        percent_inputs.price = PriceInput::EntryStopPercent {
            stop_percent: implied,
        };
        let from_percent = calculate(&percent_inputs).unwrap().result;

        let diff = (from_notional.stop_price - from_percent.stop_price).abs();
        assert!(diff <= dec!(0.00000001), "{side:?} {entry} {notional}");
    }
}

#[test]
fn test_calculation_is_idempotent() {
    for inputs in scenarios().into_iter().take(20) {
        assert_eq!(calculate(&inputs), calculate(&inputs));
    }
}

#[test]
fn test_risk_and_stop_percent_boundaries() {
    let at_limit = RiskInputs::new(
        dec!(10000),
        dec!(0.10),
        Side::Long,
        dec!(100),
        PriceInput::EntryStopPercent {
            stop_percent: dec!(0.20),
        },
    );
    assert!(calculate(&at_limit).is_ok());

    let mut over_risk = at_limit.clone();
    over_risk.risk_percent = dec!(0.1001);
    assert!(calculate(&over_risk).is_err());

    let mut over_stop = at_limit;
    over_stop.price = PriceInput::EntryStopPercent {
        stop_percent: dec!(0.2001),
    };
    assert!(calculate(&over_stop).is_err());
}
