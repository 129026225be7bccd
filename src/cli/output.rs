//! Shared output handling for calculator commands

use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use std::fmt::Write;

use crate::config::Config;
use crate::journal::{JsonlTradeStore, TradeRecord, TradeStore};
use crate::risk::{calculate, Calculation, CalculationOutcome, RiskInputs, ValidationError};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Append the trade to the journal
    #[arg(long)]
    pub save: bool,

    /// Price the entry fee at the maker rate (resting limit entry)
    #[arg(long)]
    pub maker_entry: bool,
}

/// Calculate, print, and optionally journal the trade
pub async fn run_calculation(
    inputs: &RiskInputs,
    symbol: Option<&str>,
    output: &OutputArgs,
    config: &Config,
) -> anyhow::Result<()> {
    let calc = match calculate(inputs) {
        Ok(calc) => calc,
        Err(e) => {
            tracing::warn!(error = %e, "Calculation rejected");
            if output.format == OutputFormat::Json {
                let outcome = CalculationOutcome::from(Err::<Calculation, _>(e.clone()));
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            }
            return Err(e.into());
        }
    };

    match output.format {
        OutputFormat::Table => print!("{}", render_table(inputs, &calc)),
        OutputFormat::Json => {
            let outcome = CalculationOutcome::from(Ok::<_, ValidationError>(calc.clone()));
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
    }

    if output.save {
        let fees = config.account.fee_schedule(output.maker_entry);
        let mut record = TradeRecord::from_result(inputs, &calc.result, &fees);
        if let Some(symbol) = symbol {
            record = record.with_symbol(symbol);
        }
        let store = JsonlTradeStore::new(config.journal.path.clone());
        store.save(&record).await?;
        eprintln!("Saved trade {} to {}", record.id, store.path().display());
    }

    Ok(())
}

fn show(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Human-readable report of a calculation
pub fn render_table(inputs: &RiskInputs, calc: &Calculation) -> String {
    let r = &calc.result;
    let mut out = String::new();

    let _ = writeln!(out, "Position ({} / {})", inputs.side, inputs.price.mode_name());
    let _ = writeln!(out, "  1R risk:        {} USD", show(r.one_r_usd));
    let _ = writeln!(out, "  Entry:          {}", show(inputs.entry_price));
    let _ = writeln!(out, "  Stop:           {}", show(r.stop_price));
    let _ = writeln!(out, "  Stop distance:  {}", show(r.stop_distance));
    if let Some(implied) = r.implied_stop_percent {
        let _ = writeln!(
            out,
            "  Implied stop:   {}%",
            show((implied * Decimal::ONE_HUNDRED).round_dp(4))
        );
    }
    let _ = writeln!(out, "  Quantity:       {}", show(r.quantity));
    let _ = writeln!(out, "  Notional:       {} USD", show(r.notional_usd));

    if !r.targets.is_empty() {
        let _ = writeln!(out, "Targets");
        let _ = writeln!(
            out,
            "  {:>6}  {:>14}  {:>14}  {:>12}  {:>14}",
            "R", "Price", "Close qty", "PnL USD", "Remaining"
        );
        for t in &r.targets {
            let _ = writeln!(
                out,
                "  {:>6}  {:>14}  {:>14}  {:>12}  {:>14}",
                show(t.r_multiple),
                show(t.price),
                show(t.partial_quantity.round_dp(8)),
                show(t.partial_pnl_usd),
                show(t.remaining_after.round_dp(8)),
            );
        }
    }

    let _ = writeln!(out, "  Planned PnL:    {} USD", show(r.planned_total_pnl_usd));
    let _ = writeln!(out, "  Risk:reward:    {}", show(r.risk_reward_ratio.round_dp(2)));

    if r.scale_in.enabled {
        let _ = writeln!(out, "Scale-in: {}", r.scale_in.note);
        if let (Some(qty), Some(notional)) =
            (r.scale_in.new_quantity_if_applied, r.scale_in.new_notional)
        {
            let _ = writeln!(out, "  New quantity:   {}", show(qty));
            let _ = writeln!(out, "  New notional:   {} USD", show(notional));
        }
    }

    for warning in &calc.warnings {
        let _ = writeln!(out, "Warning: {}", warning);
    }

    out
}
