//! Calculate command implementation

use clap::{ArgGroup, Args, ValueEnum};
use rust_decimal::Decimal;
use std::str::FromStr;

use super::output::{run_calculation, OutputArgs};
use crate::config::Config;
use crate::risk::{PriceInput, RiskInputs, ScaleInSpec, Side, TargetSpec};

/// Position side
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SideArg {
    Long,
    Short,
}

impl From<SideArg> for Side {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::Long => Side::Long,
            SideArg::Short => Side::Short,
        }
    }
}

/// `R:ALLOC` pair, e.g. `2:0.5`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetArg(pub TargetSpec);

impl FromStr for TargetArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (r, alloc) = parse_pair(s, "R:ALLOC")?;
        Ok(TargetArg(TargetSpec::new(r, alloc)))
    }
}

/// `TRIGGER:FRACTION` pair, e.g. `2:0.5`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleInArg(pub ScaleInSpec);

impl FromStr for ScaleInArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (trigger, fraction) = parse_pair(s, "TRIGGER:FRACTION")?;
        Ok(ScaleInArg(ScaleInSpec {
            enabled: true,
            trigger_r_multiple: trigger,
            additional_fraction: fraction,
        }))
    }
}

fn parse_pair(s: &str, shape: &str) -> Result<(Decimal, Decimal), String> {
    let (left, right) = s
        .split_once(':')
        .ok_or_else(|| format!("expected {shape}, got '{s}'"))?;
    let left = Decimal::from_str(left.trim()).map_err(|e| format!("'{left}': {e}"))?;
    let right = Decimal::from_str(right.trim()).map_err(|e| format!("'{right}': {e}"))?;
    Ok((left, right))
}

#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("stop_input")
        .required(true)
        .args(["stop", "stop_pct", "notional"])
))]
pub struct CalculateArgs {
    /// Account equity in USD (defaults to account.initial_equity)
    #[arg(long)]
    pub equity: Option<Decimal>,

    /// Risk per trade in percent, e.g. 1 for 1% (defaults to calculator.default_risk_percent)
    #[arg(long)]
    pub risk_pct: Option<Decimal>,

    /// Position side
    #[arg(long, value_enum, default_value_t = SideArg::Long)]
    pub side: SideArg,

    /// Entry price
    #[arg(long)]
    pub entry: Decimal,

    /// Stop price
    #[arg(long)]
    pub stop: Option<Decimal>,

    /// Stop distance in percent of entry, e.g. 2 for 2%
    #[arg(long)]
    pub stop_pct: Option<Decimal>,

    /// Notional exposure in USD
    #[arg(long)]
    pub notional: Option<Decimal>,

    /// Take-profit target as R:ALLOC; repeat for several (defaults to calculator.targets)
    #[arg(long = "target", value_name = "R:ALLOC")]
    pub targets: Vec<TargetArg>,

    /// Scale-in as TRIGGER:FRACTION (defaults to calculator.scale_in)
    #[arg(long, value_name = "TRIGGER:FRACTION")]
    pub scale_in: Option<ScaleInArg>,

    /// Symbol recorded with a saved trade
    #[arg(long)]
    pub symbol: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl CalculateArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let inputs = self.to_inputs(config)?;
        tracing::debug!(?inputs, "Calculating position");
        run_calculation(&inputs, self.symbol.as_deref(), &self.output, config).await
    }

    /// Build calculator inputs, falling back to configured defaults
    pub fn to_inputs(&self, config: &Config) -> anyhow::Result<RiskInputs> {
        let calc = &config.calculator;

        let price = match (self.stop, self.stop_pct, self.notional) {
            (Some(stop_price), None, None) => PriceInput::EntryStop { stop_price },
            (None, Some(pct), None) => PriceInput::EntryStopPercent {
                stop_percent: pct / Decimal::ONE_HUNDRED,
            },
            (None, None, Some(notional_usd)) => PriceInput::EntryNotional { notional_usd },
            _ => anyhow::bail!("exactly one of --stop, --stop-pct or --notional is required"),
        };

        let risk_percent = self
            .risk_pct
            .map(|pct| pct / Decimal::ONE_HUNDRED)
            .unwrap_or(calc.default_risk_percent);

        let targets = if self.targets.is_empty() {
            calc.targets.clone()
        } else {
            self.targets.iter().map(|t| t.0).collect()
        };

        Ok(RiskInputs {
            equity: self.equity.unwrap_or(config.account.initial_equity),
            risk_percent,
            side: self.side.into(),
            entry_price: self.entry,
            price,
            quantity_step: calc.quantity_step,
            price_tick: calc.price_tick,
            min_notional: calc.min_notional,
            targets,
            scale_in: self.scale_in.map(|s| s.0).or(calc.scale_in),
        })
    }
}
