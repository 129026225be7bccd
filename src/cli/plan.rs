//! Plan command implementation
//!
//! Runs the calculator on a trade plan stored as TOML.

use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::output::{run_calculation, OutputArgs};
use crate::config::Config;
use crate::risk::{PriceInput, RiskInputs, ScaleInSpec, Side, TargetSpec};

/// A trade plan file; omitted fields fall back to configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PlanFile {
    pub symbol: Option<String>,
    pub equity: Option<Decimal>,
    pub risk_percent: Option<Decimal>,
    pub side: Side,
    pub entry_price: Decimal,
    pub price: PriceInput,
    pub quantity_step: Option<Decimal>,
    pub price_tick: Option<Decimal>,
    pub min_notional: Option<Decimal>,
    pub targets: Option<Vec<TargetSpec>>,
    pub scale_in: Option<ScaleInSpec>,
}

impl PlanFile {
    /// Load a plan from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let plan: PlanFile = toml::from_str(&content)?;
        Ok(plan)
    }

    /// Resolve into calculator inputs
    pub fn into_inputs(self, config: &Config) -> RiskInputs {
        let calc = &config.calculator;
        RiskInputs {
            equity: self.equity.unwrap_or(config.account.initial_equity),
            risk_percent: self.risk_percent.unwrap_or(calc.default_risk_percent),
            side: self.side,
            entry_price: self.entry_price,
            price: self.price,
            quantity_step: self.quantity_step.unwrap_or(calc.quantity_step),
            price_tick: self.price_tick.unwrap_or(calc.price_tick),
            min_notional: self.min_notional.unwrap_or(calc.min_notional),
            targets: self.targets.unwrap_or_else(|| calc.targets.clone()),
            scale_in: self.scale_in.or(calc.scale_in),
        }
    }
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Path to the trade plan (TOML)
    pub file: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl PlanArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let plan = PlanFile::load(&self.file)
            .map_err(|e| anyhow::anyhow!("Could not load plan {}: {}", self.file.display(), e))?;
        let symbol = plan.symbol.clone();
        let inputs = plan.into_inputs(config);

        tracing::info!(file = %self.file.display(), mode = inputs.price.mode_name(), "Running plan");
        run_calculation(&inputs, symbol.as_deref(), &self.output, config).await
    }
}
