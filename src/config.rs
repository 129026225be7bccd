//! Configuration types for invsio-risk

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::journal::FeeSchedule;
use crate::risk::{ScaleInSpec, TargetSpec};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub account: AccountConfig,
    #[serde(default)]
    pub calculator: CalculatorConfig,
    #[serde(default)]
    pub journal: JournalConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Account settings used to pre-populate calculations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Starting equity in USD
    #[serde(default = "default_initial_equity")]
    pub initial_equity: Decimal,

    /// Maker fee as a fraction of notional
    #[serde(default = "default_maker_fee_pct")]
    pub maker_fee_pct: Decimal,

    /// Taker fee as a fraction of notional
    #[serde(default = "default_taker_fee_pct")]
    pub taker_fee_pct: Decimal,
}

fn default_initial_equity() -> Decimal {
    Decimal::new(10_000, 0)
}
fn default_maker_fee_pct() -> Decimal {
    Decimal::new(2, 4) // 0.0002 = 0.02%
}
fn default_taker_fee_pct() -> Decimal {
    Decimal::new(5, 4) // 0.0005 = 0.05%
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            initial_equity: default_initial_equity(),
            maker_fee_pct: default_maker_fee_pct(),
            taker_fee_pct: default_taker_fee_pct(),
        }
    }
}

impl AccountConfig {
    /// Fee schedule for a trade that exits at market
    ///
    /// The entry leg pays the maker rate when it rests as a limit order.
    pub fn fee_schedule(&self, maker_entry: bool) -> FeeSchedule {
        let entry = if maker_entry {
            self.maker_fee_pct
        } else {
            self.taker_fee_pct
        };
        FeeSchedule::new(entry, self.taker_fee_pct)
    }
}

/// Calculator defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Lot-size granularity
    #[serde(default = "default_quantity_step")]
    pub quantity_step: Decimal,

    /// Price tick for target prices
    #[serde(default = "default_price_tick")]
    pub price_tick: Decimal,

    /// Minimum position notional before a warning is raised
    #[serde(default = "default_min_notional")]
    pub min_notional: Decimal,

    /// Risk per trade when none is given (0.01 = 1%)
    #[serde(default = "default_risk_percent")]
    pub default_risk_percent: Decimal,

    /// Targets used when none are given
    #[serde(default = "default_targets")]
    pub targets: Vec<TargetSpec>,

    /// Scale-in used when none is given
    #[serde(default)]
    pub scale_in: Option<ScaleInSpec>,
}

fn default_quantity_step() -> Decimal {
    crate::risk::DEFAULT_QUANTITY_STEP
}
fn default_price_tick() -> Decimal {
    crate::risk::DEFAULT_PRICE_TICK
}
fn default_min_notional() -> Decimal {
    crate::risk::DEFAULT_MIN_NOTIONAL
}
fn default_risk_percent() -> Decimal {
    Decimal::new(1, 2) // 0.01 = 1%
}
fn default_targets() -> Vec<TargetSpec> {
    vec![
        TargetSpec::new(Decimal::ONE, Decimal::new(5, 1)),
        TargetSpec::new(Decimal::TWO, Decimal::ONE),
    ]
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            quantity_step: default_quantity_step(),
            price_tick: default_price_tick(),
            min_notional: default_min_notional(),
            default_risk_percent: default_risk_percent(),
            targets: default_targets(),
            scale_in: None,
        }
    }
}

/// Trade journal configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalConfig {
    /// JSON-lines file trades are appended to
    #[serde(default = "default_journal_path")]
    pub path: PathBuf,
}

fn default_journal_path() -> PathBuf {
    PathBuf::from("./journal/trades.jsonl")
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            path: default_journal_path(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format
    #[default]
    Pretty,
    /// JSON format for log aggregation
    Json,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
