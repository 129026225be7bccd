//! CLI interface for invsio-risk
//!
//! Provides subcommands for:
//! - `calculate`: Size a position from command-line inputs
//! - `plan`: Size a position from a TOML trade plan
//! - `journal`: List saved trades
//! - `config`: Show the effective configuration

mod calculate;
mod journal;
mod output;
mod plan;

pub use calculate::{CalculateArgs, ScaleInArg, SideArg, TargetArg};
pub use journal::JournalArgs;
pub use output::{render_table, OutputArgs, OutputFormat};
pub use plan::{PlanArgs, PlanFile};

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "invsio-risk")]
#[command(about = "1R position sizing and profit planning for crypto trades")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Size a position from command-line inputs
    Calculate(CalculateArgs),
    /// Size a position from a TOML trade plan
    Plan(PlanArgs),
    /// List saved trades
    Journal(JournalArgs),
    /// Show the effective configuration
    Config,
}
