//! Journal command implementation

use clap::Args;

use super::output::OutputFormat;
use crate::config::Config;
use crate::journal::{JsonlTradeStore, TradeRecord, TradeStore};

#[derive(Args, Debug)]
pub struct JournalArgs {
    /// Show only the most recent N trades
    #[arg(long)]
    pub last: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl JournalArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let store = JsonlTradeStore::new(config.journal.path.clone());
        let mut records = store.list().await?;

        if let Some(last) = self.last {
            let skip = records.len().saturating_sub(last);
            records.drain(..skip);
        }

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
            OutputFormat::Table => {
                if records.is_empty() {
                    println!("No trades in {}", store.path().display());
                }
                for record in &records {
                    println!("{}", summary_line(record));
                }
            }
        }
        Ok(())
    }
}

/// One-line summary of a saved trade
pub fn summary_line(record: &TradeRecord) -> String {
    format!(
        "{}  {:<10} {:<5} entry {} stop {} qty {} risk {} USD R:R {}",
        record.created_at.format("%Y-%m-%d %H:%M"),
        record.symbol.as_deref().unwrap_or("-"),
        record.direction,
        record.entry_price.normalize(),
        record.stop_loss.normalize(),
        record.quantity.normalize(),
        record.risk_amount.normalize(),
        record.risk_reward_ratio.normalize(),
    )
}
