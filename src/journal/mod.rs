//! Trade journal module
//!
//! Maps calculator results onto trade records and persists them

mod record;
mod store;

pub use record::{FeeSchedule, TakeProfitLevel, TradeRecord};
pub use store::JsonlTradeStore;

use async_trait::async_trait;
use thiserror::Error;

/// Journal errors
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("journal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode trade record: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("journal line {line} is not a valid trade record: {source}")]
    Corrupt {
        line: usize,
        source: serde_json::Error,
    },
}

/// Trait for trade persistence backends
#[async_trait]
pub trait TradeStore: Send + Sync {
    /// Persist a trade record
    async fn save(&self, record: &TradeRecord) -> Result<(), JournalError>;
    /// All stored records, oldest first
    async fn list(&self) -> Result<Vec<TradeRecord>, JournalError>;
}
