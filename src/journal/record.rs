//! Trade journal records

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::risk::{round2, RiskInputs, RiskResult, Side};

/// Fees charged on each leg, as a fraction of notional
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub entry_fee_pct: Decimal,
    pub exit_fee_pct: Decimal,
}

impl FeeSchedule {
    pub fn new(entry_fee_pct: Decimal, exit_fee_pct: Decimal) -> Self {
        Self {
            entry_fee_pct,
            exit_fee_pct,
        }
    }

    /// No fees
    pub fn free() -> Self {
        Self::new(Decimal::ZERO, Decimal::ZERO)
    }

    /// Round-trip fee estimate for a position of the given notional
    pub fn round_trip(&self, notional: Decimal) -> Decimal {
        round2(notional * (self.entry_fee_pct + self.exit_fee_pct))
    }
}

/// A planned take-profit level as stored in the journal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TakeProfitLevel {
    pub r_multiple: Decimal,
    pub price: Decimal,
    pub quantity: Decimal,
}

/// A trade as saved to the journal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    pub direction: Side,
    pub entry_price: Decimal,
    pub stop_loss: Decimal,
    pub quantity: Decimal,
    pub position_size_usd: Decimal,
    /// Dollar value of 1R
    pub risk_amount: Decimal,
    pub risk_reward_ratio: Decimal,
    pub take_profit_levels: Vec<TakeProfitLevel>,
    pub estimated_fees_usd: Decimal,
}

impl TradeRecord {
    /// Map a calculation onto a new journal entry
    pub fn from_result(inputs: &RiskInputs, result: &RiskResult, fees: &FeeSchedule) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            symbol: None,
            direction: inputs.side,
            entry_price: inputs.entry_price,
            stop_loss: result.stop_price,
            quantity: result.quantity,
            position_size_usd: result.notional_usd,
            risk_amount: result.one_r_usd,
            risk_reward_ratio: round2(result.risk_reward_ratio),
            take_profit_levels: result
                .targets
                .iter()
                .map(|t| TakeProfitLevel {
                    r_multiple: t.r_multiple,
                    price: t.price,
                    quantity: t.partial_quantity,
                })
                .collect(),
            estimated_fees_usd: fees.round_trip(result.notional_usd),
        }
    }

    /// Tag the record with a trading symbol
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }
}
