//! invsio-risk: position sizing and profit planning for crypto trades
//!
//! This library provides:
//! - 1R position sizing from an entry plus a stop price, stop percent or notional
//! - Multi-target partial-close plans and scale-in checks
//! - Trade journal records and a JSON-lines journal store
//! - TOML configuration and structured logging for the CLI

pub mod cli;
pub mod config;
pub mod journal;
pub mod risk;
pub mod telemetry;
