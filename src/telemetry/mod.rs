//! Telemetry module
//!
//! Structured logging for the CLI

mod logging;

pub use logging::init_logging;

use crate::config::TelemetryConfig;

/// Initialize logging from configuration
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<()> {
    init_logging(&config.log_level, config.format)
}
