//! # Hub Telemetry
//!
//! Structured logging setup shared by every hub component.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hub_telemetry::{TelemetryConfig, init_telemetry};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     let _guard = init_telemetry(&config).expect("Failed to init telemetry");
//!
//!     // Application code here; log output is now being collected
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `HUB_SERVICE_NAME` | `device-hub` | Service name in log output |
//! | `HUB_COMPONENT` | `hub` | Component identifier |
//! | `HUB_LOG_LEVEL` | `info` | Log level filter |
//! | `HUB_JSON_LOGS` | auto | JSON logs (on in containers) |
//! | `HUB_CONSOLE_OUTPUT` | `true` | Console output |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{init_logging, LoggingGuard};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The tracing subscriber could not be installed.
    #[error("Failed to initialize tracing subscriber: {0}")]
    SubscriberInit(String),

    /// The configuration was rejected.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize the telemetry stack.
///
/// Returns a guard that must be held for the lifetime of the application.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let logging_guard = init_logging(config)?;

    Ok(TelemetryGuard {
        _logging: logging_guard,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    _logging: LoggingGuard,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!("Shutting down telemetry...");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = TelemetryConfig::default();
        assert_eq!(config.service_name, "device-hub");
    }
}
