//! Tracing subscriber setup.
//!
//! Logs are formatted as JSON with consistent fields that log aggregators
//! can parse:
//! - `timestamp`: ISO 8601 timestamp
//! - `level`: Log level (trace, debug, info, warn, error)
//! - `component`: Component identifier (auth, routing, transport, runtime)
//! - `message`: Log message
//! - Additional context fields

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{TelemetryConfig, TelemetryError};

/// Guard that keeps the subscriber installed for the process lifetime.
pub struct LoggingGuard {
    _initialized: bool,
}

/// Install the global tracing subscriber.
pub fn init_logging(config: &TelemetryConfig) -> Result<LoggingGuard, TelemetryError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| TelemetryError::SubscriberInit(e.to_string()))?;

    if config.json_logs {
        // JSON output for containers/production
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);

        if config.console_output {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(json_layer)
                .try_init()
                .map_err(|e| TelemetryError::SubscriberInit(e.to_string()))?;
        } else {
            tracing_subscriber::registry()
                .with(env_filter)
                .try_init()
                .map_err(|e| TelemetryError::SubscriberInit(e.to_string()))?;
        }
    } else {
        // Pretty output for development
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .with_ansi(true);

        if config.console_output {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()
                .map_err(|e| TelemetryError::SubscriberInit(e.to_string()))?;
        } else {
            tracing_subscriber::registry()
                .with(env_filter)
                .try_init()
                .map_err(|e| TelemetryError::SubscriberInit(e.to_string()))?;
        }
    }

    tracing::info!(
        service = %config.full_service_name(),
        log_level = %config.log_level,
        json_logs = config.json_logs,
        "Structured logging initialized"
    );

    Ok(LoggingGuard { _initialized: true })
}

/// Log a session-related event with standard fields.
#[macro_export]
macro_rules! log_session_event {
    ($level:ident, $component:expr, $msg:expr, $session_id:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = $component,
            session_id = %$session_id,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log a device-related event with standard fields.
#[macro_export]
macro_rules! log_device_event {
    ($level:ident, $component:expr, $msg:expr, $device_id:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = $component,
            device_id = %$device_id,
            $($($field)*,)?
            $msg
        )
    };
}

#[cfg(test)]
mod tests {
    // Subscriber installation mutates global state and cannot be exercised
    // from unit tests; covered by the integration test binary. The event
    // macros are exercised here so their expansions stay valid.

    #[test]
    fn test_session_event_macro_expands() {
        crate::log_session_event!(info, "test", "session event", "session-1");
        crate::log_session_event!(warn, "test", "session event", "session-1", attempt = 2);
    }

    #[test]
    fn test_device_event_macro_expands() {
        crate::log_device_event!(debug, "test", "device event", "device-1");
        crate::log_device_event!(info, "test", "device event", "device-1", provisioned = true);
    }
}
