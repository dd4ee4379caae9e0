//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for structured logging.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name reported in log output
    pub service_name: String,

    /// Component identifier (auth, routing, transport, runtime)
    pub component: String,

    /// Log level filter (trace, debug, info, warn, error)
    pub log_level: String,

    /// Whether to enable console output (for development)
    pub console_output: bool,

    /// Whether to enable JSON formatted logs
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "device-hub".to_string(),
            component: "hub".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `HUB_SERVICE_NAME`: Service name (default: device-hub)
    /// - `HUB_COMPONENT`: Component identifier (default: hub)
    /// - `HUB_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `HUB_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `HUB_JSON_LOGS`: Enable JSON logs (default: false in dev, true in containers)
    pub fn from_env() -> Self {
        let is_container =
            env::var("KUBERNETES_SERVICE_HOST").is_ok() || env::var("DOCKER_CONTAINER").is_ok();

        Self {
            service_name: env::var("HUB_SERVICE_NAME")
                .unwrap_or_else(|_| "device-hub".to_string()),

            component: env::var("HUB_COMPONENT").unwrap_or_else(|_| "hub".to_string()),

            log_level: env::var("HUB_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            console_output: env::var("HUB_CONSOLE_OUTPUT")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),

            json_logs: env::var("HUB_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(is_container),
        }
    }

    /// Create configuration for a specific component.
    pub fn for_component(component: &str) -> Self {
        let mut config = Self::from_env();
        config.component = component.to_string();
        config
    }

    /// Get the full service name including component.
    pub fn full_service_name(&self) -> String {
        if self.component == "hub" {
            self.service_name.clone()
        } else {
            format!("{}-{}", self.service_name, self.component)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::default();
        assert_eq!(config.service_name, "device-hub");
        assert_eq!(config.log_level, "info");
        assert!(config.console_output);
    }

    #[test]
    fn test_for_component() {
        let config = TelemetryConfig::for_component("auth");
        assert_eq!(config.component, "auth");
    }

    #[test]
    fn test_full_service_name() {
        let mut config = TelemetryConfig::default();
        assert_eq!(config.full_service_name(), "device-hub");

        config.component = "routing".to_string();
        assert_eq!(config.full_service_name(), "device-hub-routing");
    }
}
