//! # Hub Configuration
//!
//! Unified configuration for the runtime and its subsystems. Defaults are
//! development-friendly; production values come in via environment
//! overrides at startup.

use std::time::Duration;

/// Complete hub configuration.
#[derive(Debug, Clone, Default)]
pub struct HubConfig {
    /// Network listener configuration.
    pub network: NetworkConfig,
    /// Request/response correlation configuration.
    pub correlation: CorrelationConfig,
    /// Outbound message bus configuration.
    pub bus: BusConfig,
}

/// Network configuration.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// MQTT listener port.
    pub mqtt_port: u16,
    /// CoAP listener port.
    pub coap_port: u16,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            mqtt_port: 8883,
            coap_port: 5684,
        }
    }
}

/// Request/response correlation configuration.
#[derive(Debug, Clone)]
pub struct CorrelationConfig {
    /// Default timeout for a pending server-to-device RPC.
    pub default_timeout_secs: u64,
    /// Sweep interval for the expiry task.
    pub cleanup_interval_secs: u64,
}

impl CorrelationConfig {
    /// Default timeout as a [`Duration`].
    #[must_use]
    pub fn default_timeout(&self) -> Duration {
        Duration::from_secs(self.default_timeout_secs)
    }

    /// Cleanup interval as a [`Duration`].
    #[must_use]
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs)
    }
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            default_timeout_secs: 30,
            cleanup_interval_secs: 1,
        }
    }
}

/// Outbound message bus configuration.
#[derive(Debug, Clone)]
pub struct BusConfig {
    /// Bounded channel capacity for bookkeeping traffic.
    pub capacity: usize,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self { capacity: 1024 }
    }
}
