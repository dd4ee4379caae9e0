//! # Device Hub Runtime
//!
//! The main entry point for the device hub.
//!
//! ## Startup Sequence
//!
//! 1. Initialize structured logging
//! 2. Load configuration (defaults + environment overrides)
//! 3. Wire the gateway container (credential store, authenticator,
//!    correlation store, dispatcher)
//! 4. Start the correlation expiry sweeper and channel consumers
//! 5. Signal ready
//!
//! Transport listeners bind here in a full deployment; the runtime keeps
//! their shared services alive and tears them down on Ctrl+C.

use anyhow::{Context, Result};
use hub_msg_routing::correlation::cleanup_task;
use hub_runtime::adapters::DeviceMessage;
use hub_runtime::{GatewayContainer, HubChannels, HubConfig};
use hub_telemetry::{init_telemetry, TelemetryConfig};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Load configuration from environment overrides on top of defaults.
fn load_config() -> HubConfig {
    let mut config = HubConfig::default();

    if let Ok(port) = std::env::var("HUB_MQTT_PORT") {
        if let Ok(p) = port.parse() {
            config.network.mqtt_port = p;
        }
    }
    if let Ok(port) = std::env::var("HUB_COAP_PORT") {
        if let Ok(p) = port.parse() {
            config.network.coap_port = p;
        }
    }
    if let Ok(secs) = std::env::var("HUB_RPC_TIMEOUT_SECS") {
        if let Ok(s) = secs.parse() {
            config.correlation.default_timeout_secs = s;
        }
    }

    config
}

/// Drain a downstream channel, logging each delivery.
///
/// Stands in for the external consumer (rule engine, platform bus) in
/// deployments that run the hub standalone.
async fn drain_channel(label: &'static str, mut rx: mpsc::Receiver<DeviceMessage>) {
    while let Some(delivered) = rx.recv().await {
        debug!(
            consumer = label,
            kind = %delivered.msg.kind,
            device_id = %delivered.device_id,
            "Message consumed"
        );
    }
    info!(consumer = label, "Channel closed, consumer stopping");
}

#[tokio::main]
async fn main() -> Result<()> {
    let telemetry_config = TelemetryConfig::from_env();
    let _telemetry = init_telemetry(&telemetry_config).context("Failed to init telemetry")?;

    let config = load_config();

    info!("===========================================");
    info!("  Device Hub Runtime v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");
    info!("MQTT Port: {}", config.network.mqtt_port);
    info!("CoAP Port: {}", config.network.coap_port);
    info!(
        "RPC Timeout: {}s",
        config.correlation.default_timeout_secs
    );

    let cleanup_interval = config.correlation.cleanup_interval();
    let (container, channels) = GatewayContainer::new(config);
    let HubChannels {
        rule_engine_rx,
        bus_rx,
    } = channels;

    // Correlation expiry sweeper
    tokio::spawn(cleanup_task(
        Arc::clone(container.correlations()),
        cleanup_interval,
    ));

    // Downstream consumers
    tokio::spawn(drain_channel("rule-engine", rule_engine_rx));
    tokio::spawn(drain_channel("message-bus", bus_rx));

    info!("Hub is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;

    info!("Initiating graceful shutdown...");
    let stats = container.correlations().stats();
    info!(
        registered = stats.total_registered.load(Ordering::Relaxed),
        answered = stats.total_answered.load(Ordering::Relaxed),
        expired = stats.total_expired.load(Ordering::Relaxed),
        "Correlation totals at shutdown"
    );
    info!("Shutdown complete");

    Ok(())
}
