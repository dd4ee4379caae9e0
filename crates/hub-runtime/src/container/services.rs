//! # Gateway Container
//!
//! Central container holding the core service instances, constructed once
//! at process start with their collaborators passed explicitly.

use crate::adapters::{
    ChannelMessageBus, ChannelRuleEngineSink, DeviceMessage, InMemoryAttributeRegistry,
    InMemoryCredentialStore,
};
use crate::container::config::HubConfig;
use hub_device_auth::DeviceAuthenticator;
use hub_msg_routing::correlation::PendingRpcStore;
use hub_msg_routing::dispatch::MsgDispatcher;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

/// The dispatcher as wired in this deployment.
pub type HubDispatcher =
    MsgDispatcher<ChannelRuleEngineSink, Arc<InMemoryAttributeRegistry>, ChannelMessageBus>;

/// Receiving halves of the downstream channels, handed to their consumer
/// tasks at startup.
pub struct HubChannels {
    /// Stimulus messages bound for the rule engine.
    pub rule_engine_rx: mpsc::Receiver<DeviceMessage>,
    /// Bookkeeping messages published on the outbound bus.
    pub bus_rx: mpsc::Receiver<DeviceMessage>,
}

/// Container for the hub's core services.
pub struct GatewayContainer {
    /// Hub configuration.
    pub config: HubConfig,
    /// Credential store handle, shared with the provisioning path.
    pub credentials: InMemoryCredentialStore,
    /// Device authenticator over the credential store.
    pub authenticator: Arc<DeviceAuthenticator<InMemoryCredentialStore>>,
    /// Attribute subscription registry.
    pub attributes: Arc<InMemoryAttributeRegistry>,
    /// Message dispatcher with its sinks wired in.
    pub dispatcher: Arc<HubDispatcher>,
}

impl GatewayContainer {
    /// Wire the core services together.
    #[must_use]
    pub fn new(config: HubConfig) -> (Self, HubChannels) {
        info!("Initializing gateway container");

        let credentials = InMemoryCredentialStore::new();
        let authenticator = Arc::new(DeviceAuthenticator::new(credentials.clone()));

        let (rule_engine, rule_engine_rx) = ChannelRuleEngineSink::new(config.bus.capacity);
        let (bus, bus_rx) = ChannelMessageBus::new(config.bus.capacity);
        let attributes = Arc::new(InMemoryAttributeRegistry::new());

        let correlations = Arc::new(PendingRpcStore::new(config.correlation.default_timeout()));
        let dispatcher = Arc::new(MsgDispatcher::new(
            rule_engine,
            Arc::clone(&attributes),
            bus,
            correlations,
        ));

        let container = Self {
            config,
            credentials,
            authenticator,
            attributes,
            dispatcher,
        };
        let channels = HubChannels {
            rule_engine_rx,
            bus_rx,
        };

        (container, channels)
    }

    /// The shared correlation store.
    #[must_use]
    pub fn correlations(&self) -> &Arc<PendingRpcStore> {
        self.dispatcher.correlations()
    }
}
