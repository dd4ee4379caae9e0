//! # Downstream Sink Adapters
//!
//! Implementations of the routing layer's outbound ports. The rule-engine
//! sink forwards over a bounded channel to whatever consumes stimuli in
//! this deployment; the attribute registry tracks live subscriptions
//! in-process; the message bus fans bookkeeping traffic out the same way.

use dashmap::DashMap;
use hub_msg_routing::ports::outbound::{
    AttributeStoreGateway, MessageBusSink, RuleEngineSink, SinkError,
};
use shared_types::{ClassifiedMessage, DeviceId, SessionId};
use tokio::sync::mpsc;
use tracing::debug;

/// A message annotated with the device that produced it, as delivered to
/// channel consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceMessage {
    /// Authenticated producer.
    pub device_id: DeviceId,
    /// The classified message itself.
    pub msg: ClassifiedMessage,
}

/// Rule-engine sink backed by a bounded channel.
pub struct ChannelRuleEngineSink {
    tx: mpsc::Sender<DeviceMessage>,
}

impl ChannelRuleEngineSink {
    /// Create the sink and the receiving half the rule-engine consumer
    /// drains.
    #[must_use]
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<DeviceMessage>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }
}

#[async_trait::async_trait]
impl RuleEngineSink for ChannelRuleEngineSink {
    async fn ingest(&self, device_id: DeviceId, msg: ClassifiedMessage) -> Result<(), SinkError> {
        self.tx
            .send(DeviceMessage { device_id, msg })
            .await
            .map_err(|e| SinkError::CommunicationError(e.to_string()))
    }
}

/// In-process registry of live attribute subscriptions.
#[derive(Default)]
pub struct InMemoryAttributeRegistry {
    subscriptions: DashMap<SessionId, DeviceId>,
}

impl InMemoryAttributeRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a session currently holds an attribute subscription.
    #[must_use]
    pub fn is_subscribed(&self, session_id: &SessionId) -> bool {
        self.subscriptions.contains_key(session_id)
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }
}

#[async_trait::async_trait]
impl AttributeStoreGateway for InMemoryAttributeRegistry {
    async fn subscribe(
        &self,
        device_id: DeviceId,
        session_id: SessionId,
    ) -> Result<(), SinkError> {
        self.subscriptions.insert(session_id, device_id);
        debug!(session_id = %session_id, "Attribute subscription registered");
        Ok(())
    }

    async fn unsubscribe(
        &self,
        _device_id: DeviceId,
        session_id: SessionId,
    ) -> Result<(), SinkError> {
        self.subscriptions.remove(&session_id);
        debug!(session_id = %session_id, "Attribute subscription removed");
        Ok(())
    }
}

/// Outbound message bus backed by a bounded channel.
pub struct ChannelMessageBus {
    tx: mpsc::Sender<DeviceMessage>,
}

impl ChannelMessageBus {
    /// Create the bus and the receiving half its consumer drains.
    #[must_use]
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<DeviceMessage>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }
}

#[async_trait::async_trait]
impl MessageBusSink for ChannelMessageBus {
    async fn publish(&self, device_id: DeviceId, msg: ClassifiedMessage) -> Result<(), SinkError> {
        self.tx
            .send(DeviceMessage { device_id, msg })
            .await
            .map_err(|e| SinkError::CommunicationError(e.to_string()))
    }
}
