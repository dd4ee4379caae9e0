//! # Outbound Ports (Driven Ports / SPI)
//!
//! The downstream sinks consumed as opaque collaborators: rule-engine
//! ingestion, attribute store, and the outbound message bus.

use shared_types::{ClassifiedMessage, DeviceId, SessionId};
use thiserror::Error;

/// Error from a downstream sink.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SinkError {
    /// The sink rejected the message.
    #[error("Rejected: {reason}")]
    Rejected { reason: String },

    /// Communication error
    #[error("Communication error: {0}")]
    CommunicationError(String),
}

/// Gateway to the rule-engine ingestion endpoint.
///
/// Receives every message whose kind requires rule processing, together
/// with the device id resolved during authentication. Rule semantics are
/// outside the hub's scope.
#[async_trait::async_trait]
pub trait RuleEngineSink: Send + Sync {
    /// Hand a stimulus message to the rule engine.
    ///
    /// # Errors
    /// * `SinkError::Rejected` - the engine refused the message
    /// * `SinkError::CommunicationError` - the engine could not be reached
    async fn ingest(&self, device_id: DeviceId, msg: ClassifiedMessage) -> Result<(), SinkError>;
}

/// Gateway to the attribute store.
#[async_trait::async_trait]
pub trait AttributeStoreGateway: Send + Sync {
    /// Register a session for attribute-update pushes.
    async fn subscribe(&self, device_id: DeviceId, session_id: SessionId)
        -> Result<(), SinkError>;

    /// Cancel a session's attribute subscription.
    async fn unsubscribe(
        &self,
        device_id: DeviceId,
        session_id: SessionId,
    ) -> Result<(), SinkError>;
}

#[async_trait::async_trait]
impl<T: AttributeStoreGateway + ?Sized> AttributeStoreGateway for std::sync::Arc<T> {
    async fn subscribe(
        &self,
        device_id: DeviceId,
        session_id: SessionId,
    ) -> Result<(), SinkError> {
        (**self).subscribe(device_id, session_id).await
    }

    async fn unsubscribe(
        &self,
        device_id: DeviceId,
        session_id: SessionId,
    ) -> Result<(), SinkError> {
        (**self).unsubscribe(device_id, session_id).await
    }
}

/// The outbound message bus carrying bookkeeping traffic to its consumers.
#[async_trait::async_trait]
pub trait MessageBusSink: Send + Sync {
    /// Publish a bookkeeping message.
    async fn publish(&self, device_id: DeviceId, msg: ClassifiedMessage) -> Result<(), SinkError>;
}
