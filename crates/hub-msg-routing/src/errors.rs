//! # Routing Errors

use crate::ports::outbound::SinkError;
use shared_types::{CorrelationId, ProtocolViolation};
use thiserror::Error;

/// Errors from the correlation store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CorrelationError {
    /// A request reused a correlation id that already has an outstanding
    /// entry. One outstanding correlation per id.
    #[error("Correlation id {0} already has an outstanding request")]
    AlreadyPending(CorrelationId),
}

/// Errors from dispatching a classified message.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The transport adapter violated the protocol contract.
    #[error(transparent)]
    Protocol(#[from] ProtocolViolation),

    /// Rule-engine ingestion failed; the stimulus message was not handed
    /// off and must not be silently dropped.
    #[error("Rule engine ingestion failed: {0}")]
    RuleEngine(SinkError),

    /// The attribute store gateway failed.
    #[error("Attribute store operation failed: {0}")]
    AttributeStore(SinkError),

    /// Publishing to the outbound message bus failed.
    #[error("Message bus publish failed: {0}")]
    MessageBus(SinkError),
}
