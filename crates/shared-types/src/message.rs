//! # Classified Message Envelope
//!
//! The protocol-neutral message a transport adapter hands to the dispatch
//! layer, plus the correlation id linking paired request/response kinds.

use crate::entities::SessionId;
use crate::taxonomy::MsgKind;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use std::fmt;
use uuid::Uuid;

/// Caller-supplied identifier linking a request message to its eventual
/// response message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(Uuid);

impl CorrelationId {
    /// Generate a new correlation id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse from a wire string (topic suffix, CoAP token).
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self)
    }

    /// The underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for CorrelationId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// A decoded inbound message, tagged with its taxonomy kind.
///
/// Created once per inbound frame by a transport adapter, consumed by the
/// downstream sink the kind's routing policy designates, then discarded.
/// The payload stays opaque at this layer; decoding it is the sink's
/// business.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedMessage {
    /// Taxonomy kind; decides the downstream route. Serialized by its
    /// wire name.
    #[serde_as(as = "DisplayFromStr")]
    pub kind: MsgKind,
    /// The session this message arrived on.
    pub session_id: SessionId,
    /// Opaque application payload.
    pub payload: Vec<u8>,
    /// Present on paired request/response kinds, absent otherwise.
    pub correlation_id: Option<CorrelationId>,
}

impl ClassifiedMessage {
    /// Build a message with no correlation id.
    #[must_use]
    pub fn new(kind: MsgKind, session_id: SessionId, payload: Vec<u8>) -> Self {
        Self {
            kind,
            session_id,
            payload,
            correlation_id: None,
        }
    }

    /// Attach a correlation id (paired request/response kinds).
    #[must_use]
    pub fn with_correlation(mut self, id: CorrelationId) -> Self {
        self.correlation_id = Some(id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correlation_ids_unique() {
        assert_ne!(CorrelationId::new(), CorrelationId::new());
    }

    #[test]
    fn test_correlation_id_parse_roundtrip() {
        let id = CorrelationId::new();
        assert_eq!(CorrelationId::parse(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn test_kind_serializes_by_wire_name() {
        let msg = ClassifiedMessage::new(MsgKind::PostTelemetry, SessionId::new(), Vec::new());
        let json = serde_json::to_string(&msg).unwrap();

        assert!(json.contains("\"telemetry-post\""));

        let parsed: ClassifiedMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, msg);
    }

    #[test]
    fn test_message_builder() {
        let session = SessionId::new();
        let corr = CorrelationId::new();
        let msg = ClassifiedMessage::new(MsgKind::ToServerRpcRequest, session, b"{}".to_vec())
            .with_correlation(corr);

        assert_eq!(msg.kind, MsgKind::ToServerRpcRequest);
        assert_eq!(msg.session_id, session);
        assert_eq!(msg.correlation_id, Some(corr));
    }
}
