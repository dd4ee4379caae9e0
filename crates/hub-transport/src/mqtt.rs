//! # MQTT Decode Path
//!
//! Maps MQTT control packets and `v1/devices/me/...` topics onto the
//! message taxonomy. Topic layout:
//!
//! | Topic | Device → server | Server → device |
//! |---|---|---|
//! | `v1/devices/me/telemetry` | telemetry-post | — |
//! | `v1/devices/me/attributes` | attribute-post-request | attribute-update-notification |
//! | `v1/devices/me/attributes/request/{id}` | attribute-get-request | — |
//! | `v1/devices/me/attributes/response/{id}` | — | attribute-get-response |
//! | `v1/devices/me/rpc/request/{id}` | to-server-rpc-request | to-device-rpc-request |
//! | `v1/devices/me/rpc/response/{id}` | to-device-rpc-response | to-server-rpc-response |
//! | `v1/devices/me/errors` | — | rule-engine-error |
//!
//! The same topic decodes to different kinds per direction, so the frame
//! descriptor carries the direction explicitly.

use crate::errors::TransportError;
use shared_types::{ClassifiedMessage, CorrelationId, MsgKind, ProtocolViolation, SessionId};

/// Telemetry publish topic.
pub const TELEMETRY_TOPIC: &str = "v1/devices/me/telemetry";
/// Attribute publish/notification topic.
pub const ATTRIBUTES_TOPIC: &str = "v1/devices/me/attributes";
/// Attribute read request topic prefix; suffix is the correlation id.
pub const ATTRIBUTES_REQUEST_PREFIX: &str = "v1/devices/me/attributes/request/";
/// Attribute read response topic prefix.
pub const ATTRIBUTES_RESPONSE_PREFIX: &str = "v1/devices/me/attributes/response/";
/// RPC request topic prefix.
pub const RPC_REQUEST_PREFIX: &str = "v1/devices/me/rpc/request/";
/// RPC response topic prefix.
pub const RPC_RESPONSE_PREFIX: &str = "v1/devices/me/rpc/response/";
/// RPC command subscription filter.
pub const RPC_SUBSCRIBE_FILTER: &str = "v1/devices/me/rpc/request/+";
/// Rule-engine failure notification topic.
pub const ERRORS_TOPIC: &str = "v1/devices/me/errors";

/// Who put the frame on the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Inbound from the device.
    FromDevice,
    /// Outbound delivery to the device on the same session.
    ToDevice,
}

/// An MQTT control packet, reduced to what classification needs.
///
/// Wire parsing (fixed header, QoS, packet ids) belongs to the adapter;
/// the adapter resolves a PubAck's packet id back to the correlation id of
/// the message it acknowledges before calling into this module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MqttFrame {
    /// CONNECT accepted; the session exists.
    Connect,
    /// DISCONNECT or connection loss.
    Disconnect,
    /// SUBSCRIBE with one topic filter.
    Subscribe { topic_filter: String },
    /// UNSUBSCRIBE with one topic filter.
    Unsubscribe { topic_filter: String },
    /// PUBLISH.
    Publish { topic: String, payload: Vec<u8> },
    /// PUBACK, resolved to the correlation it acknowledges.
    PubAck { correlation_id: CorrelationId },
}

/// Decode one MQTT frame into a classified message.
///
/// # Errors
/// * `TransportError::Unroutable` - no decode rule matches the frame
/// * `TransportError::Protocol` - a correlation-carrying topic has a
///   malformed id suffix
pub fn decode(
    session_id: SessionId,
    direction: Direction,
    frame: MqttFrame,
) -> Result<ClassifiedMessage, TransportError> {
    let decoded = decode_frame(session_id, direction, frame)?;
    tracing::trace!(kind = %decoded.kind, session_id = %session_id, "Decoded MQTT frame");
    Ok(decoded)
}

fn decode_frame(
    session_id: SessionId,
    direction: Direction,
    frame: MqttFrame,
) -> Result<ClassifiedMessage, TransportError> {
    match (direction, frame) {
        (Direction::FromDevice, MqttFrame::Connect) => {
            Ok(ClassifiedMessage::new(MsgKind::SessionOpen, session_id, Vec::new()))
        }
        (Direction::FromDevice, MqttFrame::Disconnect) => {
            Ok(ClassifiedMessage::new(MsgKind::SessionClose, session_id, Vec::new()))
        }
        (Direction::FromDevice, MqttFrame::Subscribe { topic_filter }) => {
            let kind = subscription_kind(&topic_filter, true)?;
            Ok(ClassifiedMessage::new(kind, session_id, Vec::new()))
        }
        (Direction::FromDevice, MqttFrame::Unsubscribe { topic_filter }) => {
            let kind = subscription_kind(&topic_filter, false)?;
            Ok(ClassifiedMessage::new(kind, session_id, Vec::new()))
        }
        (direction, MqttFrame::Publish { topic, payload }) => {
            decode_publish(session_id, direction, &topic, payload)
        }
        (Direction::ToDevice, MqttFrame::PubAck { correlation_id }) => Ok(ClassifiedMessage::new(
            MsgKind::ToDeviceRpcResponseAck,
            session_id,
            Vec::new(),
        )
        .with_correlation(correlation_id)),
        (direction, frame) => Err(TransportError::Unroutable {
            protocol: "mqtt",
            detail: format!("{frame:?} in direction {direction:?}"),
        }),
    }
}

fn subscription_kind(topic_filter: &str, subscribe: bool) -> Result<MsgKind, TransportError> {
    match topic_filter {
        ATTRIBUTES_TOPIC => Ok(if subscribe {
            MsgKind::SubscribeAttributes
        } else {
            MsgKind::UnsubscribeAttributes
        }),
        RPC_SUBSCRIBE_FILTER => Ok(if subscribe {
            MsgKind::SubscribeRpcCommands
        } else {
            MsgKind::UnsubscribeRpcCommands
        }),
        other => Err(TransportError::Unroutable {
            protocol: "mqtt",
            detail: format!("subscription filter {other}"),
        }),
    }
}

fn decode_publish(
    session_id: SessionId,
    direction: Direction,
    topic: &str,
    payload: Vec<u8>,
) -> Result<ClassifiedMessage, TransportError> {
    // Exact-topic rules first.
    match (direction, topic) {
        (Direction::FromDevice, TELEMETRY_TOPIC) => {
            return Ok(ClassifiedMessage::new(MsgKind::PostTelemetry, session_id, payload));
        }
        (Direction::FromDevice, ATTRIBUTES_TOPIC) => {
            return Ok(ClassifiedMessage::new(
                MsgKind::PostAttributesRequest,
                session_id,
                payload,
            ));
        }
        (Direction::ToDevice, ATTRIBUTES_TOPIC) => {
            return Ok(ClassifiedMessage::new(
                MsgKind::AttributesUpdateNotification,
                session_id,
                payload,
            ));
        }
        (Direction::ToDevice, ERRORS_TOPIC) => {
            return Ok(ClassifiedMessage::new(MsgKind::RuleEngineError, session_id, payload));
        }
        _ => {}
    }

    // Correlation-suffixed topics.
    let (kind, raw_id) = match direction {
        Direction::FromDevice => {
            if let Some(id) = topic.strip_prefix(ATTRIBUTES_REQUEST_PREFIX) {
                (MsgKind::GetAttributesRequest, id)
            } else if let Some(id) = topic.strip_prefix(RPC_REQUEST_PREFIX) {
                (MsgKind::ToServerRpcRequest, id)
            } else if let Some(id) = topic.strip_prefix(RPC_RESPONSE_PREFIX) {
                (MsgKind::ToDeviceRpcResponse, id)
            } else {
                return Err(unroutable_publish(direction, topic));
            }
        }
        Direction::ToDevice => {
            if let Some(id) = topic.strip_prefix(ATTRIBUTES_RESPONSE_PREFIX) {
                (MsgKind::GetAttributesResponse, id)
            } else if let Some(id) = topic.strip_prefix(RPC_REQUEST_PREFIX) {
                (MsgKind::ToDeviceRpcRequest, id)
            } else if let Some(id) = topic.strip_prefix(RPC_RESPONSE_PREFIX) {
                (MsgKind::ToServerRpcResponse, id)
            } else {
                return Err(unroutable_publish(direction, topic));
            }
        }
    };

    let correlation_id = CorrelationId::parse(raw_id).map_err(|_| {
        ProtocolViolation::MalformedCorrelationId {
            raw: raw_id.to_string(),
        }
    })?;

    Ok(ClassifiedMessage::new(kind, session_id, payload).with_correlation(correlation_id))
}

fn unroutable_publish(direction: Direction, topic: &str) -> TransportError {
    TransportError::Unroutable {
        protocol: "mqtt",
        detail: format!("publish to {topic} in direction {direction:?}"),
    }
}
