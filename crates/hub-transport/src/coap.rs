//! # CoAP Decode Path
//!
//! Maps CoAP exchanges under the `api/v1` resource tree onto the message
//! taxonomy.
//!
//! | Exchange | Kind |
//! |---|---|
//! | `POST api/v1/telemetry` | telemetry-post |
//! | `GET api/v1/attributes` | attribute-get-request |
//! | `POST api/v1/attributes` | attribute-post-request |
//! | `GET api/v1/attributes` observe register/deregister | attribute-subscribe / -unsubscribe |
//! | `GET api/v1/rpc` observe register/deregister | rpc-subscribe / -unsubscribe |
//! | `POST api/v1/rpc` | to-server-rpc-request |
//! | `POST api/v1/rpc/{id}` | to-device-rpc-response |
//!
//! Hub-originated traffic on an exchange is classified by
//! [`decode_outbound`]: piggy-backed responses take the kind paired with
//! the request (or `status-response` when only a code travels back), and
//! observe notifications take the kind of the observed resource.

use crate::errors::TransportError;
use shared_types::{ClassifiedMessage, CorrelationId, MsgKind, ProtocolViolation, SessionId};

/// Resource tree root, first segment.
pub const API_SEGMENT: &str = "api";
/// Resource tree root, version segment.
pub const V1_SEGMENT: &str = "v1";

const TELEMETRY_RESOURCE: &str = "telemetry";
const ATTRIBUTES_RESOURCE: &str = "attributes";
const RPC_RESOURCE: &str = "rpc";

/// CoAP request code, reduced to the methods the resource tree serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoapMethod {
    /// GET (0.01)
    Get,
    /// POST (0.02)
    Post,
}

/// Observe option on a GET.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserveOption {
    /// Observe value 0: establish the observation.
    Register,
    /// Observe value 1: cancel it.
    Deregister,
}

/// A device request, reduced to what classification needs. Option and
/// token parsing belong to the adapter; the request token doubles as the
/// correlation id for paired kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoapRequest {
    /// Request method.
    pub method: CoapMethod,
    /// Full URI path segments, `api/v1/...` included.
    pub path: Vec<String>,
    /// Observe option, when present.
    pub observe: Option<ObserveOption>,
    /// Correlation id carried in the token, when the adapter found one.
    pub correlation_id: Option<CorrelationId>,
    /// Request payload.
    pub payload: Vec<u8>,
}

/// An observed resource, for classifying notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservedResource {
    /// `api/v1/attributes`
    Attributes,
    /// `api/v1/rpc`
    Rpc,
}

/// A hub-originated CoAP message on an exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoapOutbound {
    /// Piggy-backed or separate response to a device request.
    Response {
        /// Kind of the request being answered.
        request_kind: MsgKind,
        /// Response payload; empty means a bare status code.
        payload: Vec<u8>,
    },
    /// Notification pushed over an established observation.
    Notification {
        /// Which resource is observed.
        resource: ObservedResource,
        /// Correlation id for paired pushes (server-originated RPC).
        correlation_id: Option<CorrelationId>,
        /// Notification payload.
        payload: Vec<u8>,
    },
}

/// Decode one device request into a classified message.
///
/// # Errors
/// * `TransportError::Unroutable` - the path or method has no decode rule
/// * `TransportError::Protocol` - a paired kind arrived without its
///   correlation id
pub fn decode_request(
    session_id: SessionId,
    request: CoapRequest,
) -> Result<ClassifiedMessage, TransportError> {
    let resource = strip_root(&request.path)?;

    let msg = match (request.method, resource.as_slice()) {
        (CoapMethod::Post, [TELEMETRY_RESOURCE]) => {
            ClassifiedMessage::new(MsgKind::PostTelemetry, session_id, request.payload)
        }
        (CoapMethod::Get, [ATTRIBUTES_RESOURCE]) => match request.observe {
            None => {
                let id = require_correlation(MsgKind::GetAttributesRequest, request.correlation_id)?;
                ClassifiedMessage::new(MsgKind::GetAttributesRequest, session_id, request.payload)
                    .with_correlation(id)
            }
            Some(ObserveOption::Register) => {
                ClassifiedMessage::new(MsgKind::SubscribeAttributes, session_id, Vec::new())
            }
            Some(ObserveOption::Deregister) => {
                ClassifiedMessage::new(MsgKind::UnsubscribeAttributes, session_id, Vec::new())
            }
        },
        (CoapMethod::Post, [ATTRIBUTES_RESOURCE]) => {
            ClassifiedMessage::new(MsgKind::PostAttributesRequest, session_id, request.payload)
        }
        (CoapMethod::Get, [RPC_RESOURCE]) => match request.observe {
            Some(ObserveOption::Register) => {
                ClassifiedMessage::new(MsgKind::SubscribeRpcCommands, session_id, Vec::new())
            }
            Some(ObserveOption::Deregister) => {
                ClassifiedMessage::new(MsgKind::UnsubscribeRpcCommands, session_id, Vec::new())
            }
            None => return Err(unroutable(&request)),
        },
        (CoapMethod::Post, [RPC_RESOURCE]) => {
            let id = require_correlation(MsgKind::ToServerRpcRequest, request.correlation_id)?;
            ClassifiedMessage::new(MsgKind::ToServerRpcRequest, session_id, request.payload)
                .with_correlation(id)
        }
        (CoapMethod::Post, [RPC_RESOURCE, raw_id]) => {
            let id = CorrelationId::parse(raw_id).map_err(|_| {
                ProtocolViolation::MalformedCorrelationId {
                    raw: raw_id.to_string(),
                }
            })?;
            ClassifiedMessage::new(MsgKind::ToDeviceRpcResponse, session_id, request.payload)
                .with_correlation(id)
        }
        _ => return Err(unroutable(&request)),
    };

    tracing::trace!(kind = %msg.kind, session_id = %session_id, "Decoded CoAP request");
    Ok(msg)
}

/// Classify a hub-originated message on an exchange.
///
/// # Errors
/// * `TransportError::Unroutable` - the request kind has no paired
///   response in the taxonomy
pub fn decode_outbound(
    session_id: SessionId,
    outbound: CoapOutbound,
) -> Result<ClassifiedMessage, TransportError> {
    match outbound {
        CoapOutbound::Response {
            request_kind,
            payload,
        } => {
            let kind = match request_kind {
                // Paired responses carry a payload back.
                MsgKind::GetAttributesRequest if !payload.is_empty() => {
                    MsgKind::GetAttributesResponse
                }
                MsgKind::ToServerRpcRequest if !payload.is_empty() => MsgKind::ToServerRpcResponse,
                // Everything else is acknowledged with a bare code.
                MsgKind::GetAttributesRequest
                | MsgKind::ToServerRpcRequest
                | MsgKind::PostTelemetry
                | MsgKind::PostAttributesRequest
                | MsgKind::ToDeviceRpcResponse
                | MsgKind::SubscribeAttributes
                | MsgKind::UnsubscribeAttributes
                | MsgKind::SubscribeRpcCommands
                | MsgKind::UnsubscribeRpcCommands => MsgKind::StatusCodeResponse,
                other => {
                    return Err(TransportError::Unroutable {
                        protocol: "coap",
                        detail: format!("response to non-request kind {other}"),
                    })
                }
            };
            Ok(ClassifiedMessage::new(kind, session_id, payload))
        }
        CoapOutbound::Notification {
            resource,
            correlation_id,
            payload,
        } => {
            let msg = match resource {
                ObservedResource::Attributes => ClassifiedMessage::new(
                    MsgKind::AttributesUpdateNotification,
                    session_id,
                    payload,
                ),
                ObservedResource::Rpc => {
                    let id = require_correlation(MsgKind::ToDeviceRpcRequest, correlation_id)?;
                    ClassifiedMessage::new(MsgKind::ToDeviceRpcRequest, session_id, payload)
                        .with_correlation(id)
                }
            };
            Ok(msg)
        }
    }
}

fn strip_root(path: &[String]) -> Result<Vec<&str>, TransportError> {
    let segments: Vec<&str> = path.iter().map(String::as_str).collect();
    match segments.as_slice() {
        [API_SEGMENT, V1_SEGMENT, rest @ ..] if !rest.is_empty() => Ok(rest.to_vec()),
        _ => Err(TransportError::Unroutable {
            protocol: "coap",
            detail: format!("path outside api/v1 tree: {}", path.join("/")),
        }),
    }
}

fn require_correlation(
    kind: MsgKind,
    correlation_id: Option<CorrelationId>,
) -> Result<CorrelationId, ProtocolViolation> {
    correlation_id.ok_or_else(|| ProtocolViolation::MissingCorrelationId {
        kind: kind.to_string(),
    })
}

fn unroutable(request: &CoapRequest) -> TransportError {
    TransportError::Unroutable {
        protocol: "coap",
        detail: format!(
            "{:?} {} observe={:?}",
            request.method,
            request.path.join("/"),
            request.observe
        ),
    }
}
