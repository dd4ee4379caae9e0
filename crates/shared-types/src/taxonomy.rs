//! # Message Taxonomy
//!
//! The closed, versioned catalog of message kinds flowing through the hub.
//!
//! Every inbound application message is tagged with exactly one `MsgKind`,
//! and the kind alone decides whether the message enters the rule-processing
//! pipeline. Both transport adapters (CoAP and MQTT) consume this table;
//! neither is allowed to re-derive the split on its own.
//!
//! ## Extensibility Rule
//!
//! A kind's identity and its rule-processing flag are declared in the same
//! match arm of [`MsgKind::requires_rule_processing`]. Adding a variant
//! without extending that match fails to compile — there is no wildcard arm
//! that could silently default a new kind to "no processing".

use crate::errors::ProtocolViolation;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Taxonomy version. Bumped whenever the kind set changes; part of the
/// protocol contract with the transport adapters.
pub const TAXONOMY_VERSION: u16 = 1;

/// All message kinds understood by the hub.
///
/// *Stimulus* kinds (attribute updates, telemetry, device-originated RPC)
/// carry `requires_rule_processing() == true`; protocol bookkeeping kinds
/// (subscriptions, responses, acks, session lifecycle) carry `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MsgKind {
    /// Device asks for current attribute values.
    GetAttributesRequest,
    /// Device pushes new attribute values.
    PostAttributesRequest,
    /// Server answers an attribute read.
    GetAttributesResponse,
    /// Device subscribes to attribute-update pushes.
    SubscribeAttributes,
    /// Device cancels an attribute subscription.
    UnsubscribeAttributes,
    /// Server-side attribute change pushed to a subscribed device.
    AttributesUpdateNotification,
    /// Device pushes telemetry samples.
    PostTelemetry,
    /// Bare status-code answer to a device request.
    StatusCodeResponse,
    /// Device subscribes to server-originated RPC commands.
    SubscribeRpcCommands,
    /// Device cancels the RPC command subscription.
    UnsubscribeRpcCommands,
    /// Server-originated RPC pushed to the device.
    ToDeviceRpcRequest,
    /// Device's answer to a server-originated RPC.
    ToDeviceRpcResponse,
    /// Server acknowledges receipt of the device's RPC answer.
    ToDeviceRpcResponseAck,
    /// Device-originated RPC aimed at server-side logic.
    ToServerRpcRequest,
    /// Server's answer to a device-originated RPC.
    ToServerRpcResponse,
    /// Rule engine reported a processing failure back to the session.
    RuleEngineError,
    /// Transport session established.
    SessionOpen,
    /// Transport session closed.
    SessionClose,
}

impl MsgKind {
    /// Every kind in the taxonomy, for coverage tests and table-driven code.
    pub const ALL: [MsgKind; 18] = [
        MsgKind::GetAttributesRequest,
        MsgKind::PostAttributesRequest,
        MsgKind::GetAttributesResponse,
        MsgKind::SubscribeAttributes,
        MsgKind::UnsubscribeAttributes,
        MsgKind::AttributesUpdateNotification,
        MsgKind::PostTelemetry,
        MsgKind::StatusCodeResponse,
        MsgKind::SubscribeRpcCommands,
        MsgKind::UnsubscribeRpcCommands,
        MsgKind::ToDeviceRpcRequest,
        MsgKind::ToDeviceRpcResponse,
        MsgKind::ToDeviceRpcResponseAck,
        MsgKind::ToServerRpcRequest,
        MsgKind::ToServerRpcResponse,
        MsgKind::RuleEngineError,
        MsgKind::SessionOpen,
        MsgKind::SessionClose,
    ];

    /// Whether this kind must be handed to the rule engine.
    ///
    /// This match is deliberately exhaustive with no wildcard arm: a new
    /// kind cannot compile without declaring its flag here.
    #[must_use]
    pub const fn requires_rule_processing(self) -> bool {
        match self {
            MsgKind::GetAttributesRequest => true,
            MsgKind::PostAttributesRequest => true,
            MsgKind::GetAttributesResponse => false,
            MsgKind::SubscribeAttributes => false,
            MsgKind::UnsubscribeAttributes => false,
            MsgKind::AttributesUpdateNotification => false,
            MsgKind::PostTelemetry => true,
            MsgKind::StatusCodeResponse => false,
            MsgKind::SubscribeRpcCommands => false,
            MsgKind::UnsubscribeRpcCommands => false,
            MsgKind::ToDeviceRpcRequest => false,
            MsgKind::ToDeviceRpcResponse => false,
            MsgKind::ToDeviceRpcResponseAck => false,
            MsgKind::ToServerRpcRequest => true,
            MsgKind::ToServerRpcResponse => false,
            MsgKind::RuleEngineError => false,
            MsgKind::SessionOpen => false,
            MsgKind::SessionClose => false,
        }
    }

    /// Canonical wire name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            MsgKind::GetAttributesRequest => "attribute-get-request",
            MsgKind::PostAttributesRequest => "attribute-post-request",
            MsgKind::GetAttributesResponse => "attribute-get-response",
            MsgKind::SubscribeAttributes => "attribute-subscribe",
            MsgKind::UnsubscribeAttributes => "attribute-unsubscribe",
            MsgKind::AttributesUpdateNotification => "attribute-update-notification",
            MsgKind::PostTelemetry => "telemetry-post",
            MsgKind::StatusCodeResponse => "status-response",
            MsgKind::SubscribeRpcCommands => "rpc-subscribe",
            MsgKind::UnsubscribeRpcCommands => "rpc-unsubscribe",
            MsgKind::ToDeviceRpcRequest => "to-device-rpc-request",
            MsgKind::ToDeviceRpcResponse => "to-device-rpc-response",
            MsgKind::ToDeviceRpcResponseAck => "to-device-rpc-response-ack",
            MsgKind::ToServerRpcRequest => "to-server-rpc-request",
            MsgKind::ToServerRpcResponse => "to-server-rpc-response",
            MsgKind::RuleEngineError => "rule-engine-error",
            MsgKind::SessionOpen => "session-open",
            MsgKind::SessionClose => "session-close",
        }
    }
}

impl fmt::Display for MsgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MsgKind {
    type Err = ProtocolViolation;

    /// Parse a wire name into a kind.
    ///
    /// An unrecognized name is a protocol-contract violation by the
    /// transport adapter and is rejected outright, never defaulted to a
    /// bookkeeping kind.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MsgKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ProtocolViolation::UnknownMsgKind {
                name: s.to_string(),
            })
    }
}
