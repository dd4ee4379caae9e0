//! # Session Handler
//!
//! Per-connection flow shared by both transports: authenticate the
//! presented chain once at handshake time, then decode and dispatch every
//! frame the session produces. A session that fails authentication never
//! reaches the dispatcher.

use crate::container::HubDispatcher;
use hub_device_auth::{
    AuthenticationOutcome, DeviceAuthenticatorApi, PresentedChain, RejectReason,
};
use hub_msg_routing::dispatch::Disposition;
use hub_msg_routing::errors::DispatchError;
use hub_transport::coap::CoapRequest;
use hub_transport::mqtt::{Direction, MqttFrame};
use hub_transport::TransportError;
use shared_types::{DeviceId, MsgKind, SessionId};
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Errors surfaced to the transport adapter driving a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The handshake was rejected; the connection must be torn down.
    #[error("Authentication rejected: {0}")]
    Unauthenticated(RejectReason),

    /// A frame could not be classified.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The classified message could not be routed.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// An authenticated session: the binding between a transport connection
/// and the device identity resolved at handshake time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceSession {
    /// The session's identifier, minted at accept time.
    pub session_id: SessionId,
    /// The device authenticated on this session.
    pub device_id: DeviceId,
}

/// Drives the authenticate-decode-dispatch flow for one deployment.
pub struct SessionHandler<A: DeviceAuthenticatorApi> {
    authenticator: Arc<A>,
    dispatcher: Arc<HubDispatcher>,
}

impl<A: DeviceAuthenticatorApi> SessionHandler<A> {
    /// Create a handler over the shared services.
    pub fn new(authenticator: Arc<A>, dispatcher: Arc<HubDispatcher>) -> Self {
        Self {
            authenticator,
            dispatcher,
        }
    }

    /// The shared dispatcher, for registering server-originated RPCs.
    #[must_use]
    pub fn dispatcher(&self) -> &Arc<HubDispatcher> {
        &self.dispatcher
    }

    /// Authenticate a new connection's certificate chain.
    ///
    /// # Errors
    /// * `SessionError::Unauthenticated` - no chain entry matched a
    ///   provisioned credential, or the store could not be reached
    pub async fn open(&self, chain: &PresentedChain) -> Result<DeviceSession, SessionError> {
        match self.authenticator.authenticate(chain).await {
            AuthenticationOutcome::Accepted(device_id) => {
                let session = DeviceSession {
                    session_id: SessionId::new(),
                    device_id,
                };
                hub_telemetry::log_session_event!(
                    info,
                    "runtime",
                    "Session opened",
                    session.session_id,
                    device_id = %device_id
                );
                Ok(session)
            }
            AuthenticationOutcome::Rejected(reason) => {
                warn!(reason = ?reason, "Handshake rejected");
                Err(SessionError::Unauthenticated(reason))
            }
        }
    }

    /// Decode and dispatch one MQTT frame from an authenticated session.
    pub async fn handle_mqtt(
        &self,
        session: &DeviceSession,
        direction: Direction,
        frame: MqttFrame,
    ) -> Result<Disposition, SessionError> {
        let msg = hub_transport::mqtt::decode(session.session_id, direction, frame)?;
        Ok(self.dispatcher.dispatch(session.device_id, msg).await?)
    }

    /// Decode and dispatch one CoAP request from an authenticated session.
    pub async fn handle_coap(
        &self,
        session: &DeviceSession,
        request: CoapRequest,
    ) -> Result<Disposition, SessionError> {
        let msg = hub_transport::coap::decode_request(session.session_id, request)?;
        Ok(self.dispatcher.dispatch(session.device_id, msg).await?)
    }

    /// Close a session, invalidating its pending correlations.
    pub async fn close(&self, session: DeviceSession) -> Result<Disposition, SessionError> {
        let msg = shared_types::ClassifiedMessage::new(
            MsgKind::SessionClose,
            session.session_id,
            Vec::new(),
        );
        let disposition = self.dispatcher.dispatch(session.device_id, msg).await?;
        hub_telemetry::log_session_event!(info, "runtime", "Session closed", session.session_id);
        Ok(disposition)
    }
}
