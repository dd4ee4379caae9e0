//! # Inbound Ports (Driving Ports / API)
//!
//! The public API of this subsystem, called by the transport adapters'
//! TLS trust-evaluation hooks.

use crate::domain::entities::{AuthenticationOutcome, PresentedChain};

/// Client-certificate trust evaluation.
///
/// Invoked exactly once per inbound TLS handshake requiring client
/// authentication. Implementations hold no per-connection state and must be
/// safe to share across unlimited concurrent handshakes (`Send + Sync`).
///
/// Server-side trust evaluation (the device checking the hub's own
/// certificate) is delegated to a standard CA-chain validator and is not
/// part of this port.
#[async_trait::async_trait]
pub trait DeviceAuthenticatorApi: Send + Sync {
    /// Evaluate a presented client certificate chain.
    ///
    /// The handshake must not complete before this resolves; the call may
    /// suspend on the credential store.
    async fn authenticate(&self, chain: &PresentedChain) -> AuthenticationOutcome;
}
