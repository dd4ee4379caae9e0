//! # Device Authenticator Service
//!
//! Application service that implements the `DeviceAuthenticatorApi` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`DeviceAuthenticatorApi`)
//! - Uses the outbound port (`CredentialStore`) for fingerprint lookups
//! - Delegates fingerprinting to the domain layer
//!
//! ## Trust Policy
//!
//! Device identity is established by exact-match comparison against a
//! provisioned credential value, not by chain-of-trust reasoning to a root
//! CA. Every ambiguous or erroring condition resolves to rejection.

use crate::domain::entities::{
    AuthenticationOutcome, DerCertificate, PresentedChain, RejectReason,
};
use crate::domain::errors::CredentialStoreError;
use crate::ports::inbound::DeviceAuthenticatorApi;
use crate::ports::outbound::CredentialStore;
use shared_types::DeviceCredentials;
use tracing::{debug, warn};

/// Device Authenticator.
///
/// Holds no per-connection state; construct once at process start with the
/// store passed explicitly, then share via `Arc` across all handshakes.
pub struct DeviceAuthenticator<S: CredentialStore> {
    store: S,
}

impl<S: CredentialStore> DeviceAuthenticator<S> {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `store` - The credential store collaborator
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Certificate Identity Resolver: fingerprint one certificate and query
    /// the store. Pure function of its inputs apart from the read-only
    /// lookup.
    pub async fn resolve_certificate(
        &self,
        cert: &DerCertificate,
    ) -> Result<Option<DeviceCredentials>, CredentialStoreError> {
        let fingerprint = cert.fingerprint();
        let record = self.store.lookup(&fingerprint).await?;
        debug!(
            fingerprint = %fingerprint,
            found = record.is_some(),
            "Resolved certificate"
        );
        Ok(record)
    }
}

#[async_trait::async_trait]
impl<S: CredentialStore> DeviceAuthenticatorApi for DeviceAuthenticator<S> {
    /// Evaluate a presented client certificate chain, leaf-first.
    ///
    /// The first chain entry whose provisioned `credentials_value` exactly
    /// equals the certificate's canonical form is accepted and iteration
    /// stops (accept short-circuit). Later entries are not required to
    /// match.
    ///
    /// Non-leaf entries participate in the scan, so a provisioned
    /// intermediate certificate can authenticate the device. Whether that is
    /// desirable depends on provisioning practice; confirm before hardening.
    ///
    /// Fail-closed: chain exhaustion rejects with `CredentialNotFound`; a
    /// store failure rejects immediately with `StoreUnavailable` rather than
    /// scanning further on a degraded store.
    async fn authenticate(&self, chain: &PresentedChain) -> AuthenticationOutcome {
        for cert in chain.iter() {
            let record = match self.resolve_certificate(cert).await {
                Ok(record) => record,
                Err(CredentialStoreError::Unavailable(reason)) => {
                    warn!(reason = %reason, "Credential store unavailable, aborting handshake");
                    return AuthenticationOutcome::Rejected(RejectReason::StoreUnavailable);
                }
            };

            if let Some(record) = record {
                if record.credentials_value == cert.canonical() {
                    debug!(device_id = %record.device_id, "Device authenticated");
                    return AuthenticationOutcome::Accepted(record.device_id);
                }
                // Fingerprint hit with a different credential value: a
                // collision, not this device. Keep scanning.
                warn!(
                    credentials_id = %record.credentials_id,
                    "Fingerprint matched but credential value differs, skipping"
                );
            }
        }

        debug!(chain_len = chain.len(), "No chain entry matched a provisioned credential");
        AuthenticationOutcome::Rejected(RejectReason::CredentialNotFound)
    }
}
