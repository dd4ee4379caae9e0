//! # Outbound Ports (Driven Ports / SPI)
//!
//! Dependencies this subsystem needs from the outside world.

use crate::domain::errors::CredentialStoreError;
use shared_types::DeviceCredentials;

/// Read-only access to the provisioned credential store.
///
/// The store owns the credential records; this port is a lookup function
/// with no side effects visible to the hub. Persistence is an external
/// collaborator's concern.
#[async_trait::async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up a credential record by fingerprint.
    ///
    /// Returns `Ok(Some(record))` when provisioned, `Ok(None)` when absent.
    ///
    /// # Errors
    /// * `CredentialStoreError::Unavailable` - the store cannot be reached;
    ///   the caller must treat this as a handshake abort.
    async fn lookup(
        &self,
        credentials_id: &str,
    ) -> Result<Option<DeviceCredentials>, CredentialStoreError>;
}
