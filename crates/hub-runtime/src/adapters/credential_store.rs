//! # In-Memory Credential Store
//!
//! Process-local credential store adapter, keyed by certificate
//! fingerprint. Stands in for the platform's provisioning database; the
//! authenticator only ever sees the [`CredentialStore`] port.

use dashmap::DashMap;
use hub_device_auth::domain::entities::DerCertificate;
use hub_device_auth::domain::errors::CredentialStoreError;
use hub_device_auth::ports::outbound::CredentialStore;
use shared_types::{DeviceCredentials, DeviceId};
use std::sync::Arc;

/// In-memory credential store shared between the authenticator and the
/// provisioning path. Cloning shares the underlying map.
#[derive(Clone, Default)]
pub struct InMemoryCredentialStore {
    records: Arc<DashMap<String, DeviceCredentials>>,
}

impl InMemoryCredentialStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Provision a device certificate, returning the stored record.
    ///
    /// The record is keyed by the certificate's fingerprint; provisioning
    /// the same certificate twice overwrites the earlier record.
    pub fn provision(&self, cert: &DerCertificate, device_id: DeviceId) -> DeviceCredentials {
        let record = DeviceCredentials {
            credentials_id: cert.fingerprint(),
            credentials_value: cert.canonical(),
            device_id,
        };
        self.records
            .insert(record.credentials_id.clone(), record.clone());
        hub_telemetry::log_device_event!(info, "runtime", "Provisioned device credentials", device_id);
        record
    }

    /// Insert a pre-built record, keyed by its `credentials_id`.
    ///
    /// Used when syncing records provisioned elsewhere; [`provision`]
    /// derives both fields locally.
    ///
    /// [`provision`]: Self::provision
    pub fn insert_record(&self, record: DeviceCredentials) {
        self.records
            .insert(record.credentials_id.clone(), record);
    }

    /// Remove a provisioned record by fingerprint.
    pub fn revoke(&self, credentials_id: &str) -> Option<DeviceCredentials> {
        self.records.remove(credentials_id).map(|(_, record)| record)
    }

    /// Number of provisioned records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait::async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn lookup(
        &self,
        credentials_id: &str,
    ) -> Result<Option<DeviceCredentials>, CredentialStoreError> {
        Ok(self.records.get(credentials_id).map(|r| r.clone()))
    }
}
