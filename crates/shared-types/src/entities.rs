//! # Core Domain Entities
//!
//! Identity types for devices and sessions, plus the provisioned credential
//! record owned by the external credential store.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a provisioned device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(pub Uuid);

impl DeviceId {
    /// Generate a fresh device id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DeviceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for one transport session (one connected device).
///
/// A session is created when a transport adapter accepts a connection and
/// destroyed when it closes; pending correlations are scoped to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Generate a fresh session id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A provisioned device credential record.
///
/// Owned by the external credential store; immutable from the hub's
/// perspective. `credentials_id` is derived deterministically from
/// `credentials_value` (SHA3-256 fingerprint of the canonical certificate
/// bytes), so identical certificates always resolve to the same record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceCredentials {
    /// Fingerprint of the canonical certificate bytes. Unique within the
    /// store.
    pub credentials_id: String,
    /// Canonical certificate representation (hex-encoded DER). Compared
    /// byte-for-byte against the presented certificate during
    /// authentication.
    pub credentials_value: String,
    /// The device this credential was provisioned for.
    pub device_id: DeviceId,
}
