//! # Authentication Entities
//!
//! The presented certificate chain and the two-variant handshake outcome.

use crate::domain::fingerprint::certificate_fingerprint;
use shared_types::DeviceId;

/// A single certificate in canonical DER form.
///
/// Parsing and canonicalization happen in the transport/TLS layer;
/// malformed input is a caller error, not a concern of this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerCertificate(Vec<u8>);

impl DerCertificate {
    /// Wrap canonical DER bytes.
    #[must_use]
    pub fn new(der: Vec<u8>) -> Self {
        Self(der)
    }

    /// The raw DER bytes.
    #[must_use]
    pub fn der(&self) -> &[u8] {
        &self.0
    }

    /// Canonical string representation (hex-encoded DER). This is the form
    /// stored in `DeviceCredentials::credentials_value` and compared
    /// byte-for-byte during authentication.
    #[must_use]
    pub fn canonical(&self) -> String {
        hex::encode(&self.0)
    }

    /// Lookup fingerprint for this certificate.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        certificate_fingerprint(&self.0)
    }
}

impl From<Vec<u8>> for DerCertificate {
    fn from(der: Vec<u8>) -> Self {
        Self(der)
    }
}

/// The ordered certificate chain supplied by the TLS layer during one
/// handshake, leaf-first. Read-only and scoped to the handshake.
#[derive(Debug, Clone, Default)]
pub struct PresentedChain(Vec<DerCertificate>);

impl PresentedChain {
    /// Build a chain from leaf-first certificates.
    #[must_use]
    pub fn new(certs: Vec<DerCertificate>) -> Self {
        Self(certs)
    }

    /// Iterate leaf-first.
    pub fn iter(&self) -> impl Iterator<Item = &DerCertificate> {
        self.0.iter()
    }

    /// Number of certificates presented.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the client presented no certificate at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Why a handshake was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// No chain entry matched a provisioned credential.
    CredentialNotFound,
    /// The credential store could not be reached; no alternate trust path.
    StoreUnavailable,
    /// The transport layer could not parse the presented certificate.
    MalformedCertificate,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RejectReason::CredentialNotFound => "credential not found",
            RejectReason::StoreUnavailable => "credential store unavailable",
            RejectReason::MalformedCertificate => "malformed certificate",
        };
        f.write_str(s)
    }
}

/// Result of one handshake's trust evaluation. Never partially accepted;
/// consumed immediately by the TLS layer to complete or abort negotiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthenticationOutcome {
    /// The chain matched a provisioned credential for this device.
    Accepted(DeviceId),
    /// The handshake must be aborted.
    Rejected(RejectReason),
}

impl AuthenticationOutcome {
    /// True when the handshake may complete.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, AuthenticationOutcome::Accepted(_))
    }
}
