//! # Certificate Fingerprinting
//!
//! Deterministic content hash of a certificate's canonical DER encoding,
//! used as the credential lookup key.
//!
//! Two semantically identical certificates supplied through different
//! encodings must resolve to the same fingerprint; that is guaranteed by
//! hashing the canonical DER form, which the TLS layer produces before any
//! bytes reach this crate.

use sha3::{Digest, Sha3_256};

/// Compute the hex-encoded SHA3-256 fingerprint of canonical DER bytes.
///
/// Same input bytes always yield the same fingerprint; distinct
/// certificates yield distinct fingerprints with cryptographic-hash
/// collision resistance.
#[must_use]
pub fn certificate_fingerprint(der: &[u8]) -> String {
    let mut hasher = Sha3_256::new();
    hasher.update(der);
    hex::encode(hasher.finalize())
}
