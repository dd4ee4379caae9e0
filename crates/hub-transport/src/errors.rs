//! # Transport Decode Errors

use shared_types::ProtocolViolation;
use thiserror::Error;

/// A frame could not be mapped onto the taxonomy.
///
/// Surfaced to the adapter as a malformed-message rejection; the frame is
/// never coerced into a bookkeeping kind.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The frame violated the taxonomy's protocol contract.
    #[error(transparent)]
    Protocol(#[from] ProtocolViolation),

    /// No decode rule matches this frame.
    #[error("Unroutable {protocol} frame: {detail}")]
    Unroutable {
        /// Which protocol produced the frame.
        protocol: &'static str,
        /// Human-readable description of the offending frame.
        detail: String,
    },
}
