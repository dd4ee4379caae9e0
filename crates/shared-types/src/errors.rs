//! # Error Types
//!
//! Protocol-contract violations shared across subsystem crates.

use thiserror::Error;

/// A transport adapter broke the protocol contract.
///
/// These are malformed-message errors: the offending frame is rejected, not
/// silently coerced into a bookkeeping kind (which would risk dropping
/// rule-relevant traffic).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProtocolViolation {
    /// A message kind name outside the closed taxonomy reached the
    /// classifier.
    #[error("Unknown message kind: {name}")]
    UnknownMsgKind { name: String },

    /// A paired request/response kind arrived without its correlation id.
    #[error("Missing correlation id for {kind}")]
    MissingCorrelationId { kind: String },

    /// The correlation id on the wire could not be parsed.
    #[error("Malformed correlation id: {raw}")]
    MalformedCorrelationId { raw: String },
}
