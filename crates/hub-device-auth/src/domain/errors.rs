//! # Authentication Errors
//!
//! Failures surfaced by the credential store collaborator.

use thiserror::Error;

/// Error from the credential store.
///
/// "Not found" is NOT an error here; it is the `None` lookup result. This
/// type covers only conditions where the store could not answer at all,
/// which must abort the handshake (fail-closed).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialStoreError {
    /// The store could not be reached or did not answer in time.
    #[error("Credential store unavailable: {0}")]
    Unavailable(String),
}
