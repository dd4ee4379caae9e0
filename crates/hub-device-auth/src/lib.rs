//! # Device Authentication Subsystem
//!
//! Decides, for an X.509 certificate chain presented during a TLS
//! handshake, whether it belongs to a provisioned device. There is no
//! implicit trust and no default-allow path: a device is trusted because its
//! specific certificate was provisioned, not because a recognized authority
//! signed it.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): fingerprinting and outcome types, no I/O
//! - **Ports Layer** (`ports/`): trait definitions for inbound/outbound interfaces
//! - **Service Layer** (`service.rs`): wires domain logic to ports
//!
//! ## Security Notes
//!
//! - **Fail-Closed**: a missing store entry, a store error, or any failure
//!   during resolution collapses to `Rejected`, never `Accepted`.
//! - **No Key Material in Logs**: only fingerprints are logged, never
//!   certificate contents.
//! - **TLS-Stack Agnostic**: `authenticate` has no dependency on a
//!   particular TLS implementation; any stack with a pluggable
//!   client-certificate verification hook can call it.

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::entities::{
    AuthenticationOutcome, DerCertificate, PresentedChain, RejectReason,
};
pub use domain::errors::CredentialStoreError;
pub use domain::fingerprint::certificate_fingerprint;
pub use ports::inbound::DeviceAuthenticatorApi;
pub use ports::outbound::CredentialStore;
pub use service::DeviceAuthenticator;
