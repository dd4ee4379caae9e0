//! # Shared Types Crate
//!
//! Cross-crate domain entities for the IoT hub: device and session
//! identities, provisioned credential records, the closed message
//! taxonomy, and the classified-message envelope produced by the
//! transport adapters.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every type consumed by more than one
//!   subsystem crate is defined here, so the CoAP and MQTT adapters can
//!   never disagree on what a message kind means.
//! - **Closed Taxonomy**: `MsgKind` is an exhaustively-matched enum; a new
//!   kind cannot be added without declaring its rule-processing flag in the
//!   same change.

pub mod entities;
pub mod errors;
pub mod message;
pub mod taxonomy;

pub use entities::{DeviceCredentials, DeviceId, SessionId};
pub use errors::ProtocolViolation;
pub use message::{ClassifiedMessage, CorrelationId};
pub use taxonomy::MsgKind;
