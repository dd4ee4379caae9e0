//! # Hub Runtime Library
//!
//! This library exposes the internal modules of the hub runtime for
//! testing. The main entry point is the `main.rs` binary.
//!
//! ## Architectural Patterns
//!
//! - **Hexagonal Architecture**: Ports define contracts, Adapters implement them
//! - **Explicit Construction**: services are wired once at startup with
//!   their collaborators passed explicitly; no ambient globals
//! - **Fail-Closed**: an unauthenticated connection never reaches dispatch

pub mod adapters;
pub mod container;
pub mod handlers;

pub use container::{GatewayContainer, HubChannels, HubConfig};
pub use handlers::{DeviceSession, SessionError, SessionHandler};
