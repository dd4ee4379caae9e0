//! # Connection Handlers
//!
//! The per-session flow driven by transport adapters.

pub mod session;

pub use session::{DeviceSession, SessionError, SessionHandler};
