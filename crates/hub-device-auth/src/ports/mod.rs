//! # Ports Layer
//!
//! Trait seams between this subsystem and its collaborators.

pub mod inbound;
pub mod outbound;
