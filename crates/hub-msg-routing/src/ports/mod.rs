//! # Ports Layer
//!
//! Trait seams to the downstream sinks this subsystem feeds.

pub mod outbound;
