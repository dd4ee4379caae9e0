//! Cross-subsystem integration flows.

pub mod authentication;
pub mod classification;
pub mod correlation_flows;
