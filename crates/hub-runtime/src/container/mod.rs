//! # Service Container
//!
//! Configuration and explicit construction of the hub's core services.

pub mod config;
pub mod services;

pub use config::{BusConfig, CorrelationConfig, HubConfig, NetworkConfig};
pub use services::{GatewayContainer, HubChannels, HubDispatcher};
