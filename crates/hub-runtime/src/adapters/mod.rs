//! # Port Adapters
//!
//! Concrete implementations of the outbound ports the core services
//! depend on: the credential store behind the authenticator and the
//! downstream sinks behind the dispatcher.

pub mod credential_store;
pub mod sinks;

pub use credential_store::InMemoryCredentialStore;
pub use sinks::{
    ChannelMessageBus, ChannelRuleEngineSink, DeviceMessage, InMemoryAttributeRegistry,
};
