//! # Message Routing Subsystem
//!
//! Routes every classified inbound message to the downstream consumer its
//! taxonomy kind designates, and correlates paired request/response kinds.
//!
//! ## Routing Policy
//!
//! The taxonomy's `requires_rule_processing` flag is the single source of
//! truth for the stimulus/bookkeeping split. Stimulus messages go to the
//! rule-engine ingestion port together with the authenticated device id;
//! bookkeeping messages are handled mechanically (correlator, attribute
//! store, outbound bus) without ever touching the rule engine.
//!
//! ## Correlation Contract
//!
//! One outstanding correlation per id; exactly one terminal resolution
//! (answered or expired) per id, even when a response races a timeout;
//! closing a session invalidates its pending correlations immediately.

pub mod correlation;
pub mod dispatch;
pub mod errors;
pub mod ports;

// Re-export public API
pub use correlation::{cleanup_task, CorrelationOutcome, PendingRpcStore};
pub use dispatch::{Disposition, MsgDispatcher};
pub use errors::{CorrelationError, DispatchError};
pub use ports::outbound::{AttributeStoreGateway, MessageBusSink, RuleEngineSink, SinkError};
