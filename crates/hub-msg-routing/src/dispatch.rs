//! # Message Dispatcher
//!
//! The dispatch-policy table: one routing decision per classified message,
//! driven entirely by the taxonomy.
//!
//! | Kind class | Route |
//! |---|---|
//! | `requires_rule_processing()` | rule-engine ingestion (+ device id) |
//! | `ToDeviceRpcResponse` | correlation store (`complete`) |
//! | `SessionClose` | invalidate session correlations, then bus |
//! | attribute (un)subscribe | attribute-store gateway |
//! | remaining bookkeeping | outbound message bus |

use crate::correlation::PendingRpcStore;
use crate::errors::DispatchError;
use crate::ports::outbound::{AttributeStoreGateway, MessageBusSink, RuleEngineSink};
use shared_types::{ClassifiedMessage, DeviceId, MsgKind, ProtocolViolation};
use std::sync::Arc;
use tracing::{debug, info};

/// Where a message ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Handed to the rule engine.
    RuleEngine,
    /// Matched and answered a pending correlation.
    Answered,
    /// Response with no matching pending request; reported and discarded.
    OrphanDiscarded,
    /// Subscription change applied at the attribute store.
    AttributeStore,
    /// Published to the outbound message bus.
    MessageBus,
    /// Session closed; carries the number of correlations invalidated.
    SessionClosed(usize),
}

/// Routes classified messages to downstream sinks.
///
/// Constructed once at process start with its collaborators passed
/// explicitly, then shared read-only across all message-handling contexts.
pub struct MsgDispatcher<R, A, B>
where
    R: RuleEngineSink,
    A: AttributeStoreGateway,
    B: MessageBusSink,
{
    rule_engine: R,
    attributes: A,
    bus: B,
    correlations: Arc<PendingRpcStore>,
}

impl<R, A, B> MsgDispatcher<R, A, B>
where
    R: RuleEngineSink,
    A: AttributeStoreGateway,
    B: MessageBusSink,
{
    /// Create a new dispatcher.
    pub fn new(rule_engine: R, attributes: A, bus: B, correlations: Arc<PendingRpcStore>) -> Self {
        Self {
            rule_engine,
            attributes,
            bus,
            correlations,
        }
    }

    /// The shared correlation store, for transports registering requests.
    #[must_use]
    pub fn correlations(&self) -> &Arc<PendingRpcStore> {
        &self.correlations
    }

    /// Route one classified message from an authenticated device.
    ///
    /// # Errors
    /// * `DispatchError::Protocol` - the message violates the taxonomy
    ///   contract (e.g. an RPC response without a correlation id)
    /// * `DispatchError::RuleEngine` / `AttributeStore` / `MessageBus` -
    ///   the designated sink failed; never retried here
    pub async fn dispatch(
        &self,
        device_id: DeviceId,
        msg: ClassifiedMessage,
    ) -> Result<Disposition, DispatchError> {
        debug!(
            kind = %msg.kind,
            device_id = %device_id,
            session_id = %msg.session_id,
            "Dispatching message"
        );

        if msg.kind.requires_rule_processing() {
            self.rule_engine
                .ingest(device_id, msg)
                .await
                .map_err(DispatchError::RuleEngine)?;
            return Ok(Disposition::RuleEngine);
        }

        match msg.kind {
            MsgKind::ToDeviceRpcResponse => {
                let id = msg.correlation_id.ok_or_else(|| {
                    ProtocolViolation::MissingCorrelationId {
                        kind: msg.kind.to_string(),
                    }
                })?;
                if self.correlations.complete(id, msg.payload) {
                    Ok(Disposition::Answered)
                } else {
                    Ok(Disposition::OrphanDiscarded)
                }
            }
            MsgKind::SessionClose => {
                let invalidated = self.correlations.invalidate_session(msg.session_id);
                if invalidated > 0 {
                    info!(
                        session_id = %msg.session_id,
                        invalidated,
                        "Session closed with pending correlations"
                    );
                }
                self.bus
                    .publish(device_id, msg)
                    .await
                    .map_err(DispatchError::MessageBus)?;
                Ok(Disposition::SessionClosed(invalidated))
            }
            MsgKind::SubscribeAttributes => {
                self.attributes
                    .subscribe(device_id, msg.session_id)
                    .await
                    .map_err(DispatchError::AttributeStore)?;
                Ok(Disposition::AttributeStore)
            }
            MsgKind::UnsubscribeAttributes => {
                self.attributes
                    .unsubscribe(device_id, msg.session_id)
                    .await
                    .map_err(DispatchError::AttributeStore)?;
                Ok(Disposition::AttributeStore)
            }
            // Remaining bookkeeping kinds flow to the outbound bus.
            _ => {
                self.bus
                    .publish(device_id, msg)
                    .await
                    .map_err(DispatchError::MessageBus)?;
                Ok(Disposition::MessageBus)
            }
        }
    }
}
