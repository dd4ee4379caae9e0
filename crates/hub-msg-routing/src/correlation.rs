//! # Pending RPC Correlation Store
//!
//! Maps caller-supplied correlation ids to the sessions waiting for a
//! response.
//!
//! Flow:
//! 1. A request-kind message arrives carrying a correlation id.
//! 2. The dispatch layer calls `register()` and hands the receiver to
//!    whoever awaits the answer.
//! 3. The matching response-kind message arrives and `complete()` delivers
//!    `Answered`.
//! 4. If no response arrives inside the timeout, the cleanup pass delivers
//!    `Expired` instead.
//!
//! Exactly one of steps 3 and 4 happens per id: both paths claim the entry
//! through `DashMap::remove`, so a response racing a timeout can never
//! produce two terminal resolutions.

use crate::errors::CorrelationError;
use dashmap::DashMap;
use shared_types::{CorrelationId, SessionId};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// The single terminal resolution of a correlation.
#[derive(Debug, PartialEq, Eq)]
pub enum CorrelationOutcome {
    /// The matching response arrived in time.
    Answered {
        /// Opaque response payload.
        payload: Vec<u8>,
    },
    /// No response arrived before the timeout, or the session closed.
    Expired,
}

/// A registered request waiting for its response.
struct PendingCorrelation {
    /// Channel delivering the terminal resolution.
    sender: oneshot::Sender<CorrelationOutcome>,
    /// The session that originated the request.
    session_id: SessionId,
    /// When the request was registered.
    created_at: Instant,
    /// How long it may stay unanswered.
    timeout: Duration,
}

/// Counters for the correlation store.
#[derive(Debug, Default)]
pub struct CorrelationStats {
    /// Total requests registered.
    pub total_registered: AtomicU64,
    /// Total requests answered.
    pub total_answered: AtomicU64,
    /// Total requests expired (timeout or session close).
    pub total_expired: AtomicU64,
    /// Responses with no matching pending request.
    pub total_orphaned: AtomicU64,
}

/// Shared table of pending correlations, keyed by correlation id.
///
/// Mutation is atomic per id: insert-on-request claims the id, and
/// remove-on-response-or-timeout claims the entry, so concurrent delivery
/// of a response and an expiry resolves exactly once.
pub struct PendingRpcStore {
    /// Map of correlation id to pending request.
    pending: DashMap<CorrelationId, PendingCorrelation>,
    /// Timeout applied when `register` is not given one.
    default_timeout: Duration,
    /// Statistics
    stats: Arc<CorrelationStats>,
}

impl PendingRpcStore {
    /// Create a new store with the given default timeout.
    #[must_use]
    pub fn new(default_timeout: Duration) -> Self {
        Self {
            pending: DashMap::new(),
            default_timeout,
            stats: Arc::new(CorrelationStats::default()),
        }
    }

    /// Register a pending request under a caller-supplied correlation id.
    ///
    /// Returns a receiver that resolves to exactly one
    /// [`CorrelationOutcome`].
    ///
    /// # Errors
    /// * `CorrelationError::AlreadyPending` - the id already has an
    ///   outstanding request
    pub fn register(
        &self,
        session_id: SessionId,
        correlation_id: CorrelationId,
        timeout: Option<Duration>,
    ) -> Result<oneshot::Receiver<CorrelationOutcome>, CorrelationError> {
        let (tx, rx) = oneshot::channel();
        let request = PendingCorrelation {
            sender: tx,
            session_id,
            created_at: Instant::now(),
            timeout: timeout.unwrap_or(self.default_timeout),
        };

        match self.pending.entry(correlation_id) {
            dashmap::Entry::Occupied(_) => {
                return Err(CorrelationError::AlreadyPending(correlation_id));
            }
            dashmap::Entry::Vacant(slot) => {
                slot.insert(request);
            }
        }
        self.stats.total_registered.fetch_add(1, Ordering::Relaxed);

        debug!(
            correlation_id = %correlation_id,
            session_id = %session_id,
            "Registered pending correlation"
        );

        Ok(rx)
    }

    /// Deliver a response for a pending correlation.
    ///
    /// Returns `true` if the entry existed and `Answered` was delivered.
    /// A response with no matching entry is an orphaned response: reported
    /// here and discarded by the caller.
    pub fn complete(&self, correlation_id: CorrelationId, payload: Vec<u8>) -> bool {
        if let Some((_, pending)) = self.pending.remove(&correlation_id) {
            let waited = pending.created_at.elapsed();
            match pending.sender.send(CorrelationOutcome::Answered { payload }) {
                Ok(()) => {
                    self.stats.total_answered.fetch_add(1, Ordering::Relaxed);
                    debug!(
                        correlation_id = %correlation_id,
                        waited_ms = waited.as_millis(),
                        "Correlation answered"
                    );
                    true
                }
                Err(_) => {
                    // Receiver already gone; the requester stopped waiting.
                    debug!(
                        correlation_id = %correlation_id,
                        "Correlation receiver dropped before answer"
                    );
                    false
                }
            }
        } else {
            self.stats.total_orphaned.fetch_add(1, Ordering::Relaxed);
            warn!(
                correlation_id = %correlation_id,
                "Orphaned response: no matching pending correlation"
            );
            false
        }
    }

    /// Expire entries past their deadline, delivering `Expired` to each
    /// originating session. Returns the number expired.
    pub fn remove_expired(&self) -> usize {
        let now = Instant::now();
        let expired: Vec<CorrelationId> = self
            .pending
            .iter()
            .filter(|entry| now.duration_since(entry.created_at) > entry.timeout)
            .map(|entry| *entry.key())
            .collect();

        let mut removed = 0;
        for id in expired {
            // remove() re-checks under the shard lock; an entry answered
            // since the scan is simply gone.
            if let Some((_, pending)) = self.pending.remove(&id) {
                warn!(
                    correlation_id = %id,
                    session_id = %pending.session_id,
                    timeout_ms = pending.timeout.as_millis(),
                    "Correlation expired unanswered"
                );
                self.stats.total_expired.fetch_add(1, Ordering::Relaxed);
                let _ = pending.sender.send(CorrelationOutcome::Expired);
                removed += 1;
            }
        }
        removed
    }

    /// Expire all pending correlations for a closing session immediately,
    /// without waiting for their timeouts. Returns the number invalidated.
    pub fn invalidate_session(&self, session_id: SessionId) -> usize {
        let ids: Vec<CorrelationId> = self
            .pending
            .iter()
            .filter(|entry| entry.session_id == session_id)
            .map(|entry| *entry.key())
            .collect();

        let mut invalidated = 0;
        for id in ids {
            if let Some((_, pending)) = self.pending.remove(&id) {
                debug!(
                    correlation_id = %id,
                    session_id = %session_id,
                    "Correlation invalidated by session close"
                );
                self.stats.total_expired.fetch_add(1, Ordering::Relaxed);
                let _ = pending.sender.send(CorrelationOutcome::Expired);
                invalidated += 1;
            }
        }
        invalidated
    }

    /// Number of currently pending correlations.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Whether an id currently has an outstanding request.
    #[must_use]
    pub fn is_pending(&self, correlation_id: &CorrelationId) -> bool {
        self.pending.contains_key(correlation_id)
    }

    /// Store counters.
    #[must_use]
    pub fn stats(&self) -> &CorrelationStats {
        &self.stats
    }
}

/// Background task expiring overdue correlations.
///
/// The timeout clock itself is a collaborator concern; this loop is the
/// in-process implementation of it.
pub async fn cleanup_task(store: Arc<PendingRpcStore>, interval: Duration) {
    let mut cleanup_interval = tokio::time::interval(interval);
    cleanup_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        cleanup_interval.tick().await;
        let removed = store.remove_expired();
        if removed > 0 {
            debug!(removed = removed, "Expired pending correlations");
        }
    }
}
