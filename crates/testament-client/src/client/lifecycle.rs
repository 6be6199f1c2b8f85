//! # Transaction Lifecycle Manager
//!
//! Tracks every submitted write from `Pending` to exactly one terminal
//! status, triggers mirror refreshes for confirmed writes, and reports
//! outcomes to event subscribers.
//!
//! Nothing here retries: a reverted or failed write is a terminal,
//! reported outcome, and a resubmission is a brand-new record. Once a
//! handle exists the write will reach a terminal state on its own; the
//! manager only observes it.

use crate::client::mirror::StateMirror;
use crate::client::now_ms;
use crate::client::proxy::ContractProxy;
use crate::domain::entities::{OperationKind, TransactionRecord, TransactionStatus};
use crate::domain::value_objects::SubmissionHandle;
use crate::errors::ClientError;
use crate::events::ClientEvent;
use crate::ports::outbound::{ContractTransport, SubmissionOutcome};
use crate::service::ClientStats;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::warn;
use uuid::Uuid;

/// Tracks submitted writes through their lifecycle.
///
/// Records are owned exclusively by this manager; every accessor hands
/// out clones. Multiple pending records may coexist and are never
/// reordered here; sequencing is the signing provider's concern.
pub struct TransactionLifecycleManager<T> {
    /// Proxy used by watcher tasks to await resolutions.
    proxy: Arc<ContractProxy<T>>,
    /// Mirror refreshed after confirmed writes.
    mirror: Arc<StateMirror<T>>,
    /// Record table.
    records: Arc<RwLock<HashMap<Uuid, TransactionRecord>>>,
    /// Submission order, oldest first.
    order: Arc<RwLock<VecDeque<Uuid>>>,
    /// Outcome notifications.
    events: broadcast::Sender<ClientEvent>,
    /// Terminal-outcome counters, shared with the service.
    stats: Arc<RwLock<ClientStats>>,
    /// Retention cap; terminal records beyond it are evicted oldest
    /// first. Pending records are never evicted.
    max_records: usize,
}

impl<T: ContractTransport + 'static> TransactionLifecycleManager<T> {
    /// Creates a manager wired to the given proxy, mirror, and event
    /// channel.
    pub fn new(
        proxy: Arc<ContractProxy<T>>,
        mirror: Arc<StateMirror<T>>,
        events: broadcast::Sender<ClientEvent>,
        stats: Arc<RwLock<ClientStats>>,
        max_records: usize,
    ) -> Self {
        Self {
            proxy,
            mirror,
            records: Arc::new(RwLock::new(HashMap::new())),
            order: Arc::new(RwLock::new(VecDeque::new())),
            events,
            stats,
            max_records,
        }
    }

    /// Registers a freshly submitted write and starts watching its
    /// resolution. Returns the `Pending` snapshot immediately.
    pub async fn track(
        &self,
        kind: OperationKind,
        handle: SubmissionHandle,
    ) -> TransactionRecord {
        let record = TransactionRecord::new(kind, handle.clone(), now_ms());

        {
            let mut records = self.records.write().await;
            let mut order = self.order.write().await;
            records.insert(record.id, record.clone());
            order.push_back(record.id);
            Self::evict_over_cap(&mut records, &mut order, self.max_records);
        }

        // Emitted before the watcher exists, so subscribers always see
        // the submission before its terminal event.
        let _ = self.events.send(ClientEvent::WriteSubmitted {
            record_id: record.id,
            kind,
        });

        self.spawn_watcher(record.id, kind, handle);
        record
    }

    /// Snapshot of one record.
    pub async fn record(&self, id: Uuid) -> Option<TransactionRecord> {
        self.records.read().await.get(&id).cloned()
    }

    /// Snapshots of all records, newest first.
    pub async fn records(&self) -> Vec<TransactionRecord> {
        let records = self.records.read().await;
        let order = self.order.read().await;
        order
            .iter()
            .rev()
            .filter_map(|id| records.get(id).cloned())
            .collect()
    }

    /// Suspends until the record reaches a terminal status.
    ///
    /// When this returns `Ok`, any mirror refresh owed by the outcome has
    /// already been applied.
    ///
    /// # Errors
    ///
    /// [`ClientError::UnknownRecord`] if no such record exists.
    pub async fn await_outcome(&self, id: Uuid) -> Result<TransactionRecord, ClientError> {
        let mut rx = self.events.subscribe();
        loop {
            match self.record(id).await {
                None => return Err(ClientError::UnknownRecord(id)),
                Some(record) if record.status.is_terminal() => return Ok(record),
                Some(_) => {}
            }
            match rx.recv().await {
                Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => {}
                Err(broadcast::error::RecvError::Closed) => {
                    return Err(ClientError::Internal("event channel closed".to_string()));
                }
            }
        }
    }

    /// Watches one handle to resolution in a background task, so a
    /// pending confirmation wait never blocks unrelated operations.
    fn spawn_watcher(&self, id: Uuid, kind: OperationKind, handle: SubmissionHandle) {
        let proxy = Arc::clone(&self.proxy);
        let mirror = Arc::clone(&self.mirror);
        let records = Arc::clone(&self.records);
        let events = self.events.clone();
        let stats = Arc::clone(&self.stats);

        tokio::spawn(async move {
            let outcome = proxy.await_resolution(&handle).await;

            // A confirmed write invalidates its field; refresh the mirror
            // before the record turns terminal so that an await_outcome
            // caller observes the refreshed value.
            if matches!(outcome, SubmissionOutcome::Confirmed) {
                if let Some(field) = kind.affected_field() {
                    match mirror.refresh(field).await {
                        Ok(_) => {
                            let _ = events.send(ClientEvent::MirrorRefreshed { field });
                        }
                        Err(err) => {
                            warn!(record_id = %id, error = %err, "mirror refresh after confirmation failed");
                        }
                    }
                }
            }

            let status = match &outcome {
                SubmissionOutcome::Confirmed => TransactionStatus::Confirmed,
                SubmissionOutcome::Reverted { reason } => TransactionStatus::Reverted {
                    reason: reason.clone(),
                },
                SubmissionOutcome::Failed { error } => TransactionStatus::Failed {
                    error: error.clone(),
                },
            };

            {
                let mut records = records.write().await;
                match records.get_mut(&id) {
                    Some(record) => {
                        if let Err(err) = record.complete(status) {
                            warn!(record_id = %id, error = err, "dropping duplicate resolution");
                            return;
                        }
                    }
                    None => {
                        warn!(record_id = %id, "record missing at resolution");
                        return;
                    }
                }
            }

            {
                let mut stats = stats.write().await;
                match &outcome {
                    SubmissionOutcome::Confirmed => stats.writes_confirmed += 1,
                    SubmissionOutcome::Reverted { .. } => stats.writes_reverted += 1,
                    SubmissionOutcome::Failed { .. } => stats.writes_failed += 1,
                }
            }

            let event = match outcome {
                SubmissionOutcome::Confirmed => ClientEvent::WriteConfirmed {
                    record_id: id,
                    kind,
                },
                SubmissionOutcome::Reverted { reason } => ClientEvent::WriteReverted {
                    record_id: id,
                    kind,
                    reason,
                },
                SubmissionOutcome::Failed { error } => ClientEvent::WriteFailed {
                    record_id: id,
                    kind,
                    error,
                },
            };
            let _ = events.send(event);
        });
    }

    /// Evicts the oldest terminal records once the table exceeds the cap.
    fn evict_over_cap(
        records: &mut HashMap<Uuid, TransactionRecord>,
        order: &mut VecDeque<Uuid>,
        max_records: usize,
    ) {
        while records.len() > max_records {
            let Some(pos) = order
                .iter()
                .position(|id| records.get(id).is_some_and(|r| r.status.is_terminal()))
            else {
                // Everything over the cap is still pending; keep it all.
                break;
            };
            if let Some(id) = order.remove(pos) {
                records.remove(&id);
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
