//! # In-Memory Contract Transport
//!
//! Simulates the remote registry and the signing provider's submission
//! queue for tests and local development. Submitted writes stay invisible
//! until resolved; state is applied at confirmation time, exactly like
//! the real chain. Outcomes can be scripted per submission to exercise
//! revert and failure paths.

use crate::domain::value_objects::{
    AccountAddress, Beneficiary, ContractId, DocumentPointer, SubmissionHandle,
};
use crate::errors::{ReadError, SubmissionError};
use crate::ports::outbound::{
    ContractTransport, ReadRequest, ReadValue, SubmissionOutcome, WriteRequest,
};
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

/// A submitted-but-unresolved write.
#[derive(Clone, Debug)]
struct PendingWrite {
    request: WriteRequest,
    outcome: SubmissionOutcome,
}

/// In-memory stand-in for the deployed registry plus signing provider.
#[derive(Debug, Default)]
pub struct InMemoryContract {
    /// Stored document pointer; empty until first confirmed write.
    will: RwLock<String>,
    /// Registered beneficiaries, in confirmation order.
    beneficiaries: RwLock<Vec<Beneficiary>>,
    /// Approved beneficiary identities.
    approvals: RwLock<Vec<AccountAddress>>,
    /// Death-confirmation flag.
    deceased: AtomicBool,
    /// Distribution flag.
    distributed: AtomicBool,
    /// Writes awaiting resolution, by handle.
    pending: Mutex<HashMap<String, PendingWrite>>,
    /// Scripted outcomes, consumed one per submission.
    planned: Mutex<VecDeque<SubmissionOutcome>>,
    /// When set, every read fails with this transport error.
    read_failure: Mutex<Option<String>>,
    /// When set, every submission is rejected with this message.
    submit_rejection: Mutex<Option<String>>,
    /// Simulated confirmation latency in milliseconds.
    confirmation_delay_ms: u64,
    /// Read attempts.
    reads: AtomicU64,
    /// Accepted submissions.
    submissions: AtomicU64,
    /// Handle sequence.
    seq: AtomicU64,
}

impl InMemoryContract {
    /// Creates an empty registry with a small confirmation latency.
    #[must_use]
    pub fn new() -> Self {
        Self {
            confirmation_delay_ms: 10,
            ..Self::default()
        }
    }

    /// Overrides the simulated confirmation latency.
    #[must_use]
    pub fn with_confirmation_delay(mut self, delay: Duration) -> Self {
        self.confirmation_delay_ms = delay.as_millis() as u64;
        self
    }

    // -------------------------------------------------------------------------
    // Scripting
    // -------------------------------------------------------------------------

    /// The next accepted submission resolves as reverted with the given
    /// reason; its state change is not applied.
    pub fn revert_next(&self, reason: &str) {
        self.planned
            .lock()
            .push_back(SubmissionOutcome::Reverted {
                reason: Some(reason.to_string()),
            });
    }

    /// The next accepted submission resolves as failed with the given
    /// raw error; its state change is not applied.
    pub fn fail_next(&self, error: &str) {
        self.planned.lock().push_back(SubmissionOutcome::Failed {
            error: error.to_string(),
        });
    }

    /// All subsequent reads fail at the transport level.
    pub fn fail_reads(&self, message: &str) {
        *self.read_failure.lock() = Some(message.to_string());
    }

    /// Reads succeed again.
    pub fn restore_reads(&self) {
        *self.read_failure.lock() = None;
    }

    /// All subsequent submissions are rejected before a handle is issued.
    pub fn reject_submissions(&self, message: &str) {
        *self.submit_rejection.lock() = Some(message.to_string());
    }

    /// Submissions are accepted again.
    pub fn restore_submissions(&self) {
        *self.submit_rejection.lock() = None;
    }

    // -------------------------------------------------------------------------
    // State inspection and seeding
    // -------------------------------------------------------------------------

    /// Sets the stored pointer directly, as if written by someone else.
    pub fn seed_will(&self, pointer: &str) {
        *self.will.write() = pointer.to_string();
    }

    /// The stored pointer (empty if never set).
    #[must_use]
    pub fn will(&self) -> String {
        self.will.read().clone()
    }

    /// Registered beneficiaries, in confirmation order.
    #[must_use]
    pub fn beneficiaries(&self) -> Vec<Beneficiary> {
        self.beneficiaries.read().clone()
    }

    /// Approved identities, in confirmation order.
    #[must_use]
    pub fn approvals(&self) -> Vec<AccountAddress> {
        self.approvals.read().clone()
    }

    /// True once a `confirmDeceased` write confirmed.
    #[must_use]
    pub fn is_deceased(&self) -> bool {
        self.deceased.load(Ordering::Relaxed)
    }

    /// True once a `distributeToken` write confirmed.
    #[must_use]
    pub fn is_distributed(&self) -> bool {
        self.distributed.load(Ordering::Relaxed)
    }

    /// Read attempts seen so far (including failed ones).
    #[must_use]
    pub fn read_count(&self) -> u64 {
        self.reads.load(Ordering::Relaxed)
    }

    /// Submissions accepted so far.
    #[must_use]
    pub fn submission_count(&self) -> u64 {
        self.submissions.load(Ordering::Relaxed)
    }

    /// Applies a confirmed write to the registry state.
    fn apply(&self, request: WriteRequest) {
        match request {
            WriteRequest::SetEncryptedWill { pointer } => {
                *self.will.write() = pointer.into_string();
            }
            WriteRequest::AddTokenBeneficiary { beneficiary } => {
                self.beneficiaries.write().push(beneficiary);
            }
            WriteRequest::ApproveIdentity { beneficiary } => {
                self.approvals.write().push(beneficiary);
            }
            WriteRequest::ConfirmDeceased => {
                self.deceased.store(true, Ordering::Relaxed);
            }
            WriteRequest::DistributeToken => {
                self.distributed.store(true, Ordering::Relaxed);
            }
        }
    }
}

#[async_trait]
impl ContractTransport for InMemoryContract {
    async fn read(
        &self,
        _target: &ContractId,
        request: ReadRequest,
    ) -> Result<ReadValue, ReadError> {
        self.reads.fetch_add(1, Ordering::Relaxed);

        if let Some(message) = self.read_failure.lock().clone() {
            return Err(ReadError::Transport(message));
        }

        match request {
            ReadRequest::GetEncryptedWill => Ok(ReadValue::Text(self.will.read().clone())),
        }
    }

    async fn submit(
        &self,
        _target: &ContractId,
        _from: &AccountAddress,
        request: WriteRequest,
    ) -> Result<SubmissionHandle, SubmissionError> {
        if let Some(message) = self.submit_rejection.lock().clone() {
            return Err(SubmissionError::Rejected(message));
        }

        // Outcome is fixed at submission time, like a transaction whose
        // fate is sealed once it is in the provider's queue.
        let outcome = self
            .planned
            .lock()
            .pop_front()
            .unwrap_or(SubmissionOutcome::Confirmed);

        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        let handle = format!("0x{seq:064x}");

        self.pending
            .lock()
            .insert(handle.clone(), PendingWrite { request, outcome });
        self.submissions.fetch_add(1, Ordering::Relaxed);

        Ok(SubmissionHandle::new(handle))
    }

    async fn await_resolution(&self, handle: &SubmissionHandle) -> SubmissionOutcome {
        tokio::time::sleep(Duration::from_millis(self.confirmation_delay_ms)).await;

        let Some(write) = self.pending.lock().remove(handle.as_str()) else {
            return SubmissionOutcome::Failed {
                error: format!("unknown submission handle: {handle}"),
            };
        };

        if matches!(write.outcome, SubmissionOutcome::Confirmed) {
            self.apply(write.request);
        }
        write.outcome
    }
}

// =============================================================================
// TESTS
// =============================================================================
