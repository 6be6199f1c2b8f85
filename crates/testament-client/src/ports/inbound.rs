//! # Driving Ports (Inbound)
//!
//! The public API surface the presentation layer calls. The presentation
//! layer renders returned values and errors; it imposes nothing else on
//! the core.

use crate::domain::entities::{MirrorValue, TransactionRecord};
use crate::domain::value_objects::AccountAddress;
use crate::errors::{ClientError, SessionError};
use async_trait::async_trait;
use uuid::Uuid;

/// Primary API of the Testament client.
///
/// String-typed inputs (addresses, shares, pointers) arrive as the raw
/// text a human entered; validation happens inside the client, before
/// anything reaches a port. Write operations return a `Pending` snapshot
/// immediately; terminal outcomes are observed via [`Self::await_outcome`]
/// or the record accessors.
#[async_trait]
pub trait TestamentApi: Send + Sync {
    /// Request wallet authorization and establish the signing identity.
    ///
    /// Suspends until the human approves or rejects.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoProvider`], [`SessionError::UserRejected`], or
    /// [`SessionError::AlreadyConnecting`] when a negotiation is already
    /// outstanding.
    async fn connect(&self) -> Result<AccountAddress, SessionError>;

    /// Clear the signing identity. Idempotent.
    fn disconnect(&self);

    /// The active signing identity, if connected.
    fn current_identity(&self) -> Option<AccountAddress>;

    /// Store the encrypted-will document pointer on-chain.
    ///
    /// # Errors
    ///
    /// Validation, session, or submission failure. A handle that was
    /// obtained never surfaces here; its fate lives on the record.
    async fn store_will(&self, pointer: &str) -> Result<TransactionRecord, ClientError>;

    /// Read the stored document pointer directly from the contract and
    /// refresh the mirror with it.
    ///
    /// # Errors
    ///
    /// [`ClientError::Read`] on transport failure or a malformed response.
    async fn fetch_will(&self) -> Result<String, ClientError>;

    /// Last-observed document pointer, served from the mirror without
    /// any remote call. Never suspends.
    fn stored_will(&self) -> MirrorValue;

    /// Register a beneficiary with its share.
    ///
    /// # Errors
    ///
    /// Validation, session, or submission failure.
    async fn add_beneficiary(
        &self,
        recipient: &str,
        share: &str,
    ) -> Result<TransactionRecord, ClientError>;

    /// Approve a beneficiary's identity.
    ///
    /// # Errors
    ///
    /// Validation, session, or submission failure.
    async fn approve_identity(&self, beneficiary: &str) -> Result<TransactionRecord, ClientError>;

    /// Confirm the testator's death.
    ///
    /// # Errors
    ///
    /// Session or submission failure.
    async fn confirm_deceased(&self) -> Result<TransactionRecord, ClientError>;

    /// Trigger distribution to approved beneficiaries.
    ///
    /// # Errors
    ///
    /// Session or submission failure.
    async fn distribute_token(&self) -> Result<TransactionRecord, ClientError>;

    /// Snapshot of one transaction record.
    async fn record(&self, id: Uuid) -> Option<TransactionRecord>;

    /// Snapshots of all transaction records, newest first.
    async fn records(&self) -> Vec<TransactionRecord>;

    /// Suspend until the record reaches a terminal status and return the
    /// final snapshot.
    ///
    /// # Errors
    ///
    /// [`ClientError::UnknownRecord`] if no such record exists.
    async fn await_outcome(&self, id: Uuid) -> Result<TransactionRecord, ClientError>;
}
