//! # Driven Ports (Outbound)
//!
//! Interfaces the client depends on. Adapters implement these traits to
//! reach the two external collaborators:
//!
//! - the ambient **wallet provider** (authorization + signing), and
//! - the **remote contract** behind it (reads, write submissions, and
//!   resolution of submitted writes).
//!
//! Dependencies point inward: the client core never touches a concrete
//! provider, only these traits.

use crate::domain::entities::OperationKind;
use crate::domain::value_objects::{
    AccountAddress, Beneficiary, ContractId, DocumentPointer, SubmissionHandle,
};
use crate::errors::{ReadError, SessionError, SubmissionError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// =============================================================================
// CALL PAYLOADS (fixed remote interface surface)
// =============================================================================

/// Read calls of the remote interface, one variant per view method.
///
/// The remote surface is versioned and closed, so this is a plain enum
/// rather than an open trait hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadRequest {
    /// `getEncryptedWill() -> string`
    GetEncryptedWill,
}

impl ReadRequest {
    /// Remote interface method name.
    #[must_use]
    pub fn method_name(&self) -> &'static str {
        match self {
            Self::GetEncryptedWill => "getEncryptedWill",
        }
    }
}

/// Decoded return value of a read call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadValue {
    /// A string-typed return, verbatim as the remote returned it.
    Text(String),
}

/// Write calls of the remote interface, one variant per state-changing
/// method, carrying already-validated arguments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WriteRequest {
    /// `setEncryptedWill(string)`
    SetEncryptedWill {
        /// Pointer to the encrypted off-chain document.
        pointer: DocumentPointer,
    },
    /// `addTokenBeneficiary(address, uint256)`
    AddTokenBeneficiary {
        /// Recipient and share to register.
        beneficiary: Beneficiary,
    },
    /// `approveIdentity(address)`
    ApproveIdentity {
        /// Beneficiary whose identity is approved.
        beneficiary: AccountAddress,
    },
    /// `confirmDeceased()`
    ConfirmDeceased,
    /// `distributeToken()`
    DistributeToken,
}

impl WriteRequest {
    /// The operation kind this request belongs to.
    #[must_use]
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::SetEncryptedWill { .. } => OperationKind::SetEncryptedWill,
            Self::AddTokenBeneficiary { .. } => OperationKind::AddTokenBeneficiary,
            Self::ApproveIdentity { .. } => OperationKind::ApproveIdentity,
            Self::ConfirmDeceased => OperationKind::ConfirmDeceased,
            Self::DistributeToken => OperationKind::DistributeToken,
        }
    }

    /// Remote interface method name.
    #[must_use]
    pub fn method_name(&self) -> &'static str {
        self.kind().method_name()
    }
}

// =============================================================================
// SUBMISSION OUTCOME
// =============================================================================

/// Terminal resolution of a submitted write, as reported by the provider.
///
/// Exactly one of these is produced per submission handle. The client
/// reports the diagnostic payloads verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionOutcome {
    /// Included and executed successfully.
    Confirmed,
    /// Rejected by a contract business rule.
    Reverted {
        /// Decoded revert reason, when the provider could supply one.
        reason: Option<String>,
    },
    /// Transport or provider failure after submission.
    Failed {
        /// Raw provider error.
        error: String,
    },
}

// =============================================================================
// WALLET PROVIDER (authorization)
// =============================================================================

/// Interface to the ambient wallet's authorization surface.
///
/// `request_authorization` suspends until the human approves or rejects
/// the request in the wallet UI. Implementations must not queue multiple
/// outstanding requests on behalf of the client; the session layer
/// already guarantees at most one is in flight.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Ask the wallet for an authorized signing account.
    ///
    /// # Errors
    ///
    /// * [`SessionError::NoProvider`] - no wallet is installed/reachable
    /// * [`SessionError::UserRejected`] - the human declined
    async fn request_authorization(&self) -> Result<AccountAddress, SessionError>;
}

// =============================================================================
// CONTRACT TRANSPORT (reads, submissions, resolutions)
// =============================================================================

/// Interface to the remote contract through the signing provider.
///
/// Writes are two-phase at this boundary: `submit` only obtains a pending
/// handle, and `await_resolution` suspends until that handle reaches a
/// terminal outcome. The provider serializes nonce ordering; the client
/// submits one write at a time and draws no ordering conclusions beyond
/// that.
#[async_trait]
pub trait ContractTransport: Send + Sync {
    /// Execute a read call and decode its return value.
    ///
    /// # Errors
    ///
    /// [`ReadError`] on transport failure or an undecodable response.
    async fn read(&self, target: &ContractId, request: ReadRequest)
        -> Result<ReadValue, ReadError>;

    /// Sign and submit a write, returning its pending handle.
    ///
    /// Does not wait for confirmation.
    ///
    /// # Errors
    ///
    /// [`SubmissionError`] if the provider refuses to sign, the arguments
    /// are rejected, or the transport drops before a handle is issued.
    async fn submit(
        &self,
        target: &ContractId,
        from: &AccountAddress,
        request: WriteRequest,
    ) -> Result<SubmissionHandle, SubmissionError>;

    /// Suspend until the handle resolves, and classify the outcome.
    ///
    /// Infallible by design: a transport failure while waiting is itself
    /// an outcome ([`SubmissionOutcome::Failed`]), not an error.
    async fn await_resolution(&self, handle: &SubmissionHandle) -> SubmissionOutcome;
}

// =============================================================================
// TESTS
// =============================================================================
