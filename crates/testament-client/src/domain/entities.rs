//! # Domain Entities
//!
//! The transaction record state machine and the mirrored-state model.
//!
//! A submitted write is tracked by a [`TransactionRecord`] whose status
//! moves exactly once out of `Pending` and never again afterwards:
//!
//! ```text
//! [Pending] ──→ [Confirmed]
//!     │
//!     ├───────→ [Reverted { reason }]
//!     └───────→ [Failed { error }]
//! ```

use crate::domain::value_objects::SubmissionHandle;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Timestamp in milliseconds since UNIX epoch.
pub type Timestamp = u64;

// =============================================================================
// OPERATION KIND
// =============================================================================

/// The closed set of state-changing operations on the remote registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    /// Store the encrypted-will document pointer.
    SetEncryptedWill,
    /// Register a beneficiary with its share.
    AddTokenBeneficiary,
    /// Approve a beneficiary's identity.
    ApproveIdentity,
    /// Confirm the testator's death.
    ConfirmDeceased,
    /// Trigger token distribution to approved beneficiaries.
    DistributeToken,
}

impl OperationKind {
    /// Remote interface method this operation maps to.
    #[must_use]
    pub fn method_name(&self) -> &'static str {
        match self {
            Self::SetEncryptedWill => "setEncryptedWill",
            Self::AddTokenBeneficiary => "addTokenBeneficiary",
            Self::ApproveIdentity => "approveIdentity",
            Self::ConfirmDeceased => "confirmDeceased",
            Self::DistributeToken => "distributeToken",
        }
    }

    /// Readable contract field a confirmed write of this kind invalidates.
    ///
    /// Returns `None` for operations whose effects are not readable
    /// through this interface version.
    #[must_use]
    pub fn affected_field(&self) -> Option<StateField> {
        match self {
            Self::SetEncryptedWill => Some(StateField::EncryptedWill),
            _ => None,
        }
    }
}

// =============================================================================
// TRANSACTION STATUS
// =============================================================================

/// Lifecycle status of a submitted write.
///
/// `Pending` is the only non-terminal status. Reverted and failed writes
/// carry whatever diagnostic the provider supplied, verbatim; the client
/// never manufactures one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    /// Submitted, awaiting resolution.
    Pending,
    /// Included on-chain and executed successfully.
    Confirmed,
    /// Rejected by a contract business rule.
    Reverted {
        /// Decoded revert reason, when the provider could supply one.
        reason: Option<String>,
    },
    /// Lost to a transport or provider failure after submission.
    Failed {
        /// Raw provider error.
        error: String,
    },
}

impl TransactionStatus {
    /// Returns true while the write awaits resolution.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns true for any of the three terminal statuses.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !self.is_pending()
    }

    /// Returns true only for a confirmed write.
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed)
    }
}

// =============================================================================
// TRANSACTION RECORD
// =============================================================================

/// Local tracking object for one submitted write.
///
/// Owned exclusively by the lifecycle manager; consumers only ever see
/// clones, so a snapshot can never be used to mutate the live record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Unique record ID.
    pub id: Uuid,
    /// Which operation was submitted.
    pub kind: OperationKind,
    /// Provider-issued handle for the submission.
    pub handle: SubmissionHandle,
    /// Submission time (ms since epoch).
    pub submitted_at: Timestamp,
    /// Current lifecycle status.
    pub status: TransactionStatus,
}

impl TransactionRecord {
    /// Creates a new record in `Pending`.
    #[must_use]
    pub fn new(kind: OperationKind, handle: SubmissionHandle, submitted_at: Timestamp) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            handle,
            submitted_at,
            status: TransactionStatus::Pending,
        }
    }

    /// Moves the record to a terminal status.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is already terminal (a record never
    /// regresses or transitions twice) or if the given status is
    /// `Pending` (not a destination).
    pub fn complete(&mut self, status: TransactionStatus) -> Result<(), &'static str> {
        if !status.is_terminal() {
            return Err("completion status must be terminal");
        }
        if self.status.is_terminal() {
            return Err("record already terminal");
        }
        self.status = status;
        Ok(())
    }
}

// =============================================================================
// MIRRORED STATE
// =============================================================================

/// The closed set of contract fields readable through this interface
/// version.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateField {
    /// The stored encrypted-will document pointer.
    EncryptedWill,
}

impl StateField {
    /// Remote interface method that reads this field.
    #[must_use]
    pub fn read_method(&self) -> &'static str {
        match self {
            Self::EncryptedWill => "getEncryptedWill",
        }
    }
}

/// Last-observed value of a readable contract field.
///
/// Values are replaced wholesale on every successful read; a field that
/// was never fetched reads as `Unknown`. A never-set field on the remote
/// side reads as `Known` with an empty string, exactly as the contract
/// returned it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MirrorValue {
    /// Never fetched.
    Unknown,
    /// Last value returned by the remote, verbatim.
    Known {
        /// Raw field value.
        value: String,
        /// When the value was fetched (ms since epoch).
        fetched_at: Timestamp,
    },
}

impl MirrorValue {
    /// Returns the cached value, if one was ever fetched.
    #[must_use]
    pub fn known(&self) -> Option<&str> {
        match self {
            Self::Unknown => None,
            Self::Known { value, .. } => Some(value),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
