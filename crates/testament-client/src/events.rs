//! # Client Events
//!
//! Notifications broadcast to consumers (the presentation layer, tests)
//! whenever the client's observable state changes. Events are snapshots;
//! dropping or lagging a receiver never affects the client itself.

use crate::domain::entities::{OperationKind, StateField};
use crate::domain::value_objects::AccountAddress;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Something a consumer may want to re-render on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientEvent {
    /// A signing identity was established.
    Connected {
        /// The authorized account.
        identity: AccountAddress,
    },
    /// The signing identity was cleared.
    Disconnected {
        /// The account that was active.
        identity: AccountAddress,
    },
    /// A write obtained a submission handle and is now pending.
    WriteSubmitted {
        /// Record tracking the write.
        record_id: Uuid,
        /// Which operation was submitted.
        kind: OperationKind,
    },
    /// A pending write confirmed on-chain.
    WriteConfirmed {
        /// Record tracking the write.
        record_id: Uuid,
        /// Which operation confirmed.
        kind: OperationKind,
    },
    /// A pending write was reverted by a contract rule.
    WriteReverted {
        /// Record tracking the write.
        record_id: Uuid,
        /// Which operation reverted.
        kind: OperationKind,
        /// Decoded revert reason, when available.
        reason: Option<String>,
    },
    /// A pending write was lost to a transport/provider failure.
    WriteFailed {
        /// Record tracking the write.
        record_id: Uuid,
        /// Which operation failed.
        kind: OperationKind,
        /// Raw provider error.
        error: String,
    },
    /// A mirrored field was replaced with a fresh authoritative value.
    MirrorRefreshed {
        /// The refreshed field.
        field: StateField,
    },
}

// =============================================================================
// TESTS
// =============================================================================
