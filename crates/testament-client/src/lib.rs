//! # Testament Client - Wallet-to-Contract Interaction
//!
//! Client for managing an on-chain inheritance record through a
//! browser-installed wallet: store/retrieve the pointer to an encrypted
//! will document, register beneficiaries with proportional shares, and
//! trigger the later-stage lifecycle actions (identity approval, death
//! confirmation, distribution).
//!
//! ## Architecture
//!
//! Hexagonal: the core never touches a concrete provider, only the
//! traits in [`ports::outbound`].
//!
//! | Component | Location | Purpose |
//! |-----------|----------|---------|
//! | Validation | `domain/value_objects.rs` | Address/share/pointer shapes, enforced by construction |
//! | SigningSession | `client/session.rs` | Wallet authorization, single active identity |
//! | ContractProxy | `client/proxy.rs` | Typed operations over the fixed remote interface |
//! | LifecycleManager | `client/lifecycle.rs` | Pending → Confirmed/Reverted/Failed tracking |
//! | StateMirror | `client/mirror.rs` | Read cache of authoritative values |
//! | TestamentService | `service.rs` | Composition behind the inbound API |
//!
//! ## Guarantees
//!
//! - Invalid input never reaches a port; validation is local and pure.
//! - A transaction record transitions exactly once out of `Pending` and
//!   never regresses.
//! - The mirror is only ever fed from successful reads and confirmed
//!   writes; pending, reverted, and failed writes leave it untouched.
//! - Nothing is retried automatically, and nothing is cancellable once a
//!   submission handle exists.
//!
//! ## Usage Example
//!
//! ```ignore
//! use testament_client::prelude::*;
//!
//! let service = TestamentService::new(provider, transport, target, ClientConfig::default());
//! let identity = service.connect().await?;
//! let record = service.store_will("QmYourCid").await?;
//! let outcome = service.await_outcome(record.id).await?;
//! assert!(outcome.status.is_confirmed());
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod client;
pub mod domain;
pub mod errors;
pub mod events;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{
        MirrorValue, OperationKind, StateField, Timestamp, TransactionRecord, TransactionStatus,
    };

    // Value objects
    pub use crate::domain::value_objects::{
        AccountAddress, Beneficiary, ContractId, DocumentPointer, ShareAmount, SubmissionHandle,
        U256,
    };

    // Ports
    pub use crate::ports::inbound::TestamentApi;
    pub use crate::ports::outbound::{
        ContractTransport, ReadRequest, ReadValue, SubmissionOutcome, WalletProvider, WriteRequest,
    };

    // Events
    pub use crate::events::ClientEvent;

    // Errors
    pub use crate::errors::{
        ClientError, ReadError, SessionError, SubmissionError, ValidationError,
    };

    // Engine
    pub use crate::client::{
        ContractProxy, SigningSession, StateMirror, TransactionLifecycleManager,
    };

    // Adapters
    pub use crate::adapters::{AuthorizationScript, InMemoryContract, InMemoryWalletProvider};

    // Service
    pub use crate::service::{create_test_service, ClientConfig, ClientStats, TestamentService};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// TESTS
// =============================================================================
