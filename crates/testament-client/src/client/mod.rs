//! # Interaction Engine
//!
//! The four moving parts of the wallet-to-contract client: the signing
//! session, the typed contract proxy, the transaction lifecycle manager,
//! and the state mirror. [`crate::service::TestamentService`] composes
//! them behind the inbound port.

pub mod lifecycle;
pub mod mirror;
pub mod proxy;
pub mod session;

pub use lifecycle::TransactionLifecycleManager;
pub use mirror::StateMirror;
pub use proxy::ContractProxy;
pub use session::SigningSession;

use crate::domain::entities::Timestamp;

/// Current wall-clock time in milliseconds since UNIX epoch.
pub(crate) fn now_ms() -> Timestamp {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
