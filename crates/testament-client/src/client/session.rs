//! # Signing Session
//!
//! Owns the connection to the wallet provider and the single active
//! signing identity. The ambient provider is process-wide state; this is
//! the only module allowed to touch it, and the rest of the client
//! receives the active identity explicitly.

use crate::domain::value_objects::AccountAddress;
use crate::errors::SessionError;
use crate::ports::outbound::WalletProvider;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Authenticated session against the ambient wallet provider.
///
/// At most one identity is active at a time, and at most one connect
/// negotiation may be outstanding; a concurrent second `connect` fails
/// fast rather than queuing behind the wallet UI.
pub struct SigningSession<P> {
    /// The ambient wallet provider.
    provider: Arc<P>,
    /// The active identity, if any.
    identity: RwLock<Option<AccountAddress>>,
    /// Guard for the single outstanding connect negotiation.
    connecting: AtomicBool,
}

impl<P: WalletProvider> SigningSession<P> {
    /// Creates a session over the given provider.
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            identity: RwLock::new(None),
            connecting: AtomicBool::new(false),
        }
    }

    /// Requests authorization and establishes the signing identity.
    ///
    /// Suspends until the human approves or rejects in the wallet UI.
    /// On success the returned identity is also stored as the session's
    /// active identity. On any failure the identity is left unset (or
    /// unchanged, for `AlreadyConnecting`).
    ///
    /// # Errors
    ///
    /// * [`SessionError::AlreadyConnecting`] - a negotiation is in flight
    /// * [`SessionError::NoProvider`] / [`SessionError::UserRejected`] -
    ///   from the provider
    pub async fn connect(&self) -> Result<AccountAddress, SessionError> {
        if self
            .connecting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("rejecting concurrent connect negotiation");
            return Err(SessionError::AlreadyConnecting);
        }

        let result = self.provider.request_authorization().await;

        match &result {
            Ok(identity) => {
                *self.identity.write() = Some(identity.clone());
                info!(identity = %identity, "signing identity established");
            }
            Err(err) => {
                debug!(error = %err, "wallet authorization did not complete");
            }
        }

        self.connecting.store(false, Ordering::Release);
        result
    }

    /// The active identity, or `None` when disconnected. Never suspends.
    #[must_use]
    pub fn current_identity(&self) -> Option<AccountAddress> {
        self.identity.read().clone()
    }

    /// Clears the identity and returns the one that was active.
    /// Idempotent: disconnecting a disconnected session is a no-op.
    pub fn disconnect(&self) -> Option<AccountAddress> {
        let cleared = self.identity.write().take();
        if let Some(identity) = &cleared {
            info!(identity = %identity, "signing identity cleared");
        }
        cleared
    }
}

// =============================================================================
// TESTS
// =============================================================================
