//! # In-Memory Wallet Provider
//!
//! Scriptable wallet provider for tests and local development. A
//! production adapter would bridge the browser provider object behind
//! the same port.

use crate::domain::value_objects::AccountAddress;
use crate::errors::SessionError;
use crate::ports::outbound::WalletProvider;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// What the scripted wallet does with the next authorization request.
#[derive(Clone, Debug)]
pub enum AuthorizationScript {
    /// Approve with the given account.
    Approve(AccountAddress),
    /// The human declines.
    Reject,
    /// No wallet is installed at all.
    Absent,
}

/// Scriptable in-memory wallet provider.
#[derive(Debug)]
pub struct InMemoryWalletProvider {
    /// Current script.
    script: Mutex<AuthorizationScript>,
    /// Simulated human decision latency.
    latency: Duration,
    /// Number of authorization requests received.
    requests: AtomicU64,
}

impl InMemoryWalletProvider {
    /// Provider that approves every request with the given account.
    #[must_use]
    pub fn approving(account: AccountAddress) -> Self {
        Self::with_script(AuthorizationScript::Approve(account))
    }

    /// Provider whose human declines every request.
    #[must_use]
    pub fn rejecting() -> Self {
        Self::with_script(AuthorizationScript::Reject)
    }

    /// Environment without any wallet installed.
    #[must_use]
    pub fn absent() -> Self {
        Self::with_script(AuthorizationScript::Absent)
    }

    /// Provider with an explicit script.
    #[must_use]
    pub fn with_script(script: AuthorizationScript) -> Self {
        Self {
            script: Mutex::new(script),
            latency: Duration::from_millis(10),
            requests: AtomicU64::new(0),
        }
    }

    /// Overrides the simulated decision latency.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Replaces the script for subsequent requests.
    pub fn set_script(&self, script: AuthorizationScript) {
        *self.script.lock() = script;
    }

    /// Number of authorization requests this provider has received.
    #[must_use]
    pub fn request_count(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl WalletProvider for InMemoryWalletProvider {
    async fn request_authorization(&self) -> Result<AccountAddress, SessionError> {
        self.requests.fetch_add(1, Ordering::Relaxed);

        // Clone out of the lock; the guard must not live across an await.
        let script = self.script.lock().clone();
        match script {
            // No wallet installed: fails before any UI could appear.
            AuthorizationScript::Absent => Err(SessionError::NoProvider),
            AuthorizationScript::Reject => {
                tokio::time::sleep(self.latency).await;
                Err(SessionError::UserRejected)
            }
            AuthorizationScript::Approve(account) => {
                tokio::time::sleep(self.latency).await;
                Ok(account)
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
