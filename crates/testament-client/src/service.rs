//! # Testament Service
//!
//! Composes the interaction engine (signing session, contract proxy,
//! lifecycle manager, state mirror) behind the inbound API. This is the
//! only surface the presentation layer talks to.
//!
//! All string-typed inputs are validated here, before anything reaches a
//! port. Write submissions are serialized (one at a time) because the
//! signing provider's nonce ordering is the only sequencing guarantee;
//! confirmation waits run in the background and overlap freely.

use crate::adapters::{InMemoryContract, InMemoryWalletProvider};
use crate::client::{ContractProxy, SigningSession, StateMirror, TransactionLifecycleManager};
use crate::domain::entities::{MirrorValue, OperationKind, StateField, TransactionRecord};
use crate::domain::value_objects::{
    AccountAddress, Beneficiary, ContractId, DocumentPointer, ShareAmount, SubmissionHandle,
};
use crate::errors::{ClientError, SessionError, SubmissionError, ValidationError};
use crate::events::ClientEvent;
use crate::ports::inbound::TestamentApi;
use crate::ports::outbound::{ContractTransport, WalletProvider};

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex, RwLock};
use tracing::{info, instrument, warn};
use uuid::Uuid;

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Capacity of the event broadcast channel.
    pub event_capacity: usize,
    /// Maximum retained transaction records; oldest terminal records are
    /// evicted beyond this.
    pub max_records: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            event_capacity: 256,
            max_records: 256,
        }
    }
}

// =============================================================================
// STATISTICS
// =============================================================================

/// Counters over the client's activity.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ClientStats {
    /// Successful connect negotiations.
    pub connects: u64,
    /// Writes that obtained a submission handle.
    pub writes_submitted: u64,
    /// Writes that confirmed on-chain.
    pub writes_confirmed: u64,
    /// Writes reverted by a contract rule.
    pub writes_reverted: u64,
    /// Writes lost to transport/provider failures.
    pub writes_failed: u64,
    /// Explicit contract reads requested by the caller.
    pub reads: u64,
    /// Inputs rejected by local validation.
    pub validation_rejections: u64,
}

// =============================================================================
// SERVICE
// =============================================================================

/// The wallet-to-contract interaction client.
///
/// Generic over the wallet provider `P` and contract transport `T` so
/// tests run against the in-memory adapters and production wires in the
/// real browser provider.
pub struct TestamentService<P, T> {
    /// Signing session over the ambient wallet.
    session: SigningSession<P>,
    /// Typed view of the deployed registry.
    proxy: Arc<ContractProxy<T>>,
    /// Read cache of authoritative values.
    mirror: Arc<StateMirror<T>>,
    /// Tracks submitted writes to their terminal outcomes.
    lifecycle: TransactionLifecycleManager<T>,
    /// Event fan-out to consumers.
    events: broadcast::Sender<ClientEvent>,
    /// Activity counters.
    stats: Arc<RwLock<ClientStats>>,
    /// Serializes write submissions; never held across a confirmation
    /// wait.
    submit_guard: Mutex<()>,
}

impl<P, T> TestamentService<P, T>
where
    P: WalletProvider,
    T: ContractTransport + 'static,
{
    /// Creates a client bound to one provider, transport, and deployment
    /// target. The provider and transport arrive shared so that callers
    /// (tests, wiring code) can keep scripting/inspection handles.
    pub fn new(
        provider: Arc<P>,
        transport: Arc<T>,
        target: ContractId,
        config: ClientConfig,
    ) -> Self {
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        let stats = Arc::new(RwLock::new(ClientStats::default()));
        let proxy = Arc::new(ContractProxy::new(transport, target));
        let mirror = Arc::new(StateMirror::new(Arc::clone(&proxy)));
        let lifecycle = TransactionLifecycleManager::new(
            Arc::clone(&proxy),
            Arc::clone(&mirror),
            events.clone(),
            Arc::clone(&stats),
            config.max_records,
        );

        Self {
            session: SigningSession::new(provider),
            proxy,
            mirror,
            lifecycle,
            events,
            stats,
            submit_guard: Mutex::new(()),
        }
    }

    /// Subscribes to client events. Lagging or dropping the receiver
    /// never affects the client.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }

    /// Snapshot of the activity counters.
    pub async fn stats(&self) -> ClientStats {
        self.stats.read().await.clone()
    }

    /// The deployment target this client is bound to.
    #[must_use]
    pub fn target(&self) -> &ContractId {
        self.proxy.target()
    }

    /// Validates an input, counting rejections.
    async fn validated<V>(&self, result: Result<V, ValidationError>) -> Result<V, ClientError> {
        match result {
            Ok(value) => Ok(value),
            Err(err) => {
                self.stats.write().await.validation_rejections += 1;
                warn!(error = %err, "input rejected before leaving the client");
                Err(err.into())
            }
        }
    }

    /// The active identity, or `NotConnected` for the write path.
    fn require_identity(&self) -> Result<AccountAddress, SubmissionError> {
        self.session
            .current_identity()
            .ok_or(SubmissionError::NotConnected)
    }

    /// Registers a submitted write: record, counters, log line. The
    /// lifecycle manager emits the submission event itself.
    async fn register(
        &self,
        kind: OperationKind,
        handle: SubmissionHandle,
    ) -> TransactionRecord {
        let record = self.lifecycle.track(kind, handle).await;
        self.stats.write().await.writes_submitted += 1;
        info!(
            record_id = %record.id,
            method = kind.method_name(),
            handle = %record.handle,
            "write submitted"
        );
        record
    }
}

#[async_trait]
impl<P, T> TestamentApi for TestamentService<P, T>
where
    P: WalletProvider,
    T: ContractTransport + 'static,
{
    #[instrument(skip(self))]
    async fn connect(&self) -> Result<AccountAddress, SessionError> {
        let identity = self.session.connect().await?;
        self.stats.write().await.connects += 1;
        let _ = self.events.send(ClientEvent::Connected {
            identity: identity.clone(),
        });
        Ok(identity)
    }

    fn disconnect(&self) {
        if let Some(identity) = self.session.disconnect() {
            let _ = self.events.send(ClientEvent::Disconnected { identity });
        }
    }

    fn current_identity(&self) -> Option<AccountAddress> {
        self.session.current_identity()
    }

    #[instrument(skip(self, pointer))]
    async fn store_will(&self, pointer: &str) -> Result<TransactionRecord, ClientError> {
        let pointer = self.validated(DocumentPointer::new(pointer)).await?;
        let identity = self.require_identity()?;

        let handle = {
            let _guard = self.submit_guard.lock().await;
            self.proxy.set_encrypted_will(&identity, pointer).await?
        };
        Ok(self.register(OperationKind::SetEncryptedWill, handle).await)
    }

    #[instrument(skip(self))]
    async fn fetch_will(&self) -> Result<String, ClientError> {
        self.stats.write().await.reads += 1;
        let value = self.mirror.refresh(StateField::EncryptedWill).await?;
        let _ = self.events.send(ClientEvent::MirrorRefreshed {
            field: StateField::EncryptedWill,
        });
        Ok(value)
    }

    fn stored_will(&self) -> MirrorValue {
        self.mirror.get(StateField::EncryptedWill)
    }

    #[instrument(skip(self, recipient, share))]
    async fn add_beneficiary(
        &self,
        recipient: &str,
        share: &str,
    ) -> Result<TransactionRecord, ClientError> {
        let recipient = self.validated(AccountAddress::parse(recipient)).await?;
        let share = self.validated(ShareAmount::parse(share)).await?;
        let identity = self.require_identity()?;

        let beneficiary = Beneficiary::new(recipient, share);
        let handle = {
            let _guard = self.submit_guard.lock().await;
            self.proxy
                .add_token_beneficiary(&identity, beneficiary)
                .await?
        };
        Ok(self
            .register(OperationKind::AddTokenBeneficiary, handle)
            .await)
    }

    #[instrument(skip(self, beneficiary))]
    async fn approve_identity(&self, beneficiary: &str) -> Result<TransactionRecord, ClientError> {
        let beneficiary = self.validated(AccountAddress::parse(beneficiary)).await?;
        let identity = self.require_identity()?;

        let handle = {
            let _guard = self.submit_guard.lock().await;
            self.proxy.approve_identity(&identity, beneficiary).await?
        };
        Ok(self.register(OperationKind::ApproveIdentity, handle).await)
    }

    #[instrument(skip(self))]
    async fn confirm_deceased(&self) -> Result<TransactionRecord, ClientError> {
        let identity = self.require_identity()?;
        let handle = {
            let _guard = self.submit_guard.lock().await;
            self.proxy.confirm_deceased(&identity).await?
        };
        Ok(self.register(OperationKind::ConfirmDeceased, handle).await)
    }

    #[instrument(skip(self))]
    async fn distribute_token(&self) -> Result<TransactionRecord, ClientError> {
        let identity = self.require_identity()?;
        let handle = {
            let _guard = self.submit_guard.lock().await;
            self.proxy.distribute_token(&identity).await?
        };
        Ok(self.register(OperationKind::DistributeToken, handle).await)
    }

    async fn record(&self, id: Uuid) -> Option<TransactionRecord> {
        self.lifecycle.record(id).await
    }

    async fn records(&self) -> Vec<TransactionRecord> {
        self.lifecycle.records().await
    }

    async fn await_outcome(&self, id: Uuid) -> Result<TransactionRecord, ClientError> {
        self.lifecycle.await_outcome(id).await
    }
}

// =============================================================================
// TEST SERVICE
// =============================================================================

/// Builds a service over the in-memory adapters, for tests and local
/// development. Returns the adapters so callers can script and inspect
/// them.
pub fn create_test_service(
    target: ContractId,
    owner: AccountAddress,
) -> (
    Arc<InMemoryWalletProvider>,
    Arc<InMemoryContract>,
    TestamentService<InMemoryWalletProvider, InMemoryContract>,
) {
    let provider = Arc::new(InMemoryWalletProvider::approving(owner));
    let contract = Arc::new(InMemoryContract::new());
    let service = TestamentService::new(
        Arc::clone(&provider),
        Arc::clone(&contract),
        target,
        ClientConfig::default(),
    );
    (provider, contract, service)
}

// =============================================================================
// TESTS
// =============================================================================
