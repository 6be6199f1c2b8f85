//! # Operator Journey Flows
//!
//! End-to-end tests of the happy paths a human operator walks through:
//! connecting a wallet, storing and fetching the encrypted-will pointer,
//! registering beneficiaries, and the full estate handover.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;

    use primitive_types::U256;
    use testament_client::prelude::*;

    use crate::{init_tracing, owner, service_over, RECIPIENT, RECIPIENT_2};

    // =============================================================================
    // CONNECTION
    // =============================================================================

    #[tokio::test]
    async fn test_connect_establishes_single_identity() {
        init_tracing();
        let (provider, _, service) = service_over(InMemoryContract::new());

        let identity = service.connect().await.unwrap();
        assert_eq!(identity, owner());
        assert_eq!(service.current_identity(), Some(identity));
        assert_eq!(provider.request_count(), 1);
        assert_eq!(service.target(), &crate::target());
    }

    #[tokio::test]
    async fn test_concurrent_connect_yields_one_identity() {
        init_tracing();
        let (provider, _, service) = service_over(InMemoryContract::new());
        let service = Arc::new(service);

        let (first, second) = futures::join!(service.connect(), service.connect());

        assert_eq!(first.unwrap(), owner());
        assert_eq!(second, Err(SessionError::AlreadyConnecting));
        assert_eq!(service.current_identity(), Some(owner()));
        // The losing call never reached the wallet.
        assert_eq!(provider.request_count(), 1);
    }

    #[tokio::test]
    async fn test_rejected_connect_can_be_retried() {
        init_tracing();
        let provider = Arc::new(InMemoryWalletProvider::rejecting());
        let contract = Arc::new(InMemoryContract::new());
        let service = TestamentService::new(
            Arc::clone(&provider),
            Arc::clone(&contract),
            crate::target(),
            ClientConfig::default(),
        );

        assert_eq!(service.connect().await, Err(SessionError::UserRejected));
        assert_eq!(service.current_identity(), None);

        // The human changes their mind; a fresh negotiation succeeds.
        provider.set_script(AuthorizationScript::Approve(owner()));
        assert_eq!(service.connect().await.unwrap(), owner());
    }

    #[tokio::test]
    async fn test_missing_provider_fails_immediately() {
        init_tracing();
        let provider = Arc::new(InMemoryWalletProvider::absent());
        let contract = Arc::new(InMemoryContract::new());
        let service = TestamentService::new(
            provider,
            contract,
            crate::target(),
            ClientConfig::default(),
        );

        assert_eq!(service.connect().await, Err(SessionError::NoProvider));
        assert_eq!(service.current_identity(), None);
    }

    // =============================================================================
    // WILL POINTER ROUND TRIP
    // =============================================================================

    #[tokio::test]
    async fn test_store_confirm_then_mirror_holds_pointer() {
        init_tracing();
        let (_, contract, service) = service_over(InMemoryContract::new());
        service.connect().await.unwrap();

        let record = service.store_will("QmTest123").await.unwrap();
        assert_eq!(record.kind, OperationKind::SetEncryptedWill);
        assert!(record.status.is_pending());

        let done = timeout(Duration::from_secs(1), service.await_outcome(record.id))
            .await
            .expect("confirmation timed out")
            .unwrap();
        assert_eq!(done.status, TransactionStatus::Confirmed);

        // The confirmed write refreshed the mirror; no explicit read ran.
        assert_eq!(service.stored_will().known(), Some("QmTest123"));
        assert_eq!(service.stats().await.reads, 0);

        // A direct refresh agrees with the mirrored value.
        assert_eq!(service.fetch_will().await.unwrap(), "QmTest123");
        assert_eq!(contract.will(), "QmTest123");
    }

    #[tokio::test]
    async fn test_fetch_reads_remote_state_written_by_others() {
        init_tracing();
        let (_, contract, service) = service_over(InMemoryContract::new());

        // Someone else stored a pointer before we ever looked.
        contract.seed_will("QmForeign");

        assert_eq!(service.stored_will(), MirrorValue::Unknown);
        assert_eq!(service.fetch_will().await.unwrap(), "QmForeign");
        assert_eq!(service.stored_will().known(), Some("QmForeign"));
    }

    // =============================================================================
    // BENEFICIARY REGISTRATION
    // =============================================================================

    #[tokio::test]
    async fn test_add_beneficiary_records_share_verbatim() {
        init_tracing();
        let (_, contract, service) = service_over(InMemoryContract::new());
        service.connect().await.unwrap();

        let record = service.add_beneficiary(RECIPIENT, "50").await.unwrap();
        assert_eq!(record.kind, OperationKind::AddTokenBeneficiary);
        service.await_outcome(record.id).await.unwrap();

        let beneficiaries = contract.beneficiaries();
        assert_eq!(beneficiaries.len(), 1);
        assert_eq!(beneficiaries[0].recipient.as_str(), RECIPIENT);
        assert_eq!(beneficiaries[0].share.value(), U256::from(50));
    }

    #[tokio::test]
    async fn test_shares_are_contract_units_not_percentages() {
        init_tracing();
        let (_, contract, service) = service_over(InMemoryContract::new());
        service.connect().await.unwrap();

        // Two shares summing to 150: the client does not police totals.
        let a = service.add_beneficiary(RECIPIENT, "100").await.unwrap();
        service.await_outcome(a.id).await.unwrap();
        let b = service.add_beneficiary(RECIPIENT_2, "50").await.unwrap();
        service.await_outcome(b.id).await.unwrap();

        let total: U256 = contract
            .beneficiaries()
            .iter()
            .map(|beneficiary| beneficiary.share.value())
            .fold(U256::zero(), |acc, share| acc + share);
        assert_eq!(total, U256::from(150));
    }

    // =============================================================================
    // FULL ESTATE HANDOVER
    // =============================================================================

    #[tokio::test]
    async fn test_full_handover_flow() {
        init_tracing();
        let (_, contract, service) = service_over(InMemoryContract::new());
        service.connect().await.unwrap();

        // Testator sets everything up.
        let will = service.store_will("QmEncryptedWill").await.unwrap();
        service.await_outcome(will.id).await.unwrap();
        let add = service.add_beneficiary(RECIPIENT, "60").await.unwrap();
        service.await_outcome(add.id).await.unwrap();
        let add2 = service.add_beneficiary(RECIPIENT_2, "40").await.unwrap();
        service.await_outcome(add2.id).await.unwrap();

        // Later-stage lifecycle.
        let approve = service.approve_identity(RECIPIENT).await.unwrap();
        service.await_outcome(approve.id).await.unwrap();
        let deceased = service.confirm_deceased().await.unwrap();
        service.await_outcome(deceased.id).await.unwrap();
        let distribute = service.distribute_token().await.unwrap();
        let done = service.await_outcome(distribute.id).await.unwrap();
        assert_eq!(done.status, TransactionStatus::Confirmed);

        assert_eq!(contract.will(), "QmEncryptedWill");
        assert_eq!(contract.beneficiaries().len(), 2);
        assert_eq!(contract.approvals().len(), 1);
        assert!(contract.is_deceased());
        assert!(contract.is_distributed());

        // History lists every submission, newest first, all terminal.
        let records = service.records().await;
        assert_eq!(records.len(), 6);
        assert_eq!(records[0].kind, OperationKind::DistributeToken);
        assert!(records.iter().all(|r| r.status.is_confirmed()));

        let stats = service.stats().await;
        assert_eq!(stats.writes_submitted, 6);
        assert_eq!(stats.writes_confirmed, 6);
        assert_eq!(stats.writes_reverted, 0);
        assert_eq!(stats.writes_failed, 0);
    }
}
