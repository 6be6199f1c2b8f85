//! # Adversarial Lifecycle Paths
//!
//! Reverts, transport failures, rejected signatures, and concurrency:
//! everything that must resolve into exactly one distinguishable
//! terminal outcome without disturbing the mirror.

#[cfg(test)]
mod tests {
    use std::time::Duration;
    use tokio::time::timeout;
    use uuid::Uuid;

    use testament_client::prelude::*;

    use crate::{init_tracing, service_over, RECIPIENT};

    // =============================================================================
    // REVERTS
    // =============================================================================

    #[tokio::test]
    async fn test_revert_reports_reason_and_spares_mirror() {
        init_tracing();
        let (_, contract, service) = service_over(InMemoryContract::new());
        service.connect().await.unwrap();

        // The old pointer is live and mirrored.
        contract.seed_will("QmOld");
        service.fetch_will().await.unwrap();

        contract.revert_next("NotAuthorized");
        let record = service.store_will("QmNew").await.unwrap();
        let done = service.await_outcome(record.id).await.unwrap();

        assert_eq!(
            done.status,
            TransactionStatus::Reverted {
                reason: Some("NotAuthorized".to_string()),
            }
        );
        // Neither the chain nor the mirror moved.
        assert_eq!(contract.will(), "QmOld");
        assert_eq!(service.stored_will().known(), Some("QmOld"));
    }

    #[tokio::test]
    async fn test_resubmission_after_revert_is_a_new_record() {
        init_tracing();
        let (_, contract, service) = service_over(InMemoryContract::new());
        service.connect().await.unwrap();

        contract.revert_next("NotAuthorized");
        let reverted = service.store_will("QmTest123").await.unwrap();
        service.await_outcome(reverted.id).await.unwrap();

        // The caller decides to try again: brand-new record, the old one
        // is untouched.
        let retried = service.store_will("QmTest123").await.unwrap();
        assert_ne!(retried.id, reverted.id);
        let done = service.await_outcome(retried.id).await.unwrap();
        assert_eq!(done.status, TransactionStatus::Confirmed);

        let old = service.record(reverted.id).await.unwrap();
        assert!(matches!(old.status, TransactionStatus::Reverted { .. }));
    }

    // =============================================================================
    // TRANSPORT FAILURES
    // =============================================================================

    #[tokio::test]
    async fn test_post_submission_failure_reports_raw_error() {
        init_tracing();
        let (_, contract, service) = service_over(InMemoryContract::new());
        service.connect().await.unwrap();

        contract.fail_next("provider crashed");
        let record = service.confirm_deceased().await.unwrap();
        let done = service.await_outcome(record.id).await.unwrap();

        assert_eq!(
            done.status,
            TransactionStatus::Failed {
                error: "provider crashed".to_string(),
            }
        );
        assert!(!contract.is_deceased());
        assert_eq!(service.stats().await.writes_failed, 1);
    }

    #[tokio::test]
    async fn test_rejected_signature_leaves_no_record() {
        init_tracing();
        let (_, contract, service) = service_over(InMemoryContract::new());
        service.connect().await.unwrap();

        contract.reject_submissions("user denied signature");
        let result = service.store_will("QmTest123").await;
        assert!(matches!(
            result,
            Err(ClientError::Submission(SubmissionError::Rejected(_)))
        ));

        // No handle was issued, so nothing is tracked.
        assert!(service.records().await.is_empty());
        assert_eq!(service.stats().await.writes_submitted, 0);

        // Signing works again once the provider relents.
        contract.restore_submissions();
        let record = service.store_will("QmTest123").await.unwrap();
        let done = service.await_outcome(record.id).await.unwrap();
        assert_eq!(done.status, TransactionStatus::Confirmed);
    }

    #[tokio::test]
    async fn test_read_failure_surfaces_and_recovers() {
        init_tracing();
        let (_, contract, service) = service_over(InMemoryContract::new());

        contract.fail_reads("connection reset");
        assert!(matches!(
            service.fetch_will().await,
            Err(ClientError::Read(ReadError::Transport(_)))
        ));
        assert_eq!(service.stored_will(), MirrorValue::Unknown);

        contract.restore_reads();
        contract.seed_will("QmBack");
        assert_eq!(service.fetch_will().await.unwrap(), "QmBack");
    }

    // =============================================================================
    // CONCURRENCY
    // =============================================================================

    #[tokio::test]
    async fn test_pending_confirmation_does_not_block_reads() {
        init_tracing();
        let slow = InMemoryContract::new().with_confirmation_delay(Duration::from_millis(250));
        let (_, contract, service) = service_over(slow);
        service.connect().await.unwrap();

        contract.seed_will("QmBefore");
        let record = service.store_will("QmAfter").await.unwrap();

        // The write is still pending; an unrelated read completes fine
        // and observes the pre-write value.
        let fetched = timeout(Duration::from_millis(100), service.fetch_will())
            .await
            .expect("read blocked behind a pending confirmation")
            .unwrap();
        assert_eq!(fetched, "QmBefore");
        assert!(service.record(record.id).await.unwrap().status.is_pending());

        // Eventually the write lands and the mirror follows.
        let done = service.await_outcome(record.id).await.unwrap();
        assert_eq!(done.status, TransactionStatus::Confirmed);
        assert_eq!(service.stored_will().known(), Some("QmAfter"));
    }

    #[tokio::test]
    async fn test_terminal_record_never_regresses() {
        init_tracing();
        let (_, _, service) = service_over(InMemoryContract::new());
        service.connect().await.unwrap();

        let record = service.store_will("QmTest123").await.unwrap();
        let done = service.await_outcome(record.id).await.unwrap();
        assert_eq!(done.status, TransactionStatus::Confirmed);

        // Pile on more activity, then look again: still Confirmed.
        let second = service.store_will("QmLater").await.unwrap();
        service.await_outcome(second.id).await.unwrap();
        assert_eq!(
            service.record(record.id).await.unwrap().status,
            TransactionStatus::Confirmed
        );
    }

    #[tokio::test]
    async fn test_await_outcome_unknown_record() {
        init_tracing();
        let (_, _, service) = service_over(InMemoryContract::new());
        let missing = Uuid::new_v4();
        assert_eq!(
            service.await_outcome(missing).await,
            Err(ClientError::UnknownRecord(missing))
        );
    }

    // =============================================================================
    // EVENT STREAM
    // =============================================================================

    #[tokio::test]
    async fn test_events_tell_the_whole_story() {
        init_tracing();
        let (_, contract, service) = service_over(InMemoryContract::new());
        let mut rx = service.subscribe();

        service.connect().await.unwrap();
        contract.revert_next("NotAuthorized");
        let reverted = service.store_will("QmTest123").await.unwrap();
        service.await_outcome(reverted.id).await.unwrap();
        let confirmed = service.store_will("QmTest123").await.unwrap();
        service.await_outcome(confirmed.id).await.unwrap();

        let mut got_revert = None;
        let mut got_confirm = None;
        let mut got_refresh = false;
        while let Ok(event) = rx.try_recv() {
            match event {
                ClientEvent::WriteReverted {
                    record_id, reason, ..
                } => got_revert = Some((record_id, reason)),
                ClientEvent::WriteConfirmed { record_id, .. } => got_confirm = Some(record_id),
                ClientEvent::MirrorRefreshed {
                    field: StateField::EncryptedWill,
                } => got_refresh = true,
                _ => {}
            }
        }

        assert_eq!(
            got_revert,
            Some((reverted.id, Some("NotAuthorized".to_string())))
        );
        assert_eq!(got_confirm, Some(confirmed.id));
        assert!(got_refresh);
    }
}
