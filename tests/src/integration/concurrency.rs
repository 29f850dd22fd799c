//! # Concurrency
//!
//! Parallel callers against one shared service. Every operation is atomic, so
//! races on the same key resolve to a single winner and counters stay exact.

#[cfg(test)]
mod tests {
    use crate::fixtures::{authority, caller, enroll, ready_service, request_in};
    use std::sync::Arc;
    use vl_registration::prelude::*;

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_same_key_race_has_one_winner() {
        let (service, collaborators) = ready_service().await;
        let service = Arc::new(service);

        let handles: Vec<_> = (0..64)
            .map(|i| {
                let service = Arc::clone(&service);
                tokio::spawn(async move {
                    service
                        .register_voter(&caller(), request_in("USA", &format!("race-{i}")))
                        .await
                })
            })
            .collect();

        let mut winners = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => winners += 1,
                Err(err) => assert_eq!(err, RegistrationError::DuplicateRegistration),
            }
        }

        assert_eq!(winners, 1);
        assert_eq!(service.get_registration_count().await, 1);
        assert_eq!(collaborators.fees.transfers().len(), 1);
        assert_eq!(service.stats().await.rejected_operations, 63);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_distinct_keys_all_succeed() {
        let (service, collaborators) = ready_service().await;
        let service = Arc::new(service);

        let requests: Vec<_> = (0..100).map(|n| enroll(&collaborators, n)).collect();
        let handles: Vec<_> = requests
            .into_iter()
            .map(|(principal, request)| {
                let service = Arc::clone(&service);
                tokio::spawn(async move { service.register_voter(&principal, request).await })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(service.get_registration_count().await, 100);
        assert_eq!(
            service
                .get_jurisdiction_reg_count(&JurisdictionId::from("USA"))
                .await,
            100
        );
        assert_eq!(collaborators.fees.total_collected(), 100 * 100);
        assert!(service.check_invariants().await.is_valid());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_capacity_never_overshoots() {
        let (service, collaborators) = ready_service().await;
        service.set_max_registrations(&authority(), 10).await.unwrap();
        let service = Arc::new(service);

        let requests: Vec<_> = (0..50).map(|n| enroll(&collaborators, n)).collect();
        let handles: Vec<_> = requests
            .into_iter()
            .map(|(principal, request)| {
                let service = Arc::clone(&service);
                tokio::spawn(async move { service.register_voter(&principal, request).await })
            })
            .collect();

        let mut accepted = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => accepted += 1,
                Err(err) => assert_eq!(err.code(), 1016),
            }
        }

        assert_eq!(accepted, 10);
        assert_eq!(service.get_registration_count().await, 10);
        assert_eq!(collaborators.fees.transfers().len(), 10);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_edits_and_reads_interleave_consistently() {
        let (service, _) = ready_service().await;
        let usa = JurisdictionId::from("USA");
        service
            .register_voter(&caller(), request_in("USA", "h"))
            .await
            .unwrap();
        let service = Arc::new(service);

        let writers: Vec<_> = (0..20)
            .map(|i| {
                let service = Arc::clone(&service);
                let usa = usa.clone();
                tokio::spawn(async move {
                    service
                        .update_registration(
                            &caller(),
                            "userhash123",
                            &usa,
                            format!("title-{i}"),
                            format!("desc-{i}"),
                        )
                        .await
                })
            })
            .collect();
        let readers: Vec<_> = (0..20)
            .map(|_| {
                let service = Arc::clone(&service);
                let usa = usa.clone();
                tokio::spawn(async move {
                    let reg = service.get_registration("userhash123", &usa).await.unwrap();
                    // Title and description always come from the same edit.
                    let suffix = reg.title.trim_start_matches("title-");
                    if reg.title != "Voter Reg" {
                        assert_eq!(reg.description, format!("desc-{suffix}"));
                    }
                })
            })
            .collect();

        for handle in writers {
            handle.await.unwrap().unwrap();
        }
        for handle in readers {
            handle.await.unwrap();
        }

        let reg = service.get_registration("userhash123", &usa).await.unwrap();
        let update = service
            .get_registration_update("userhash123", &usa)
            .await
            .unwrap();
        assert_eq!(reg.title, update.update_title);
        assert_eq!(reg.description, update.update_description);
        assert_eq!(service.stats().await.edits_applied, 20);
    }
}
