//! # Registration Lifecycle Flows
//!
//! Register, edit, and archive through `RegistrationApi`, checking counters,
//! fee transfers, and the invariant checker along the way.

#[cfg(test)]
mod tests {
    use crate::fixtures::{authority, caller, enroll, ready_service, request_in, CALLER_IDENTITY};
    use vl_registration::prelude::*;

    // =============================================================================
    // SCENARIOS
    // =============================================================================

    #[tokio::test]
    async fn test_register_then_duplicate() {
        let (service, collaborators) = ready_service().await;
        let usa = JurisdictionId::from("USA");

        let reg = service
            .register_voter(&caller(), request_in("USA", "regHash123"))
            .await
            .unwrap();
        assert_eq!(reg.status, RegistrationStatus::Active);

        let err = service
            .register_voter(&caller(), request_in("USA", "differentHash"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), 1001);

        assert_eq!(service.get_registration_count().await, 1);
        assert_eq!(service.get_jurisdiction_reg_count(&usa).await, 1);
        assert_eq!(
            service
                .get_registration(CALLER_IDENTITY, &usa)
                .await
                .unwrap()
                .registration_hash,
            "regHash123"
        );
        assert_eq!(collaborators.fees.transfers().len(), 1);
    }

    #[tokio::test]
    async fn test_capacity_scenario() {
        let (service, collaborators) = ready_service().await;
        service.set_max_registrations(&authority(), 2).await.unwrap();

        for n in 0..2 {
            let (principal, request) = enroll(&collaborators, n);
            service.register_voter(&principal, request).await.unwrap();
        }

        let (principal, request) = enroll(&collaborators, 2);
        let err = service.register_voter(&principal, request).await.unwrap_err();
        assert_eq!(err, RegistrationError::CapacityExceeded { count: 2, max: 2 });
        assert_eq!(service.get_registration_count().await, 2);

        // Raising the cap reopens registration.
        service.set_max_registrations(&authority(), 3).await.unwrap();
        let (principal, request) = enroll(&collaborators, 2);
        service.register_voter(&principal, request).await.unwrap();
        assert_eq!(service.get_registration_count().await, 3);
    }

    #[tokio::test]
    async fn test_lowering_cap_below_count_blocks_new_registrations() {
        let (service, collaborators) = ready_service().await;
        for n in 0..3 {
            let (principal, request) = enroll(&collaborators, n);
            service.register_voter(&principal, request).await.unwrap();
        }

        service.set_max_registrations(&authority(), 1).await.unwrap();
        let (principal, request) = enroll(&collaborators, 3);
        assert_eq!(
            service.register_voter(&principal, request).await,
            Err(RegistrationError::CapacityExceeded { count: 3, max: 1 })
        );
        assert!(service.check_invariants().await.is_valid());
    }

    #[tokio::test]
    async fn test_admin_gate_scenario() {
        let (service, collaborators) = ready_service().await;
        let usa = JurisdictionId::from("USA");
        service
            .register_voter(&caller(), request_in("USA", "regHash123"))
            .await
            .unwrap();

        let outsider = Principal::from("ST3OUTSIDER");
        assert_eq!(
            service
                .update_registration(&outsider, CALLER_IDENTITY, &usa, "T".into(), "D".into())
                .await,
            Err(RegistrationError::NotAdmin)
        );

        collaborators.admins.grant(outsider.clone());
        service
            .update_registration(&outsider, CALLER_IDENTITY, &usa, "T".into(), "D".into())
            .await
            .unwrap();
        assert_eq!(
            service
                .get_registration_update(CALLER_IDENTITY, &usa)
                .await
                .unwrap()
                .updater,
            outsider
        );

        collaborators.admins.revoke(&outsider);
        assert_eq!(
            service
                .update_registration_status(&outsider, CALLER_IDENTITY, &usa, "archived")
                .await,
            Err(RegistrationError::NotAdmin)
        );
    }

    #[tokio::test]
    async fn test_status_domain_scenario() {
        let (service, _) = ready_service().await;
        let usa = JurisdictionId::from("USA");
        service
            .register_voter(&caller(), request_in("USA", "regHash123"))
            .await
            .unwrap();

        for bad in ["deleted", "ACTIVE", "", " archived"] {
            let err = service
                .update_registration_status(&caller(), CALLER_IDENTITY, &usa, bad)
                .await
                .unwrap_err();
            assert_eq!(err.code(), 1008, "label {bad:?}");
        }
        assert_eq!(
            service
                .get_registration(CALLER_IDENTITY, &usa)
                .await
                .unwrap()
                .status,
            RegistrationStatus::Active
        );
    }

    // =============================================================================
    // FULL LIFECYCLE
    // =============================================================================

    #[tokio::test]
    async fn test_full_lifecycle() {
        let (service, collaborators) = ready_service().await;
        let usa = JurisdictionId::from("USA");
        let eu = JurisdictionId::from("EU");
        collaborators.scores.set_score(eu.clone(), "euHash", 77);

        collaborators.clock.set(100);
        let in_usa = service
            .register_voter(&caller(), request_in("USA", "usaHash"))
            .await
            .unwrap();
        collaborators.clock.set(101);
        let in_eu = service
            .register_voter(&caller(), request_in("EU", "euHash"))
            .await
            .unwrap();
        assert_eq!(in_usa.eligibility_score, 100);
        assert_eq!(in_eu.eligibility_score, 77);
        assert_eq!(in_eu.timestamp, 101);

        collaborators.clock.set(150);
        service
            .update_registration(&caller(), CALLER_IDENTITY, &usa, "Edited".into(), String::new())
            .await
            .unwrap();
        collaborators.clock.set(151);
        service
            .update_registration_status(&caller(), CALLER_IDENTITY, &usa, "archived")
            .await
            .unwrap();

        let archived = service.get_registration(CALLER_IDENTITY, &usa).await.unwrap();
        assert_eq!(archived.status, RegistrationStatus::Archived);
        assert_eq!(archived.title, "Edited");
        assert_eq!(archived.timestamp, 151);
        assert_eq!(archived.registration_hash, "usaHash");

        let update = service
            .get_registration_update(CALLER_IDENTITY, &usa)
            .await
            .unwrap();
        assert_eq!(update.update_timestamp, 150);

        // Archival is not deletion.
        assert_eq!(service.get_registration_count().await, 2);
        assert_eq!(service.get_jurisdiction_reg_count(&usa).await, 1);
        assert_eq!(service.get_jurisdiction_reg_count(&eu).await, 1);
        assert_eq!(
            service
                .register_voter(&caller(), request_in("USA", "again"))
                .await,
            Err(RegistrationError::DuplicateRegistration)
        );

        assert_eq!(collaborators.fees.total_collected(), 200);
        assert!(service.check_invariants().await.is_valid());

        let stats = service.stats().await;
        assert_eq!(stats.registrations_created, 2);
        assert_eq!(stats.edits_applied, 1);
        assert_eq!(stats.status_changes, 1);
        assert_eq!(stats.rejected_operations, 1);
    }

    #[tokio::test]
    async fn test_fee_change_applies_to_next_registration() {
        let (service, collaborators) = ready_service().await;
        service.set_registration_fee(&authority(), 250).await.unwrap();

        service
            .register_voter(&caller(), request_in("USA", "h"))
            .await
            .unwrap();
        let transfers = collaborators.fees.transfers();
        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].amount, 250);
        assert_eq!(transfers[0].from, caller());
        assert_eq!(transfers[0].to, authority());
    }

    #[tokio::test]
    async fn test_invariants_hold_after_mixed_sequence() {
        let (service, collaborators) = ready_service().await;
        let usa = JurisdictionId::from("USA");

        for n in 0..20 {
            let (principal, mut request) = enroll(&collaborators, n);
            if n % 5 == 0 {
                request.title = String::new();
            }
            let _ = service.register_voter(&principal, request).await;
        }
        for n in (1..20).step_by(3) {
            let _ = service
                .update_registration_status(&caller(), &format!("id-{n}"), &usa, "pending")
                .await;
            let _ = service
                .update_registration(&caller(), &format!("id-{n}"), &usa, "T".into(), String::new())
                .await;
        }

        assert_eq!(service.get_registration_count().await, 16);
        assert!(service.check_invariants().await.is_valid());
    }
}
