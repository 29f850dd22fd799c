//! # Access Control Bypass Attempts
//!
//! Identity spoofing, admin impersonation, and authority hijacking.

#[cfg(test)]
mod tests {
    use crate::fixtures::{authority, caller, ready_service, request_in, CALLER_IDENTITY};
    use vl_registration::prelude::*;

    async fn assert_empty_ledger(service: &RegistrationService) {
        assert_eq!(service.get_registration_count().await, 0);
        assert!(service.check_invariants().await.is_valid());
    }

    /// A principal without an identity claims someone else's user id.
    #[tokio::test]
    async fn test_identity_spoofing_rejected() {
        let (service, collaborators) = ready_service().await;
        let mallory = Principal::from("MALLORY");

        let mut request = request_in("USA", "h");
        request.user_principal = mallory.clone();
        assert_eq!(
            service.register_voter(&mallory, request.clone()).await,
            Err(RegistrationError::InvalidIdentity)
        );

        // Even with her own identity bound, the claim must match it.
        collaborators.identity.bind(mallory.clone(), "mallory-id");
        assert_eq!(
            service.register_voter(&mallory, request).await,
            Err(RegistrationError::InvalidIdentity)
        );
        assert_empty_ledger(&service).await;
        assert!(collaborators.fees.transfers().is_empty());
    }

    /// Revoking an identity after registration does not remove the record,
    /// but blocks new registrations.
    #[tokio::test]
    async fn test_revoked_identity_cannot_register_again() {
        let (service, collaborators) = ready_service().await;
        service
            .register_voter(&caller(), request_in("USA", "h"))
            .await
            .unwrap();

        collaborators.identity.unbind(&caller());
        assert_eq!(
            service.register_voter(&caller(), request_in("EU", "h")).await,
            Err(RegistrationError::InvalidIdentity)
        );
        assert!(service
            .get_registration(CALLER_IDENTITY, &JurisdictionId::from("USA"))
            .await
            .is_some());
    }

    /// The registrant is not automatically an administrator of their record.
    #[tokio::test]
    async fn test_owner_cannot_self_edit_without_admin() {
        let (service, collaborators) = ready_service().await;
        service
            .register_voter(&caller(), request_in("USA", "h"))
            .await
            .unwrap();
        collaborators.admins.revoke(&caller());

        let usa = JurisdictionId::from("USA");
        assert_eq!(
            service
                .update_registration_status(&caller(), CALLER_IDENTITY, &usa, "active")
                .await,
            Err(RegistrationError::NotAdmin)
        );
        assert!(service
            .get_registration_update(CALLER_IDENTITY, &usa)
            .await
            .is_none());
    }

    /// Probing for records must not reveal admin status and vice versa:
    /// a missing record reports NotFound before any admin check.
    #[tokio::test]
    async fn test_missing_record_reported_before_admin_gate() {
        let (service, _) = ready_service().await;
        let err = service
            .update_registration(
                &Principal::from("MALLORY"),
                "nobody",
                &JurisdictionId::from("USA"),
                "t".into(),
                String::new(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), 1004);
    }

    /// Nobody can replace the authority once it is set, including the authority.
    #[tokio::test]
    async fn test_authority_hijack_rejected() {
        let (service, _) = ready_service().await;
        let mallory = Principal::from("MALLORY");

        assert_eq!(
            service.set_authority_contract(&mallory, mallory.clone()).await,
            Err(RegistrationError::InvalidUserPrincipal)
        );
        assert_eq!(
            service
                .set_authority_contract(&authority(), mallory.clone())
                .await,
            Err(RegistrationError::AuthorityAlreadySet)
        );
        assert_eq!(
            service.get_settings().await.authority_contract,
            Some(authority())
        );
    }

    /// Only the authority can move the cap or the fee.
    #[tokio::test]
    async fn test_settings_tampering_rejected() {
        let (service, _) = ready_service().await;
        let mallory = Principal::from("MALLORY");

        let before = service.get_settings().await;
        assert_eq!(
            service.set_registration_fee(&mallory, 0).await,
            Err(RegistrationError::NotAuthority)
        );
        assert_eq!(
            service.set_max_registrations(&caller(), 1).await,
            Err(RegistrationError::NotAuthority)
        );
        assert_eq!(service.get_settings().await, before);
        assert_empty_ledger(&service).await;
    }
}
