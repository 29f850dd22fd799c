//! Shared fixtures for the suite.

use vl_registration::prelude::*;

/// Default registrant principal.
pub const CALLER: &str = "ST1TEST";
/// Identity bound to [`CALLER`].
pub const CALLER_IDENTITY: &str = "userhash123";
/// Authority contract installed by [`ready_service`].
pub const AUTHORITY: &str = "ST2TEST";

/// `Principal` for [`CALLER`].
#[must_use]
pub fn caller() -> Principal {
    Principal::from(CALLER)
}

/// `Principal` for [`AUTHORITY`].
#[must_use]
pub fn authority() -> Principal {
    Principal::from(AUTHORITY)
}

/// A valid request for `caller()` in `jurisdiction`.
#[must_use]
pub fn request_in(jurisdiction: &str, hash: &str) -> RegisterVoterRequest {
    RegisterVoterRequest {
        user_principal: caller(),
        user_id: CALLER_IDENTITY.to_string(),
        jurisdiction_id: JurisdictionId::from(jurisdiction),
        registration_hash: hash.to_string(),
        title: "Voter Reg".to_string(),
        description: "Desc".to_string(),
    }
}

/// Bind a fresh principal `user-{n}` to identity `id-{n}` and return a valid
/// request for it in `USA`.
pub fn enroll(collaborators: &InMemoryCollaborators, n: usize) -> (Principal, RegisterVoterRequest) {
    let principal = Principal::new(format!("user-{n}"));
    let identity = format!("id-{n}");
    collaborators.identity.bind(principal.clone(), identity.clone());
    let request = RegisterVoterRequest {
        user_principal: principal.clone(),
        user_id: identity,
        jurisdiction_id: JurisdictionId::from("USA"),
        registration_hash: format!("hash-{n}"),
        title: format!("Registration {n}"),
        description: String::new(),
    };
    (principal, request)
}

/// Test service with the authority contract already installed.
pub async fn ready_service() -> (RegistrationService, InMemoryCollaborators) {
    let (service, collaborators) = create_test_service();
    service
        .set_authority_contract(&caller(), authority())
        .await
        .unwrap_or_else(|e| panic!("fixture authority rejected: {e}"));
    (service, collaborators)
}
