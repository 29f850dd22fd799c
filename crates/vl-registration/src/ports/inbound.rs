//! # Driving Ports (API - Inbound)
//!
//! The operations the registration ledger exposes. Every operation that acts
//! on behalf of someone takes the caller principal explicitly.

use crate::domain::entities::{LedgerSettings, Registration, RegistrationUpdate};
use crate::domain::value_objects::{JurisdictionId, Principal};
use crate::errors::RegistrationError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// =============================================================================
// REGISTER VOTER REQUEST
// =============================================================================

/// Arguments of a registration request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterVoterRequest {
    /// Principal whose identity backs the registration.
    pub user_principal: Principal,
    /// Claimed user id; must equal the identity bound to `user_principal`.
    pub user_id: String,
    /// Jurisdiction to register under.
    pub jurisdiction_id: JurisdictionId,
    /// Opaque content hash (1-64 chars).
    pub registration_hash: String,
    /// Title (1-100 chars).
    pub title: String,
    /// Description (0-500 chars).
    #[serde(default)]
    pub description: String,
}

// =============================================================================
// REGISTRATION API (Primary Driving Port)
// =============================================================================

/// Primary API of the registration ledger.
///
/// Each call executes as one atomic unit: it either succeeds with all of its
/// effects applied or fails leaving the ledger unchanged.
///
/// ## Usage
///
/// ```ignore
/// let reg = api.register_voter(&caller, request).await?;
/// api.update_registration_status(&admin, &reg_user, &jurisdiction, "archived").await?;
/// ```
#[async_trait]
pub trait RegistrationApi: Send + Sync {
    /// Set the authority contract (once).
    ///
    /// # Errors
    ///
    /// * `InvalidUserPrincipal` - `authority == caller`
    /// * `AuthorityAlreadySet` - already configured
    async fn set_authority_contract(
        &self,
        caller: &Principal,
        authority: Principal,
    ) -> Result<(), RegistrationError>;

    /// Change the registration cap.
    ///
    /// # Errors
    ///
    /// * `InvalidMaxRegistrations` - `new_max == 0`
    /// * `AuthorityNotConfigured` - no authority
    /// * `NotAuthority` - caller is not the authority
    async fn set_max_registrations(
        &self,
        caller: &Principal,
        new_max: u64,
    ) -> Result<(), RegistrationError>;

    /// Change the registration fee.
    ///
    /// # Errors
    ///
    /// * `AuthorityNotConfigured` - no authority
    /// * `NotAuthority` - caller is not the authority
    async fn set_registration_fee(
        &self,
        caller: &Principal,
        new_fee: u64,
    ) -> Result<(), RegistrationError>;

    /// Register a voter. The fee is charged to `caller`.
    ///
    /// Checks run in this order and the first failure wins: capacity, user id,
    /// hash, title, description, identity, jurisdiction, uniqueness, authority.
    async fn register_voter(
        &self,
        caller: &Principal,
        request: RegisterVoterRequest,
    ) -> Result<Registration, RegistrationError>;

    /// Edit title and description (administrators only).
    ///
    /// # Errors
    ///
    /// `RegistrationNotFound`, then `NotAdmin`, then `InvalidTitle` / `InvalidDescription`.
    async fn update_registration(
        &self,
        caller: &Principal,
        user_id: &str,
        jurisdiction_id: &JurisdictionId,
        new_title: String,
        new_description: String,
    ) -> Result<(), RegistrationError>;

    /// Change the status label (administrators only).
    ///
    /// # Errors
    ///
    /// `RegistrationNotFound`, then `NotAdmin`, then `InvalidStatus`.
    async fn update_registration_status(
        &self,
        caller: &Principal,
        user_id: &str,
        jurisdiction_id: &JurisdictionId,
        new_status: &str,
    ) -> Result<(), RegistrationError>;

    /// Look up a registration.
    async fn get_registration(
        &self,
        user_id: &str,
        jurisdiction_id: &JurisdictionId,
    ) -> Option<Registration>;

    /// Look up the last edit of a registration.
    async fn get_registration_update(
        &self,
        user_id: &str,
        jurisdiction_id: &JurisdictionId,
    ) -> Option<RegistrationUpdate>;

    /// Registrations ever created.
    async fn get_registration_count(&self) -> u64;

    /// Registrations created in a jurisdiction (0 if none).
    async fn get_jurisdiction_reg_count(&self, jurisdiction_id: &JurisdictionId) -> u64;

    /// Current settings.
    async fn get_settings(&self) -> LedgerSettings;
}

// =============================================================================
// TESTS
// =============================================================================
