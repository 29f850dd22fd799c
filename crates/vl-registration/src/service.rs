//! # Registration Service
//!
//! Implements [`RegistrationApi`] on top of the [`RegistrationLedger`]
//! aggregate and the driven ports.
//!
//! ## Atomicity
//!
//! The ledger sits behind a single `tokio::sync::Mutex`. Every operation takes
//! the lock before its first read and holds it across the collaborator calls
//! until its last write, so a read-validate-write sequence cannot interleave
//! with another one. Two concurrent registrations for the same key therefore
//! produce exactly one success.
//!
//! ## Registration Pipeline
//!
//! 1. Capacity
//! 2. Field lengths (user id, hash, title, description)
//! 3. Identity of `user_principal` equals `user_id`
//! 4. Jurisdiction recognized
//! 5. Key unused
//! 6. Authority configured
//! 7. Rules fetched (logged, not enforced), score computed
//! 8. Fee transferred from caller to authority
//! 9. Record inserted, counters bumped

use crate::adapters::collaborators::InMemoryCollaborators;
use crate::domain::entities::{JurisdictionRules, LedgerSettings, Registration, RegistrationUpdate};
use crate::domain::invariants::{check_all_invariants, limits, InvariantCheckResult};
use crate::domain::ledger::RegistrationLedger;
use crate::domain::services::{validate_content, validate_registration_fields};
use crate::domain::value_objects::{JurisdictionId, Principal, RegistrationKey, RegistrationStatus};
use crate::errors::RegistrationError;
use crate::metrics;
use crate::ports::inbound::{RegisterVoterRequest, RegistrationApi};
use crate::ports::outbound::{
    AdminAuthority, BlockClock, EligibilityScorer, FeeTransfer, IdentityGate, JurisdictionRegistry,
};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument, warn};

// =============================================================================
// COLLABORATORS
// =============================================================================

/// Driven-port handles used by the service.
#[derive(Clone)]
pub struct LedgerCollaborators {
    /// Principal -> identity hash.
    pub identity: Arc<dyn IdentityGate>,
    /// Jurisdiction validity and rules.
    pub jurisdictions: Arc<dyn JurisdictionRegistry>,
    /// Eligibility scores.
    pub scorer: Arc<dyn EligibilityScorer>,
    /// Fee movement.
    pub fees: Arc<dyn FeeTransfer>,
    /// Administrator set.
    pub admins: Arc<dyn AdminAuthority>,
    /// Block height source.
    pub clock: Arc<dyn BlockClock>,
}

impl std::fmt::Debug for LedgerCollaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerCollaborators")
            .field("block_height", &self.clock.block_height())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// SERVICE STATS
// =============================================================================

/// Operation counters for the service.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServiceStats {
    /// Registrations created.
    pub registrations_created: u64,
    /// Successful edits.
    pub edits_applied: u64,
    /// Successful status changes.
    pub status_changes: u64,
    /// Settings changes (authority, max, fee).
    pub settings_changes: u64,
    /// Operations that returned an error.
    pub rejected_operations: u64,
    /// Sum of fees transferred to the authority.
    pub fees_collected: u64,
}

// =============================================================================
// REGISTRATION SERVICE
// =============================================================================

/// The registration ledger service.
///
/// Thread-safe; share it across tasks via `Arc`.
pub struct RegistrationService {
    ledger: Mutex<RegistrationLedger>,
    collaborators: LedgerCollaborators,
    stats: Arc<RwLock<ServiceStats>>,
}

impl RegistrationService {
    /// Create a service with default settings.
    pub fn new(collaborators: LedgerCollaborators) -> Self {
        Self::with_settings(collaborators, LedgerSettings::default())
    }

    /// Create a service with explicit settings.
    pub fn with_settings(collaborators: LedgerCollaborators, settings: LedgerSettings) -> Self {
        Self::with_ledger(collaborators, RegistrationLedger::new(settings))
    }

    /// Create a service over an existing ledger.
    pub fn with_ledger(collaborators: LedgerCollaborators, ledger: RegistrationLedger) -> Self {
        Self {
            ledger: Mutex::new(ledger),
            collaborators,
            stats: Arc::new(RwLock::new(ServiceStats::default())),
        }
    }

    /// Get current service statistics.
    pub async fn stats(&self) -> ServiceStats {
        self.stats.read().await.clone()
    }

    /// Run the ledger consistency checks.
    pub async fn check_invariants(&self) -> InvariantCheckResult {
        check_all_invariants(&*self.ledger.lock().await)
    }

    async fn reject(&self, op: &'static str, err: RegistrationError) -> RegistrationError {
        warn!(op, code = err.code(), kind = err.kind(), "operation rejected: {}", err);
        self.stats.write().await.rejected_operations += 1;
        metrics::record_rejection(err.kind());
        err
    }

    async fn settings_changed(&self) {
        self.stats.write().await.settings_changes += 1;
    }

    async fn try_register(
        &self,
        caller: &Principal,
        request: RegisterVoterRequest,
    ) -> Result<(Registration, u64, u64), RegistrationError> {
        let RegisterVoterRequest {
            user_principal,
            user_id,
            jurisdiction_id,
            registration_hash,
            title,
            description,
        } = request;

        let mut ledger = self.ledger.lock().await;

        ledger.check_capacity()?;
        validate_registration_fields(&user_id, &registration_hash, &title, &description)?;

        let identity = self
            .collaborators
            .identity
            .resolve_identity(&user_principal)
            .await;
        if identity.as_deref() != Some(user_id.as_str()) {
            debug!(principal = %user_principal, ?identity, "identity mismatch");
            return Err(RegistrationError::InvalidIdentity);
        }

        if !self
            .collaborators
            .jurisdictions
            .is_valid_jurisdiction(&jurisdiction_id)
            .await
        {
            return Err(RegistrationError::InvalidJurisdiction);
        }

        let key = RegistrationKey::new(user_id, jurisdiction_id);
        ledger.check_unique(&key)?;
        let authority = ledger.authority()?.clone();

        let rules: Option<JurisdictionRules> = self
            .collaborators
            .jurisdictions
            .rules_for(&key.jurisdiction_id)
            .await;
        debug!(jurisdiction = %key.jurisdiction_id, ?rules, "jurisdiction rules");

        let score = self
            .collaborators
            .scorer
            .score_for(&key.jurisdiction_id, &registration_hash)
            .await
            .unwrap_or(limits::DEFAULT_ELIGIBILITY_SCORE);

        let fee = ledger.settings().registration_fee;
        self.collaborators
            .fees
            .transfer(fee, caller, &authority)
            .await?;
        debug!(fee, from = %caller, to = %authority, "fee transferred");

        let height = self.collaborators.clock.block_height();
        let registration =
            Registration::new_active(registration_hash, title, description, height, score);
        let created = ledger.insert(key, registration)?.clone();

        Ok((created, fee, ledger.registration_count()))
    }
}

impl std::fmt::Debug for RegistrationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationService")
            .field("collaborators", &self.collaborators)
            .finish_non_exhaustive()
    }
}

/// Create a service wired to in-memory collaborators.
///
/// Seeded with principal `ST1TEST` bound to identity `userhash123`,
/// jurisdictions `USA` (rules 18/1) and `EU`, and `ST1TEST` as administrator.
/// The clock starts at height 1.
pub fn create_test_service() -> (RegistrationService, InMemoryCollaborators) {
    let collaborators = InMemoryCollaborators::new();
    let caller = Principal::from("ST1TEST");

    collaborators.identity.bind(caller.clone(), "userhash123");
    collaborators
        .jurisdictions
        .add_jurisdiction(JurisdictionId::from("USA"));
    collaborators
        .jurisdictions
        .add_jurisdiction(JurisdictionId::from("EU"));
    collaborators.jurisdictions.set_rules(
        JurisdictionId::from("USA"),
        JurisdictionRules {
            min_age: 18,
            min_residency: 1,
        },
    );
    collaborators.admins.grant(caller);
    collaborators.clock.set(1);

    let service = RegistrationService::new(collaborators.as_collaborators());
    (service, collaborators)
}

// =============================================================================
// RegistrationApi Implementation
// =============================================================================

#[async_trait]
impl RegistrationApi for RegistrationService {
    #[instrument(skip_all, fields(caller = %caller, authority = %authority))]
    async fn set_authority_contract(
        &self,
        caller: &Principal,
        authority: Principal,
    ) -> Result<(), RegistrationError> {
        let result = self.ledger.lock().await.set_authority(caller, authority);
        match result {
            Ok(()) => {
                info!("authority contract set");
                self.settings_changed().await;
                Ok(())
            }
            Err(err) => Err(self.reject("set_authority_contract", err).await),
        }
    }

    #[instrument(skip_all, fields(caller = %caller))]
    async fn set_max_registrations(
        &self,
        caller: &Principal,
        new_max: u64,
    ) -> Result<(), RegistrationError> {
        let result = self
            .ledger
            .lock()
            .await
            .set_max_registrations(caller, new_max);
        match result {
            Ok(()) => {
                info!(new_max, "max registrations changed");
                self.settings_changed().await;
                Ok(())
            }
            Err(err) => Err(self.reject("set_max_registrations", err).await),
        }
    }

    #[instrument(skip_all, fields(caller = %caller))]
    async fn set_registration_fee(
        &self,
        caller: &Principal,
        new_fee: u64,
    ) -> Result<(), RegistrationError> {
        let result = self
            .ledger
            .lock()
            .await
            .set_registration_fee(caller, new_fee);
        match result {
            Ok(()) => {
                info!(new_fee, "registration fee changed");
                self.settings_changed().await;
                Ok(())
            }
            Err(err) => Err(self.reject("set_registration_fee", err).await),
        }
    }

    #[instrument(
        skip_all,
        fields(
            caller = %caller,
            user_id = %request.user_id,
            jurisdiction = %request.jurisdiction_id,
        )
    )]
    async fn register_voter(
        &self,
        caller: &Principal,
        request: RegisterVoterRequest,
    ) -> Result<Registration, RegistrationError> {
        match self.try_register(caller, request).await {
            Ok((registration, fee, count)) => {
                info!(
                    score = registration.eligibility_score,
                    height = registration.timestamp,
                    fee,
                    "voter registered"
                );
                {
                    let mut stats = self.stats.write().await;
                    stats.registrations_created += 1;
                    stats.fees_collected = stats.fees_collected.saturating_add(fee);
                }
                metrics::record_registration(fee, count);
                Ok(registration)
            }
            Err(err) => Err(self.reject("register_voter", err).await),
        }
    }

    #[instrument(
        skip_all,
        fields(caller = %caller, user_id = %user_id, jurisdiction = %jurisdiction_id)
    )]
    async fn update_registration(
        &self,
        caller: &Principal,
        user_id: &str,
        jurisdiction_id: &JurisdictionId,
        new_title: String,
        new_description: String,
    ) -> Result<(), RegistrationError> {
        let result = async {
            let mut ledger = self.ledger.lock().await;
            let key = RegistrationKey::new(user_id, jurisdiction_id.clone());
            ledger.require(&key)?;
            if !self.collaborators.admins.is_admin(caller).await {
                return Err(RegistrationError::NotAdmin);
            }
            validate_content(&new_title, &new_description)?;

            let height = self.collaborators.clock.block_height();
            ledger.apply_edit(&key, new_title, new_description, height, caller.clone())?;
            Ok::<_, RegistrationError>(height)
        }
        .await;

        match result {
            Ok(height) => {
                info!(height, "registration updated");
                self.stats.write().await.edits_applied += 1;
                Ok(())
            }
            Err(err) => Err(self.reject("update_registration", err).await),
        }
    }

    #[instrument(
        skip_all,
        fields(
            caller = %caller,
            user_id = %user_id,
            jurisdiction = %jurisdiction_id,
            new_status = %new_status,
        )
    )]
    async fn update_registration_status(
        &self,
        caller: &Principal,
        user_id: &str,
        jurisdiction_id: &JurisdictionId,
        new_status: &str,
    ) -> Result<(), RegistrationError> {
        let result = async {
            let mut ledger = self.ledger.lock().await;
            let key = RegistrationKey::new(user_id, jurisdiction_id.clone());
            ledger.require(&key)?;
            if !self.collaborators.admins.is_admin(caller).await {
                return Err(RegistrationError::NotAdmin);
            }
            let status: RegistrationStatus = new_status.parse()?;

            let height = self.collaborators.clock.block_height();
            ledger.apply_status(&key, status, height)?;
            Ok::<_, RegistrationError>(status)
        }
        .await;

        match result {
            Ok(status) => {
                info!(%status, "registration status changed");
                self.stats.write().await.status_changes += 1;
                metrics::record_status_transition(status.as_str());
                Ok(())
            }
            Err(err) => Err(self.reject("update_registration_status", err).await),
        }
    }

    async fn get_registration(
        &self,
        user_id: &str,
        jurisdiction_id: &JurisdictionId,
    ) -> Option<Registration> {
        let key = RegistrationKey::new(user_id, jurisdiction_id.clone());
        self.ledger.lock().await.get(&key).cloned()
    }

    async fn get_registration_update(
        &self,
        user_id: &str,
        jurisdiction_id: &JurisdictionId,
    ) -> Option<RegistrationUpdate> {
        let key = RegistrationKey::new(user_id, jurisdiction_id.clone());
        self.ledger.lock().await.get_update(&key).cloned()
    }

    async fn get_registration_count(&self) -> u64 {
        self.ledger.lock().await.registration_count()
    }

    async fn get_jurisdiction_reg_count(&self, jurisdiction_id: &JurisdictionId) -> u64 {
        self.ledger.lock().await.jurisdiction_count(jurisdiction_id)
    }

    async fn get_settings(&self) -> LedgerSettings {
        self.ledger.lock().await.settings().clone()
    }
}

// =============================================================================
// TESTS
// =============================================================================
