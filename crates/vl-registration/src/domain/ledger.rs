//! # Registration Ledger - Record Store, Counters, and Settings
//!
//! The aggregate owned by the registration subsystem.
//!
//! ## Data Structures
//!
//! - `registrations`: one record per `RegistrationKey`
//! - `updates`: last edit per key (overwritten, never appended)
//! - `jurisdiction_counts`: registrations created per jurisdiction
//! - `next_registration_id`: registrations ever created (capacity gate)
//!
//! ## Invariants Enforced
//!
//! - Key uniqueness: `insert()` rejects an existing key
//! - Counter agreement: `insert()` is the only path that bumps counters, and
//!   it bumps both `next_registration_id` and the jurisdiction counter
//! - Authority set once: `set_authority()` rejects reassignment
//!
//! Nothing here performs I/O. Collaborator answers (identity, jurisdiction
//! validity, admin membership) are obtained by the service and the ledger
//! only sees their outcome.

use super::entities::{LedgerSettings, Registration, RegistrationUpdate};
use super::value_objects::{
    BlockHeight, JurisdictionId, Principal, RegistrationKey, RegistrationStatus,
};
use crate::errors::RegistrationError;
use std::collections::HashMap;

/// Registration record store with per-jurisdiction counters.
#[derive(Debug, Default)]
pub struct RegistrationLedger {
    /// Gated settings.
    settings: LedgerSettings,

    /// Registrations ever created. Never decreases.
    next_registration_id: u64,

    /// Records indexed by (user, jurisdiction).
    registrations: HashMap<RegistrationKey, Registration>,

    /// Last edit per key.
    updates: HashMap<RegistrationKey, RegistrationUpdate>,

    /// Registrations created per jurisdiction. Never decremented.
    jurisdiction_counts: HashMap<JurisdictionId, u64>,
}

impl RegistrationLedger {
    /// Creates an empty ledger with the given settings.
    #[must_use]
    pub fn new(settings: LedgerSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Creates an empty ledger with default settings.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::default()
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Current settings.
    #[must_use]
    pub fn settings(&self) -> &LedgerSettings {
        &self.settings
    }

    /// Registrations ever created.
    #[must_use]
    pub fn registration_count(&self) -> u64 {
        self.next_registration_id
    }

    /// Registrations created in a jurisdiction (0 if never seen).
    #[must_use]
    pub fn jurisdiction_count(&self, jurisdiction_id: &JurisdictionId) -> u64 {
        self.jurisdiction_counts
            .get(jurisdiction_id)
            .copied()
            .unwrap_or(0)
    }

    /// Iterates over all jurisdiction counters.
    pub fn jurisdiction_counts(&self) -> impl Iterator<Item = (&JurisdictionId, u64)> {
        self.jurisdiction_counts.iter().map(|(id, count)| (id, *count))
    }

    /// Looks up a registration.
    #[must_use]
    pub fn get(&self, key: &RegistrationKey) -> Option<&Registration> {
        self.registrations.get(key)
    }

    /// Looks up the last edit of a registration.
    #[must_use]
    pub fn get_update(&self, key: &RegistrationKey) -> Option<&RegistrationUpdate> {
        self.updates.get(key)
    }

    /// Iterates over all registrations.
    pub fn registrations(&self) -> impl Iterator<Item = (&RegistrationKey, &Registration)> {
        self.registrations.iter()
    }

    /// Iterates over all stored edits.
    pub fn updates(&self) -> impl Iterator<Item = (&RegistrationKey, &RegistrationUpdate)> {
        self.updates.iter()
    }

    /// Number of records in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Returns true if no registration has been created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    // =========================================================================
    // CHECKS (pure reads)
    // =========================================================================

    /// Fails with `CapacityExceeded` once `max_registrations` is reached.
    pub fn check_capacity(&self) -> Result<(), RegistrationError> {
        if self.next_registration_id < self.settings.max_registrations {
            Ok(())
        } else {
            Err(RegistrationError::CapacityExceeded {
                count: self.next_registration_id,
                max: self.settings.max_registrations,
            })
        }
    }

    /// Fails with `DuplicateRegistration` if the key is taken.
    pub fn check_unique(&self, key: &RegistrationKey) -> Result<(), RegistrationError> {
        if self.registrations.contains_key(key) {
            Err(RegistrationError::DuplicateRegistration)
        } else {
            Ok(())
        }
    }

    /// Returns the existing record or `RegistrationNotFound`.
    pub fn require(&self, key: &RegistrationKey) -> Result<&Registration, RegistrationError> {
        self.registrations
            .get(key)
            .ok_or(RegistrationError::RegistrationNotFound)
    }

    /// Returns the configured authority or `AuthorityNotConfigured`.
    pub fn authority(&self) -> Result<&Principal, RegistrationError> {
        self.settings
            .authority_contract
            .as_ref()
            .ok_or(RegistrationError::AuthorityNotConfigured)
    }

    /// Authority must be configured and equal to the caller.
    fn require_authority_caller(&self, caller: &Principal) -> Result<(), RegistrationError> {
        if self.authority()? == caller {
            Ok(())
        } else {
            Err(RegistrationError::NotAuthority)
        }
    }

    // =========================================================================
    // SETTINGS
    // =========================================================================

    /// Sets the authority contract. Allowed exactly once.
    ///
    /// # Errors
    /// - `InvalidUserPrincipal` if `authority == caller`
    /// - `AuthorityAlreadySet` if an authority is already configured
    pub fn set_authority(
        &mut self,
        caller: &Principal,
        authority: Principal,
    ) -> Result<(), RegistrationError> {
        if &authority == caller {
            return Err(RegistrationError::InvalidUserPrincipal);
        }
        if self.settings.authority_contract.is_some() {
            return Err(RegistrationError::AuthorityAlreadySet);
        }
        self.settings.authority_contract = Some(authority);
        Ok(())
    }

    /// Changes the registration cap.
    ///
    /// # Errors
    /// - `InvalidMaxRegistrations` if `new_max == 0`
    /// - `AuthorityNotConfigured` if no authority is set
    /// - `NotAuthority` if the caller is not the authority
    pub fn set_max_registrations(
        &mut self,
        caller: &Principal,
        new_max: u64,
    ) -> Result<(), RegistrationError> {
        if new_max == 0 {
            return Err(RegistrationError::InvalidMaxRegistrations);
        }
        self.require_authority_caller(caller)?;
        self.settings.max_registrations = new_max;
        Ok(())
    }

    /// Changes the registration fee.
    ///
    /// # Errors
    /// - `AuthorityNotConfigured` if no authority is set
    /// - `NotAuthority` if the caller is not the authority
    pub fn set_registration_fee(
        &mut self,
        caller: &Principal,
        new_fee: u64,
    ) -> Result<(), RegistrationError> {
        self.require_authority_caller(caller)?;
        self.settings.registration_fee = new_fee;
        Ok(())
    }

    // =========================================================================
    // MUTATIONS
    // =========================================================================

    /// Inserts a new registration, or rejects it.
    ///
    /// This is the only path that creates records and the only path that
    /// touches the counters.
    ///
    /// # Errors
    /// - `CapacityExceeded` if the cap is reached
    /// - `DuplicateRegistration` if the key is taken
    pub fn insert(
        &mut self,
        key: RegistrationKey,
        registration: Registration,
    ) -> Result<&Registration, RegistrationError> {
        self.check_capacity()?;
        self.check_unique(&key)?;

        *self
            .jurisdiction_counts
            .entry(key.jurisdiction_id.clone())
            .or_insert(0) += 1;
        self.next_registration_id += 1;

        Ok(self.registrations.entry(key).or_insert(registration))
    }

    /// Overwrites title and description and records the edit.
    ///
    /// Hash, status, and eligibility score are left untouched.
    ///
    /// # Errors
    /// - `RegistrationNotFound` if the key is absent
    pub fn apply_edit(
        &mut self,
        key: &RegistrationKey,
        title: String,
        description: String,
        height: BlockHeight,
        updater: Principal,
    ) -> Result<&Registration, RegistrationError> {
        let registration = self
            .registrations
            .get_mut(key)
            .ok_or(RegistrationError::RegistrationNotFound)?;

        registration.title.clone_from(&title);
        registration.description.clone_from(&description);
        registration.timestamp = height;

        self.updates.insert(
            key.clone(),
            RegistrationUpdate {
                update_title: title,
                update_description: description,
                update_timestamp: height,
                updater,
            },
        );

        Ok(registration)
    }

    /// Overwrites status and timestamp.
    ///
    /// # Errors
    /// - `RegistrationNotFound` if the key is absent
    pub fn apply_status(
        &mut self,
        key: &RegistrationKey,
        status: RegistrationStatus,
        height: BlockHeight,
    ) -> Result<&Registration, RegistrationError> {
        let registration = self
            .registrations
            .get_mut(key)
            .ok_or(RegistrationError::RegistrationNotFound)?;
        registration.status = status;
        registration.timestamp = height;
        Ok(registration)
    }
}

// =============================================================================
// TESTS
// =============================================================================
