//! # Core Domain Entities
//!
//! Records held by the ledger and the settings that gate it.

use crate::domain::invariants::limits;
use crate::domain::value_objects::{BlockHeight, Principal, RegistrationStatus};
use serde::{Deserialize, Serialize};

// =============================================================================
// REGISTRATION
// =============================================================================

/// A voter registration, one per (user, jurisdiction) pair.
///
/// `registration_hash` and `eligibility_score` are fixed at creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    /// Opaque content hash supplied by the registrant (1-64 chars).
    pub registration_hash: String,
    /// Short title (1-100 chars).
    pub title: String,
    /// Free-form description (0-500 chars).
    pub description: String,
    /// Block height of the last mutation.
    pub timestamp: BlockHeight,
    /// Lifecycle label.
    pub status: RegistrationStatus,
    /// Score assigned by the eligibility collaborator at creation.
    pub eligibility_score: u32,
}

impl Registration {
    /// Creates a freshly registered (active) record.
    #[must_use]
    pub fn new_active(
        registration_hash: String,
        title: String,
        description: String,
        timestamp: BlockHeight,
        eligibility_score: u32,
    ) -> Self {
        Self {
            registration_hash,
            title,
            description,
            timestamp,
            status: RegistrationStatus::Active,
            eligibility_score,
        }
    }
}

// =============================================================================
// REGISTRATION UPDATE
// =============================================================================

/// The most recent edit applied to a registration.
///
/// Overwritten on every edit; earlier edits are not retained.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationUpdate {
    /// Title written by the edit.
    pub update_title: String,
    /// Description written by the edit.
    pub update_description: String,
    /// Block height of the edit.
    pub update_timestamp: BlockHeight,
    /// Administrator who performed the edit.
    pub updater: Principal,
}

// =============================================================================
// LEDGER SETTINGS
// =============================================================================

/// Process-wide ledger settings, owned by the ledger instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSettings {
    /// Upper bound on registrations ever created. Always positive.
    pub max_registrations: u64,
    /// Fee charged per registration.
    pub registration_fee: u64,
    /// Principal receiving fees and allowed to change settings. Set once.
    pub authority_contract: Option<Principal>,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            max_registrations: limits::DEFAULT_MAX_REGISTRATIONS,
            registration_fee: limits::DEFAULT_REGISTRATION_FEE,
            authority_contract: None,
        }
    }
}

// =============================================================================
// JURISDICTION RULES
// =============================================================================

/// Eligibility rules published by the jurisdiction registry.
///
/// Fetched during registration but not enforced by the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JurisdictionRules {
    /// Minimum voter age in years.
    pub min_age: u32,
    /// Minimum residency in years.
    pub min_residency: u32,
}

// =============================================================================
// TESTS
// =============================================================================
