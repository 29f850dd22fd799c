//! # Domain Invariants
//!
//! Invariants that MUST hold between any two ledger operations.
//!
//! - INVARIANT-1: Registration count equals store size (records are never deleted)
//! - INVARIANT-2: Jurisdiction counters sum to the registration count
//! - INVARIANT-3: Every stored edit belongs to an existing registration
//! - INVARIANT-4: Every record satisfies the field limits

use crate::domain::ledger::RegistrationLedger;
use crate::domain::services::{validate_content, validate_hash, validate_user_id};
use crate::domain::value_objects::RegistrationKey;

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// INVARIANT-1: Registration count equals store size.
#[must_use]
pub fn check_store_size_invariant(ledger: &RegistrationLedger) -> bool {
    ledger.registration_count() == ledger.len() as u64
}

/// INVARIANT-2: Jurisdiction counters sum to the registration count.
#[must_use]
pub fn check_counter_sum_invariant(ledger: &RegistrationLedger) -> bool {
    let sum: u64 = ledger.jurisdiction_counts().map(|(_, count)| count).sum();
    sum == ledger.registration_count()
}

/// INVARIANT-3: No orphan edits.
#[must_use]
pub fn check_update_ownership_invariant(ledger: &RegistrationLedger) -> Vec<RegistrationKey> {
    ledger
        .updates()
        .filter(|(key, _)| ledger.get(key).is_none())
        .map(|(key, _)| key.clone())
        .collect()
}

/// INVARIANT-4: Field limits hold for every stored record.
#[must_use]
pub fn check_field_limits_invariant(ledger: &RegistrationLedger) -> Vec<RegistrationKey> {
    ledger
        .registrations()
        .filter(|(key, reg)| {
            validate_user_id(&key.user_id).is_err()
                || validate_hash(&reg.registration_hash).is_err()
                || validate_content(&reg.title, &reg.description).is_err()
        })
        .map(|(key, _)| key.clone())
        .collect()
}

/// Check all invariants at once.
#[must_use]
pub fn check_all_invariants(ledger: &RegistrationLedger) -> InvariantCheckResult {
    let mut violations = Vec::new();

    if !check_store_size_invariant(ledger) {
        violations.push(InvariantViolation::StoreSizeMismatch {
            count: ledger.registration_count(),
            stored: ledger.len(),
        });
    }

    if !check_counter_sum_invariant(ledger) {
        violations.push(InvariantViolation::CounterSumMismatch {
            sum: ledger.jurisdiction_counts().map(|(_, count)| count).sum(),
            count: ledger.registration_count(),
        });
    }

    for key in check_update_ownership_invariant(ledger) {
        violations.push(InvariantViolation::OrphanUpdate(key));
    }

    for key in check_field_limits_invariant(ledger) {
        violations.push(InvariantViolation::FieldLimits(key));
    }

    if violations.is_empty() {
        InvariantCheckResult::Valid
    } else {
        InvariantCheckResult::Invalid(violations)
    }
}

// =============================================================================
// INVARIANT TYPES
// =============================================================================

/// Result of checking all invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantCheckResult {
    /// All invariants hold.
    Valid,
    /// One or more invariants violated.
    Invalid(Vec<InvariantViolation>),
}

impl InvariantCheckResult {
    /// Returns true if all invariants hold.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Specific invariant violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Registration count disagrees with the number of stored records.
    StoreSizeMismatch {
        /// Registration counter.
        count: u64,
        /// Records in the store.
        stored: usize,
    },
    /// Jurisdiction counters do not sum to the registration count.
    CounterSumMismatch {
        /// Sum of the per-jurisdiction counters.
        sum: u64,
        /// Registration counter.
        count: u64,
    },
    /// An edit exists for a key with no registration.
    OrphanUpdate(RegistrationKey),
    /// A stored record violates the field limits.
    FieldLimits(RegistrationKey),
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StoreSizeMismatch { count, stored } => {
                write!(f, "registration count {count} != stored records {stored}")
            }
            Self::CounterSumMismatch { sum, count } => {
                write!(f, "jurisdiction counters sum {sum} != registration count {count}")
            }
            Self::OrphanUpdate(key) => write!(f, "orphan update for {key}"),
            Self::FieldLimits(key) => write!(f, "field limits violated by {key}"),
        }
    }
}

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Field limits and setting defaults.
pub mod limits {
    /// Maximum user id length (characters).
    pub const MAX_USER_ID_LEN: usize = 40;

    /// Maximum registration hash length (characters).
    pub const MAX_HASH_LEN: usize = 64;

    /// Maximum title length (characters).
    pub const MAX_TITLE_LEN: usize = 100;

    /// Maximum description length (characters).
    pub const MAX_DESCRIPTION_LEN: usize = 500;

    /// Default registration cap.
    pub const DEFAULT_MAX_REGISTRATIONS: u64 = 1_000_000;

    /// Default registration fee.
    pub const DEFAULT_REGISTRATION_FEE: u64 = 100;

    /// Score assigned when the scoring collaborator has no entry.
    pub const DEFAULT_ELIGIBILITY_SCORE: u32 = 100;
}

// =============================================================================
// TESTS
// =============================================================================
