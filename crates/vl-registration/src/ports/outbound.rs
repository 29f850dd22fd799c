//! # Driven Ports (SPI - Outbound)
//!
//! The collaborators the registration ledger depends on:
//! - Identity Gate: principal -> identity hash
//! - Jurisdiction Registry: validity and eligibility rules
//! - Eligibility Scorer: score per (jurisdiction, registration hash)
//! - Fee Transfer: moves the registration fee
//! - Admin Authority: administrator-set membership
//! - Block Clock: logical time
//!
//! The service calls these while holding the ledger lock, so an
//! implementation must not call back into the ledger.

use crate::domain::entities::JurisdictionRules;
use crate::domain::value_objects::{BlockHeight, JurisdictionId, Principal};
use crate::errors::TransferError;
use async_trait::async_trait;

// =============================================================================
// IDENTITY GATE
// =============================================================================

/// Maps a caller principal to its verified identity hash.
///
/// Proof verification happens inside the implementation; the ledger only
/// compares the returned hash against the claimed user id.
#[async_trait]
pub trait IdentityGate: Send + Sync {
    /// Resolve the identity bound to `principal`.
    ///
    /// # Returns
    ///
    /// * `Some(identity_hash)` - If the principal has a verified identity
    /// * `None` - If no identity is bound
    async fn resolve_identity(&self, principal: &Principal) -> Option<String>;
}

// =============================================================================
// JURISDICTION REGISTRY
// =============================================================================

/// Supplies jurisdiction validity and per-jurisdiction rules.
#[async_trait]
pub trait JurisdictionRegistry: Send + Sync {
    /// Returns true if the jurisdiction is recognized.
    async fn is_valid_jurisdiction(&self, jurisdiction_id: &JurisdictionId) -> bool;

    /// Eligibility rules for the jurisdiction, if published.
    async fn rules_for(&self, jurisdiction_id: &JurisdictionId) -> Option<JurisdictionRules>;
}

// =============================================================================
// ELIGIBILITY SCORER
// =============================================================================

/// Computes the eligibility score stored with a new registration.
#[async_trait]
pub trait EligibilityScorer: Send + Sync {
    /// Score for a (jurisdiction, registration hash) pair.
    ///
    /// `None` means no entry; the ledger then applies the default score.
    async fn score_for(
        &self,
        jurisdiction_id: &JurisdictionId,
        registration_hash: &str,
    ) -> Option<u32>;
}

// =============================================================================
// FEE TRANSFER
// =============================================================================

/// Moves the registration fee from the registrant to the authority.
#[async_trait]
pub trait FeeTransfer: Send + Sync {
    /// Transfer `amount` from `from` to `to`.
    ///
    /// A failed transfer aborts the registration.
    async fn transfer(
        &self,
        amount: u64,
        from: &Principal,
        to: &Principal,
    ) -> Result<(), TransferError>;
}

// =============================================================================
// ADMIN AUTHORITY
// =============================================================================

/// Administrator-set membership.
#[async_trait]
pub trait AdminAuthority: Send + Sync {
    /// Returns true if `principal` may edit or change the status of registrations.
    async fn is_admin(&self, principal: &Principal) -> bool;
}

// =============================================================================
// BLOCK CLOCK
// =============================================================================

/// Source of logical time for mutation timestamps.
///
/// Abstracted to allow testing with deterministic heights.
pub trait BlockClock: Send + Sync {
    /// Current block height.
    fn block_height(&self) -> BlockHeight;
}

// =============================================================================
// TESTS
// =============================================================================
