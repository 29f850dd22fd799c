//! # In-Memory Collaborators
//!
//! Table-backed implementations of the identity, jurisdiction, scoring, and
//! admin ports. Used by the node (seeded from genesis) and by tests.
//! A production deployment would back these with the respective registries.

use crate::adapters::clock::ManualClock;
use crate::adapters::fee_ledger::RecordingFeeTransfer;
use crate::domain::entities::JurisdictionRules;
use crate::domain::value_objects::{JurisdictionId, Principal};
use crate::ports::outbound::{AdminAuthority, EligibilityScorer, IdentityGate, JurisdictionRegistry};
use crate::service::LedgerCollaborators;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

// =============================================================================
// IDENTITY
// =============================================================================

/// Principal -> identity hash bindings.
#[derive(Debug, Default)]
pub struct InMemoryIdentityGate {
    bindings: RwLock<HashMap<Principal, String>>,
}

impl InMemoryIdentityGate {
    /// Create an empty gate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind (or rebind) a principal to an identity hash.
    pub fn bind(&self, principal: Principal, identity_hash: impl Into<String>) {
        self.bindings.write().insert(principal, identity_hash.into());
    }

    /// Remove a binding.
    pub fn unbind(&self, principal: &Principal) {
        self.bindings.write().remove(principal);
    }
}

#[async_trait]
impl IdentityGate for InMemoryIdentityGate {
    async fn resolve_identity(&self, principal: &Principal) -> Option<String> {
        self.bindings.read().get(principal).cloned()
    }
}

// =============================================================================
// JURISDICTIONS
// =============================================================================

/// Recognized jurisdictions and their published rules.
#[derive(Debug, Default)]
pub struct InMemoryJurisdictions {
    valid: RwLock<HashSet<JurisdictionId>>,
    rules: RwLock<HashMap<JurisdictionId, JurisdictionRules>>,
}

impl InMemoryJurisdictions {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recognize a jurisdiction.
    pub fn add_jurisdiction(&self, jurisdiction_id: JurisdictionId) {
        self.valid.write().insert(jurisdiction_id);
    }

    /// Publish rules for a jurisdiction. Does not recognize it.
    pub fn set_rules(&self, jurisdiction_id: JurisdictionId, rules: JurisdictionRules) {
        self.rules.write().insert(jurisdiction_id, rules);
    }
}

#[async_trait]
impl JurisdictionRegistry for InMemoryJurisdictions {
    async fn is_valid_jurisdiction(&self, jurisdiction_id: &JurisdictionId) -> bool {
        self.valid.read().contains(jurisdiction_id)
    }

    async fn rules_for(&self, jurisdiction_id: &JurisdictionId) -> Option<JurisdictionRules> {
        self.rules.read().get(jurisdiction_id).copied()
    }
}

// =============================================================================
// ELIGIBILITY SCORES
// =============================================================================

/// Precomputed scores keyed by (jurisdiction, registration hash).
#[derive(Debug, Default)]
pub struct InMemoryScores {
    scores: RwLock<HashMap<(JurisdictionId, String), u32>>,
}

impl InMemoryScores {
    /// Create an empty score table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the score for a (jurisdiction, hash) pair.
    pub fn set_score(
        &self,
        jurisdiction_id: JurisdictionId,
        registration_hash: impl Into<String>,
        score: u32,
    ) {
        self.scores
            .write()
            .insert((jurisdiction_id, registration_hash.into()), score);
    }
}

#[async_trait]
impl EligibilityScorer for InMemoryScores {
    async fn score_for(
        &self,
        jurisdiction_id: &JurisdictionId,
        registration_hash: &str,
    ) -> Option<u32> {
        self.scores
            .read()
            .get(&(jurisdiction_id.clone(), registration_hash.to_string()))
            .copied()
    }
}

// =============================================================================
// ADMINS
// =============================================================================

/// Administrator set.
#[derive(Debug, Default)]
pub struct InMemoryAdmins {
    admins: RwLock<HashSet<Principal>>,
}

impl InMemoryAdmins {
    /// Create an empty admin set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an administrator.
    pub fn grant(&self, principal: Principal) {
        self.admins.write().insert(principal);
    }

    /// Remove an administrator.
    pub fn revoke(&self, principal: &Principal) {
        self.admins.write().remove(principal);
    }

    /// Remove every administrator.
    pub fn clear(&self) {
        self.admins.write().clear();
    }
}

#[async_trait]
impl AdminAuthority for InMemoryAdmins {
    async fn is_admin(&self, principal: &Principal) -> bool {
        self.admins.read().contains(principal)
    }
}

// =============================================================================
// BUNDLE
// =============================================================================

/// A full set of in-memory collaborators with typed handles for seeding and
/// inspection.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCollaborators {
    /// Identity bindings.
    pub identity: Arc<InMemoryIdentityGate>,
    /// Jurisdiction registry.
    pub jurisdictions: Arc<InMemoryJurisdictions>,
    /// Eligibility scores.
    pub scores: Arc<InMemoryScores>,
    /// Fee transfers (recorded).
    pub fees: Arc<RecordingFeeTransfer>,
    /// Administrator set.
    pub admins: Arc<InMemoryAdmins>,
    /// Block clock.
    pub clock: Arc<ManualClock>,
}

impl InMemoryCollaborators {
    /// Create an empty set of collaborators at height 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Port handles for wiring a service.
    #[must_use]
    pub fn as_collaborators(&self) -> LedgerCollaborators {
        LedgerCollaborators {
            identity: self.identity.clone(),
            jurisdictions: self.jurisdictions.clone(),
            scorer: self.scores.clone(),
            fees: self.fees.clone(),
            admins: self.admins.clone(),
            clock: self.clock.clone(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
