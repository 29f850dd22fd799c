//! # Genesis
//!
//! Initial collaborator state and settings for a ledger node.
//!
//! ## File Format (JSON)
//!
//! ```json
//! {
//!   "identities": [{ "principal": "ST1TEST", "identity_hash": "userhash123" }],
//!   "jurisdictions": [{ "id": "USA", "rules": { "min_age": 18, "min_residency": 1 } }, { "id": "EU" }],
//!   "scores": [{ "jurisdiction_id": "USA", "registration_hash": "regHash123", "score": 90 }],
//!   "admins": ["ST1TEST"],
//!   "balances": [{ "principal": "ST1TEST", "amount": 1000 }],
//!   "max_registrations": 1000000,
//!   "registration_fee": 100,
//!   "authority": { "caller": "ST1TEST", "authority": "ST2TEST" }
//! }
//! ```
//!
//! Every section is optional. `authority` is applied through
//! `set_authority_contract` so the usual rules hold.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;
use vl_registration::prelude::*;

/// Genesis loading and application errors.
#[derive(Debug, Error)]
pub enum GenesisError {
    /// The genesis file could not be read.
    #[error("Failed to read genesis file {path}: {source}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The genesis document is not valid JSON for this schema.
    #[error("Failed to parse genesis: {0}")]
    Parse(#[from] serde_json::Error),

    /// The genesis document is inconsistent.
    #[error("Invalid genesis configuration: {0}")]
    InvalidConfig(String),

    /// The ledger rejected a bootstrap operation.
    #[error("Genesis bootstrap rejected: {0}")]
    Bootstrap(#[from] RegistrationError),
}

/// Principal bound to an identity hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityEntry {
    /// Principal.
    pub principal: Principal,
    /// Identity hash the principal resolves to.
    pub identity_hash: String,
}

/// Recognized jurisdiction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JurisdictionEntry {
    /// Jurisdiction id.
    pub id: JurisdictionId,
    /// Published rules.
    #[serde(default)]
    pub rules: Option<JurisdictionRules>,
}

/// Precomputed eligibility score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Jurisdiction id.
    pub jurisdiction_id: JurisdictionId,
    /// Registration hash.
    pub registration_hash: String,
    /// Score.
    pub score: u32,
}

/// Tracked fee balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceEntry {
    /// Principal.
    pub principal: Principal,
    /// Balance.
    pub amount: u64,
}

/// Authority installed at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityBootstrap {
    /// Principal performing the assignment.
    pub caller: Principal,
    /// Authority contract.
    pub authority: Principal,
}

/// Genesis document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenesisConfig {
    /// Identity bindings.
    pub identities: Vec<IdentityEntry>,
    /// Recognized jurisdictions.
    pub jurisdictions: Vec<JurisdictionEntry>,
    /// Eligibility scores.
    pub scores: Vec<ScoreEntry>,
    /// Administrators.
    pub admins: Vec<Principal>,
    /// Fee balances. Principals not listed pay without a balance check.
    pub balances: Vec<BalanceEntry>,
    /// Initial registration cap.
    pub max_registrations: Option<u64>,
    /// Initial registration fee.
    pub registration_fee: Option<u64>,
    /// Authority installed at startup.
    pub authority: Option<AuthorityBootstrap>,
}

impl GenesisConfig {
    /// Development genesis: `ST1TEST` bound to `userhash123` and admin,
    /// jurisdictions `USA` (rules 18/1) and `EU`, no authority.
    #[must_use]
    pub fn devnet() -> Self {
        Self {
            identities: vec![IdentityEntry {
                principal: Principal::from("ST1TEST"),
                identity_hash: "userhash123".to_string(),
            }],
            jurisdictions: vec![
                JurisdictionEntry {
                    id: JurisdictionId::from("USA"),
                    rules: Some(JurisdictionRules {
                        min_age: 18,
                        min_residency: 1,
                    }),
                },
                JurisdictionEntry {
                    id: JurisdictionId::from("EU"),
                    rules: None,
                },
            ],
            admins: vec![Principal::from("ST1TEST")],
            ..Self::default()
        }
    }

    /// Parse a genesis document.
    pub fn from_json(json: &str) -> Result<Self, GenesisError> {
        let genesis: Self = serde_json::from_str(json)?;
        genesis.validate()?;
        Ok(genesis)
    }

    /// Read and parse a genesis file.
    pub fn load(path: &Path) -> Result<Self, GenesisError> {
        let json = std::fs::read_to_string(path).map_err(|source| GenesisError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Check internal consistency.
    pub fn validate(&self) -> Result<(), GenesisError> {
        let mut seen = HashSet::new();
        for entry in &self.identities {
            if entry.principal.as_str().is_empty() {
                return Err(GenesisError::InvalidConfig(
                    "identity with empty principal".into(),
                ));
            }
            if !seen.insert(&entry.principal) {
                return Err(GenesisError::InvalidConfig(format!(
                    "principal {} bound twice",
                    entry.principal
                )));
            }
        }

        if self
            .jurisdictions
            .iter()
            .any(|j| j.id.as_str().is_empty())
        {
            return Err(GenesisError::InvalidConfig(
                "jurisdiction with empty id".into(),
            ));
        }

        if self.max_registrations == Some(0) {
            return Err(GenesisError::InvalidConfig(
                "max_registrations must be positive".into(),
            ));
        }

        Ok(())
    }

    /// Settings the ledger starts with.
    #[must_use]
    pub fn settings(&self) -> LedgerSettings {
        let defaults = LedgerSettings::default();
        LedgerSettings {
            max_registrations: self
                .max_registrations
                .unwrap_or(defaults.max_registrations),
            registration_fee: self.registration_fee.unwrap_or(defaults.registration_fee),
            authority_contract: None,
        }
    }

    /// Load the collaborator tables.
    pub fn seed(&self, collaborators: &InMemoryCollaborators) {
        for entry in &self.identities {
            collaborators
                .identity
                .bind(entry.principal.clone(), entry.identity_hash.clone());
        }
        for entry in &self.jurisdictions {
            collaborators.jurisdictions.add_jurisdiction(entry.id.clone());
            if let Some(rules) = entry.rules {
                collaborators.jurisdictions.set_rules(entry.id.clone(), rules);
            }
        }
        for entry in &self.scores {
            collaborators.scores.set_score(
                entry.jurisdiction_id.clone(),
                entry.registration_hash.clone(),
                entry.score,
            );
        }
        for admin in &self.admins {
            collaborators.admins.grant(admin.clone());
        }
        for entry in &self.balances {
            collaborators
                .fees
                .set_balance(entry.principal.clone(), entry.amount);
        }

        info!(
            identities = self.identities.len(),
            jurisdictions = self.jurisdictions.len(),
            scores = self.scores.len(),
            admins = self.admins.len(),
            "genesis collaborators seeded"
        );
    }

    /// Apply ledger-level genesis operations through the API.
    pub async fn bootstrap<T: RegistrationApi>(&self, api: &T) -> Result<(), GenesisError> {
        if let Some(bootstrap) = &self.authority {
            api.set_authority_contract(&bootstrap.caller, bootstrap.authority.clone())
                .await?;
            info!(authority = %bootstrap.authority, "genesis authority installed");
        }
        Ok(())
    }
}
