//! # Value Objects
//!
//! Immutable domain primitives for the registration ledger.
//! These types represent concepts that are defined by their value, not identity.

use crate::errors::RegistrationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Logical time (block height) stamped on every mutation.
pub type BlockHeight = u64;

// =============================================================================
// PRINCIPAL
// =============================================================================

/// An account principal (caller, registrant, authority, administrator).
///
/// Principals are opaque strings; the ledger never interprets their contents.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    /// Creates a principal from any string-like value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the principal as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Principal({})", self.0)
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Principal {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

// =============================================================================
// JURISDICTION ID
// =============================================================================

/// Identifier of an administrative region (e.g. `"USA"`, `"EU"`).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JurisdictionId(String);

impl JurisdictionId {
    /// Creates a jurisdiction id.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for JurisdictionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JurisdictionId({})", self.0)
    }
}

impl fmt::Display for JurisdictionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JurisdictionId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

// =============================================================================
// REGISTRATION KEY
// =============================================================================

/// Primary key of the record store: one registration per (user, jurisdiction).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegistrationKey {
    /// Verified user identifier (identity hash).
    pub user_id: String,
    /// Jurisdiction the registration is filed under.
    pub jurisdiction_id: JurisdictionId,
}

impl RegistrationKey {
    /// Creates a key.
    #[must_use]
    pub fn new(user_id: impl Into<String>, jurisdiction_id: JurisdictionId) -> Self {
        Self {
            user_id: user_id.into(),
            jurisdiction_id,
        }
    }
}

impl fmt::Display for RegistrationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.user_id, self.jurisdiction_id)
    }
}

// =============================================================================
// REGISTRATION STATUS
// =============================================================================

/// Lifecycle label of a registration.
///
/// Transitions are unconstrained: any status may move to any other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    /// Registration is in force.
    #[default]
    Active,
    /// Registration is under review.
    Pending,
    /// Registration is retired but kept on record.
    Archived,
}

impl RegistrationStatus {
    /// All valid statuses.
    pub const ALL: [Self; 3] = [Self::Active, Self::Pending, Self::Archived];

    /// Wire label of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Pending => "pending",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegistrationStatus {
    type Err = RegistrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| RegistrationError::InvalidStatus(s.to_string()))
    }
}

// =============================================================================
// TESTS
// =============================================================================
