//! # Error Types
//!
//! All error types for the registration ledger.
//!
//! Every kind carries a stable numeric code (see [`RegistrationError::code`]).
//! Codes 1000-1013 and 1016 are the historical contract codes. The rest cover
//! kinds that used to share a code with an unrelated failure.

use thiserror::Error;

// =============================================================================
// REGISTRATION ERRORS
// =============================================================================

/// Errors returned by ledger operations.
///
/// A failing operation never mutates the ledger.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// The identity bound to the principal is missing or differs from the user id.
    #[error("identity does not match user id")]
    InvalidIdentity,

    /// A registration already exists for this (user, jurisdiction) pair.
    #[error("registration already exists for this user and jurisdiction")]
    DuplicateRegistration,

    /// The jurisdiction is not recognized by the registry.
    #[error("unknown jurisdiction")]
    InvalidJurisdiction,

    /// The caller is not in the administrator set.
    #[error("caller is not an administrator")]
    NotAdmin,

    /// No registration exists for the key.
    #[error("registration not found")]
    RegistrationNotFound,

    /// Registration hash is empty or longer than 64 characters.
    #[error("invalid registration hash")]
    InvalidHash,

    /// Title is empty or longer than 100 characters.
    #[error("invalid title")]
    InvalidTitle,

    /// Description is longer than 500 characters.
    #[error("invalid description")]
    InvalidDescription,

    /// Status label is not one of active, pending, archived.
    #[error("invalid status: {0}")]
    InvalidStatus(String),

    /// Reserved: eligibility score out of range.
    #[error("invalid eligibility score")]
    InvalidEligibilityScore,

    /// The supplied principal may not be used here (e.g. self-assignment).
    #[error("invalid user principal")]
    InvalidUserPrincipal,

    /// Reserved: timestamp out of range.
    #[error("invalid timestamp")]
    InvalidTimestamp,

    /// User id is empty or longer than 40 characters.
    #[error("invalid user id")]
    InvalidUserId,

    /// The authority contract has not been set.
    #[error("authority contract not configured")]
    AuthorityNotConfigured,

    /// The authority contract was already set and cannot be reassigned.
    #[error("authority contract already set")]
    AuthorityAlreadySet,

    /// The registration fee could not be collected.
    #[error("fee transfer failed: {reason}")]
    TransferFailed {
        /// Reason reported by the transfer collaborator.
        reason: String,
    },

    /// The ledger has reached `max_registrations`.
    #[error("registration capacity exceeded: {count} >= {max}")]
    CapacityExceeded {
        /// Registrations created so far.
        count: u64,
        /// Configured maximum.
        max: u64,
    },

    /// Maximum registrations must be positive.
    #[error("max registrations must be positive")]
    InvalidMaxRegistrations,

    /// Registration fee must be non-negative.
    #[error("registration fee must be non-negative")]
    InvalidFee,

    /// Only the authority contract may change ledger settings.
    #[error("caller is not the authority contract")]
    NotAuthority,
}

impl RegistrationError {
    /// Stable numeric code for this error kind.
    #[must_use]
    pub fn code(&self) -> u16 {
        match self {
            Self::InvalidIdentity => 1000,
            Self::DuplicateRegistration => 1001,
            Self::InvalidJurisdiction => 1002,
            Self::NotAdmin => 1003,
            Self::RegistrationNotFound => 1004,
            Self::InvalidHash => 1005,
            Self::InvalidTitle => 1006,
            Self::InvalidDescription => 1007,
            Self::InvalidStatus(_) => 1008,
            Self::InvalidEligibilityScore => 1009,
            Self::InvalidUserPrincipal => 1010,
            Self::InvalidTimestamp => 1011,
            Self::InvalidUserId => 1012,
            Self::AuthorityNotConfigured => 1013,
            Self::AuthorityAlreadySet => 1014,
            Self::TransferFailed { .. } => 1015,
            Self::CapacityExceeded { .. } => 1016,
            Self::InvalidMaxRegistrations => 1017,
            Self::InvalidFee => 1018,
            Self::NotAuthority => 1019,
        }
    }

    /// Short snake_case name, used for log fields and metric labels.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidIdentity => "invalid_identity",
            Self::DuplicateRegistration => "duplicate_registration",
            Self::InvalidJurisdiction => "invalid_jurisdiction",
            Self::NotAdmin => "not_admin",
            Self::RegistrationNotFound => "registration_not_found",
            Self::InvalidHash => "invalid_hash",
            Self::InvalidTitle => "invalid_title",
            Self::InvalidDescription => "invalid_description",
            Self::InvalidStatus(_) => "invalid_status",
            Self::InvalidEligibilityScore => "invalid_eligibility_score",
            Self::InvalidUserPrincipal => "invalid_user_principal",
            Self::InvalidTimestamp => "invalid_timestamp",
            Self::InvalidUserId => "invalid_user_id",
            Self::AuthorityNotConfigured => "authority_not_configured",
            Self::AuthorityAlreadySet => "authority_already_set",
            Self::TransferFailed { .. } => "transfer_failed",
            Self::CapacityExceeded { .. } => "capacity_exceeded",
            Self::InvalidMaxRegistrations => "invalid_max_registrations",
            Self::InvalidFee => "invalid_fee",
            Self::NotAuthority => "not_authority",
        }
    }

    /// Returns true if the caller lacked the right to perform the operation.
    #[must_use]
    pub fn is_authorization_failure(&self) -> bool {
        matches!(
            self,
            Self::NotAdmin | Self::NotAuthority | Self::InvalidUserPrincipal
        )
    }
}

// =============================================================================
// TRANSFER ERRORS
// =============================================================================

/// Errors reported by a fee transfer collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransferError {
    /// Payer balance is below the fee.
    #[error("insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        /// Amount requested.
        required: u64,
        /// Amount held by the payer.
        available: u64,
    },

    /// The transfer backend refused the transfer.
    #[error("transfer rejected: {0}")]
    Rejected(String),
}

impl From<TransferError> for RegistrationError {
    fn from(err: TransferError) -> Self {
        Self::TransferFailed {
            reason: err.to_string(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
