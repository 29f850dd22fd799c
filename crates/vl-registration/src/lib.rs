//! # VL Registration - Voter Registration Ledger
//!
//! A permissioned registration ledger keyed by (user id, jurisdiction).
//! Registrations are identity-gated, fee-collecting, capacity-limited, and
//! editable only by administrators.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | One record per (user, jurisdiction) | `domain/ledger.rs` - `RegistrationLedger::insert()` |
//! | `next_registration_id` equals the number of records | `domain/invariants.rs` - `check_store_size_invariant()` |
//! | Jurisdiction counters sum to `next_registration_id` | `domain/invariants.rs` - `check_counter_sum_invariant()` |
//! | Counters never decrease | `domain/ledger.rs` - no removal path |
//! | Authority set at most once | `domain/ledger.rs` - `RegistrationLedger::set_authority()` |
//! | Stored fields within length limits | `domain/services.rs` - `validate_*()` |
//! | Failed operations change nothing | `service.rs` - single ledger lock, insert last |
//!
//! ## Error Codes
//!
//! | Code | Kind |
//! |------|------|
//! | 1000 | `InvalidIdentity` |
//! | 1001 | `DuplicateRegistration` |
//! | 1002 | `InvalidJurisdiction` |
//! | 1003 | `NotAdmin` |
//! | 1004 | `RegistrationNotFound` |
//! | 1005 | `InvalidHash` |
//! | 1006 | `InvalidTitle` |
//! | 1007 | `InvalidDescription` |
//! | 1008 | `InvalidStatus` |
//! | 1010 | `InvalidUserPrincipal` |
//! | 1012 | `InvalidUserId` |
//! | 1013 | `AuthorityNotConfigured` |
//! | 1014 | `AuthorityAlreadySet` |
//! | 1015 | `TransferFailed` |
//! | 1016 | `CapacityExceeded` |
//! | 1017 | `InvalidMaxRegistrations` |
//! | 1018 | `InvalidFee` |
//! | 1019 | `NotAuthority` |
//!
//! ## Outbound Dependencies
//!
//! | Port | Purpose |
//! |------|---------|
//! | `IdentityGate` | Principal -> verified identity hash |
//! | `JurisdictionRegistry` | Jurisdiction validity and rules |
//! | `EligibilityScorer` | Score per (jurisdiction, hash) |
//! | `FeeTransfer` | Registration fee to the authority |
//! | `AdminAuthority` | Administrator set |
//! | `BlockClock` | Mutation timestamps |
//!
//! ## Usage Example
//!
//! ```ignore
//! use vl_registration::prelude::*;
//!
//! let (service, _collaborators) = create_test_service();
//! let caller = Principal::from("ST1TEST");
//! service.set_authority_contract(&caller, Principal::from("ST2TEST")).await?;
//!
//! let reg = service.register_voter(&caller, request).await?;
//! println!("score: {}", reg.eligibility_score);
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod events;
pub mod metrics;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{
        JurisdictionRules, LedgerSettings, Registration, RegistrationUpdate,
    };

    // Value objects
    pub use crate::domain::value_objects::{
        BlockHeight, JurisdictionId, Principal, RegistrationKey, RegistrationStatus,
    };

    // Aggregate
    pub use crate::domain::ledger::RegistrationLedger;

    // Invariants
    pub use crate::domain::invariants::{
        check_all_invariants, limits, InvariantCheckResult, InvariantViolation,
    };

    // Ports
    pub use crate::ports::inbound::{RegisterVoterRequest, RegistrationApi};
    pub use crate::ports::outbound::{
        AdminAuthority, BlockClock, EligibilityScorer, FeeTransfer, IdentityGate,
        JurisdictionRegistry,
    };

    // Events
    pub use crate::events::{
        CommandEnvelope, CommandOutcome, CommandResponse, ErrorPayload, LedgerCommand,
        LedgerReply,
    };

    // Errors
    pub use crate::errors::{RegistrationError, TransferError};

    // Adapters
    pub use crate::adapters::{
        FeeTransferRecord, InMemoryAdmins, InMemoryCollaborators, InMemoryIdentityGate,
        InMemoryJurisdictions, InMemoryScores, LedgerCommandHandler, ManualClock,
        RecordingFeeTransfer,
    };

    // Service
    pub use crate::service::{
        create_test_service, LedgerCollaborators, RegistrationService, ServiceStats,
    };
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Voter Registration Ledger";

// =============================================================================
// TESTS
// =============================================================================
