//! # Domain Layer (Inner Hexagon)
//!
//! Pure business logic for the registration ledger.
//! NO I/O, NO async, NO external dependencies.
//!
//! - `entities`: Registration, RegistrationUpdate, LedgerSettings, JurisdictionRules
//! - `ledger`: RegistrationLedger aggregate with insert-or-reject storage
//! - `services`: field validation
//! - `invariants`: cross-store consistency checks and limits
//! - `value_objects`: Principal, JurisdictionId, RegistrationKey, RegistrationStatus

pub mod entities;
pub mod invariants;
pub mod ledger;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use invariants::*;
pub use ledger::*;
pub use services::*;
pub use value_objects::*;
