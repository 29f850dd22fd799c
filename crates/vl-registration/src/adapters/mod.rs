//! # Adapters Layer (Outer Hexagon)
//!
//! Adapters connect the registration ledger to the outside world.
//!
//! - `collaborators`: in-memory identity, jurisdiction, score, and admin tables
//! - `fee_ledger`: fee transfer with a transfer log
//! - `clock`: manually driven block clock
//! - `command_handler`: wire commands -> `RegistrationApi`

pub mod clock;
pub mod collaborators;
pub mod command_handler;
pub mod fee_ledger;

pub use clock::*;
pub use collaborators::*;
pub use command_handler::*;
pub use fee_ledger::*;
