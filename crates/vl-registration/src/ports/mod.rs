//! # Ports Layer (Middle Hexagon)
//!
//! Trait definitions for the registration ledger.
//!
//! - **Driving Port (Inbound)**: `RegistrationApi`
//! - **Driven Ports (Outbound)**: `IdentityGate`, `JurisdictionRegistry`,
//!   `EligibilityScorer`, `FeeTransfer`, `AdminAuthority`, `BlockClock`
//! - No concrete implementations in this module

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
