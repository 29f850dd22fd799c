//! # Exploit Simulations
//!
//! Attempts to bypass the ledger's gates. Every test asserts both the error
//! code and that nothing changed.

pub mod access_control;
