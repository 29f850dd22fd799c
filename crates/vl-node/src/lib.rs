//! # Voter-Ledger Node
//!
//! Hosts one registration ledger behind a line-oriented JSON command stream.
//!
//! ## Startup Sequence
//!
//! 1. Initialize telemetry (`vl-telemetry`)
//! 2. Load `NodeConfig` from the environment
//! 3. Load genesis (file from `VL_GENESIS_PATH`, or the devnet genesis)
//! 4. Seed in-memory collaborators and apply settings overrides
//! 5. Bootstrap the authority contract if genesis names one
//! 6. Serve stdin -> stdout until end of input

pub mod config;
pub mod genesis;
pub mod runtime;

pub use config::NodeConfig;
pub use genesis::{GenesisConfig, GenesisError};
pub use runtime::{LedgerNode, RunSummary};
