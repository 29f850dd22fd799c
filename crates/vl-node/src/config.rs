//! # Node Configuration
//!
//! Environment-driven settings for the node. Unparseable values are logged
//! and ignored so that a typo never prevents startup.

use std::env;
use std::path::PathBuf;
use tracing::warn;

/// Node configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeConfig {
    /// Genesis file to seed collaborators from. `None` uses the devnet genesis.
    pub genesis_path: Option<PathBuf>,
    /// Overrides the registration cap from genesis.
    pub max_registrations: Option<u64>,
    /// Overrides the registration fee from genesis.
    pub registration_fee: Option<u64>,
    /// Block height of the first processed command.
    pub start_height: u64,
    /// Write Prometheus text to stderr on shutdown.
    pub dump_metrics: bool,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            genesis_path: None,
            max_registrations: None,
            registration_fee: None,
            start_height: 1,
            dump_metrics: false,
        }
    }
}

impl NodeConfig {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `VL_GENESIS_PATH`: Genesis JSON file
    /// - `VL_MAX_REGISTRATIONS`: Positive registration cap
    /// - `VL_REGISTRATION_FEE`: Registration fee
    /// - `VL_START_HEIGHT`: Initial block height (default: 1)
    /// - `VL_DUMP_METRICS`: Dump metrics on shutdown (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("VL_GENESIS_PATH").filter(|p| !p.trim().is_empty()) {
            config.genesis_path = Some(PathBuf::from(path));
        }

        if let Some(raw) = lookup("VL_MAX_REGISTRATIONS") {
            match raw.trim().parse::<u64>() {
                Ok(0) => warn!("VL_MAX_REGISTRATIONS must be positive, ignoring"),
                Ok(max) => config.max_registrations = Some(max),
                Err(e) => warn!(value = %raw, error = %e, "invalid VL_MAX_REGISTRATIONS, ignoring"),
            }
        }

        if let Some(raw) = lookup("VL_REGISTRATION_FEE") {
            match raw.trim().parse::<u64>() {
                Ok(fee) => config.registration_fee = Some(fee),
                Err(e) => warn!(value = %raw, error = %e, "invalid VL_REGISTRATION_FEE, ignoring"),
            }
        }

        if let Some(raw) = lookup("VL_START_HEIGHT") {
            match raw.trim().parse::<u64>() {
                Ok(height) => config.start_height = height,
                Err(e) => warn!(value = %raw, error = %e, "invalid VL_START_HEIGHT, ignoring"),
            }
        }

        if let Some(raw) = lookup("VL_DUMP_METRICS") {
            config.dump_metrics = raw.eq_ignore_ascii_case("true") || raw == "1";
        }

        config
    }
}
