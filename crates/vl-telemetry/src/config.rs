//! Telemetry configuration from environment variables.

use std::env;

/// Default service name.
pub const DEFAULT_SERVICE_NAME: &str = "voter-ledger";

/// Configuration for logging and metrics export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to every log line
    pub service_name: String,

    /// Log filter directive (e.g. `info`, `vl_registration=debug`)
    pub log_level: String,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,

    /// Whether to include thread ids in log lines
    pub thread_ids: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            thread_ids: true,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `VL_SERVICE_NAME`: Service name (default: voter-ledger)
    /// - `VL_LOG_LEVEL` or `RUST_LOG`: Log filter (default: info)
    /// - `VL_JSON_LOGS`: Enable JSON logs (default: false)
    /// - `VL_LOG_THREAD_IDS`: Include thread ids (default: true)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            service_name: lookup("VL_SERVICE_NAME").unwrap_or(defaults.service_name),

            log_level: lookup("VL_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            json_logs: lookup("VL_JSON_LOGS")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.json_logs),

            thread_ids: lookup("VL_LOG_THREAD_IDS")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.thread_ids),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}
