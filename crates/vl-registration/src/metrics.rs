//! # Ledger Metrics
//!
//! Prometheus metrics for the registration ledger.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! vl-registration = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `ledger_registrations_total` - Counter of registrations created
//! - `ledger_rejections_total` - Counter of rejected operations (by error kind)
//! - `ledger_status_transitions_total` - Counter of status changes (by target status)
//! - `ledger_fees_collected_total` - Counter of fee units transferred to the authority
//! - `ledger_registration_count` - Gauge mirroring `get_registration_count`

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{
    register_int_counter, register_int_counter_vec, register_int_gauge, IntCounter,
    IntCounterVec, IntGauge,
};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Total registrations created
    pub static ref REGISTRATIONS_CREATED: IntCounter = register_int_counter!(
        "ledger_registrations_total",
        "Total number of registrations created"
    )
    .expect("Failed to create REGISTRATIONS_CREATED metric");

    /// Rejected operations, labeled by error kind
    pub static ref REJECTIONS: IntCounterVec = register_int_counter_vec!(
        "ledger_rejections_total",
        "Total number of rejected ledger operations",
        &["kind"]
    )
    .expect("Failed to create REJECTIONS metric");

    /// Status transitions, labeled by target status
    pub static ref STATUS_TRANSITIONS: IntCounterVec = register_int_counter_vec!(
        "ledger_status_transitions_total",
        "Total number of registration status changes",
        &["status"]
    )
    .expect("Failed to create STATUS_TRANSITIONS metric");

    /// Fee units collected
    pub static ref FEES_COLLECTED: IntCounter = register_int_counter!(
        "ledger_fees_collected_total",
        "Total registration fees transferred to the authority"
    )
    .expect("Failed to create FEES_COLLECTED metric");

    /// Registrations ever created
    pub static ref REGISTRATION_COUNT: IntGauge = register_int_gauge!(
        "ledger_registration_count",
        "Registrations ever created"
    )
    .expect("Failed to create REGISTRATION_COUNT metric");
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

/// Record a registration and the resulting counter value
#[cfg(feature = "metrics")]
pub fn record_registration(fee: u64, registration_count: u64) {
    REGISTRATIONS_CREATED.inc();
    FEES_COLLECTED.inc_by(fee);
    REGISTRATION_COUNT.set(i64::try_from(registration_count).unwrap_or(i64::MAX));
}

/// Record a rejected operation
#[cfg(feature = "metrics")]
pub fn record_rejection(kind: &str) {
    REJECTIONS.with_label_values(&[kind]).inc();
}

/// Record a status change
#[cfg(feature = "metrics")]
pub fn record_status_transition(status: &str) {
    STATUS_TRANSITIONS.with_label_values(&[status]).inc();
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

/// No-op.
#[cfg(not(feature = "metrics"))]
pub fn record_registration(_fee: u64, _registration_count: u64) {}

/// No-op.
#[cfg(not(feature = "metrics"))]
pub fn record_rejection(_kind: &str) {}

/// No-op.
#[cfg(not(feature = "metrics"))]
pub fn record_status_transition(_status: &str) {}
