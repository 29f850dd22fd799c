//! Prometheus text export.
//!
//! Collectors register themselves with the default registry (see the
//! `metrics` feature of `vl-registration`); this module only renders them.

use crate::TelemetryError;
use prometheus::{Encoder, TextEncoder};

/// Encode every registered metric in Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsExport(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsExport(e.to_string()))
}
