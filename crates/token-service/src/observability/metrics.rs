//! Metrics definitions for the token issuance service.
//!
//! All metrics follow Prometheus naming conventions:
//! - `ti_` prefix for the token issuer
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Cardinality
//!
//! Labels are bounded to prevent cardinality explosion:
//! - `status` (issuance): 3 values (success, validation_error, signing_error)
//! - `method`: 3 values in practice (GET, POST, OPTIONS)
//! - `endpoint`: known routes plus `other`
//! - `status_code`: HTTP status codes actually produced (~6 values)

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Initialize Prometheus metrics recorder and return the handle for serving
/// metrics via HTTP.
///
/// Must be called before any metrics are recorded. Histogram buckets are
/// sized for an in-memory signing path (sub-millisecond p99).
///
/// # Errors
///
/// Returns error if the Prometheus recorder fails to install (e.g., already
/// installed).
pub fn init_metrics_recorder() -> Result<PrometheusHandle, String> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Prefix("ti_token_issuance".to_string()),
            &[0.0001, 0.0005, 0.001, 0.005, 0.010, 0.050, 0.100],
        )
        .map_err(|e| format!("Failed to set issuance buckets: {e}"))?
        .set_buckets_for_metric(
            Matcher::Prefix("ti_http_request".to_string()),
            &[0.001, 0.005, 0.010, 0.025, 0.050, 0.100, 0.250, 0.500, 1.000],
        )
        .map_err(|e| format!("Failed to set HTTP request buckets: {e}"))?
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus recorder: {e}"))
}

/// Record token issuance duration and outcome
///
/// Metrics: `ti_token_issuance_duration_seconds`, `ti_token_issuance_total`
/// Labels: `status`
pub fn record_token_issuance(status: &str, duration: Duration) {
    histogram!("ti_token_issuance_duration_seconds", "status" => status.to_string())
        .record(duration.as_secs_f64());

    counter!("ti_token_issuance_total", "status" => status.to_string()).increment(1);
}

/// Record an HTTP request observed by the metrics middleware
///
/// Metrics: `ti_http_request_duration_seconds`, `ti_http_requests_total`
/// Labels: `method`, `endpoint`, `status_code`
pub fn record_http_request(method: &str, endpoint: &str, status_code: u16, duration: Duration) {
    let normalized_endpoint = normalize_endpoint(endpoint);

    histogram!("ti_http_request_duration_seconds",
        "method" => method.to_string(),
        "endpoint" => normalized_endpoint.to_string()
    )
    .record(duration.as_secs_f64());

    counter!("ti_http_requests_total",
        "method" => method.to_string(),
        "endpoint" => normalized_endpoint.to_string(),
        "status_code" => status_code.to_string()
    )
    .increment(1);
}

/// Collapse unknown paths into a single label value so scanners probing
/// random URLs cannot inflate label cardinality.
fn normalize_endpoint(path: &str) -> &'static str {
    match path {
        "/token" => "/token",
        "/health" => "/health",
        "/metrics" => "/metrics",
        _ => "other",
    }
}
