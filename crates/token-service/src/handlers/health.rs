//! Liveness probe.
//!
//! The service is stateless: as long as the process answers HTTP it can
//! issue tokens, so liveness is the only probe it needs.

/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}
