//! HTTP middleware layers.

pub mod http_metrics;
pub mod preflight;

pub use http_metrics::http_metrics_middleware;
pub use preflight::normalize_preflight_status;
