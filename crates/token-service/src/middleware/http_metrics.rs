//! HTTP metrics middleware.
//!
//! Records every response passing through the router, including
//! framework-level rejections (404, 405, 415) that never reach a handler.

use crate::observability::metrics::record_http_request;
use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// Record method, endpoint, status code, and duration for each request.
///
/// Applied as the outermost layer so timeouts and extractor failures are
/// counted as well.
pub async fn http_metrics_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status_code = response.status().as_u16();
    record_http_request(&method, &path, status_code, duration);

    response
}
