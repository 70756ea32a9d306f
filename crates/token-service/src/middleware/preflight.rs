//! Preflight response normalization.
//!
//! The CORS layer answers preflight OPTIONS requests with 200 OK and an
//! empty body. Browser clients of this service were shipped against the
//! original endpoint's 204 No Content preflight contract, so successful
//! preflights are rewritten to 204 here. The CORS headers themselves are
//! untouched.

use axum::{
    extract::Request,
    http::{Method, StatusCode},
    middleware::Next,
    response::Response,
};

/// Rewrite successful OPTIONS responses from 200 to 204.
///
/// Must wrap the CORS layer so it observes the preflight response the CORS
/// layer produced. Non-2xx OPTIONS responses are left alone.
pub async fn normalize_preflight_status(request: Request, next: Next) -> Response {
    let is_options = request.method() == Method::OPTIONS;

    let mut response = next.run(request).await;

    if is_options && response.status() == StatusCode::OK {
        *response.status_mut() = StatusCode::NO_CONTENT;
    }

    response
}
