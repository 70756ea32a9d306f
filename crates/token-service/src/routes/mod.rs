//! HTTP routes for the token issuance service.
//!
//! Defines the Axum router:
//! - `GET|POST /token` - Issue a room access token
//! - `GET /health` - Liveness probe (simple "OK") - public, unversioned
//! - `GET /metrics` - Prometheus metrics endpoint - public, unversioned
//! - CORS layer with the configured origin policy; preflights answer 204
//! - TraceLayer for request logging
//! - HTTP metrics middleware
//! - 30 second request timeout

use crate::config::CorsOrigins;
use crate::handlers::{self, AppState};
use crate::middleware::{http_metrics_middleware, normalize_preflight_status};
use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

/// Build the application routes.
pub fn build_routes(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    // Token issuance endpoint; GET carries query parameters, POST a JSON body
    let token_routes = Router::new()
        .route(
            "/token",
            get(handlers::issue_token_query).post(handlers::issue_token_json),
        )
        .with_state(state);

    // Metrics route with its own state
    let metrics_routes = Router::new()
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(metrics_handle);

    // Merge routes and apply global middleware layers
    // Layer order (bottom-to-top execution):
    // 1. CorsLayer - answers preflights, decorates responses (innermost)
    // 2. normalize_preflight_status - rewrites preflight 200 -> 204
    // 3. TraceLayer - log request details
    // 4. TimeoutLayer - bound the request lifetime
    // 5. http_metrics_middleware - record ALL responses (outermost)
    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(token_routes)
        .merge(metrics_routes)
        .layer(cors)
        .layer(middleware::from_fn(normalize_preflight_status))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(middleware::from_fn(http_metrics_middleware))
}

/// CORS layer from the configured origin policy.
///
/// Origins in the allow-list were validated at config load; entries that
/// still fail header parsing are skipped rather than panicking.
fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    match origins {
        CorsOrigins::Any => layer.allow_origin(Any),
        CorsOrigins::List(list) => layer.allow_origin(AllowOrigin::list(
            list.iter()
                .filter_map(|origin| origin.parse::<HeaderValue>().ok()),
        )),
    }
}
