use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    /// Client-caused: missing or malformed request parameters.
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Server-caused: token signing or serialization failed. The inner
    /// detail is logged; callers only ever see a generic message.
    #[error("Token signing failed: {0}")]
    Signing(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for TokenError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            TokenError::Validation(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
            TokenError::Signing(detail) => {
                // Full detail stays server-side; the response body must not
                // carry signing internals.
                tracing::error!(
                    target: "token_service.errors",
                    error = %detail,
                    "Token signing failed"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
