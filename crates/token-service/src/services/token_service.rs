use crate::config::Config;
use crate::crypto::{self, AccessTokenClaims};
use crate::errors::TokenError;
use crate::models::TokenResponse;
use crate::observability::hash_for_correlation;
use crate::observability::metrics::record_token_issuance;
use chrono::Utc;
use std::time::Instant;

/// Upper bound on `identity` and `roomName` length, in bytes. Keeps token
/// size and log-label cardinality bounded.
pub const MAX_FIELD_LENGTH: usize = 256;

/// Issue a room access token for `identity` scoped to `room_name`.
///
/// Validates the request, builds the grant and claims, signs them with the
/// configured API key secret, and records the outcome. The signing primitive
/// is never invoked for requests that fail validation.
pub fn issue_room_token(
    config: &Config,
    identity: Option<&str>,
    room_name: Option<&str>,
) -> Result<TokenResponse, TokenError> {
    let start = Instant::now();

    let result = validate_and_sign(config, identity, room_name);

    match &result {
        Ok(response) => {
            record_token_issuance("success", start.elapsed());
            tracing::info!(
                target: "token_service.issuance",
                identity_hash = %hash_for_correlation(&response.identity),
                room_hash = %hash_for_correlation(&response.room_name),
                ttl_seconds = config.token_ttl_seconds,
                "Issued room access token"
            );
        }
        Err(TokenError::Validation(reason)) => {
            record_token_issuance("validation_error", start.elapsed());
            tracing::debug!(
                target: "token_service.issuance",
                reason = %reason,
                "Rejected token request"
            );
        }
        Err(TokenError::Signing(_)) => {
            // Detail is logged by the error's response mapping.
            record_token_issuance("signing_error", start.elapsed());
        }
    }

    result
}

fn validate_and_sign(
    config: &Config,
    identity: Option<&str>,
    room_name: Option<&str>,
) -> Result<TokenResponse, TokenError> {
    let identity = identity.unwrap_or_default();
    let room_name = room_name.unwrap_or_default();

    if identity.is_empty() || room_name.is_empty() {
        return Err(TokenError::Validation(
            "Missing identity or roomName".to_string(),
        ));
    }

    if identity.len() > MAX_FIELD_LENGTH {
        return Err(TokenError::Validation(format!(
            "identity exceeds {MAX_FIELD_LENGTH} bytes"
        )));
    }

    if room_name.len() > MAX_FIELD_LENGTH {
        return Err(TokenError::Validation(format!(
            "roomName exceeds {MAX_FIELD_LENGTH} bytes"
        )));
    }

    let claims = AccessTokenClaims::new(
        &config.account_sid,
        &config.api_key_sid,
        identity,
        room_name,
        Utc::now().timestamp(),
        config.token_ttl_seconds,
    );

    let token = crypto::sign_access_token(&claims, config.signing_secret())?;

    Ok(TokenResponse {
        token,
        identity: identity.to_string(),
        room_name: room_name.to_string(),
    })
}
