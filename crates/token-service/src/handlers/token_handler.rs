use crate::config::Config;
use crate::errors::TokenError;
use crate::models::{IssuanceRequest, TokenResponse};
use crate::services::token_service;
use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;
use tracing::instrument;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
}

/// Handle token issuance via query parameters
///
/// GET /token?identity=...&roomName=...
#[instrument(
    skip_all,
    name = "token.issue",
    fields(method = "GET", endpoint = "/token")
)]
pub async fn issue_token_query(
    State(state): State<Arc<AppState>>,
    Query(request): Query<IssuanceRequest>,
) -> Result<Json<TokenResponse>, TokenError> {
    let response = token_service::issue_room_token(
        &state.config,
        request.identity.as_deref(),
        request.room_name.as_deref(),
    )?;

    Ok(Json(response))
}

/// Handle token issuance via JSON body
///
/// POST /token with `{ "identity": ..., "roomName": ... }`
#[instrument(
    skip_all,
    name = "token.issue",
    fields(method = "POST", endpoint = "/token")
)]
pub async fn issue_token_json(
    State(state): State<Arc<AppState>>,
    Json(request): Json<IssuanceRequest>,
) -> Result<Json<TokenResponse>, TokenError> {
    let response = token_service::issue_room_token(
        &state.config,
        request.identity.as_deref(),
        request.room_name.as_deref(),
    )?;

    Ok(Json(response))
}
