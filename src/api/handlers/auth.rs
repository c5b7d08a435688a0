//! Sign-on, sign-off, and health endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Redirect;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::api::session::IssuedSession;
use crate::api::{ApiError, AppState, Backend};
use crate::profile::domain::UserSummary;

/// Query of `GET /login`.
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    callback: Option<String>,
}

/// Body answered after a successful token exchange.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    session: IssuedSession,
    user: UserSummary,
}

/// Redirects to the login service, which calls back with a token.
pub async fn login<B: Backend>(
    State(state): State<Arc<AppState<B>>>,
    Query(query): Query<LoginQuery>,
) -> Result<Redirect, ApiError> {
    let callback = query
        .callback
        .filter(|callback| !callback.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("callback is required".to_owned()))?;
    Ok(Redirect::to(&state.login.login_url(&callback)))
}

/// Exchanges a login token for a session.
pub async fn exchange<B: Backend>(
    State(state): State<Arc<AppState<B>>>,
    Path(token): Path<String>,
) -> Result<Json<LoginResponse>, ApiError> {
    let profile = state
        .login
        .exchange(&token)
        .await?
        .ok_or(ApiError::Unauthenticated)?;
    let session = state
        .sessions
        .issue(profile.username(), Utc::now())
        .map_err(|err| ApiError::Internal(err.to_string()))?;
    Ok(Json(LoginResponse {
        session,
        user: UserSummary::from(&profile),
    }))
}

/// Sessions are bearer tokens; clients sign off by discarding theirs.
pub async fn logout() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Liveness check.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
