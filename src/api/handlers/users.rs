//! Member profile and organisation account endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;

use super::parse_username;
use crate::api::session::CurrentActor;
use crate::api::{ApiError, AppState, Backend};
use crate::expense::domain::OwnerOverview;
use crate::profile::domain::{BankAccountId, BankAccountView, ProfileView};
use crate::profile::services::UpdateBankDetailsRequest;

/// Body of `PUT /api/users/{username}`.
#[derive(Debug, Deserialize)]
pub struct BankDetailsUpdate {
    bank_account: String,
    sorting_number: String,
    bank_name: String,
    default_account: Option<BankAccountId>,
}

/// Body of `POST /api/me/device`.
#[derive(Debug, Deserialize)]
pub struct DeviceRegistration {
    instance_id: String,
}

/// Body of `POST /api/accounts`.
#[derive(Debug, Deserialize)]
pub struct NewAccount {
    name: String,
}

/// Shows the signed-on member's own profile.
pub async fn me<B: Backend>(
    State(state): State<Arc<AppState<B>>>,
    CurrentActor(actor): CurrentActor,
) -> Result<Json<ProfileView>, ApiError> {
    Ok(Json(state.profiles.view(&actor, actor.username()).await?))
}

/// Records the member's push-notification instance.
pub async fn register_device<B: Backend>(
    State(state): State<Arc<AppState<B>>>,
    CurrentActor(actor): CurrentActor,
    Json(body): Json<DeviceRegistration>,
) -> Result<StatusCode, ApiError> {
    state.profiles.register_device(&actor, body.instance_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Shows a member's profile.
pub async fn show<B: Backend>(
    State(state): State<Arc<AppState<B>>>,
    CurrentActor(actor): CurrentActor,
    Path(username): Path<String>,
) -> Result<Json<ProfileView>, ApiError> {
    let member = parse_username(&username)?;
    Ok(Json(state.profiles.view(&actor, &member).await?))
}

/// Replaces a member's payout details.
pub async fn update<B: Backend>(
    State(state): State<Arc<AppState<B>>>,
    CurrentActor(actor): CurrentActor,
    Path(username): Path<String>,
    Json(body): Json<BankDetailsUpdate>,
) -> Result<Json<ProfileView>, ApiError> {
    let member = parse_username(&username)?;
    let mut request =
        UpdateBankDetailsRequest::new(body.bank_account, body.sorting_number, body.bank_name);
    if let Some(account) = body.default_account {
        request = request.with_default_account(account);
    }
    Ok(Json(
        state
            .profiles
            .update_bank_details(&actor, &member, request)
            .await?,
    ))
}

/// Shows a member's claims and reimbursements.
pub async fn receipts<B: Backend>(
    State(state): State<Arc<AppState<B>>>,
    CurrentActor(actor): CurrentActor,
    Path(username): Path<String>,
) -> Result<Json<OwnerOverview>, ApiError> {
    let member = parse_username(&username)?;
    Ok(Json(state.lifecycle.owner_overview(&actor, &member).await?))
}

/// Lists the organisation's bank accounts.
pub async fn accounts<B: Backend>(
    State(state): State<Arc<AppState<B>>>,
    CurrentActor(_actor): CurrentActor,
) -> Result<Json<Vec<BankAccountView>>, ApiError> {
    let listed = state.profiles.list_bank_accounts().await?;
    Ok(Json(listed.iter().map(BankAccountView::from).collect()))
}

/// Registers an organisation bank account; treasurers only.
pub async fn create_account<B: Backend>(
    State(state): State<Arc<AppState<B>>>,
    CurrentActor(actor): CurrentActor,
    Json(body): Json<NewAccount>,
) -> Result<(StatusCode, Json<BankAccountView>), ApiError> {
    if !actor.grants().may_pay() {
        return Err(ApiError::Forbidden(format!(
            "{} may not manage bank accounts",
            actor.username()
        )));
    }
    let account = state.profiles.create_bank_account(body.name).await?;
    Ok((StatusCode::CREATED, Json(BankAccountView::from(&account))))
}
