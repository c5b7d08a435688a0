//! Reimbursement endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;

use super::parse_username;
use crate::api::session::CurrentActor;
use crate::api::{ApiError, AppState, Backend};
use crate::expense::domain::{ExpenseId, PaymentId, PaymentView};
use crate::expense::services::PayRequest;
use crate::profile::domain::BankAccountId;

/// Body of `POST /api/payments`.
#[derive(Debug, Deserialize)]
pub struct NewPayment {
    receiver: String,
    account: BankAccountId,
    expenses: Vec<ExpenseId>,
}

/// Pays a member for the listed expenses.
pub async fn create<B: Backend>(
    State(state): State<Arc<AppState<B>>>,
    CurrentActor(actor): CurrentActor,
    Json(body): Json<NewPayment>,
) -> Result<(StatusCode, Json<PaymentView>), ApiError> {
    let receiver = parse_username(&body.receiver)?;
    let request = PayRequest::new(receiver, body.account, body.expenses);
    let payment = state.payments.pay(&actor, request).await?;
    let view = state.payments.view(&actor, payment.id()).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// Shows one payment.
pub async fn show<B: Backend>(
    State(state): State<Arc<AppState<B>>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<PaymentId>,
) -> Result<Json<PaymentView>, ApiError> {
    Ok(Json(state.payments.view(&actor, id).await?))
}
