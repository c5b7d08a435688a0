//! Work queues for attesters, confirmers, treasurers, and accountants.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;

use crate::api::session::CurrentActor;
use crate::api::{ApiError, AppState, Backend};
use crate::expense::domain::ExpenseView;
use crate::expense::services::PayableGroup;

/// Expenses with parts awaiting the member's attest.
pub async fn attest<B: Backend>(
    State(state): State<Arc<AppState<B>>>,
    CurrentActor(actor): CurrentActor,
) -> Result<Json<Vec<ExpenseView>>, ApiError> {
    let pending = state.lifecycle.attestable(&actor).await?;
    Ok(Json(state.lifecycle.project(&pending).await?))
}

/// Expenses whose receipt is not yet confirmed.
pub async fn confirm<B: Backend>(
    State(state): State<Arc<AppState<B>>>,
    CurrentActor(actor): CurrentActor,
) -> Result<Json<Vec<ExpenseView>>, ApiError> {
    let pending = state.lifecycle.confirmable(&actor).await?;
    Ok(Json(state.lifecycle.project(&pending).await?))
}

/// Payable expenses grouped by member.
pub async fn pay<B: Backend>(
    State(state): State<Arc<AppState<B>>>,
    CurrentActor(actor): CurrentActor,
) -> Result<Json<Vec<PayableGroup>>, ApiError> {
    Ok(Json(state.payments.payable_by_owner(&actor).await?))
}

/// Paid expenses awaiting booking.
pub async fn account<B: Backend>(
    State(state): State<Arc<AppState<B>>>,
    CurrentActor(actor): CurrentActor,
) -> Result<Json<Vec<ExpenseView>>, ApiError> {
    let pending = state.lifecycle.accountable(&actor).await?;
    Ok(Json(state.lifecycle.project(&pending).await?))
}
