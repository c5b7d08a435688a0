//! Expense, part, and comment endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::api::session::CurrentActor;
use crate::api::{ApiError, AppState, Backend};
use crate::expense::domain::{
    Amount, BudgetLine, CommentView, ExpenseId, ExpensePartId, ExpenseView, ReceiptView,
};
use crate::expense::services::SubmitExpenseRequest;

/// One line of a new expense.
#[derive(Debug, Deserialize)]
pub struct NewPart {
    #[serde(default)]
    committee_id: i32,
    committee_name: String,
    #[serde(default)]
    cost_centre_id: i32,
    #[serde(default)]
    cost_centre_name: String,
    #[serde(default)]
    budget_line_id: i32,
    #[serde(default)]
    budget_line_name: String,
    amount: Amount,
}

/// Body of `POST /api/expenses`.
#[derive(Debug, Deserialize)]
pub struct NewExpense {
    description: String,
    expense_date: NaiveDate,
    parts: Vec<NewPart>,
}

/// Body of `POST /api/expenses/{id}/book`.
#[derive(Debug, Deserialize)]
pub struct BookRequest {
    verification: String,
}

/// Body of `POST /api/expenses/{id}/comments`.
#[derive(Debug, Deserialize)]
pub struct NewComment {
    content: String,
}

/// Lists the member's own expenses, newest first.
pub async fn list<B: Backend>(
    State(state): State<Arc<AppState<B>>>,
    CurrentActor(actor): CurrentActor,
) -> Result<Json<Vec<ExpenseView>>, ApiError> {
    let own = state.lifecycle.list_own(&actor).await?;
    Ok(Json(state.lifecycle.project(&own).await?))
}

/// Submits a new expense.
pub async fn create<B: Backend>(
    State(state): State<Arc<AppState<B>>>,
    CurrentActor(actor): CurrentActor,
    Json(body): Json<NewExpense>,
) -> Result<(StatusCode, Json<ExpenseView>), ApiError> {
    let request = body.parts.into_iter().fold(
        SubmitExpenseRequest::new(body.description, body.expense_date),
        |request, part| {
            let line = BudgetLine {
                committee_id: part.committee_id,
                committee_name: part.committee_name,
                cost_centre_id: part.cost_centre_id,
                cost_centre_name: part.cost_centre_name,
                budget_line_id: part.budget_line_id,
                budget_line_name: part.budget_line_name,
            };
            request.with_part(line, part.amount)
        },
    );
    let created = state.lifecycle.submit(&actor, request).await?;
    let view = state.lifecycle.project_one(&created).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// Shows one expense.
pub async fn show<B: Backend>(
    State(state): State<Arc<AppState<B>>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<ExpenseId>,
) -> Result<Json<ExpenseView>, ApiError> {
    Ok(Json(state.lifecycle.view(&actor, id).await?))
}

/// Deletes an unpaid expense.
pub async fn delete<B: Backend>(
    State(state): State<Arc<AppState<B>>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<ExpenseId>,
) -> Result<StatusCode, ApiError> {
    state.lifecycle.delete(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Confirms that the paper receipt is filed.
pub async fn confirm<B: Backend>(
    State(state): State<Arc<AppState<B>>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<ExpenseId>,
) -> Result<Json<ExpenseView>, ApiError> {
    let confirmed = state.lifecycle.confirm(&actor, id).await?;
    Ok(Json(state.lifecycle.project_one(&confirmed).await?))
}

/// Records the ledger verification.
pub async fn book<B: Backend>(
    State(state): State<Arc<AppState<B>>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<ExpenseId>,
    Json(body): Json<BookRequest>,
) -> Result<Json<ExpenseView>, ApiError> {
    let booked = state.lifecycle.book(&actor, id, &body.verification).await?;
    Ok(Json(state.lifecycle.project_one(&booked).await?))
}

/// Attests one part.
pub async fn attest<B: Backend>(
    State(state): State<Arc<AppState<B>>>,
    CurrentActor(actor): CurrentActor,
    Path(part): Path<ExpensePartId>,
) -> Result<Json<ExpenseView>, ApiError> {
    let attested = state.lifecycle.attest_part(&actor, part).await?;
    Ok(Json(state.lifecycle.project_one(&attested).await?))
}

/// Lists the comments on an expense.
pub async fn comments<B: Backend>(
    State(state): State<Arc<AppState<B>>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<ExpenseId>,
) -> Result<Json<Vec<CommentView>>, ApiError> {
    Ok(Json(state.comments.list(&actor, id).await?))
}

/// Posts a comment.
pub async fn comment<B: Backend>(
    State(state): State<Arc<AppState<B>>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<ExpenseId>,
    Json(body): Json<NewComment>,
) -> Result<(StatusCode, Json<Vec<CommentView>>), ApiError> {
    state.comments.post(&actor, id, &body.content).await?;
    Ok((StatusCode::CREATED, Json(state.comments.list(&actor, id).await?)))
}

/// Lists the receipts attached to an expense.
pub async fn receipts<B: Backend>(
    State(state): State<Arc<AppState<B>>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<ExpenseId>,
) -> Result<Json<Vec<ReceiptView>>, ApiError> {
    let attached = state.receipts.list_for_expense(&actor, id).await?;
    Ok(Json(attached.iter().map(ReceiptView::from).collect()))
}
