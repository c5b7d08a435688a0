//! Receipt upload, removal, and download endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::api::session::CurrentActor;
use crate::api::{ApiError, AppState, Backend};
use crate::expense::domain::{ExpenseId, ReceiptId, ReceiptView};
use crate::expense::services::UploadedFile;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Query of `POST /api/files`.
#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    expense: Option<ExpenseId>,
}

/// Uploads one or more receipt files, optionally attaching them.
pub async fn upload<B: Backend>(
    State(state): State<Arc<AppState<B>>>,
    CurrentActor(actor): CurrentActor,
    Query(query): Query<UploadQuery>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Vec<ReceiptView>>), ApiError> {
    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::BadRequest(err.to_string()))?
    {
        let Some(name) = field.file_name().map(str::to_owned) else {
            continue;
        };
        let content_type = field
            .content_type()
            .unwrap_or(FALLBACK_CONTENT_TYPE)
            .to_owned();
        let content = field
            .bytes()
            .await
            .map_err(|err| ApiError::BadRequest(err.to_string()))?;
        files.push(UploadedFile {
            name,
            content_type,
            content: content.to_vec(),
        });
    }

    let uploaded = state.receipts.upload(&actor, files, query.expense).await?;
    Ok((
        StatusCode::CREATED,
        Json(uploaded.iter().map(ReceiptView::from).collect()),
    ))
}

/// Detaches a receipt from its expense.
pub async fn remove<B: Backend>(
    State(state): State<Arc<AppState<B>>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<ReceiptId>,
) -> Result<Json<ReceiptView>, ApiError> {
    let detached = state.receipts.remove(&actor, id).await?;
    Ok(Json(ReceiptView::from(&detached)))
}

/// Serves stored receipt content.
pub async fn content<B: Backend>(
    State(state): State<Arc<AppState<B>>>,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let bytes = state.receipts.content(&key).await?;
    Ok(([(header::CONTENT_TYPE, content_type_for(&key))], bytes))
}

fn content_type_for(key: &str) -> &'static str {
    let extension = key
        .rsplit_once('.')
        .map(|(_, extension)| extension.to_ascii_lowercase());
    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("pdf") => "application/pdf",
        _ => FALLBACK_CONTENT_TYPE,
    }
}
