//! Accounting entry routes: listing, reports, and mutations.

use africanut_core::ledger::{EntryCriteria, EntryPayload};
use africanut_core::reports::{journal_csv_filename, render_journal_csv};
use africanut_shared::types::EntryId;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, put},
};
use chrono::Utc;
use serde_json::json;
use tracing::info;

use crate::AppState;
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// Creates the accounting routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounting", get(list_entries).post(create_entry))
        .route("/accounting/journal", get(get_journal))
        .route("/accounting/csv", get(export_csv))
        .route("/accounting/pnl", get(get_pnl))
        .route("/accounting/balance-sheet", get(get_balance_sheet))
        .route("/accounting/{id}", put(update_entry).delete(delete_entry))
}

/// GET /accounting
async fn list_entries(
    State(state): State<AppState>,
    Query(criteria): Query<EntryCriteria>,
) -> Result<impl IntoResponse, ApiError> {
    let entries = state.queries().find(&criteria).await?;
    Ok(Json(entries))
}

/// GET /accounting/journal
async fn get_journal(
    State(state): State<AppState>,
    Query(criteria): Query<EntryCriteria>,
) -> Result<impl IntoResponse, ApiError> {
    let journal = state.reports().journal(&criteria).await?;
    Ok(Json(journal))
}

/// GET /accounting/csv
///
/// Semicolon-separated journal with a UTF-8 BOM, served as an attachment.
async fn export_csv(
    State(state): State<AppState>,
    Query(criteria): Query<EntryCriteria>,
) -> Result<impl IntoResponse, ApiError> {
    let journal = state.reports().journal(&criteria).await?;
    let body = render_journal_csv(&journal.rows)?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        journal_csv_filename(Utc::now().date_naive())
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

/// GET /accounting/pnl
async fn get_pnl(
    State(state): State<AppState>,
    Query(criteria): Query<EntryCriteria>,
) -> Result<impl IntoResponse, ApiError> {
    let report = state.reports().profit_and_loss(&criteria).await?;
    Ok(Json(report))
}

/// GET /accounting/balance-sheet
async fn get_balance_sheet(
    State(state): State<AppState>,
    Query(criteria): Query<EntryCriteria>,
) -> Result<impl IntoResponse, ApiError> {
    let report = state.reports().balance_sheet(&criteria).await?;
    Ok(Json(report))
}

/// POST /accounting
async fn create_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<EntryPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let entry = state.mutations().create(auth.user_id(), payload).await?;
    info!(
        entry_id = %entry.id,
        user_id = %auth.user_id(),
        role = auth.role(),
        "Entry recorded via API"
    );
    Ok((StatusCode::CREATED, Json(entry)))
}

/// PUT /accounting/{id}
async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<EntryId>,
    Json(payload): Json<EntryPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let entry = state.mutations().update(id, payload).await?;
    Ok(Json(entry))
}

/// DELETE /accounting/{id}
async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<EntryId>,
) -> Result<impl IntoResponse, ApiError> {
    state.mutations().remove(id).await?;
    Ok(Json(json!({ "success": true })))
}
