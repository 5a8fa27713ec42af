use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::portfolio::edits::Edit;
use crate::portfolio::export::{export_document, parse_export};
use crate::portfolio::models::EntryId;
use crate::portfolio::render::render_portfolio_to_md;
use crate::portfolio::store::Snapshot;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EditRequest {
    pub edit: Edit,
    /// When set, the edit is refused unless the store is still at this version.
    #[serde(default)]
    pub expected_version: Option<u64>,
}

/// GET /api/v1/portfolio
pub async fn handle_get_portfolio(State(state): State<AppState>) -> Json<Snapshot> {
    Json(Snapshot::clone(&state.store.current()))
}

/// POST /api/v1/portfolio/edits
pub async fn handle_apply_edit(
    State(state): State<AppState>,
    Json(req): Json<EditRequest>,
) -> Result<Json<Snapshot>, AppError> {
    let snapshot = match req.expected_version {
        Some(version) => state.store.apply_if_current(version, &req.edit)?,
        None => state.store.apply(&req.edit)?,
    };
    Ok(Json(Snapshot::clone(&snapshot)))
}

/// DELETE /api/v1/portfolio/experience/:id
///
/// Resolves the id against the current version and removes that position
/// only if nothing changed in between.
pub async fn handle_remove_experience_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Snapshot>, AppError> {
    let current = state.store.current();
    let index = current
        .document
        .experience_position(EntryId(id))
        .ok_or_else(|| AppError::NotFound(format!("Experience entry {id} not found")))?;
    let snapshot = state
        .store
        .apply_if_current(current.version, &Edit::RemoveExperience { index })?;
    Ok(Json(Snapshot::clone(&snapshot)))
}

/// DELETE /api/v1/portfolio/projects/:id
pub async fn handle_remove_project_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Snapshot>, AppError> {
    let current = state.store.current();
    let index = current
        .document
        .project_position(EntryId(id))
        .ok_or_else(|| AppError::NotFound(format!("Project {id} not found")))?;
    let snapshot = state
        .store
        .apply_if_current(current.version, &Edit::RemoveProject { index })?;
    Ok(Json(Snapshot::clone(&snapshot)))
}

/// GET /api/v1/portfolio/export
pub async fn handle_export(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let snippet = export_document(&state.store.current().document)
        .map_err(|e| AppError::Internal(e.into()))?;
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], snippet))
}

/// PUT /api/v1/portfolio/import
pub async fn handle_import(
    State(state): State<AppState>,
    snippet: String,
) -> Result<Json<Snapshot>, AppError> {
    let document = parse_export(&snippet)?;
    let snapshot = state.store.replace(document);
    Ok(Json(Snapshot::clone(&snapshot)))
}

/// GET /api/v1/portfolio/preview
pub async fn handle_preview(State(state): State<AppState>) -> impl IntoResponse {
    let md = render_portfolio_to_md(&state.store.current().document);
    ([(header::CONTENT_TYPE, "text/markdown; charset=utf-8")], md)
}
