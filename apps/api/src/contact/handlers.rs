use axum::{extract::State, Json};
use serde::Serialize;

use crate::contact::dispatcher::DispatchStatus;
use crate::contact::transport::ContactMessage;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ContactStatusResponse {
    pub status: DispatchStatus,
}

/// POST /api/v1/contact
///
/// The send runs on its own task: a client that disconnects mid-request
/// must not leave the status stuck at `sending`.
pub async fn handle_send_contact(
    State(state): State<AppState>,
    Json(message): Json<ContactMessage>,
) -> Result<Json<ContactStatusResponse>, AppError> {
    let dispatcher = state.contact.clone();
    let status = tokio::spawn(async move { dispatcher.send(message).await })
        .await
        .map_err(|e| AppError::Internal(e.into()))??;
    Ok(Json(ContactStatusResponse { status }))
}

/// GET /api/v1/contact/status
pub async fn handle_contact_status(State(state): State<AppState>) -> Json<ContactStatusResponse> {
    Json(ContactStatusResponse {
        status: state.contact.status(),
    })
}
