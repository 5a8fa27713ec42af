use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::contact::dispatcher::ContactError;
use crate::portfolio::edits::DocumentError;
use crate::portfolio::export::ExportError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Import error: {0}")]
    Import(#[from] ExportError),

    #[error("Contact error: {0}")]
    Contact(#[from] ContactError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Document(e @ DocumentError::UnknownField { .. }) => {
                (StatusCode::BAD_REQUEST, "UNKNOWN_FIELD", e.to_string())
            }
            AppError::Document(e @ DocumentError::IndexOutOfRange { .. }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INDEX_OUT_OF_RANGE",
                e.to_string(),
            ),
            AppError::Document(e @ DocumentError::StaleVersion { .. }) => {
                (StatusCode::CONFLICT, "STALE_VERSION", e.to_string())
            }
            AppError::Import(e) => (StatusCode::BAD_REQUEST, "INVALID_SNIPPET", e.to_string()),
            AppError::Contact(e) => (StatusCode::CONFLICT, "CONTACT_BUSY", e.to_string()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
