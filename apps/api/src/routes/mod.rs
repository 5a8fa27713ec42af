pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::contact::handlers as contact;
use crate::portfolio::handlers as portfolio;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Portfolio document
        .route("/api/v1/portfolio", get(portfolio::handle_get_portfolio))
        .route("/api/v1/portfolio/edits", post(portfolio::handle_apply_edit))
        .route(
            "/api/v1/portfolio/experience/:id",
            delete(portfolio::handle_remove_experience_by_id),
        )
        .route(
            "/api/v1/portfolio/projects/:id",
            delete(portfolio::handle_remove_project_by_id),
        )
        .route("/api/v1/portfolio/export", get(portfolio::handle_export))
        .route("/api/v1/portfolio/import", put(portfolio::handle_import))
        .route("/api/v1/portfolio/preview", get(portfolio::handle_preview))
        // Contact form
        .route("/api/v1/contact", post(contact::handle_send_contact))
        .route(
            "/api/v1/contact/status",
            get(contact::handle_contact_status),
        )
        .with_state(state)
}
