use std::sync::Arc;

use crate::contact::dispatcher::ContactDispatcher;
use crate::portfolio::store::DocumentStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The one portfolio document. Lives for the process; never persisted.
    pub store: Arc<DocumentStore>,
    pub contact: ContactDispatcher,
}
