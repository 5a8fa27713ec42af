mod config;
mod contact;
mod errors;
mod portfolio;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::contact::dispatcher::ContactDispatcher;
use crate::contact::transport::EmailJsTransport;
use crate::portfolio::store::{initial_document, log_published_versions, DocumentStore};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Portfolio API v{}", env!("CARGO_PKG_VERSION"));

    // Load the document once; it lives in memory until shutdown
    let document = initial_document(config.seed_path.as_deref())?;
    info!(
        "Portfolio loaded: {} skill groups, {} experience entries, {} projects",
        document.skills.len(),
        document.experience.len(),
        document.projects.len()
    );
    let store = Arc::new(DocumentStore::new(document));
    tokio::spawn(log_published_versions(store.subscribe()));

    // Initialize contact dispatch
    let transport = EmailJsTransport::new(config.emailjs.clone())?;
    let contact = ContactDispatcher::new(Arc::new(transport), config.contact_reset);
    info!(
        "Contact dispatch via EmailJS service {} (reset after {}s)",
        config.emailjs.service_id,
        config.contact_reset.as_secs()
    );

    let state = AppState { store, contact };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the portfolio origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
