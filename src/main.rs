//! Crime Connect Backend
//!
//! REST backend for an investigative-operations dashboard, with SQLite
//! document persistence and on-first-read fixture seeding.

mod api;
mod config;
mod db;
mod errors;
mod models;
mod seed;

use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::DocumentStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DocumentStore>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Crime Connect Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let store = Arc::new(DocumentStore::new(pool));

    // Create application state
    let state = AppState {
        store: store.clone(),
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The store connection opens once at startup and closes once here
    store.close().await;
    tracing::info!("Store connection closed");

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        .route("/", get(api::root))
        .route("/health", get(api::health_check))
        // Status checks (legacy)
        .route("/status", get(api::get_status_checks))
        .route("/status", post(api::create_status_check))
        // Intel
        .route("/intel", get(api::list_intel))
        .route("/intel", post(api::create_intel))
        // Cases
        .route("/cases", get(api::list_cases))
        .route("/cases", post(api::create_case))
        .route("/cases/{id}", patch(api::update_case))
        // Timeline
        .route("/timeline", get(api::list_timeline))
        .route("/timeline", post(api::create_timeline))
        // Command transmissions
        .route("/command", get(api::list_command))
        .route("/command", post(api::create_command))
        // Metrics
        .route("/metrics", get(api::get_metrics));

    Router::new()
        // The nested "/" only answers /api; register the trailing-slash form too
        .route("/api/", get(api::root))
        .nest("/api", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
    }
}

#[cfg(test)]
mod tests;
