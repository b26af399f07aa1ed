//! Dashboard Server
//!
//! Serves the dashboard page and its JSON view, built with Axum.
//!
//! # Endpoints
//!
//! - `GET /` - dashboard page
//! - `GET /?lot={id}` - dashboard page with the lot history modal open
//! - `POST /theme` - switch theme (form field `theme`)
//! - `GET /api/view` - current view model
//! - `GET /health/live` - liveness probe

pub mod error;
pub mod routes;
pub mod state;
pub mod templates;

pub use error::{ServerError, ServerResult};
pub use state::AppState;
pub use templates::{create_parking_card, DashboardTemplate, ParkingCardTemplate};

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ServerConfig;

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let health_routes = Router::new().route("/live", get(routes::liveness));

    Router::new()
        .route("/", get(routes::dashboard))
        .route("/theme", post(routes::set_theme))
        .route("/api/view", get(routes::view))
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Start the server and run until a shutdown signal
pub async fn serve(state: AppState, config: &ServerConfig) -> Result<(), ServerError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Parkwatch dashboard listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Parkwatch dashboard shut down gracefully");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
