//! HTTP front end for aggregation.
//!
//! Provides four endpoints:
//! - `GET /health` - liveness check
//! - `GET /` - landing page
//! - `POST /aggregate` - JSON body `{"domains": [...], "timeout": 30}`
//! - `POST /aggregate-file` - multipart upload of a newline- or comma-separated list
//!
//! Both aggregation endpoints answer `{"results": [...]}` with one record per
//! domain and no summary block. Bad input is answered with
//! `400 {"detail": "..."}`.

mod handlers;
mod types;

use axum::routing::{get, post};
use axum::Router;

use handlers::{aggregate_file_handler, aggregate_handler, health_handler, index_handler};
pub use types::{ApiError, ServerState};

/// Builds the router for all endpoints.
pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/aggregate", post(aggregate_handler))
        .route("/aggregate-file", post(aggregate_file_handler))
        .with_state(state)
}

/// Binds `host:port` and serves until the process exits.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn start_server(host: &str, port: u16, state: ServerState) -> Result<(), anyhow::Error> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind server to {}:{}: {}", host, port, e))?;

    log::info!("Server listening on http://{}:{}/", host, port);
    log::info!("  - Aggregate: POST http://{}:{}/aggregate", host, port);
    log::info!("  - Upload: POST http://{}:{}/aggregate-file", host, port);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
