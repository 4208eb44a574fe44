//! REST API over the region table and the calculator.
//!
//! Provides three GET endpoints:
//! - `/regions`: all regions, in table order
//! - `/regions/{id}`: one region, for context on location selection
//! - `/audit?region=&bill=`: audit result and cumulative projection

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::info;

use crate::calc::{Calculator, ProjectionConfig};

pub use types::{AuditQuery, AuditResponse, ErrorResponse};

/// Immutable application state shared across all request handlers.
///
/// Constructed once at startup and wrapped in `Arc`; no locks needed since
/// all data is read-only.
#[derive(Debug)]
pub struct AppState {
    /// Region table and constants.
    pub calculator: Calculator,
    /// Projection assumptions for the chart data.
    pub projection: ProjectionConfig,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/regions", get(handlers::list_regions))
        .route("/regions/{id}", get(handlers::get_region))
        .route("/audit", get(handlers::get_audit))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
