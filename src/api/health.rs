//! Liveness endpoint
//!
//! No store dependency; orchestration probes this before routing traffic.

use axum::response::Response;
use axum::routing::get;
use axum::Router;
use serde::Serialize;

use crate::api::responses::ApiResponse;
use crate::api::AppState;

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
    version: &'static str,
}

/// Build the health router
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// GET /api/health
async fn health_check() -> Response {
    ApiResponse::ok(HealthData {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}
