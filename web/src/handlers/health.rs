//! Health check endpoints.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
}

/// Liveness check: 200 OK whenever the process is up. Does not verify
/// dependencies.
pub async fn health_check() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}

/// Readiness check response.
#[derive(Serialize)]
pub struct ReadinessResponse {
    /// Overall readiness.
    pub ready: bool,
    /// Document store connectivity.
    pub database: bool,
    /// List cache connectivity.
    pub cache: bool,
}

/// Readiness check: pings the document store and the list cache.
///
/// The store gates readiness; a dead cache only degrades reads (every list
/// becomes a store query), so it is reported but does not flip the status.
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let database = state.events.store_healthy().await;
    let cache = state.events.cache_healthy().await;
    let status = if database {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (
        status,
        Json(ReadinessResponse {
            ready: database,
            database,
            cache,
        }),
    )
}
