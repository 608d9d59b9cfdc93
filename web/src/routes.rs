//! Router configuration.

use crate::handlers::health::{health_check, readiness_check};
use crate::handlers::{bookings, events};
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::http::{header::CONTENT_TYPE, Method};
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Multipart bodies may carry a 5 MiB image plus the text fields; anything
/// past this is rejected before the form is even parsed.
const MAX_FORM_BYTES: usize = 8 * 1024 * 1024;

/// Build the complete Axum router.
///
/// # Arguments
///
/// - `state`: application state to share with handlers
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/events", get(events::list_events))
        .route("/events", post(events::create_event))
        .route("/events/:slug", get(events::get_event))
        .route("/events/:slug", delete(events::delete_event))
        .route("/events/:slug/similar", get(events::similar_events))
        .route("/events/:slug/bookings", post(bookings::create_booking));

    Router::new()
        // Health checks live outside the /api prefix
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(DefaultBodyLimit::max(MAX_FORM_BYTES))
        .with_state(state)
}
