//! Event endpoints: list, create, fetch, similar, delete.

use crate::error::AppError;
use crate::form::parse_event_form;
use crate::state::AppState;
use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use dev_curator_core::{Event, DEFAULT_SIMILAR_LIMIT};
use serde::{Deserialize, Serialize};

/// Response carrying a single event.
#[derive(Debug, Serialize)]
pub struct EventResponse {
    /// Human-readable outcome.
    pub message: String,
    /// The event record.
    pub event: Event,
}

/// Response carrying a list of events.
#[derive(Debug, Serialize)]
pub struct ListEventsResponse {
    /// The events, in query order.
    pub events: Vec<Event>,
    /// How many were returned.
    pub total: usize,
}

/// Query parameters for the similar-events endpoint.
#[derive(Debug, Deserialize)]
pub struct SimilarQuery {
    /// Result cap; defaults to 4.
    #[serde(default = "default_similar_limit")]
    pub limit: usize,
}

const fn default_similar_limit() -> usize {
    DEFAULT_SIMILAR_LIMIT
}

/// `GET /api/events` — the full list, newest first, served through the
/// tagged cache.
pub async fn list_events(
    State(state): State<AppState>,
) -> Result<Json<ListEventsResponse>, AppError> {
    let events = state.events.list_all_cached().await?;
    let total = events.len();
    Ok(Json(ListEventsResponse { events, total }))
}

/// `POST /api/events` — create an event from the multipart form.
pub async fn create_event(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<EventResponse>), AppError> {
    let (draft, image) = parse_event_form(multipart).await?;
    let event = state.events.create(draft, image).await?;
    Ok((
        StatusCode::CREATED,
        Json(EventResponse {
            message: "Event created successfully!".to_owned(),
            event,
        }),
    ))
}

/// `GET /api/events/:slug` — one event.
pub async fn get_event(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<EventResponse>, AppError> {
    let slug = require_slug(&slug)?;
    let event = state.events.get_by_slug(slug).await?;
    Ok(Json(EventResponse {
        message: "Event fetched successfully!".to_owned(),
        event,
    }))
}

/// `GET /api/events/:slug/similar` — events sharing a tag with this one,
/// oldest first, excluding the event itself.
pub async fn similar_events(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<SimilarQuery>,
) -> Result<Json<ListEventsResponse>, AppError> {
    let slug = require_slug(&slug)?;
    let events = state.events.get_similar_by_slug(slug, query.limit).await?;
    let total = events.len();
    Ok(Json(ListEventsResponse { events, total }))
}

/// `DELETE /api/events/:slug` — cascading delete; answers with the deleted
/// record.
pub async fn delete_event(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<EventResponse>, AppError> {
    let slug = require_slug(&slug)?;
    let event = state.events.delete_by_slug(slug).await?;
    Ok(Json(EventResponse {
        message: "Event deleted successfully!".to_owned(),
        event,
    }))
}

fn require_slug(slug: &str) -> Result<&str, AppError> {
    let trimmed = slug.trim();
    if trimmed.is_empty() {
        return Err(AppError::bad_request("Slug is required"));
    }
    Ok(trimmed)
}
