//! Booking endpoints.

use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use dev_curator_core::Booking;
use serde::{Deserialize, Serialize};

/// Request body for booking a seat.
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    /// Attendee email; trimmed, lowercased and validated before persistence.
    pub email: String,
}

/// Response after booking a seat.
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    /// Human-readable outcome.
    pub message: String,
    /// The booking record.
    pub booking: Booking,
}

/// `POST /api/events/:slug/bookings` — book a seat at an event.
pub async fn create_booking(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), AppError> {
    let booking = state.bookings.book(slug.trim(), &request.email).await?;
    Ok((
        StatusCode::CREATED,
        Json(BookingResponse {
            message: "Booking confirmed!".to_owned(),
            booking,
        }),
    ))
}
