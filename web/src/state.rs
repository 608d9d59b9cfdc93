//! Application state shared across HTTP handlers.

use dev_curator_core::{BookingService, EventService};
use std::sync::Arc;

/// Shared state: the lifecycle services with their injected collaborators.
///
/// Cloned (cheaply, via `Arc`) for each request.
#[derive(Clone)]
pub struct AppState {
    /// Event lifecycle operations.
    pub events: Arc<EventService>,
    /// Booking operations.
    pub bookings: Arc<BookingService>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(events: Arc<EventService>, bookings: Arc<BookingService>) -> Self {
        Self { events, bookings }
    }
}
