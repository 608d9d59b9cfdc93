//! Document store traits for events and bookings.
//!
//! The store is a collaborator, not something this crate implements: the
//! production backend lives in `dev-curator-postgres`, a deterministic
//! in-memory one in `dev-curator-testing`. Both are handed to the services as
//! `Arc<dyn …>` — an explicitly constructed, injected client rather than an
//! ambient global connection.
//!
//! Uniqueness is the store's job. Implementations enforce slug uniqueness for
//! events and `(event_id, email)` uniqueness for bookings and report
//! violations as the dedicated [`StoreError`] variants, so the service layer
//! never needs an in-process lock.

use crate::types::{Booking, Event, EventId};
use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The slug unique index rejected an event write.
    #[error("an event with slug '{0}' already exists")]
    DuplicateSlug(String),

    /// The `(event_id, email)` unique index rejected a booking write.
    #[error("a booking for this event and email already exists")]
    DuplicateBooking,

    /// A record could not be (de)serialized at the document boundary.
    #[error("document serialization failed: {0}")]
    Serialization(String),

    /// The backend itself failed (connection, query, constraint other than
    /// the uniqueness ones above).
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Persistence operations for [`Event`] documents.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Insert a new event.
    ///
    /// # Errors
    ///
    /// [`StoreError::DuplicateSlug`] when the slug is taken, otherwise a
    /// backend error.
    async fn insert(&self, event: &Event) -> Result<(), StoreError>;

    /// Fetch one event by slug, if present.
    ///
    /// # Errors
    ///
    /// Backend errors only; absence is `Ok(None)`.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Event>, StoreError>;

    /// Events sharing at least one of `tags`, excluding `exclude`, ordered
    /// by creation time ascending (oldest first), capped at `limit`.
    ///
    /// No relevance ranking beyond the store's natural match and order.
    ///
    /// # Errors
    ///
    /// Backend errors only.
    async fn find_similar(
        &self,
        exclude: EventId,
        tags: &[String],
        limit: usize,
    ) -> Result<Vec<Event>, StoreError>;

    /// All events, ordered by creation time descending (newest first).
    ///
    /// # Errors
    ///
    /// Backend errors only.
    async fn list_all(&self) -> Result<Vec<Event>, StoreError>;

    /// Delete one event by slug, returning the deleted record if it existed.
    ///
    /// # Errors
    ///
    /// Backend errors only; absence is `Ok(None)`.
    async fn delete_by_slug(&self, slug: &str) -> Result<Option<Event>, StoreError>;

    /// Whether the backend currently answers queries.
    async fn healthy(&self) -> bool;
}

/// Persistence operations for [`Booking`] documents.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Insert a new booking.
    ///
    /// # Errors
    ///
    /// [`StoreError::DuplicateBooking`] when this email already booked this
    /// event, otherwise a backend error.
    async fn insert(&self, booking: &Booking) -> Result<(), StoreError>;

    /// Delete every booking referencing `event`, returning how many were
    /// removed. The cascade half of event deletion.
    ///
    /// # Errors
    ///
    /// Backend errors only.
    async fn delete_by_event(&self, event: EventId) -> Result<u64, StoreError>;
}
