//! In-memory event and booking stores.

use async_trait::async_trait;
use dev_curator_core::store::{BookingStore, EventStore, StoreError};
use dev_curator_core::types::{Booking, Event, EventId};
use tokio::sync::Mutex;

/// Event store backed by a vector, enforcing slug uniqueness like the
/// production unique index.
#[derive(Default)]
pub struct InMemoryEventStore {
    events: Mutex<Vec<Event>>,
}

impl InMemoryEventStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an event directly, bypassing the service layer but not the
    /// unique index. Useful for arranging similar-events fixtures with
    /// controlled creation times.
    ///
    /// # Errors
    ///
    /// [`StoreError::DuplicateSlug`] if the slug is already taken.
    pub async fn seed(&self, event: Event) -> Result<(), StoreError> {
        self.insert(&event).await
    }

    /// How many events are stored.
    pub async fn len(&self) -> usize {
        self.events.lock().await.len()
    }

    /// Whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.events.lock().await.is_empty()
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn insert(&self, event: &Event) -> Result<(), StoreError> {
        let mut events = self.events.lock().await;
        if events.iter().any(|e| e.slug == event.slug) {
            return Err(StoreError::DuplicateSlug(event.slug.clone()));
        }
        events.push(event.clone());
        Ok(())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Event>, StoreError> {
        let events = self.events.lock().await;
        Ok(events.iter().find(|e| e.slug == slug).cloned())
    }

    async fn find_similar(
        &self,
        exclude: EventId,
        tags: &[String],
        limit: usize,
    ) -> Result<Vec<Event>, StoreError> {
        let events = self.events.lock().await;
        let mut similar: Vec<Event> = events
            .iter()
            .filter(|e| e.id != exclude && e.tags.iter().any(|t| tags.contains(t)))
            .cloned()
            .collect();
        similar.sort_by_key(|e| e.created_at);
        similar.truncate(limit);
        Ok(similar)
    }

    async fn list_all(&self) -> Result<Vec<Event>, StoreError> {
        let events = self.events.lock().await;
        let mut all: Vec<Event> = events.clone();
        all.sort_by_key(|e| std::cmp::Reverse(e.created_at));
        Ok(all)
    }

    async fn delete_by_slug(&self, slug: &str) -> Result<Option<Event>, StoreError> {
        let mut events = self.events.lock().await;
        let position = events.iter().position(|e| e.slug == slug);
        Ok(position.map(|i| events.remove(i)))
    }

    async fn healthy(&self) -> bool {
        true
    }
}

/// Booking store backed by a vector, enforcing `(event_id, email)`
/// uniqueness like the production unique index.
#[derive(Default)]
pub struct InMemoryBookingStore {
    bookings: Mutex<Vec<Booking>>,
}

impl InMemoryBookingStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// How many bookings are stored, across all events.
    pub async fn len(&self) -> usize {
        self.bookings.lock().await.len()
    }

    /// Whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.bookings.lock().await.is_empty()
    }

    /// How many bookings reference `event`.
    pub async fn count_for(&self, event: EventId) -> usize {
        self.bookings
            .lock()
            .await
            .iter()
            .filter(|b| b.event_id == event)
            .count()
    }
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn insert(&self, booking: &Booking) -> Result<(), StoreError> {
        let mut bookings = self.bookings.lock().await;
        if bookings
            .iter()
            .any(|b| b.event_id == booking.event_id && b.email == booking.email)
        {
            return Err(StoreError::DuplicateBooking);
        }
        bookings.push(booking.clone());
        Ok(())
    }

    async fn delete_by_event(&self, event: EventId) -> Result<u64, StoreError> {
        let mut bookings = self.bookings.lock().await;
        let before = bookings.len();
        bookings.retain(|b| b.event_id != event);
        Ok((before - bookings.len()) as u64)
    }
}
