//! Event lifecycle operations.
//!
//! Services coordinate the seams — validate and normalize a candidate
//! record, talk to the document store, keep the tagged list cache honest,
//! and call out to the image host:
//!
//! 1. Validate / normalize (pure, in this crate)
//! 2. Upload or delete hosted media where the operation calls for it
//! 3. Persist through the injected store
//! 4. Invalidate the cached list on mutation (non-fatal)
//!
//! Each operation is a single request/response exchange with the store; there
//! is no state machine and no in-process locking. The store's unique indexes
//! carry the concurrency story.

use crate::cache::{EventListCache, EVENTS_CACHE_TAG};
use crate::error::DomainError;
use crate::media::{ImageUpload, MediaError, MediaStore};
use crate::normalize;
use crate::store::{BookingStore, EventStore, StoreError};
use crate::types::{Booking, BookingId, Event, EventDraft, EventId};
use crate::validate;
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// How many similar events a detail page shows by default.
pub const DEFAULT_SIMILAR_LIMIT: usize = 4;

/// Errors surfaced by the lifecycle operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Validation or normalization failed; user-displayable.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// No event with the requested slug.
    #[error("event '{slug}' not found")]
    NotFound {
        /// The slug that matched nothing.
        slug: String,
    },

    /// Another event already owns this slug. Two titles normalized to the
    /// same slug; the write is rejected rather than suffixed.
    #[error("an event with slug '{slug}' already exists")]
    DuplicateSlug {
        /// The contested slug.
        slug: String,
    },

    /// This email already booked this event.
    #[error("this email has already booked this event")]
    DuplicateBooking,

    /// The image host refused or failed the upload; nothing was persisted.
    #[error("image upload failed")]
    Upload(#[source] MediaError),

    /// The store failed underneath an operation.
    #[error("persistence failed")]
    Store(#[source] StoreError),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateSlug(slug) => Self::DuplicateSlug { slug },
            StoreError::DuplicateBooking => Self::DuplicateBooking,
            other => Self::Store(other),
        }
    }
}

/// Create, read, list and delete events.
///
/// Holds its collaborators as injected trait objects; construct one per
/// process and share it via `Arc`.
pub struct EventService {
    events: Arc<dyn EventStore>,
    bookings: Arc<dyn BookingStore>,
    cache: Arc<dyn EventListCache>,
    media: Arc<dyn MediaStore>,
}

impl EventService {
    /// Create a new event service from its collaborators.
    #[must_use]
    pub fn new(
        events: Arc<dyn EventStore>,
        bookings: Arc<dyn BookingStore>,
        cache: Arc<dyn EventListCache>,
        media: Arc<dyn MediaStore>,
    ) -> Self {
        Self {
            events,
            bookings,
            cache,
            media,
        }
    }

    /// Fetch exactly one event by slug.
    ///
    /// # Errors
    ///
    /// [`ServiceError::NotFound`] if absent; store errors otherwise.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Event, ServiceError> {
        self.require_event(slug).await
    }

    /// Events similar to the one behind `slug`: sharing at least one tag,
    /// excluding the source itself, oldest first, capped at `limit`.
    ///
    /// # Errors
    ///
    /// [`ServiceError::NotFound`] if the source event is absent; store
    /// errors otherwise.
    pub async fn get_similar_by_slug(
        &self,
        slug: &str,
        limit: usize,
    ) -> Result<Vec<Event>, ServiceError> {
        let source = self.require_event(slug).await?;
        let similar = self
            .events
            .find_similar(source.id, &source.tags, limit)
            .await?;
        Ok(similar)
    }

    /// The full event list, newest first, served through the tagged cache.
    ///
    /// On a hit the store is not queried at all. On a miss (or a cache read
    /// failure, which degrades to a miss) the store is queried and the cache
    /// repopulated under [`EVENTS_CACHE_TAG`].
    ///
    /// # Errors
    ///
    /// Store errors only; cache failures are logged and absorbed.
    pub async fn list_all_cached(&self) -> Result<Vec<Event>, ServiceError> {
        match self.cache.get(EVENTS_CACHE_TAG).await {
            Ok(Some(events)) => {
                metrics::counter!("events.list.cache_hit").increment(1);
                return Ok(events);
            }
            Ok(None) => metrics::counter!("events.list.cache_miss").increment(1),
            Err(err) => {
                warn!(error = %err, "event list cache read failed, querying store");
            }
        }

        let events = self.events.list_all().await?;
        if let Err(err) = self.cache.put(EVENTS_CACHE_TAG, &events).await {
            warn!(error = %err, "failed to populate event list cache");
        }
        Ok(events)
    }

    /// Create an event from a form draft and its image upload.
    ///
    /// Validates the draft and image, normalizes date and time, derives the
    /// slug from the title, uploads the image (nothing is persisted if that
    /// fails), inserts the record, and invalidates the cached list.
    ///
    /// # Errors
    ///
    /// [`DomainError`] variants for validation/normalization failures,
    /// [`ServiceError::Upload`] if the image host fails,
    /// [`ServiceError::DuplicateSlug`] if the title collides, store errors
    /// otherwise.
    pub async fn create(
        &self,
        draft: EventDraft,
        image: ImageUpload,
    ) -> Result<Event, ServiceError> {
        validate::event_draft(&draft)?;
        validate::image(&image)?;

        let slug = normalize::slugify(&draft.title);
        if slug.is_empty() {
            return Err(DomainError::validation(
                "title",
                "must contain at least one letter or digit",
            )
            .into());
        }
        let date = normalize::normalize_date(&draft.date)?;
        let time = normalize::normalize_time(&draft.time)?;

        let image_uri = self.media.upload(image).await.map_err(ServiceError::Upload)?;

        let now = Utc::now();
        let event = Event {
            id: EventId::new(),
            title: draft.title.trim().to_owned(),
            slug,
            description: draft.description.trim().to_owned(),
            overview: draft.overview.trim().to_owned(),
            image: image_uri,
            venue: draft.venue.trim().to_owned(),
            location: draft.location.trim().to_owned(),
            date,
            time,
            mode: draft.mode,
            audience: draft.audience.trim().to_owned(),
            organizer: draft.organizer.trim().to_owned(),
            tags: draft.tags,
            agenda: draft.agenda,
            created_at: now,
            updated_at: now,
        };

        self.events.insert(&event).await?;
        self.invalidate_list().await;
        metrics::counter!("events.created").increment(1);
        debug!(slug = %event.slug, "event created");
        Ok(event)
    }

    /// Delete an event by slug, cascading to its bookings, and return the
    /// deleted record.
    ///
    /// Order of operations: resolve the event, delete its bookings, delete
    /// the hosted image (best-effort, logged on failure), delete the event
    /// record, invalidate the cached list. Not transactional: a crash after
    /// the bookings pass but before the event delete leaves an event with no
    /// bookings until the delete is retried — the bookings pass runs first
    /// on every attempt, so no booking can outlive its event across retries.
    ///
    /// # Errors
    ///
    /// [`ServiceError::NotFound`] if the slug matches nothing (no mutation
    /// is performed); store errors otherwise.
    pub async fn delete_by_slug(&self, slug: &str) -> Result<Event, ServiceError> {
        let event = self.require_event(slug).await?;

        let removed = self.bookings.delete_by_event(event.id).await?;
        if removed > 0 {
            debug!(slug = %event.slug, bookings = removed, "cascade deleted bookings");
        }

        if let Err(err) = self.media.delete(&event.image).await {
            warn!(slug = %event.slug, error = %err, "failed to delete hosted image");
        }

        let deleted = self
            .events
            .delete_by_slug(slug)
            .await?
            .ok_or_else(|| ServiceError::NotFound {
                slug: slug.to_owned(),
            })?;

        self.invalidate_list().await;
        metrics::counter!("events.deleted").increment(1);
        Ok(deleted)
    }

    /// Whether the event store answers queries. Used by readiness probes.
    pub async fn store_healthy(&self) -> bool {
        self.events.healthy().await
    }

    /// Whether the list cache answers commands. Used by readiness probes.
    pub async fn cache_healthy(&self) -> bool {
        self.cache.healthy().await
    }

    async fn require_event(&self, slug: &str) -> Result<Event, ServiceError> {
        self.events
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| ServiceError::NotFound {
                slug: slug.to_owned(),
            })
    }

    async fn invalidate_list(&self) {
        if let Err(err) = self.cache.invalidate(EVENTS_CACHE_TAG).await {
            warn!(error = %err, "failed to invalidate cached event list");
        }
    }
}

/// Book seats at events.
pub struct BookingService {
    events: Arc<dyn EventStore>,
    bookings: Arc<dyn BookingStore>,
}

impl BookingService {
    /// Create a new booking service from its collaborators.
    #[must_use]
    pub fn new(events: Arc<dyn EventStore>, bookings: Arc<dyn BookingStore>) -> Self {
        Self { events, bookings }
    }

    /// Book a seat at the event behind `slug` for `email`.
    ///
    /// The email is trimmed, lowercased and validated; the event is resolved
    /// first so the booking always references an existing record at write
    /// time.
    ///
    /// # Errors
    ///
    /// [`DomainError::InvalidEmail`] for a malformed address,
    /// [`ServiceError::NotFound`] for an unknown slug,
    /// [`ServiceError::DuplicateBooking`] if this email already booked this
    /// event, store errors otherwise.
    pub async fn book(&self, slug: &str, email: &str) -> Result<Booking, ServiceError> {
        let email = normalize::normalize_email(email)?;
        let event = self
            .events
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| ServiceError::NotFound {
                slug: slug.to_owned(),
            })?;

        let now = Utc::now();
        let booking = Booking {
            id: BookingId::new(),
            event_id: event.id,
            email,
            created_at: now,
            updated_at: now,
        };
        self.bookings.insert(&booking).await?;
        metrics::counter!("bookings.created").increment(1);
        Ok(booking)
    }
}
