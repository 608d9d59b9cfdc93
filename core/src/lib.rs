//! Core domain logic for the Dev Curator events directory.
//!
//! This crate holds everything that is *about events and bookings* and nothing
//! that is about a particular backend:
//!
//! - **Types**: [`Event`], [`Booking`], their id newtypes and the
//!   [`EventDraft`] submitted through the creation form.
//! - **Normalizer**: pure functions deriving the slug and canonicalizing
//!   date, time and email strings ([`normalize`]).
//! - **Validation**: required-field and image checks applied to a draft
//!   before persistence ([`validate`]).
//! - **Seams**: object-safe async traits for the document store
//!   ([`store`]), the tagged list cache ([`cache`]) and the external image
//!   host ([`media`]).
//! - **Services**: the event lifecycle operations ([`service`]) that
//!   coordinate the seams — create, read-by-slug, similar-by-tags, cached
//!   list, cascading delete, and booking.
//!
//! # Implementations
//!
//! - `dev-curator-postgres`: production store (PostgreSQL, JSONB documents)
//! - `dev-curator-cache`: production cache (Redis)
//! - `dev-curator-media`: production image-host client (HTTP)
//! - `dev-curator-testing`: in-memory fakes for all three seams
//!
//! Normalization runs where the service calls it, never as a side effect of
//! assigning a field: the operations are plain `async fn`s that validate,
//! normalize, and then talk to the store.

pub mod cache;
pub mod error;
pub mod media;
pub mod normalize;
pub mod service;
pub mod store;
pub mod types;
pub mod validate;

pub use cache::{EventListCache, EVENTS_CACHE_TAG};
pub use error::DomainError;
pub use media::{ImageUpload, MediaStore};
pub use service::{BookingService, EventService, ServiceError, DEFAULT_SIMILAR_LIMIT};
pub use store::{BookingStore, EventStore, StoreError};
pub use types::{Booking, BookingId, Event, EventDraft, EventId, EventMode};
