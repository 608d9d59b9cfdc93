//! In-memory fakes for the Dev Curator seams.
//!
//! Deterministic, dependency-free implementations of the core traits for
//! unit and handler tests:
//!
//! - [`InMemoryEventStore`] / [`InMemoryBookingStore`] — vectors behind a
//!   `tokio::sync::Mutex`, enforcing the same unique indexes as PostgreSQL
//! - [`InMemoryListCache`] — a hash map with hit/miss/invalidation counters
//!   and injectable read/write failures for exercising the non-fatal cache
//!   paths
//! - [`InMemoryMediaStore`] — records uploads and deletes, returns
//!   predictable URIs, and can be told to fail either direction
//!
//! Everything here runs at memory speed; the PostgreSQL and Redis
//! integration tests live with their crates and are `#[ignore]`d by default.

pub mod cache;
pub mod media;
pub mod stores;

pub use cache::InMemoryListCache;
pub use media::InMemoryMediaStore;
pub use stores::{InMemoryBookingStore, InMemoryEventStore};
