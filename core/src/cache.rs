//! Tagged read-through cache for the full event list.
//!
//! One fixed tag, [`EVENTS_CACHE_TAG`], labels the cached list; mutations
//! invalidate by tag. Cache failures are never fatal — the service degrades
//! to a store query on read failures and logs-and-swallows invalidation
//! failures. Reads are not mutually exclusive with concurrent invalidation;
//! a stale list may survive until the next write-triggered invalidation.

use crate::types::Event;
use async_trait::async_trait;
use thiserror::Error;

/// Tag under which the full event list is cached.
pub const EVENTS_CACHE_TAG: &str = "events";

/// Errors surfaced by a cache backend. All of them are non-fatal to the
/// operation that encounters them.
#[derive(Debug, Error)]
pub enum CacheError {
    /// A cached value could not be (de)serialized.
    #[error("cache serialization failed: {0}")]
    Serialization(String),

    /// The backend itself failed.
    #[error("cache backend error: {0}")]
    Backend(String),
}

/// A tagged cache holding event lists.
#[async_trait]
pub trait EventListCache: Send + Sync {
    /// Fetch the list cached under `tag`, if any.
    ///
    /// # Errors
    ///
    /// Backend or serialization failure; callers fall back to the store.
    async fn get(&self, tag: &str) -> Result<Option<Vec<Event>>, CacheError>;

    /// Store `events` under `tag`, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// Backend or serialization failure; callers log and continue.
    async fn put(&self, tag: &str, events: &[Event]) -> Result<(), CacheError>;

    /// Expire everything cached under `tag`.
    ///
    /// # Errors
    ///
    /// Backend failure; callers log and continue — the entry will be
    /// overwritten by the next read-through population at the latest.
    async fn invalidate(&self, tag: &str) -> Result<(), CacheError>;

    /// Whether the backend currently answers commands.
    async fn healthy(&self) -> bool;
}
