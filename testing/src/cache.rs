//! In-memory tagged list cache with failure injection.

use async_trait::async_trait;
use dev_curator_core::cache::{CacheError, EventListCache};
use dev_curator_core::types::Event;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Mutex;

/// Tagged cache backed by a hash map.
///
/// Counts hits, misses and invalidations, and can be told to fail reads or
/// writes to exercise the services' degrade-and-continue paths.
#[derive(Default)]
pub struct InMemoryListCache {
    entries: Mutex<HashMap<String, Vec<Event>>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
    invalidations: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl InMemoryListCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `get` calls fail (or succeed again).
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent `put` and `invalidate` calls fail (or succeed again).
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// How many `get` calls found an entry.
    #[must_use]
    pub fn hit_count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// How many `get` calls found nothing.
    #[must_use]
    pub fn miss_count(&self) -> usize {
        self.misses.load(Ordering::SeqCst)
    }

    /// How many successful `invalidate` calls were made.
    #[must_use]
    pub fn invalidation_count(&self) -> usize {
        self.invalidations.load(Ordering::SeqCst)
    }

    /// Whether an entry currently exists under `tag`.
    pub async fn contains(&self, tag: &str) -> bool {
        self.entries.lock().await.contains_key(tag)
    }
}

#[async_trait]
impl EventListCache for InMemoryListCache {
    async fn get(&self, tag: &str) -> Result<Option<Vec<Event>>, CacheError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(CacheError::Backend("injected read failure".to_owned()));
        }
        let entries = self.entries.lock().await;
        match entries.get(tag) {
            Some(events) => {
                self.hits.fetch_add(1, Ordering::SeqCst);
                Ok(Some(events.clone()))
            }
            None => {
                self.misses.fetch_add(1, Ordering::SeqCst);
                Ok(None)
            }
        }
    }

    async fn put(&self, tag: &str, events: &[Event]) -> Result<(), CacheError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CacheError::Backend("injected write failure".to_owned()));
        }
        self.entries
            .lock()
            .await
            .insert(tag.to_owned(), events.to_vec());
        Ok(())
    }

    async fn invalidate(&self, tag: &str) -> Result<(), CacheError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CacheError::Backend("injected write failure".to_owned()));
        }
        self.entries.lock().await.remove(tag);
        self.invalidations.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn healthy(&self) -> bool {
        !self.fail_reads.load(Ordering::SeqCst)
    }
}
