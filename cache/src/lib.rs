//! Redis-backed tagged list cache for Dev Curator.
//!
//! The full event list is cached as one JSON blob under `cache:{tag}`;
//! invalidating a tag deletes its key. Entries have no TTL — expiry is
//! driven entirely by the mutation operations invalidating the tag, and a
//! read racing a concurrent invalidation may serve a stale list until the
//! next write-triggered invalidation.
//!
//! Connections go through [`redis::aio::ConnectionManager`], which
//! multiplexes and reconnects on its own; the manager is constructed once at
//! startup and injected, never read from ambient global state.
//!
//! # Example
//!
//! ```no_run
//! use dev_curator_cache::RedisListCache;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let cache = RedisListCache::connect("redis://127.0.0.1:6379").await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use dev_curator_core::cache::{CacheError, EventListCache};
use dev_curator_core::types::Event;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

/// Redis implementation of [`EventListCache`].
#[derive(Clone)]
pub struct RedisListCache {
    /// Connection manager; clones share the underlying multiplexed
    /// connection.
    conn: ConnectionManager,
}

impl RedisListCache {
    /// Connect to Redis at `redis_url`.
    ///
    /// # Errors
    ///
    /// [`CacheError::Backend`] if the client cannot be created or the
    /// connection manager cannot be established.
    pub async fn connect(redis_url: &str) -> Result<Self, CacheError> {
        let client = Client::open(redis_url)
            .map_err(|err| CacheError::Backend(format!("failed to create redis client: {err}")))?;
        let conn = ConnectionManager::new(client).await.map_err(|err| {
            CacheError::Backend(format!("failed to create redis connection manager: {err}"))
        })?;
        tracing::debug!(url = %redis_url, "redis list cache connected");
        Ok(Self { conn })
    }

    /// The Redis key for a cache tag.
    fn cache_key(tag: &str) -> String {
        format!("cache:{tag}")
    }
}

#[async_trait]
impl EventListCache for RedisListCache {
    async fn get(&self, tag: &str) -> Result<Option<Vec<Event>>, CacheError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn
            .get(Self::cache_key(tag))
            .await
            .map_err(|err| CacheError::Backend(err.to_string()))?;
        match raw {
            Some(json) => {
                let events = serde_json::from_str(&json)
                    .map_err(|err| CacheError::Serialization(err.to_string()))?;
                Ok(Some(events))
            }
            None => Ok(None),
        }
    }

    async fn put(&self, tag: &str, events: &[Event]) -> Result<(), CacheError> {
        let json = serde_json::to_string(events)
            .map_err(|err| CacheError::Serialization(err.to_string()))?;
        let mut conn = self.conn.clone();
        let _: () = conn
            .set(Self::cache_key(tag), json)
            .await
            .map_err(|err| CacheError::Backend(err.to_string()))?;
        Ok(())
    }

    async fn invalidate(&self, tag: &str) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        let _: () = conn
            .del(Self::cache_key(tag))
            .await
            .map_err(|err| CacheError::Backend(err.to_string()))?;
        Ok(())
    }

    async fn healthy(&self) -> bool {
        let mut conn = self.conn.clone();
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_keys_are_prefixed() {
        assert_eq!(RedisListCache::cache_key("events"), "cache:events");
    }
}
