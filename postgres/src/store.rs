//! The store client and its trait implementations.

use crate::config::PostgresConfig;
use async_trait::async_trait;
use dev_curator_core::store::{BookingStore, EventStore, StoreError};
use dev_curator_core::types::{Booking, Event, EventId};
use sqlx::postgres::PgPoolOptions;
use sqlx::types::JsonValue;
use sqlx::PgPool;
use tracing::debug;

/// Idempotent schema, applied at connect time.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS events (
    id UUID PRIMARY KEY,
    slug TEXT NOT NULL UNIQUE,
    data JSONB NOT NULL,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);
CREATE INDEX IF NOT EXISTS events_tags_idx ON events USING GIN ((data->'tags'));
CREATE TABLE IF NOT EXISTS bookings (
    id UUID PRIMARY KEY,
    event_id UUID NOT NULL REFERENCES events (id),
    email TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL,
    UNIQUE (event_id, email)
);
CREATE INDEX IF NOT EXISTS bookings_event_idx ON bookings (event_id);
";

/// PostgreSQL-backed implementation of both store traits.
///
/// Cheap to clone-by-`Arc`; one per process.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Build the connection pool and ensure the schema exists.
    ///
    /// # Errors
    ///
    /// [`StoreError::Backend`] if the pool cannot connect or the schema DDL
    /// fails.
    pub async fn connect(config: &PostgresConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(config.idle_timeout)
            .connect(&config.url)
            .await
            .map_err(backend)?;
        let store = Self::from_pool(pool).await?;
        debug!(url = %config.url, "postgres store connected");
        Ok(store)
    }

    /// Wrap an existing pool, ensuring the schema exists.
    ///
    /// # Errors
    ///
    /// [`StoreError::Backend`] if the schema DDL fails.
    pub async fn from_pool(pool: PgPool) -> Result<Self, StoreError> {
        sqlx::raw_sql(SCHEMA)
            .execute(&pool)
            .await
            .map_err(backend)?;
        Ok(Self { pool })
    }

    /// Drain the pool. Call once at shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl EventStore for PostgresStore {
    async fn insert(&self, event: &Event) -> Result<(), StoreError> {
        let data = encode(event)?;
        sqlx::query(
            "INSERT INTO events (id, slug, data, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(event.id.as_uuid())
        .bind(&event.slug)
        .bind(&data)
        .bind(event.created_at)
        .bind(event.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                StoreError::DuplicateSlug(event.slug.clone())
            } else {
                backend(err)
            }
        })?;
        Ok(())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Event>, StoreError> {
        let row: Option<(JsonValue,)> =
            sqlx::query_as("SELECT data FROM events WHERE slug = $1")
                .bind(slug)
                .fetch_optional(&self.pool)
                .await
                .map_err(backend)?;
        row.map(|(json,)| decode(json)).transpose()
    }

    async fn find_similar(
        &self,
        exclude: EventId,
        tags: &[String],
        limit: usize,
    ) -> Result<Vec<Event>, StoreError> {
        // jsonb_exists_any is the function form of the ?| operator; the GIN
        // index on data->'tags' serves it.
        let rows: Vec<(JsonValue,)> = sqlx::query_as(
            "SELECT data FROM events
             WHERE id <> $1 AND jsonb_exists_any(data->'tags', $2)
             ORDER BY created_at ASC
             LIMIT $3",
        )
        .bind(exclude.as_uuid())
        .bind(tags.to_vec())
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;
        rows.into_iter().map(|(json,)| decode(json)).collect()
    }

    async fn list_all(&self) -> Result<Vec<Event>, StoreError> {
        let rows: Vec<(JsonValue,)> =
            sqlx::query_as("SELECT data FROM events ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await
                .map_err(backend)?;
        rows.into_iter().map(|(json,)| decode(json)).collect()
    }

    async fn delete_by_slug(&self, slug: &str) -> Result<Option<Event>, StoreError> {
        let row: Option<(JsonValue,)> =
            sqlx::query_as("DELETE FROM events WHERE slug = $1 RETURNING data")
                .bind(slug)
                .fetch_optional(&self.pool)
                .await
                .map_err(backend)?;
        row.map(|(json,)| decode(json)).transpose()
    }

    async fn healthy(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

#[async_trait]
impl BookingStore for PostgresStore {
    async fn insert(&self, booking: &Booking) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO bookings (id, event_id, email, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(booking.id.as_uuid())
        .bind(booking.event_id.as_uuid())
        .bind(&booking.email)
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                StoreError::DuplicateBooking
            } else if is_foreign_key_violation(&err) {
                StoreError::Backend("referenced event does not exist".to_owned())
            } else {
                backend(err)
            }
        })?;
        Ok(())
    }

    async fn delete_by_event(&self, event: EventId) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM bookings WHERE event_id = $1")
            .bind(event.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(result.rows_affected())
    }
}

fn encode(event: &Event) -> Result<JsonValue, StoreError> {
    serde_json::to_value(event).map_err(|err| StoreError::Serialization(err.to_string()))
}

fn decode(json: JsonValue) -> Result<Event, StoreError> {
    serde_json::from_value(json).map_err(|err| StoreError::Serialization(err.to_string()))
}

fn backend(err: sqlx::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23503"))
}
