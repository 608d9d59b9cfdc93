//! PostgreSQL document store for Dev Curator.
//!
//! Events and bookings live in two tables. Events are stored as full JSONB
//! documents — the typed [`Event`](dev_curator_core::Event) serializes
//! straight into the `data` column and back — with dedicated `slug`,
//! `created_at` and `updated_at` columns carrying the unique index and the
//! orderings. Bookings are small enough to be plain rows. Uniqueness
//! (event slug, booking `(event_id, email)`) is enforced here, by indexes,
//! not by application locks.
//!
//! The store is an explicitly constructed client with an explicit lifecycle:
//! [`PostgresStore::connect`] builds the pool and ensures the schema,
//! `healthy` pings, [`PostgresStore::close`] drains the pool. It is owned by
//! the process and injected into the services; there is no ambient global
//! connection state.
//!
//! # Example
//!
//! ```ignore
//! use dev_curator_postgres::{PostgresConfig, PostgresStore};
//!
//! let config = PostgresConfig::new("postgres://localhost/dev_curator");
//! let store = PostgresStore::connect(&config).await?;
//! ```

pub mod config;
pub mod store;

pub use config::PostgresConfig;
pub use store::PostgresStore;
