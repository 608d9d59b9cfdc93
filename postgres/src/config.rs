//! Connection configuration for the PostgreSQL store.

use std::time::Duration;

/// Pool and connection settings.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Connection URL, e.g. `postgres://localhost/dev_curator`.
    pub url: String,
    /// Maximum number of pooled connections.
    pub max_connections: u32,
    /// Minimum number of idle connections the pool keeps warm.
    pub min_connections: u32,
    /// How long to wait for a connection before failing the acquire.
    pub connect_timeout: Duration,
    /// Connections idle longer than this are closed.
    pub idle_timeout: Duration,
}

impl PostgresConfig {
    /// Configuration for `url` with default pool settings.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 2,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
        }
    }
}
