//! Dev Curator HTTP server.
//!
//! Wires the PostgreSQL document store, the Redis list cache and the image
//! host client into the lifecycle services and serves the API with graceful
//! shutdown.

use dev_curator_cache::RedisListCache;
use dev_curator_core::{BookingService, EventService};
use dev_curator_media::HttpMediaStore;
use dev_curator_postgres::PostgresStore;
use dev_curator_web::{build_router, AppState, Config};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.server.log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Dev Curator HTTP server");
    info!(
        postgres_url = %config.postgres.url,
        redis_url = %config.redis.url,
        media_base_url = %config.media.base_url,
        "Configuration loaded"
    );

    let store = Arc::new(PostgresStore::connect(&config.postgres).await?);
    info!("Document store connected");

    let cache = Arc::new(RedisListCache::connect(&config.redis.url).await?);
    info!("List cache connected");

    let media = Arc::new(HttpMediaStore::new(config.media.clone()));

    let events = Arc::new(EventService::new(
        store.clone(),
        store.clone(),
        cache,
        media,
    ));
    let bookings = Arc::new(BookingService::new(store.clone(), store.clone()));
    let app = build_router(AppState::new(events, bookings));

    let address = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(err) => {
                tracing::error!(error = %err, "failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
