//! Axum HTTP surface for the Dev Curator events directory.
//!
//! A thin shell over the core lifecycle services:
//!
//! 1. **Extract** — path slug, query, JSON body, or the multipart creation
//!    form
//! 2. **Call** the injected service ([`AppState`])
//! 3. **Map** the result: domain responses to JSON bodies,
//!    [`ServiceError`](dev_curator_core::ServiceError) to [`AppError`]
//!
//! # Routes
//!
//! | method | path | |
//! |---|---|---|
//! | GET | `/health` | liveness |
//! | GET | `/ready` | readiness (store + cache pings) |
//! | GET | `/api/events` | cached full list |
//! | POST | `/api/events` | multipart creation form |
//! | GET | `/api/events/:slug` | one event |
//! | DELETE | `/api/events/:slug` | cascading delete |
//! | GET | `/api/events/:slug/similar` | tag-overlap recommendations |
//! | POST | `/api/events/:slug/bookings` | book a seat |

pub mod config;
pub mod error;
pub mod form;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::Config;
pub use error::AppError;
pub use routes::build_router;
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
