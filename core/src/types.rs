//! Domain types for the events directory.
//!
//! [`Event`] and [`Booking`] are the two persisted documents. Both serialize
//! with serde straight into the store's JSONB column and back — the typed
//! projection at the store boundary.

use crate::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(Uuid);

impl EventId {
    /// Creates a new random `EventId`.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an `EventId` from a `Uuid`.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a [`Booking`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(Uuid);

impl BookingId {
    /// Creates a new random `BookingId`.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a `BookingId` from a `Uuid`.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for BookingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How an event is attended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventMode {
    /// Attendees join remotely.
    Online,
    /// Attendees show up at the venue.
    Offline,
    /// Both.
    Hybrid,
}

impl fmt::Display for EventMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Online => "online",
            Self::Offline => "offline",
            Self::Hybrid => "hybrid",
        };
        f.write_str(name)
    }
}

impl FromStr for EventMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "online" => Ok(Self::Online),
            "offline" => Ok(Self::Offline),
            "hybrid" => Ok(Self::Hybrid),
            _ => Err(DomainError::validation(
                "mode",
                "must be online, offline, or hybrid",
            )),
        }
    }
}

/// A published event in the directory.
///
/// `slug`, `date` and `time` are always in normalized form here: the
/// lifecycle operations run [`crate::normalize`] before an `Event` is ever
/// constructed, so a value of this type is safe to persist as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Record id.
    pub id: EventId,
    /// Display title.
    pub title: String,
    /// URL-safe identifier derived from the title; unique across the store.
    pub slug: String,
    /// Full description shown on the detail page.
    pub description: String,
    /// Short overview shown in list cards.
    pub overview: String,
    /// URI of the hosted image.
    pub image: String,
    /// Venue name.
    pub venue: String,
    /// City / region, or "Online".
    pub location: String,
    /// Normalized `YYYY-MM-DD`.
    pub date: String,
    /// Normalized 24-hour `HH:MM`.
    pub time: String,
    /// Attendance mode.
    pub mode: EventMode,
    /// Intended audience.
    pub audience: String,
    /// Organizing person or company.
    pub organizer: String,
    /// At least one topic tag; drives the similar-events query.
    pub tags: Vec<String>,
    /// At least one agenda item, in running order.
    pub agenda: Vec<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-write timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A seat booking for an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Record id.
    pub id: BookingId,
    /// The owning event; must exist at write time.
    pub event_id: EventId,
    /// Normalized (trimmed, lowercased) attendee email. At most one booking
    /// per `(event_id, email)` pair.
    pub email: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-write timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A candidate event as submitted through the creation form, before
/// validation and normalization.
///
/// Field strings arrive raw; tags and agenda are already decoded from their
/// JSON-encoded form fields by the HTTP layer.
#[derive(Debug, Clone)]
pub struct EventDraft {
    /// Raw title; the slug is derived from it.
    pub title: String,
    /// Raw description.
    pub description: String,
    /// Raw overview.
    pub overview: String,
    /// Raw venue.
    pub venue: String,
    /// Raw location.
    pub location: String,
    /// Raw date string in any accepted format.
    pub date: String,
    /// Raw time string in either accepted format.
    pub time: String,
    /// Attendance mode, already parsed.
    pub mode: EventMode,
    /// Raw audience.
    pub audience: String,
    /// Raw organizer.
    pub organizer: String,
    /// Topic tags; must be non-empty.
    pub tags: Vec<String>,
    /// Agenda items; must be non-empty.
    pub agenda: Vec<String>,
}
