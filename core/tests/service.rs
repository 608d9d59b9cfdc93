//! Lifecycle operation tests over the in-memory fakes.
//!
//! Everything here runs at memory speed; the PostgreSQL-backed equivalents
//! live in `dev-curator-postgres/tests` behind `#[ignore]`.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use chrono::{Duration, Utc};
use dev_curator_core::{
    BookingService, DomainError, Event, EventDraft, EventId, EventMode, EventService,
    ImageUpload, ServiceError, DEFAULT_SIMILAR_LIMIT,
};
use dev_curator_testing::{
    InMemoryBookingStore, InMemoryEventStore, InMemoryListCache, InMemoryMediaStore,
};
use std::sync::Arc;

struct Harness {
    events: Arc<InMemoryEventStore>,
    bookings: Arc<InMemoryBookingStore>,
    cache: Arc<InMemoryListCache>,
    media: Arc<InMemoryMediaStore>,
    service: EventService,
    booking: BookingService,
}

fn harness() -> Harness {
    let events = Arc::new(InMemoryEventStore::new());
    let bookings = Arc::new(InMemoryBookingStore::new());
    let cache = Arc::new(InMemoryListCache::new());
    let media = Arc::new(InMemoryMediaStore::new());
    let service = EventService::new(
        events.clone(),
        bookings.clone(),
        cache.clone(),
        media.clone(),
    );
    let booking = BookingService::new(events.clone(), bookings.clone());
    Harness {
        events,
        bookings,
        cache,
        media,
        service,
        booking,
    }
}

fn draft(title: &str, tags: &[&str]) -> EventDraft {
    EventDraft {
        title: title.to_owned(),
        description: "A conference for working developers.".to_owned(),
        overview: "Two days of talks.".to_owned(),
        venue: "Moscone Center".to_owned(),
        location: "San Francisco, CA".to_owned(),
        date: "October 25, 2026".to_owned(),
        time: "9:05 PM".to_owned(),
        mode: EventMode::Hybrid,
        audience: "Developers".to_owned(),
        organizer: "Dev Curator".to_owned(),
        tags: tags.iter().map(|t| (*t).to_owned()).collect(),
        agenda: vec!["Keynote".to_owned()],
    }
}

fn image() -> ImageUpload {
    ImageUpload {
        bytes: vec![0x89, 0x50, 0x4E, 0x47],
        filename: "banner.png".to_owned(),
        content_type: "image/png".to_owned(),
    }
}

/// A fully-formed event for direct seeding, with a controlled creation time.
fn stored_event(title: &str, slug: &str, tags: &[&str], age_days: i64) -> Event {
    let at = Utc::now() - Duration::days(age_days);
    Event {
        id: EventId::new(),
        title: title.to_owned(),
        slug: slug.to_owned(),
        description: "desc".to_owned(),
        overview: "overview".to_owned(),
        image: format!("https://media.invalid/dev-curator/{slug}.png"),
        venue: "venue".to_owned(),
        location: "Online".to_owned(),
        date: "2026-06-12".to_owned(),
        time: "10:00".to_owned(),
        mode: EventMode::Online,
        audience: "everyone".to_owned(),
        organizer: "org".to_owned(),
        tags: tags.iter().map(|t| (*t).to_owned()).collect(),
        agenda: vec!["talks".to_owned()],
        created_at: at,
        updated_at: at,
    }
}

#[tokio::test]
async fn create_normalizes_and_persists() {
    let h = harness();
    let created = h
        .service
        .create(draft("  Next.js Conf 2026!  ", &["nextjs", "react"]), image())
        .await
        .unwrap();

    assert_eq!(created.slug, "nextjs-conf-2026");
    assert_eq!(created.title, "Next.js Conf 2026!");
    assert_eq!(created.date, "2026-10-25");
    assert_eq!(created.time, "21:05");
    assert!(created.image.starts_with("https://media.invalid/"));
    assert_eq!(h.events.len().await, 1);
    assert_eq!(h.cache.invalidation_count(), 1);
    assert_eq!(h.media.uploaded().await.len(), 1);
}

#[tokio::test]
async fn create_rejects_title_collision() {
    let h = harness();
    h.service
        .create(draft("React Summit", &["react"]), image())
        .await
        .unwrap();
    let err = h
        .service
        .create(draft("React   Summit!", &["react"]), image())
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::DuplicateSlug { ref slug } if slug == "react-summit"));
    assert_eq!(h.events.len().await, 1);
}

#[tokio::test]
async fn create_upload_failure_persists_nothing() {
    let h = harness();
    h.media.fail_uploads(true);
    let err = h
        .service
        .create(draft("AWS re:Invent", &["aws"]), image())
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Upload(_)));
    assert!(h.events.is_empty().await);
    assert_eq!(h.cache.invalidation_count(), 0);
}

#[tokio::test]
async fn create_rejects_bad_normalization_input() {
    let h = harness();

    let mut bad_time = draft("Web Summit", &["web"]);
    bad_time.time = "9:5".to_owned();
    assert!(matches!(
        h.service.create(bad_time, image()).await.unwrap_err(),
        ServiceError::Domain(DomainError::InvalidTime { .. })
    ));

    let mut bad_date = draft("Web Summit", &["web"]);
    bad_date.date = "someday".to_owned();
    assert!(matches!(
        h.service.create(bad_date, image()).await.unwrap_err(),
        ServiceError::Domain(DomainError::InvalidDate { .. })
    ));

    let mut no_tags = draft("Web Summit", &["web"]);
    no_tags.tags.clear();
    assert!(matches!(
        h.service.create(no_tags, image()).await.unwrap_err(),
        ServiceError::Domain(DomainError::Validation { field: "tags", .. })
    ));

    let symbols_only = draft("!!!", &["web"]);
    assert!(matches!(
        h.service.create(symbols_only, image()).await.unwrap_err(),
        ServiceError::Domain(DomainError::Validation { field: "title", .. })
    ));

    assert!(h.events.is_empty().await);
    assert!(h.media.uploaded().await.is_empty());
}

#[tokio::test]
async fn get_by_slug_distinguishes_absence() {
    let h = harness();
    h.events
        .seed(stored_event("React Summit", "react-summit", &["react"], 1))
        .await
        .unwrap();

    assert_eq!(
        h.service.get_by_slug("react-summit").await.unwrap().slug,
        "react-summit"
    );
    assert!(matches!(
        h.service.get_by_slug("nope").await.unwrap_err(),
        ServiceError::NotFound { .. }
    ));
}

#[tokio::test]
async fn similar_excludes_source_caps_and_orders_oldest_first() {
    let h = harness();
    h.events
        .seed(stored_event("Source", "source", &["rust", "web"], 0))
        .await
        .unwrap();
    // Six tag-sharing candidates, oldest (age 9) to newest (age 4).
    for (i, age) in (4..10).enumerate() {
        h.events
            .seed(stored_event("Match", &format!("match-{i}"), &["rust"], age))
            .await
            .unwrap();
    }
    // And one that shares no tag.
    h.events
        .seed(stored_event("Other", "other", &["cooking"], 2))
        .await
        .unwrap();

    let similar = h
        .service
        .get_similar_by_slug("source", DEFAULT_SIMILAR_LIMIT)
        .await
        .unwrap();

    assert_eq!(similar.len(), DEFAULT_SIMILAR_LIMIT);
    assert!(similar.iter().all(|e| e.slug != "source"));
    assert!(similar.iter().all(|e| e.tags.contains(&"rust".to_owned())));
    // Oldest first: age 9 down to age 6.
    let slugs: Vec<&str> = similar.iter().map(|e| e.slug.as_str()).collect();
    assert_eq!(slugs, ["match-5", "match-4", "match-3", "match-2"]);

    assert!(matches!(
        h.service.get_similar_by_slug("nope", 4).await.unwrap_err(),
        ServiceError::NotFound { .. }
    ));
}

#[tokio::test]
async fn list_serves_from_cache_until_invalidated() {
    let h = harness();
    h.events
        .seed(stored_event("A", "a", &["x"], 3))
        .await
        .unwrap();
    h.events
        .seed(stored_event("B", "b", &["x"], 2))
        .await
        .unwrap();

    // Miss populates the cache, newest first.
    let first = h.service.list_all_cached().await.unwrap();
    assert_eq!(h.cache.miss_count(), 1);
    let slugs: Vec<&str> = first.iter().map(|e| e.slug.as_str()).collect();
    assert_eq!(slugs, ["b", "a"]);

    // A direct store write without invalidation stays invisible: the next
    // read is a pure cache hit.
    h.events
        .seed(stored_event("C", "c", &["x"], 1))
        .await
        .unwrap();
    let second = h.service.list_all_cached().await.unwrap();
    assert_eq!(h.cache.hit_count(), 1);
    assert_eq!(second.len(), 2);

    // A mutation through the service invalidates; the next read is fresh.
    h.service.delete_by_slug("a").await.unwrap();
    let third = h.service.list_all_cached().await.unwrap();
    let slugs: Vec<&str> = third.iter().map(|e| e.slug.as_str()).collect();
    assert_eq!(slugs, ["c", "b"]);
}

#[tokio::test]
async fn list_degrades_when_cache_misbehaves() {
    let h = harness();
    h.events
        .seed(stored_event("A", "a", &["x"], 1))
        .await
        .unwrap();

    h.cache.fail_reads(true);
    let listed = h.service.list_all_cached().await.unwrap();
    assert_eq!(listed.len(), 1);

    // Invalidation failure must not abort the mutation either.
    h.cache.fail_writes(true);
    h.service
        .create(draft("Google I/O 2026", &["android"]), image())
        .await
        .unwrap();
    assert_eq!(h.events.len().await, 2);
}

#[tokio::test]
async fn delete_cascades_bookings_and_hosted_image() {
    let h = harness();
    let created = h
        .service
        .create(draft("JSWorld Conference", &["javascript"]), image())
        .await
        .unwrap();
    h.booking
        .book("jsworld-conference", "a@example.com")
        .await
        .unwrap();
    h.booking
        .book("jsworld-conference", "b@example.com")
        .await
        .unwrap();

    let deleted = h.service.delete_by_slug("jsworld-conference").await.unwrap();

    assert_eq!(deleted.id, created.id);
    assert!(h.events.is_empty().await);
    assert_eq!(h.bookings.count_for(created.id).await, 0);
    assert_eq!(h.media.deleted().await, vec![created.image.clone()]);
    assert!(matches!(
        h.service.get_by_slug("jsworld-conference").await.unwrap_err(),
        ServiceError::NotFound { .. }
    ));
}

#[tokio::test]
async fn delete_of_missing_slug_mutates_nothing() {
    let h = harness();
    let seeded = stored_event("Keep", "keep", &["x"], 1);
    h.events.seed(seeded).await.unwrap();
    h.booking.book("keep", "a@example.com").await.unwrap();

    let err = h.service.delete_by_slug("nope").await.unwrap_err();

    assert!(matches!(err, ServiceError::NotFound { .. }));
    assert_eq!(h.events.len().await, 1);
    assert_eq!(h.bookings.len().await, 1);
    assert_eq!(h.cache.invalidation_count(), 0);
    assert!(h.media.deleted().await.is_empty());
}

#[tokio::test]
async fn delete_survives_image_host_failure() {
    let h = harness();
    h.service
        .create(draft("Web Summit 2026", &["web"]), image())
        .await
        .unwrap();
    h.media.fail_deletes(true);

    let deleted = h.service.delete_by_slug("web-summit-2026").await.unwrap();

    assert_eq!(deleted.slug, "web-summit-2026");
    assert!(h.events.is_empty().await);
}

#[tokio::test]
async fn booking_normalizes_email_and_rejects_duplicates() {
    let h = harness();
    h.events
        .seed(stored_event("React Summit", "react-summit", &["react"], 1))
        .await
        .unwrap();

    let booking = h
        .booking
        .book("react-summit", "  Alice@Example.COM ")
        .await
        .unwrap();
    assert_eq!(booking.email, "alice@example.com");

    assert!(matches!(
        h.booking
            .book("react-summit", "alice@example.com")
            .await
            .unwrap_err(),
        ServiceError::DuplicateBooking
    ));
    assert_eq!(h.bookings.len().await, 1);

    assert!(matches!(
        h.booking.book("react-summit", "not-an-email").await.unwrap_err(),
        ServiceError::Domain(DomainError::InvalidEmail { .. })
    ));
    assert!(matches!(
        h.booking.book("nope", "a@example.com").await.unwrap_err(),
        ServiceError::NotFound { .. }
    ));
}
