//! Integration tests for the concert-discovery poller.
//!
//! These drive `ConcertPoller::run_once` / `check_artist` directly against
//! test catalogs, asserting on persisted notifications, dedup behaviour,
//! and live WebSocket delivery.

mod common;

use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use async_trait::async_trait;
use axum::extract::ws::Message;
use sqlx::SqlitePool;

use tunetrace_api::background::{CheckOutcome, ConcertPoller};
use tunetrace_api::ws::WsManager;
use tunetrace_catalog::event::{
    ConcertEvent, EventArtist, EventPage, TicketInfo, Venue, VenueLocation,
};
use tunetrace_catalog::{ArtistRef, CatalogError, ConcertCatalog, SearchQuery};
use tunetrace_core::types::DbId;
use tunetrace_db::repositories::{
    NewTrackedArtist, NotificationRepo, TrackedArtistRepo, UserRepo,
};

// ---------------------------------------------------------------------------
// Test catalogs
// ---------------------------------------------------------------------------

/// Catalog returning a fixed event list for every artist.
struct StaticCatalog {
    events: Vec<ConcertEvent>,
}

#[async_trait]
impl ConcertCatalog for StaticCatalog {
    async fn events_for_artist(
        &self,
        _artist: &ArtistRef,
    ) -> Result<Vec<ConcertEvent>, CatalogError> {
        Ok(self.events.clone())
    }

    async fn search_events(&self, _query: &SearchQuery) -> Result<EventPage, CatalogError> {
        unimplemented!("poller tests never search")
    }

    fn source(&self) -> &'static str {
        "Static Test Data"
    }
}

/// Catalog that fails for one artist id and announces an event for the rest.
struct PartiallyFailingCatalog {
    failing_artist_id: String,
    event: ConcertEvent,
}

#[async_trait]
impl ConcertCatalog for PartiallyFailingCatalog {
    async fn events_for_artist(
        &self,
        artist: &ArtistRef,
    ) -> Result<Vec<ConcertEvent>, CatalogError> {
        if artist.id == self.failing_artist_id {
            Err(CatalogError::Unavailable("simulated outage".to_string()))
        } else {
            Ok(vec![self.event.clone()])
        }
    }

    async fn search_events(&self, _query: &SearchQuery) -> Result<EventPage, CatalogError> {
        unimplemented!("poller tests never search")
    }

    fn source(&self) -> &'static str {
        "Static Test Data"
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn sample_event(id: &str) -> ConcertEvent {
    ConcertEvent {
        id: id.to_string(),
        title: "New The Killers Concert!".to_string(),
        artists: vec![EventArtist {
            name: "The Killers".to_string(),
            id: "artist1".to_string(),
            image: String::new(),
        }],
        venue: Venue {
            name: "New Venue".to_string(),
            location: VenueLocation {
                address: None,
                city: "New York".to_string(),
                country: "USA".to_string(),
                coordinates: None,
            },
        },
        date_time: "2026-10-01T20:00:00+00:00".to_string(),
        ticket_info: TicketInfo {
            url: None,
            price_range: None,
            on_sale: true,
        },
        attendees: 1200,
        genre: "Rock".to_string(),
    }
}

async fn create_user(pool: &SqlitePool, email: &str) -> DbId {
    UserRepo::create(pool, email, "$argon2id$fake-hash", "Test Fan")
        .await
        .expect("user creation should succeed")
        .id
}

async fn track_artist(pool: &SqlitePool, user_id: &DbId, artist_id: &str) {
    TrackedArtistRepo::create(
        pool,
        user_id,
        NewTrackedArtist {
            artist_id: artist_id.to_string(),
            artist_name: "The Killers".to_string(),
            artist_image: None,
            genre: Some("Rock".to_string()),
        },
    )
    .await
    .expect("tracking should succeed");
}

fn poller(pool: SqlitePool, catalog: Arc<dyn ConcertCatalog>) -> (ConcertPoller, Arc<WsManager>) {
    let ws_manager = Arc::new(WsManager::new());
    let poller = ConcertPoller::new(
        pool,
        catalog,
        Arc::clone(&ws_manager),
        Duration::from_secs(10),
    );
    (poller, ws_manager)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

/// A new event for a tracked artist produces exactly one stored notification
/// with the expected shape.
#[sqlx::test(migrations = "../db/migrations")]
async fn new_event_creates_notification(pool: SqlitePool) {
    let user_id = create_user(&pool, "fan@example.com").await;
    track_artist(&pool, &user_id, "artist1").await;

    let catalog = Arc::new(StaticCatalog {
        events: vec![sample_event("evt-1")],
    });
    let (poller, _ws) = poller(pool.clone(), catalog);

    poller.run_once().await;

    let notifications = NotificationRepo::list_for_user(&pool, &user_id, 10, 0)
        .await
        .unwrap();
    assert_eq!(notifications.len(), 1);

    let notification = &notifications[0];
    assert_eq!(notification.kind, "NEW_CONCERT");
    assert_eq!(notification.title, "New Concert Alert!");
    assert_eq!(
        notification.message,
        "The Killers just announced a new concert in New York!"
    );
    assert_eq!(notification.priority, "high");
    assert!(!notification.is_read);
    assert_eq!(notification.data.0["artistId"], "artist1");
    assert_eq!(notification.data.0["concert"]["id"], "evt-1");
}

/// The same event never notifies the same user twice, across repeated cycles.
#[sqlx::test(migrations = "../db/migrations")]
async fn repeated_cycles_do_not_duplicate(pool: SqlitePool) {
    let user_id = create_user(&pool, "fan@example.com").await;
    track_artist(&pool, &user_id, "artist1").await;

    let catalog = Arc::new(StaticCatalog {
        events: vec![sample_event("evt-1")],
    });
    let (poller, _ws) = poller(pool.clone(), catalog);

    poller.run_once().await;
    poller.run_once().await;
    poller.run_once().await;

    let count = NotificationRepo::count_for_user(&pool, &user_id).await.unwrap();
    assert_eq!(count, 1, "dedup must suppress repeated announcements");
}

/// `check_artist` reports the transition from fresh to already-claimed.
#[sqlx::test(migrations = "../db/migrations")]
async fn check_artist_outcome_reflects_dedup(pool: SqlitePool) {
    let user_id = create_user(&pool, "fan@example.com").await;
    track_artist(&pool, &user_id, "artist1").await;
    let rows = TrackedArtistRepo::list_all(&pool).await.unwrap();

    let catalog = Arc::new(StaticCatalog {
        events: vec![sample_event("evt-1")],
    });
    let (poller, _ws) = poller(pool.clone(), catalog);

    assert_matches!(
        poller.check_artist(&rows[0]).await.unwrap(),
        CheckOutcome::Notified
    );
    assert_matches!(
        poller.check_artist(&rows[0]).await.unwrap(),
        CheckOutcome::NoNewEvent
    );
}

/// An event is claimed per user: two users tracking the same artist each get
/// their own notification.
#[sqlx::test(migrations = "../db/migrations")]
async fn event_fans_out_to_every_tracking_user(pool: SqlitePool) {
    let alice = create_user(&pool, "alice@example.com").await;
    let bob = create_user(&pool, "bob@example.com").await;
    track_artist(&pool, &alice, "artist1").await;
    track_artist(&pool, &bob, "artist1").await;

    let catalog = Arc::new(StaticCatalog {
        events: vec![sample_event("evt-1")],
    });
    let (poller, _ws) = poller(pool.clone(), catalog);

    poller.run_once().await;

    assert_eq!(NotificationRepo::count_for_user(&pool, &alice).await.unwrap(), 1);
    assert_eq!(NotificationRepo::count_for_user(&pool, &bob).await.unwrap(), 1);
}

/// One artist's catalog failure does not stop the rest of the cycle.
#[sqlx::test(migrations = "../db/migrations")]
async fn catalog_failure_skips_only_that_artist(pool: SqlitePool) {
    let user_id = create_user(&pool, "fan@example.com").await;
    track_artist(&pool, &user_id, "artist-broken").await;
    track_artist(&pool, &user_id, "artist1").await;

    let catalog = Arc::new(PartiallyFailingCatalog {
        failing_artist_id: "artist-broken".to_string(),
        event: sample_event("evt-1"),
    });
    let (poller, _ws) = poller(pool.clone(), catalog);

    poller.run_once().await;

    // The healthy artist still produced its notification.
    let count = NotificationRepo::count_for_user(&pool, &user_id).await.unwrap();
    assert_eq!(count, 1);
}

/// With nobody tracking anything, a cycle is a no-op.
#[sqlx::test(migrations = "../db/migrations")]
async fn empty_tracking_table_is_a_noop(pool: SqlitePool) {
    let catalog = Arc::new(StaticCatalog {
        events: vec![sample_event("evt-1")],
    });
    let (poller, _ws) = poller(pool.clone(), catalog);

    poller.run_once().await;

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM notifications")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(total, 0);
}

/// A fresh notification is pushed to the user's bound WebSocket connection.
#[sqlx::test(migrations = "../db/migrations")]
async fn notification_is_pushed_to_bound_connection(pool: SqlitePool) {
    let user_id = create_user(&pool, "live@example.com").await;
    track_artist(&pool, &user_id, "artist1").await;

    let catalog = Arc::new(StaticCatalog {
        events: vec![sample_event("evt-1")],
    });
    let (poller, ws_manager) = poller(pool.clone(), catalog);

    let mut rx = ws_manager.add("conn-1").await;
    ws_manager.bind_user("conn-1", &user_id).await;

    poller.run_once().await;

    let frame = rx.try_recv().expect("a frame should have been pushed");
    let Message::Text(text) = frame else {
        panic!("expected a text frame");
    };
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["type"], "NEW_NOTIFICATION");
    assert_eq!(json["notification"]["title"], "New Concert Alert!");
    assert_eq!(json["notification"]["data"]["concert"]["id"], "evt-1");
}

/// Without a bound connection, the notification is still persisted.
#[sqlx::test(migrations = "../db/migrations")]
async fn offline_user_still_gets_persisted_notification(pool: SqlitePool) {
    let user_id = create_user(&pool, "offline@example.com").await;
    track_artist(&pool, &user_id, "artist1").await;

    let catalog = Arc::new(StaticCatalog {
        events: vec![sample_event("evt-1")],
    });
    let (poller, _ws) = poller(pool.clone(), catalog);

    poller.run_once().await;

    let count = NotificationRepo::count_for_user(&pool, &user_id).await.unwrap();
    assert_eq!(count, 1);
}
