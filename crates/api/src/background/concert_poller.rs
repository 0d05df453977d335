//! Background job that discovers new concerts for tracked artists and turns
//! them into notifications.
//!
//! On each cycle the poller walks every (user, artist) tracking row, asks the
//! catalog for new events, and for each event claims a per-user dedup ledger
//! entry before creating the notification. A claimed event is never notified
//! twice for the same user, even across restarts. Freshly created
//! notifications are pushed over the user's live WebSocket connection when
//! one is bound; delivery is best-effort and never blocks persistence.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio_util::sync::CancellationToken;
use tunetrace_catalog::{ArtistRef, ConcertCatalog, ConcertEvent};
use tunetrace_core::notification::{KIND_NEW_CONCERT, PRIORITY_HIGH};
use tunetrace_db::models::TrackedArtist;
use tunetrace_db::repositories::{NotificationRepo, NotifiedEventRepo, TrackedArtistRepo};
use tunetrace_db::DbPool;

use crate::ws::{ServerMessage, WsManager};

/// Outcome of checking a single tracked artist for one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The catalog reported nothing new (or everything was already claimed).
    NoNewEvent,
    /// At least one notification was created for this tracking row.
    Notified,
    /// The check failed (catalog error or timeout) and was skipped.
    CheckFailed,
}

/// Periodic concert-discovery poller.
pub struct ConcertPoller {
    pool: DbPool,
    catalog: Arc<dyn ConcertCatalog>,
    ws_manager: Arc<WsManager>,
    /// Upper bound for a single artist check against the catalog.
    check_timeout: Duration,
}

impl ConcertPoller {
    pub fn new(
        pool: DbPool,
        catalog: Arc<dyn ConcertCatalog>,
        ws_manager: Arc<WsManager>,
        check_timeout: Duration,
    ) -> Self {
        Self {
            pool,
            catalog,
            ws_manager,
            check_timeout,
        }
    }

    /// Run the poller until the cancellation token fires.
    ///
    /// The first cycle runs one full period after startup, not immediately.
    pub async fn run(self, period: Duration, shutdown: CancellationToken) {
        tracing::info!(
            period_secs = period.as_secs(),
            source = self.catalog.source(),
            "Concert poller started"
        );

        let mut interval = tokio::time::interval(period);
        interval.tick().await; // consume the immediate first tick

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.run_once().await;
                }
                _ = shutdown.cancelled() => {
                    tracing::info!("Concert poller shutting down");
                    break;
                }
            }
        }
    }

    /// Run a single discovery cycle over every tracking row.
    ///
    /// Never returns an error: per-row failures are logged and skipped so
    /// one broken artist cannot stall the rest of the cycle.
    pub async fn run_once(&self) {
        let rows = match TrackedArtistRepo::list_all(&self.pool).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load tracked artists, skipping cycle");
                return;
            }
        };

        if rows.is_empty() {
            tracing::debug!("No tracked artists, nothing to poll");
            return;
        }

        let mut notified = 0usize;
        let mut failed = 0usize;

        for row in &rows {
            let outcome =
                match tokio::time::timeout(self.check_timeout, self.check_artist(row)).await {
                    Ok(Ok(outcome)) => outcome,
                    Ok(Err(e)) => {
                        tracing::warn!(
                            artist = %row.artist_name,
                            user_id = %row.user_id,
                            error = %e,
                            "Artist check failed"
                        );
                        CheckOutcome::CheckFailed
                    }
                    Err(_) => {
                        tracing::warn!(
                            artist = %row.artist_name,
                            user_id = %row.user_id,
                            timeout_secs = self.check_timeout.as_secs(),
                            "Artist check timed out"
                        );
                        CheckOutcome::CheckFailed
                    }
                };

            match outcome {
                CheckOutcome::Notified => notified += 1,
                CheckOutcome::CheckFailed => failed += 1,
                CheckOutcome::NoNewEvent => {}
            }
        }

        tracing::info!(
            checked = rows.len(),
            notified,
            failed,
            "Concert discovery cycle complete"
        );
    }

    /// Check one tracking row: fetch events, claim, persist, push.
    pub async fn check_artist(&self, row: &TrackedArtist) -> anyhow::Result<CheckOutcome> {
        let artist = ArtistRef {
            id: row.artist_id.clone(),
            name: row.artist_name.clone(),
            image: row.artist_image.clone(),
            genre: row.genre.clone(),
        };

        let events = self.catalog.events_for_artist(&artist).await?;
        if events.is_empty() {
            return Ok(CheckOutcome::NoNewEvent);
        }

        let mut any_notified = false;
        for event in &events {
            // Claim the dedup ledger entry before creating the notification.
            // If a crash lands between the two, the event is lost rather
            // than ever delivered twice.
            let claimed =
                NotifiedEventRepo::claim(&self.pool, &row.user_id, &row.artist_id, &event.id)
                    .await?;
            if !claimed {
                continue;
            }

            let notification = self.notify(row, event).await?;
            any_notified = true;

            // Best-effort live push; offline users catch up over REST.
            let frame = ServerMessage::NewNotification { notification };
            let delivered = self
                .ws_manager
                .send_to_user(&row.user_id, frame.to_message())
                .await;
            tracing::debug!(
                user_id = %row.user_id,
                event_id = %event.id,
                delivered,
                "New concert notification created"
            );
        }

        Ok(if any_notified {
            CheckOutcome::Notified
        } else {
            CheckOutcome::NoNewEvent
        })
    }

    /// Persist a new-concert notification for a claimed event.
    async fn notify(
        &self,
        row: &TrackedArtist,
        event: &ConcertEvent,
    ) -> anyhow::Result<tunetrace_db::models::Notification> {
        let city = event.venue.location.city.clone();

        let data = json!({
            "artistId": row.artist_id,
            "artistName": row.artist_name,
            "concert": event,
        });

        let notification = NotificationRepo::create(
            &self.pool,
            &row.user_id,
            KIND_NEW_CONCERT,
            "New Concert Alert!",
            &format!("{} just announced a new concert in {}!", row.artist_name, city),
            data,
            PRIORITY_HIGH,
        )
        .await?;

        Ok(notification)
    }
}
