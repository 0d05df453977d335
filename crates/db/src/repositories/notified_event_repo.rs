//! Repository for the `notified_events` ledger.
//!
//! Records which upstream event ids have already produced a notification
//! for a user, making the poller's notification creation idempotent per
//! `(user, event)`.

use tunetrace_core::types::DbId;

use crate::DbPool;

/// Provides claim/lookup operations on the notified-events ledger.
pub struct NotifiedEventRepo;

impl NotifiedEventRepo {
    /// Claim an event id for a user.
    ///
    /// Returns `true` if this call inserted the ledger row, i.e. the caller
    /// now owns the right to create the notification. A concurrent or
    /// earlier claim for the same `(user, event)` makes this a no-op
    /// returning `false`.
    pub async fn claim(
        pool: &DbPool,
        user_id: &DbId,
        artist_id: &str,
        event_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO notified_events (user_id, artist_id, event_id, notified_at) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(user_id)
        .bind(artist_id)
        .bind(event_id)
        .bind(chrono::Utc::now())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether an event id has already been notified for a user.
    pub async fn exists(
        pool: &DbPool,
        user_id: &DbId,
        event_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notified_events WHERE user_id = $1 AND event_id = $2",
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_one(pool)
        .await?;
        Ok(count > 0)
    }
}
