//! Repository for the `notifications` table.
//!
//! Every mutating query scopes on `user_id` in its `WHERE` clause, so a
//! notification owned by another user is indistinguishable from one that
//! does not exist.

use sqlx::types::Json;
use tunetrace_core::types::DbId;
use uuid::Uuid;

use crate::models::notification::Notification;
use crate::DbPool;

/// Column list for `notifications` queries.
const COLUMNS: &str = "id, user_id, kind, title, message, data, priority, is_read, created_at";

/// Provides CRUD operations for notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Create an unread notification for a user, returning the full row.
    pub async fn create(
        pool: &DbPool,
        user_id: &DbId,
        kind: &str,
        title: &str,
        message: &str,
        data: serde_json::Value,
        priority: &str,
    ) -> Result<Notification, sqlx::Error> {
        let notification = Notification {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.clone(),
            kind: kind.to_string(),
            title: title.to_string(),
            message: message.to_string(),
            data: Json(data),
            priority: priority.to_string(),
            is_read: false,
            created_at: chrono::Utc::now(),
        };

        sqlx::query(
            "INSERT INTO notifications \
             (id, user_id, kind, title, message, data, priority, is_read, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(&notification.id)
        .bind(&notification.user_id)
        .bind(&notification.kind)
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(&notification.data)
        .bind(&notification.priority)
        .bind(notification.is_read)
        .bind(notification.created_at)
        .execute(pool)
        .await?;

        Ok(notification)
    }

    /// List a user's notifications, newest first.
    pub async fn list_for_user(
        pool: &DbPool,
        user_id: &DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notifications \
             WHERE user_id = $1 \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total number of notifications for a user (read or not).
    pub async fn count_for_user(pool: &DbPool, user_id: &DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Mark a single notification as read and return the updated row.
    ///
    /// Returns `None` if the notification does not exist or belongs to a
    /// different user. Marking an already-read notification succeeds and
    /// returns the row unchanged.
    pub async fn mark_read(
        pool: &DbPool,
        notification_id: &DbId,
        user_id: &DbId,
    ) -> Result<Option<Notification>, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE WHERE id = $1 AND user_id = $2",
        )
        .bind(notification_id)
        .bind(user_id)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        let query = format!("SELECT {COLUMNS} FROM notifications WHERE id = $1");
        sqlx::query_as::<_, Notification>(&query)
            .bind(notification_id)
            .fetch_optional(pool)
            .await
    }

    /// Mark all unread notifications as read for a user.
    ///
    /// Returns the number of notifications flipped; calling again
    /// immediately affects zero rows.
    pub async fn mark_all_read(pool: &DbPool, user_id: &DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE WHERE user_id = $1 AND is_read = FALSE",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Number of unread notifications for a user.
    pub async fn unread_count(pool: &DbPool, user_id: &DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND is_read = FALSE",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Delete a notification.
    ///
    /// Returns `true` if a row owned by `user_id` was deleted.
    pub async fn delete(
        pool: &DbPool,
        notification_id: &DbId,
        user_id: &DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1 AND user_id = $2")
            .bind(notification_id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
