//! Notification entity model.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;
use tunetrace_core::types::{DbId, Timestamp};

/// A row from the `notifications` table.
///
/// Serializes to the wire shape consumed by both the REST listing and the
/// WebSocket push: `{_id, userId, type, title, message, data, priority,
/// isRead, createdAt}`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "_id")]
    pub id: DbId,
    pub user_id: DbId,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub message: String,
    pub data: Json<serde_json::Value>,
    pub priority: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}
