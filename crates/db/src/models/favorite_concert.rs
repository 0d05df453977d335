//! Favorite concert entity model.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;
use tunetrace_core::types::{DbId, Timestamp};

/// A row from the `favorite_concerts` table.
///
/// `concert_data` is the full concert payload as captured at favorite time;
/// the server never interprets it.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteConcert {
    #[serde(rename = "_id")]
    pub id: DbId,
    pub user_id: DbId,
    pub concert_id: String,
    pub concert_data: Json<serde_json::Value>,
    pub favorited_at: Timestamp,
}
