//! Tracked artist entity model.

use serde::Serialize;
use sqlx::FromRow;
use tunetrace_core::types::{DbId, Timestamp};

/// A row from the `tracked_artists` table.
///
/// One row per `(user, artist)` pair; created and deleted only by explicit
/// user action.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedArtist {
    #[serde(rename = "_id")]
    pub id: DbId,
    pub user_id: DbId,
    pub artist_id: String,
    pub artist_name: String,
    pub artist_image: Option<String>,
    pub genre: Option<String>,
    pub tracked_at: Timestamp,
}
