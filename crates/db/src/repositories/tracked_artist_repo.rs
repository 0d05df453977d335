//! Repository for the `tracked_artists` table.

use tunetrace_core::types::DbId;
use uuid::Uuid;

use crate::models::tracked_artist::TrackedArtist;
use crate::DbPool;

/// Column list for `tracked_artists` queries.
const COLUMNS: &str = "id, user_id, artist_id, artist_name, artist_image, genre, tracked_at";

/// Fields supplied by the client when tracking an artist.
#[derive(Debug, Clone)]
pub struct NewTrackedArtist {
    pub artist_id: String,
    pub artist_name: String,
    pub artist_image: Option<String>,
    pub genre: Option<String>,
}

/// Provides CRUD operations for tracked artists.
pub struct TrackedArtistRepo;

impl TrackedArtistRepo {
    /// Track an artist for a user, returning the full row.
    pub async fn create(
        pool: &DbPool,
        user_id: &DbId,
        new: NewTrackedArtist,
    ) -> Result<TrackedArtist, sqlx::Error> {
        let row = TrackedArtist {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.clone(),
            artist_id: new.artist_id,
            artist_name: new.artist_name,
            artist_image: new.artist_image,
            genre: new.genre,
            tracked_at: chrono::Utc::now(),
        };

        sqlx::query(
            "INSERT INTO tracked_artists \
             (id, user_id, artist_id, artist_name, artist_image, genre, tracked_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(&row.id)
        .bind(&row.user_id)
        .bind(&row.artist_id)
        .bind(&row.artist_name)
        .bind(&row.artist_image)
        .bind(&row.genre)
        .bind(row.tracked_at)
        .execute(pool)
        .await?;

        Ok(row)
    }

    /// Find a tracked artist by `(user, artist)` pair.
    pub async fn find(
        pool: &DbPool,
        user_id: &DbId,
        artist_id: &str,
    ) -> Result<Option<TrackedArtist>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM tracked_artists WHERE user_id = $1 AND artist_id = $2");
        sqlx::query_as::<_, TrackedArtist>(&query)
            .bind(user_id)
            .bind(artist_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's tracked artists, most recently tracked first.
    pub async fn list_for_user(
        pool: &DbPool,
        user_id: &DbId,
    ) -> Result<Vec<TrackedArtist>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tracked_artists \
             WHERE user_id = $1 \
             ORDER BY tracked_at DESC"
        );
        sqlx::query_as::<_, TrackedArtist>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List every tracked artist across all users.
    ///
    /// This is the poller's fan-out input: one row per `(user, artist)`
    /// pair, so an artist tracked by many users produces one check each.
    pub async fn list_all(pool: &DbPool) -> Result<Vec<TrackedArtist>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tracked_artists");
        sqlx::query_as::<_, TrackedArtist>(&query)
            .fetch_all(pool)
            .await
    }

    /// Untrack an artist.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(
        pool: &DbPool,
        user_id: &DbId,
        artist_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM tracked_artists WHERE user_id = $1 AND artist_id = $2")
                .bind(user_id)
                .bind(artist_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
