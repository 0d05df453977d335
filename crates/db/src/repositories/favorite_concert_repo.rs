//! Repository for the `favorite_concerts` table.

use sqlx::types::Json;
use tunetrace_core::types::DbId;
use uuid::Uuid;

use crate::models::favorite_concert::FavoriteConcert;
use crate::DbPool;

/// Column list for `favorite_concerts` queries.
const COLUMNS: &str = "id, user_id, concert_id, concert_data, favorited_at";

/// Provides CRUD operations for favorite concerts.
pub struct FavoriteConcertRepo;

impl FavoriteConcertRepo {
    /// Favorite a concert for a user, returning the full row.
    pub async fn create(
        pool: &DbPool,
        user_id: &DbId,
        concert_id: &str,
        concert_data: serde_json::Value,
    ) -> Result<FavoriteConcert, sqlx::Error> {
        let row = FavoriteConcert {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.clone(),
            concert_id: concert_id.to_string(),
            concert_data: Json(concert_data),
            favorited_at: chrono::Utc::now(),
        };

        sqlx::query(
            "INSERT INTO favorite_concerts \
             (id, user_id, concert_id, concert_data, favorited_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&row.id)
        .bind(&row.user_id)
        .bind(&row.concert_id)
        .bind(&row.concert_data)
        .bind(row.favorited_at)
        .execute(pool)
        .await?;

        Ok(row)
    }

    /// Find a favorite by `(user, concert)` pair.
    pub async fn find(
        pool: &DbPool,
        user_id: &DbId,
        concert_id: &str,
    ) -> Result<Option<FavoriteConcert>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM favorite_concerts WHERE user_id = $1 AND concert_id = $2"
        );
        sqlx::query_as::<_, FavoriteConcert>(&query)
            .bind(user_id)
            .bind(concert_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's favorite concerts, most recently favorited first.
    pub async fn list_for_user(
        pool: &DbPool,
        user_id: &DbId,
    ) -> Result<Vec<FavoriteConcert>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM favorite_concerts \
             WHERE user_id = $1 \
             ORDER BY favorited_at DESC"
        );
        sqlx::query_as::<_, FavoriteConcert>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Remove a concert from a user's favorites.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(
        pool: &DbPool,
        user_id: &DbId,
        concert_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM favorite_concerts WHERE user_id = $1 AND concert_id = $2")
                .bind(user_id)
                .bind(concert_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
