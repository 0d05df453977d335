//! Artist search and tracking handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tunetrace_catalog::synthetic::MOCK_ARTISTS;
use tunetrace_db::repositories::{NewTrackedArtist, TrackedArtistRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

/// `GET /api/artists/search?query=...` (public)
///
/// Case-insensitive substring match over the artist roster, on name or
/// genre. Without a query nothing matches.
pub async fn search(Query(params): Query<SearchParams>) -> Json<serde_json::Value> {
    let needle = params.query.unwrap_or_default().to_lowercase();
    let artists: Vec<_> = if needle.is_empty() {
        Vec::new()
    } else {
        MOCK_ARTISTS
            .iter()
            .filter(|artist| {
                artist.name.to_lowercase().contains(&needle)
                    || artist.genre.to_lowercase().contains(&needle)
            })
            .collect()
    };

    Json(json!({
        "artists": artists,
        "total": artists.len(),
        "source": "Mock Data",
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRequest {
    pub artist_id: String,
    pub artist_name: String,
    pub artist_image: Option<String>,
    pub genre: Option<String>,
}

/// `POST /api/artists/track`
///
/// Idempotent: tracking an already-tracked artist returns the existing row
/// instead of failing.
pub async fn track(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<TrackRequest>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    if let Some(existing) =
        TrackedArtistRepo::find(&state.pool, &auth.user_id, &payload.artist_id).await?
    {
        return Ok((
            StatusCode::OK,
            Json(json!({
                "message": "Artist already tracked",
                "artist": existing,
            })),
        ));
    }

    let row = TrackedArtistRepo::create(
        &state.pool,
        &auth.user_id,
        NewTrackedArtist {
            artist_id: payload.artist_id,
            artist_name: payload.artist_name,
            artist_image: payload.artist_image,
            genre: payload.genre,
        },
    )
    .await?;

    tracing::info!(user_id = %auth.user_id, artist = %row.artist_name, "Artist tracked");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Artist tracked successfully",
            "artist": row,
        })),
    ))
}

/// `GET /api/artists/tracked`
pub async fn tracked(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<serde_json::Value>> {
    let artists = TrackedArtistRepo::list_for_user(&state.pool, &auth.user_id).await?;
    Ok(Json(json!({ "artists": artists })))
}

/// `DELETE /api/artists/track/{artist_id}`
///
/// Succeeds whether or not the artist was tracked.
pub async fn untrack(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(artist_id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let removed = TrackedArtistRepo::delete(&state.pool, &auth.user_id, &artist_id).await?;
    tracing::debug!(user_id = %auth.user_id, artist_id = %artist_id, removed, "Untrack request");

    Ok(Json(json!({ "message": "Artist untracked successfully" })))
}
