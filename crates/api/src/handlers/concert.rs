//! Concert search and favorites handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tunetrace_catalog::synthetic::SyntheticCatalog;
use tunetrace_catalog::{ConcertCatalog, SearchQuery};
use tunetrace_core::error::CoreError;
use tunetrace_db::repositories::FavoriteConcertRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ConcertSearchParams {
    pub city: Option<String>,
    pub genre: Option<String>,
    pub date: Option<String>,
    /// Zero-indexed page.
    pub page: Option<i64>,
    pub size: Option<i64>,
}

const DEFAULT_CITY: &str = "New York";
const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

/// `GET /api/concerts` (public)
///
/// Queries the configured catalog; if the upstream fails, falls back to the
/// synthetic listing so the client always gets results. The `source` field
/// tells the client which one answered.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<ConcertSearchParams>,
) -> AppResult<Json<serde_json::Value>> {
    let query = SearchQuery {
        city: params.city.unwrap_or_else(|| DEFAULT_CITY.to_string()),
        genre: params.genre,
        date: params.date,
        page: params.page.unwrap_or(0).max(0),
        size: params
            .size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE),
    };

    let (page, source) = match state.catalog.search_events(&query).await {
        Ok(page) => (page, state.catalog.source()),
        Err(e) => {
            tracing::warn!(error = %e, "Catalog search failed, serving mock listing");
            let fallback = SyntheticCatalog::new(0.0);
            let page = fallback
                .search_events(&query)
                .await
                .map_err(|e| CoreError::Internal(e.to_string()))?;
            (page, "Mock Data (fallback)")
        }
    };

    let mut body = serde_json::to_value(&page).map_err(|e| CoreError::Internal(e.to_string()))?;
    body["source"] = json!(source);

    Ok(Json(body))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRequest {
    pub concert_id: String,
    pub concert_data: serde_json::Value,
}

/// `POST /api/concerts/favorite`
///
/// Idempotent: favoriting an already-favorited concert returns the existing
/// row.
pub async fn favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<FavoriteRequest>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    if let Some(existing) =
        FavoriteConcertRepo::find(&state.pool, &auth.user_id, &payload.concert_id).await?
    {
        return Ok((
            StatusCode::OK,
            Json(json!({
                "message": "Concert already favorited",
                "favorite": existing,
            })),
        ));
    }

    let row = FavoriteConcertRepo::create(
        &state.pool,
        &auth.user_id,
        &payload.concert_id,
        payload.concert_data,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Concert favorited successfully",
            "favorite": row,
        })),
    ))
}

/// `GET /api/concerts/favorites`
pub async fn favorites(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<serde_json::Value>> {
    let rows = FavoriteConcertRepo::list_for_user(&state.pool, &auth.user_id).await?;
    Ok(Json(json!({ "favorites": rows })))
}

/// `DELETE /api/concerts/favorite/{concert_id}`
///
/// Succeeds whether or not the concert was favorited.
pub async fn unfavorite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(concert_id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let removed = FavoriteConcertRepo::delete(&state.pool, &auth.user_id, &concert_id).await?;
    tracing::debug!(user_id = %auth.user_id, concert_id = %concert_id, removed, "Unfavorite request");

    Ok(Json(json!({ "message": "Concert removed from favorites" })))
}
