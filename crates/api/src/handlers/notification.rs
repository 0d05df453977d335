//! Notification REST handlers.
//!
//! All routes require a bearer token and operate only on the caller's own
//! notifications; a notification owned by someone else is reported as not
//! found, never as forbidden.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tunetrace_core::error::CoreError;
use tunetrace_db::repositories::NotificationRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Pagination parameters for the notification list. One-indexed.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 20;
const MAX_LIMIT: i64 = 100;

/// `GET /api/notifications?page=1&limit=20`
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<ListParams>,
) -> AppResult<Json<serde_json::Value>> {
    let page = params.page.unwrap_or(DEFAULT_PAGE).max(1);
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = (page - 1) * limit;

    let notifications =
        NotificationRepo::list_for_user(&state.pool, &auth.user_id, limit, offset).await?;
    let total = NotificationRepo::count_for_user(&state.pool, &auth.user_id).await?;
    let total_pages = (total + limit - 1) / limit;

    Ok(Json(json!({
        "notifications": notifications,
        "totalPages": total_pages,
        "currentPage": page,
        "total": total,
    })))
}

/// `PATCH /api/notifications/{id}/read`
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let notification = NotificationRepo::mark_read(&state.pool, &id, &auth.user_id)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "Notification",
            id: id.clone(),
        })?;

    Ok(Json(json!({ "notification": notification })))
}

/// `PATCH /api/notifications/read-all`
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<serde_json::Value>> {
    let updated = NotificationRepo::mark_all_read(&state.pool, &auth.user_id).await?;
    tracing::debug!(user_id = %auth.user_id, updated, "Marked all notifications read");

    Ok(Json(json!({ "message": "All notifications marked as read" })))
}

/// `GET /api/notifications/unread-count`
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<serde_json::Value>> {
    let count = NotificationRepo::unread_count(&state.pool, &auth.user_id).await?;
    Ok(Json(json!({ "count": count })))
}

/// `DELETE /api/notifications/{id}`
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let deleted = NotificationRepo::delete(&state.pool, &id, &auth.user_id).await?;
    if !deleted {
        return Err(CoreError::NotFound {
            entity: "Notification",
            id,
        }
        .into());
    }

    Ok(Json(json!({ "message": "Notification deleted successfully" })))
}
