use axum::routing::{delete, get, patch};
use axum::Router;

use crate::handlers::notification;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    // Literal segments before the `{id}` capture so `read-all` and
    // `unread-count` are never parsed as ids.
    Router::new()
        .route("/", get(notification::list))
        .route("/read-all", patch(notification::mark_all_read))
        .route("/unread-count", get(notification::unread_count))
        .route("/{id}/read", patch(notification::mark_read))
        .route("/{id}", delete(notification::delete))
}
