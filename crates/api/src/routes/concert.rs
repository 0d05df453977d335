use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::concert;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(concert::search))
        .route("/favorite", post(concert::favorite))
        .route("/favorites", get(concert::favorites))
        .route("/favorite/{concert_id}", delete(concert::unfavorite))
}
