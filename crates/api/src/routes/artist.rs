use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::artist;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/search", get(artist::search))
        .route("/track", post(artist::track))
        .route("/tracked", get(artist::tracked))
        .route("/track/{artist_id}", delete(artist::untrack))
}
