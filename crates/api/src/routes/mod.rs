pub mod artist;
pub mod auth;
pub mod concert;
pub mod health;
pub mod notification;

use axum::Router;

use crate::state::AppState;

/// All REST routes, mounted under `/api` by the router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .nest("/auth", auth::routes())
        .nest("/notifications", notification::routes())
        .nest("/artists", artist::routes())
        .nest("/concerts", concert::routes())
}
