//! Health endpoint.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// `GET /api/health`
///
/// Reports overall status plus per-subsystem details. Status degrades (but
/// the endpoint still answers 200) when the database check fails, so load
/// balancers keep routing while operators see the problem.
async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let db_ok = tunetrace_db::health_check(&state.pool).await.is_ok();
    let status = if db_ok { "OK" } else { "DEGRADED" };

    let catalog = if state.config.ticketmaster_api_key.is_some() {
        "configured"
    } else {
        "mock mode"
    };

    Json(json!({
        "status": status,
        "message": "TuneTrace API is running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "database": if db_ok { "connected" } else { "unreachable" },
        "ticketmaster": catalog,
        "authentication": "enabled",
        "websocket": {
            "enabled": true,
            "connectedClients": state.ws_manager.bound_user_count().await,
        },
    }))
}
