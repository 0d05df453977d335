use std::sync::Arc;

use tunetrace_catalog::ConcertCatalog;

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: tunetrace_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Live-delivery registry (authenticated WebSocket connections).
    pub ws_manager: Arc<WsManager>,
    /// Upstream concert catalog (real or synthetic, selected at startup).
    pub catalog: Arc<dyn ConcertCatalog>,
}
