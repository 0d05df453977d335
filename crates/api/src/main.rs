use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tunetrace_catalog::{ConcertCatalog, SyntheticCatalog, TicketmasterCatalog};

use tunetrace_api::background::ConcertPoller;
use tunetrace_api::config::ServerConfig;
use tunetrace_api::router::build_app_router;
use tunetrace_api::state::AppState;
use tunetrace_api::ws;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tunetrace_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let pool = tunetrace_db::create_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    tunetrace_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    tunetrace_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    // --- Concert catalog ---
    let catalog: Arc<dyn ConcertCatalog> = match &config.ticketmaster_api_key {
        Some(api_key) => {
            let catalog = TicketmasterCatalog::new(
                api_key.clone(),
                Duration::from_secs(config.catalog_timeout_secs),
            )
            .expect("Failed to build Ticketmaster client");
            Arc::new(catalog)
        }
        None => {
            tracing::warn!("TICKETMASTER_API_KEY not set, using mock concert data");
            Arc::new(SyntheticCatalog::new(config.synthetic_event_probability))
        }
    };
    tracing::info!(source = catalog.source(), "Concert catalog ready");

    // --- WebSocket manager ---
    let ws_manager = Arc::new(ws::WsManager::new());

    // --- Heartbeat ---
    let heartbeat_handle = ws::heartbeat::start_heartbeat(Arc::clone(&ws_manager));

    // --- Concert poller ---
    let poller_cancel = tokio_util::sync::CancellationToken::new();
    let poller = ConcertPoller::new(
        pool.clone(),
        Arc::clone(&catalog),
        Arc::clone(&ws_manager),
        Duration::from_secs(config.catalog_timeout_secs),
    );
    let poll_period = Duration::from_secs(config.poll_interval_secs);
    let poller_cancel_clone = poller_cancel.clone();
    let poller_handle = tokio::spawn(async move {
        poller.run(poll_period, poller_cancel_clone).await;
    });

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        ws_manager: Arc::clone(&ws_manager),
        catalog,
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    poller_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), poller_handle).await;
    tracing::info!("Concert poller stopped");

    let ws_count = ws_manager.connection_count().await;
    tracing::info!(ws_count, "Closing remaining WebSocket connections");
    ws_manager.shutdown_all().await;

    heartbeat_handle.abort();
    tracing::info!("Heartbeat task stopped");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
