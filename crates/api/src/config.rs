use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// SQLite database URL (default: `sqlite://tunetrace.db?mode=rwc`).
    pub database_url: String,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// A single `*` entry allows any origin (the reference deployment's
    /// behavior, suitable for a mobile client).
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Graceful shutdown timeout in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Seconds between concert-discovery poller runs (default: `300`).
    /// Production deployments should lengthen this to respect upstream
    /// rate limits.
    pub poll_interval_secs: u64,
    /// Probability per poller check that the synthetic catalog fabricates
    /// a new concert (default: `0.1`). Only meaningful without an API key.
    pub synthetic_event_probability: f64,
    /// Ticketmaster API key; when unset the synthetic catalog substitutes.
    pub ticketmaster_api_key: Option<String>,
    /// Timeout for a single upstream catalog request (default: `10`).
    pub catalog_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                         |
    /// |-------------------------------|---------------------------------|
    /// | `HOST`                        | `0.0.0.0`                       |
    /// | `PORT`                        | `3000`                          |
    /// | `DATABASE_URL`                | `sqlite://tunetrace.db?mode=rwc`|
    /// | `CORS_ORIGINS`                | `*`                             |
    /// | `REQUEST_TIMEOUT_SECS`        | `30`                            |
    /// | `SHUTDOWN_TIMEOUT_SECS`       | `30`                            |
    /// | `CONCERT_POLL_INTERVAL_SECS`  | `300`                           |
    /// | `SYNTHETIC_EVENT_PROBABILITY` | `0.1`                           |
    /// | `TICKETMASTER_API_KEY`        | unset                           |
    /// | `CATALOG_TIMEOUT_SECS`        | `10`                            |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://tunetrace.db?mode=rwc".into());

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let poll_interval_secs: u64 = std::env::var("CONCERT_POLL_INTERVAL_SECS")
            .unwrap_or_else(|_| "300".into())
            .parse()
            .expect("CONCERT_POLL_INTERVAL_SECS must be a valid u64");

        let synthetic_event_probability: f64 = std::env::var("SYNTHETIC_EVENT_PROBABILITY")
            .unwrap_or_else(|_| "0.1".into())
            .parse()
            .expect("SYNTHETIC_EVENT_PROBABILITY must be a valid f64");

        let ticketmaster_api_key = std::env::var("TICKETMASTER_API_KEY")
            .ok()
            .filter(|k| !k.is_empty());

        let catalog_timeout_secs: u64 = std::env::var("CATALOG_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("CATALOG_TIMEOUT_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            database_url,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            jwt,
            poll_interval_secs,
            synthetic_event_probability,
            ticketmaster_api_key,
            catalog_timeout_secs,
        }
    }
}
