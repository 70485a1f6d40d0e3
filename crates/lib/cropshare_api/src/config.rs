//! API server configuration.

use cropshare_core::auth::jwt::resolve_secret;

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3000").
    pub bind_addr: String,
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Token signing secret, read once at startup and immutable for the
    /// process lifetime.
    pub jwt_secret: String,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable              | Default                               |
    /// |-----------------------|---------------------------------------|
    /// | `BIND_ADDR`           | `127.0.0.1:3000`                      |
    /// | `DATABASE_URL`        | `postgres://localhost:5432/cropshare` |
    /// | `ACCESS_TOKEN_SECRET` | generated & persisted to file         |
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".into()),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost:5432/cropshare".into()),
            jwt_secret: resolve_secret(),
        }
    }
}
