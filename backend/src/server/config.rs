//! Server settings loaded via OrthoConfig and the derived server
//! configuration object.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use recipe_backend::outbound::persistence::{DbPool, PoolConfig};
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_POOL_TIMEOUT_SECS: u64 = 30;

/// Process settings, read from `RECIPES_*` environment variables, config
/// files and command-line flags.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RECIPES")]
pub struct ServerSettings {
    /// Interface to listen on.
    pub host: Option<String>,
    /// Port to listen on.
    pub port: Option<u16>,
    /// PostgreSQL connection URL. Without one the in-memory store is used.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub pool_timeout_secs: Option<u64>,
    /// Apply pending migrations at startup.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
}

impl ServerSettings {
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Configured database URL, falling back to the conventional
    /// `DATABASE_URL` variable.
    pub fn database_url(&self) -> Option<String> {
        self.database_url
            .clone()
            .or_else(|| std::env::var("DATABASE_URL").ok())
            .filter(|url| !url.trim().is_empty())
    }

    /// Pool settings for `url`.
    pub fn pool_config(&self, url: impl Into<String>) -> PoolConfig {
        PoolConfig::new(url)
            .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE))
            .with_connection_timeout(Duration::from_secs(
                self.pool_timeout_secs.unwrap_or(DEFAULT_POOL_TIMEOUT_SECS),
            ))
    }

    /// Resolve the listen address.
    ///
    /// # Errors
    /// Returns [`std::io::Error`] when the host and port do not form a socket
    /// address.
    pub fn bind_addr(&self) -> std::io::Result<SocketAddr> {
        format!("{}:{}", self.host(), self.port())
            .parse()
            .map_err(|err| std::io::Error::other(format!("invalid listen address: {err}")))
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
        }
    }

    /// Attach a database connection pool. Without one, handlers are backed
    /// by the in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 7] = [
        "RECIPES_HOST",
        "RECIPES_PORT",
        "RECIPES_DATABASE_URL",
        "RECIPES_POOL_MAX_SIZE",
        "RECIPES_POOL_TIMEOUT_SECS",
        "RECIPES_RUN_MIGRATIONS",
        "DATABASE_URL",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("recipe-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();

        assert_eq!(settings.host(), DEFAULT_HOST);
        assert_eq!(settings.port(), DEFAULT_PORT);
        assert!(settings.database_url().is_none());
        assert!(settings.run_migrations);
        assert_eq!(
            settings.pool_config("postgres://x").max_size(),
            DEFAULT_POOL_MAX_SIZE
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("RECIPES_HOST", Some("127.0.0.1".to_owned())),
            ("RECIPES_PORT", Some("9090".to_owned())),
            (
                "RECIPES_DATABASE_URL",
                Some("postgres://localhost/recipes".to_owned()),
            ),
            ("RECIPES_POOL_MAX_SIZE", Some("4".to_owned())),
            ("RECIPES_POOL_TIMEOUT_SECS", None),
            ("RECIPES_RUN_MIGRATIONS", Some("false".to_owned())),
            ("DATABASE_URL", None),
        ]);

        let settings = load_from_empty_args();

        assert_eq!(
            settings.bind_addr().expect("valid address"),
            "127.0.0.1:9090".parse::<SocketAddr>().expect("literal")
        );
        assert_eq!(
            settings.database_url().as_deref(),
            Some("postgres://localhost/recipes")
        );
        assert_eq!(settings.pool_config("postgres://x").max_size(), 4);
        assert!(!settings.run_migrations);
    }

    #[rstest]
    fn database_url_falls_back_to_conventional_variable() {
        let _guard = lock_env([
            ("RECIPES_DATABASE_URL", None::<String>),
            ("DATABASE_URL", Some("postgres://fallback/db".to_owned())),
        ]);

        let settings = load_from_empty_args();

        assert_eq!(
            settings.database_url().as_deref(),
            Some("postgres://fallback/db")
        );
    }
}
