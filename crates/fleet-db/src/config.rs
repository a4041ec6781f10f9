//! # Database Configuration
//!
//! Pool and request settings, built in code or loaded from environment
//! variables with fallback to defaults.
//!
//! ## Environment
//! | Variable                        | Default          |
//! |---------------------------------|------------------|
//! | `FLEET_DATABASE_PATH`           | `./fleet.db`     |
//! | `FLEET_DB_MAX_CONNECTIONS`      | `5`              |
//! | `FLEET_DB_MIN_CONNECTIONS`      | `1`              |
//! | `FLEET_DB_CONNECT_TIMEOUT_SECS` | `30`             |
//! | `FLEET_REQUEST_TIMEOUT_MS`      | `5000`           |

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Default database file used when nothing else is configured.
pub const DEFAULT_DATABASE_PATH: &str = "./fleet.db";

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/path/to/fleet.db")
///     .max_connections(5)
///     .min_connections(1);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection acquire timeout.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,

    /// Whether to run migrations on connect.
    /// Default: true
    pub run_migrations: bool,

    /// Deadline applied by `Database::request_context`.
    /// Default: 5 seconds
    pub request_timeout: Duration,
}

impl DbConfig {
    /// Creates a new database configuration with the given path.
    ///
    /// ## Arguments
    /// * `path` - Path to the SQLite database file. Will be created if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
            request_timeout: Duration::from_secs(5),
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Sets the per-request deadline.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let config = DbConfig::in_memory();
    /// let db = Database::new(config).await?;
    /// // Database is isolated, perfect for tests
    /// ```
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1, // In-memory requires single connection
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            run_migrations: true,
            request_timeout: Duration::from_secs(5),
        }
    }

    /// Loads configuration from `FLEET_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    ///
    /// Missing keys fall back to defaults; present but unparsable values fail.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = lookup("FLEET_DATABASE_PATH").unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string());
        let defaults = DbConfig::new(path);

        let config = DbConfig {
            max_connections: parse_or(&lookup, "FLEET_DB_MAX_CONNECTIONS", defaults.max_connections)?,
            min_connections: parse_or(&lookup, "FLEET_DB_MIN_CONNECTIONS", defaults.min_connections)?,
            connect_timeout: Duration::from_secs(parse_or(
                &lookup,
                "FLEET_DB_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout.as_secs(),
            )?),
            request_timeout: Duration::from_millis(parse_or(
                &lookup,
                "FLEET_REQUEST_TIMEOUT_MS",
                defaults.request_timeout.as_millis() as u64,
            )?),
            ..defaults
        };

        if config.max_connections == 0 {
            return Err(ConfigError::InvalidValue("FLEET_DB_MAX_CONNECTIONS".to_string()));
        }
        if config.min_connections > config.max_connections {
            return Err(ConfigError::InvalidValue("FLEET_DB_MIN_CONNECTIONS".to_string()));
        }

        Ok(config)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

// =============================================================================
// Unit Tests
// =============================================================================
