//! Database connection pool management
//!
//! Connection pool configuration and creation for SQLite using SQLx.
//! In-memory databases (used by the test suite) are kept on a single
//! long-lived connection so the schema survives between acquisitions.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::error::DatabaseError;

/// Type alias for the SQLite connection pool
pub type DatabasePool = SqlitePool;

/// Configuration options for the database connection pool
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use infra_db::DatabaseConfig;
///
/// let config = DatabaseConfig::new("sqlite://recipes.db")
///     .max_connections(5)
///     .connect_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// SQLite connection string (e.g. "sqlite://recipes.db" or "sqlite::memory:")
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Connection timeout duration
    pub connect_timeout: Duration,
}

impl DatabaseConfig {
    /// Creates a new database configuration with the given connection URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 5,
            connect_timeout: Duration::from_secs(30),
        }
    }

    /// Sets the maximum number of connections in the pool
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the connection timeout duration
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:")
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::new("sqlite://recipes.db")
    }
}

/// Creates a connection pool from the given configuration.
///
/// The database file is created if it does not exist, and foreign key
/// enforcement is switched on for every connection.
pub async fn create_pool(config: &DatabaseConfig) -> Result<DatabasePool, DatabaseError> {
    let options = SqliteConnectOptions::from_str(&config.url)
        .map_err(DatabaseError::Sqlx)?
        .create_if_missing(true)
        .foreign_keys(true);

    let mut pool_options = SqlitePoolOptions::new().acquire_timeout(config.connect_timeout);

    if config.is_in_memory() {
        // A pooled in-memory database lives and dies with its connection
        pool_options = pool_options
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    } else {
        pool_options = pool_options.max_connections(config.max_connections);
    }

    let pool = pool_options.connect_with(options).await?;

    info!(url = %config.url, "Database connection established");
    Ok(pool)
}
