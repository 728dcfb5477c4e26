//! Database test helpers
//!
//! Every test gets its own in-memory SQLite database with the schema
//! applied, so suites can run in parallel without shared state.

use infra_db::{create_pool, DatabaseConfig, DatabasePool, MIGRATOR};

/// Creates a fresh in-memory database pool with all migrations applied.
///
/// # Panics
///
/// Panics if the pool cannot be created or migrations fail; both are
/// unrecoverable in a test context.
pub async fn memory_pool() -> DatabasePool {
    let pool = create_pool(&DatabaseConfig::new("sqlite::memory:"))
        .await
        .expect("failed to create in-memory pool");

    MIGRATOR.run(&pool).await.expect("failed to run migrations");

    pool
}
