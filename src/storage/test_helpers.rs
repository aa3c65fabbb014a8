//! Shared test helpers for storage module tests.

#[cfg(test)]
use sqlx::sqlite::SqlitePoolOptions;
#[cfg(test)]
use sqlx::SqlitePool;

#[cfg(test)]
use crate::storage::run_migrations;

/// Creates an in-memory test database pool with migrations applied.
///
/// Limited to one connection: every `sqlite::memory:` connection is a
/// separate database.
#[cfg(test)]
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database pool");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}
