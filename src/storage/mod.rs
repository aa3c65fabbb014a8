//! Document store handles and their backing implementations.
//!
//! - [`SqliteStore`]: the persistent store, one SQLite file per database
//! - [`MemoryStore`]: in-process store for dry runs and tests

pub mod document;
pub mod handle;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod sqlite;
#[cfg(test)]
pub mod test_helpers;

// Re-export commonly used items
pub use document::{Document, FieldValue, StoredDocument};
pub use handle::{generate_document_id, DocumentStore, WriteBatch};
pub use memory::{MemoryBatch, MemoryStore};
pub use migrations::run_migrations;
pub use pool::init_db_pool_with_path;
pub use sqlite::{SqliteBatch, SqliteStore};

use std::path::Path;

/// Opens (creating if needed) the SQLite document store at `db_path` and
/// returns a handle scoped to `project_id`/`collection`.
pub async fn open_sqlite_store(
    db_path: &Path,
    project_id: &str,
    collection: &str,
) -> Result<SqliteStore, crate::error_handling::StoreError> {
    let pool = init_db_pool_with_path(db_path).await?;
    run_migrations(&pool).await?;
    Ok(SqliteStore::new(pool, project_id, collection))
}
