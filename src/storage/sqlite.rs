//! SQLite-backed document store.
//!
//! Documents live in the `documents` table as JSON text, keyed by
//! (project, collection, id). One [`SqliteBatch`] commit is one transaction.

use async_trait::async_trait;
use log::debug;
use serde_json::{Map, Value};
use sqlx::{Row, SqlitePool};

use crate::error_handling::StoreError;

use super::document::{Document, StoredDocument};
use super::handle::{generate_document_id, DocumentStore, WriteBatch};

/// Clock reading taken inside the commit transaction; stands in for the
/// server-side write time.
const WRITE_TIME_QUERY: &str = "SELECT strftime('%Y-%m-%dT%H:%M:%fZ', 'now')";

const UPSERT_DOCUMENT: &str = "INSERT INTO documents (project_id, collection, id, data, committed_at)
     VALUES (?, ?, ?, ?, ?)
     ON CONFLICT(project_id, collection, id) DO UPDATE SET
         data = json_patch(documents.data, excluded.data),
         committed_at = excluded.committed_at";

/// Handle to one collection of the SQLite document store.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
    project_id: String,
    collection: String,
}

impl SqliteStore {
    /// Wraps an already-migrated pool.
    pub fn new(pool: SqlitePool, project_id: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            pool,
            project_id: project_id.into(),
            collection: collection.into(),
        }
    }

    /// Number of documents in this collection.
    pub async fn count(&self) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM documents WHERE project_id = ? AND collection = ?",
        )
        .bind(&self.project_id)
        .bind(&self.collection)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// All documents in this collection, in insertion order.
    pub async fn documents(&self) -> Result<Vec<StoredDocument>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, data FROM documents
             WHERE project_id = ? AND collection = ?
             ORDER BY rowid",
        )
        .bind(&self.project_id)
        .bind(&self.collection)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| -> Result<StoredDocument, StoreError> {
                let data: String = row.get("data");
                Ok(StoredDocument {
                    id: row.get("id"),
                    data: serde_json::from_str::<Map<String, Value>>(&data)?,
                })
            })
            .collect()
    }
}

impl DocumentStore for SqliteStore {
    type Batch = SqliteBatch;

    fn new_batch(&self) -> SqliteBatch {
        SqliteBatch {
            store: self.clone(),
            staged: Vec::new(),
        }
    }
}

/// Write batch for [`SqliteStore`].
#[derive(Debug)]
pub struct SqliteBatch {
    store: SqliteStore,
    staged: Vec<(String, Document)>,
}

#[async_trait]
impl WriteBatch for SqliteBatch {
    fn stage(&mut self, doc: Document) -> String {
        let id = generate_document_id();
        self.staged.push((id.clone(), doc));
        id
    }

    fn len(&self) -> usize {
        self.staged.len()
    }

    async fn commit(self) -> Result<(), StoreError> {
        let SqliteBatch { store, staged } = self;

        // Dropping the transaction on any error below rolls it back
        let mut tx = store.pool.begin().await?;
        let write_time: String = sqlx::query_scalar(WRITE_TIME_QUERY)
            .fetch_one(&mut *tx)
            .await?;

        for (id, doc) in &staged {
            let data = serde_json::to_string(&doc.resolve(&write_time))?;
            sqlx::query(UPSERT_DOCUMENT)
                .bind(&store.project_id)
                .bind(&store.collection)
                .bind(id)
                .bind(data)
                .bind(&write_time)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        debug!(
            "Committed {} documents to {}/{} at {}",
            staged.len(),
            store.project_id,
            store.collection,
            write_time
        );
        Ok(())
    }
}
