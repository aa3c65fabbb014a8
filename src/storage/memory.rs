//! In-process document store.
//!
//! Backs `--dry-run` and the test suite. Every committed batch is recorded
//! so callers can inspect batch boundaries after an import.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::error_handling::StoreError;

use super::document::{Document, StoredDocument};
use super::handle::{generate_document_id, DocumentStore, WriteBatch};

#[derive(Debug, Default)]
struct MemoryState {
    commit_attempts: usize,
    // Only ever set by `failing_on_commit`
    fail_on_commit: Option<usize>,
    batches: Vec<Vec<StoredDocument>>,
    documents: HashMap<String, Map<String, Value>>,
}

/// Cloneable in-memory store; clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    /// An empty store that accepts every commit.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects its `attempt`-th commit (1-based) and accepts the rest.
    ///
    /// Test builds only; a dry-run store never refuses a commit.
    #[cfg(test)]
    pub(crate) fn failing_on_commit(attempt: usize) -> Self {
        let store = Self::new();
        store.lock().fail_on_commit = Some(attempt);
        store
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        // Keep serving reads after a panicking test poisoned the lock
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Sizes of the committed batches, in commit order.
    pub fn batch_sizes(&self) -> Vec<usize> {
        self.lock().batches.iter().map(Vec::len).collect()
    }

    /// Committed batches, in commit order.
    pub fn committed_batches(&self) -> Vec<Vec<StoredDocument>> {
        self.lock().batches.clone()
    }

    /// Number of commits attempted, including rejected ones.
    pub fn commit_attempts(&self) -> usize {
        self.lock().commit_attempts
    }

    /// Number of distinct documents persisted.
    pub fn document_count(&self) -> usize {
        self.lock().documents.len()
    }

    /// Persisted document `id`, if any.
    pub fn get(&self, id: &str) -> Option<Map<String, Value>> {
        self.lock().documents.get(id).cloned()
    }
}

impl DocumentStore for MemoryStore {
    type Batch = MemoryBatch;

    fn new_batch(&self) -> MemoryBatch {
        MemoryBatch {
            store: self.clone(),
            staged: Vec::new(),
        }
    }
}

/// Write batch for [`MemoryStore`].
#[derive(Debug)]
pub struct MemoryBatch {
    store: MemoryStore,
    staged: Vec<(String, Document)>,
}

#[async_trait]
impl WriteBatch for MemoryBatch {
    fn stage(&mut self, doc: Document) -> String {
        let id = generate_document_id();
        self.staged.push((id.clone(), doc));
        id
    }

    fn len(&self) -> usize {
        self.staged.len()
    }

    async fn commit(self) -> Result<(), StoreError> {
        let MemoryBatch { store, staged } = self;
        let mut state = store.lock();
        state.commit_attempts += 1;
        if state.fail_on_commit == Some(state.commit_attempts) {
            return Err(StoreError::Rejected(format!(
                "commit {} refused by memory store",
                state.commit_attempts
            )));
        }

        let write_time = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let mut committed = Vec::with_capacity(staged.len());
        for (id, doc) in staged {
            let data = doc.resolve(&write_time);
            let merged = state.documents.entry(id.clone()).or_default();
            merged.extend(data.clone());
            committed.push(StoredDocument { id, data });
        }
        state.batches.push(committed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FieldValue;

    fn titled(title: &str) -> Document {
        Document::new()
            .with("title", FieldValue::String(title.to_string()))
            .with("updatedAt", FieldValue::ServerTimestamp)
    }

    #[tokio::test]
    async fn test_commit_persists_staged_documents() {
        let store = MemoryStore::new();
        let mut batch = store.new_batch();
        let soup = batch.stage(titled("Soup"));
        let salad = batch.stage(titled("Salad"));
        assert_eq!(batch.len(), 2);
        assert_ne!(soup, salad);

        batch.commit().await.expect("commit should succeed");

        assert_eq!(store.batch_sizes(), vec![2]);
        assert_eq!(store.document_count(), 2);
        let doc = store.get(&soup).expect("soup should be stored");
        assert_eq!(doc["title"], "Soup");
        assert!(doc["updatedAt"].as_str().is_some_and(|t| t.ends_with('Z')));
    }

    #[tokio::test]
    async fn test_uncommitted_batch_persists_nothing() {
        let store = MemoryStore::new();
        let mut batch = store.new_batch();
        batch.stage(titled("Soup"));
        drop(batch);

        assert_eq!(store.document_count(), 0);
        assert_eq!(store.commit_attempts(), 0);
    }

    #[tokio::test]
    async fn test_rejected_commit_persists_nothing() {
        let store = MemoryStore::failing_on_commit(2);

        let mut first = store.new_batch();
        first.stage(titled("Soup"));
        first.commit().await.expect("first commit should succeed");

        let mut second = store.new_batch();
        second.stage(titled("Salad"));
        let err = second.commit().await.unwrap_err();
        assert!(matches!(err, StoreError::Rejected(_)));

        assert_eq!(store.commit_attempts(), 2);
        assert_eq!(store.batch_sizes(), vec![1]);
        assert_eq!(store.document_count(), 1);
    }
}
