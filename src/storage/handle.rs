//! Store handle abstraction.
//!
//! The import pipeline never reaches for a global connection. It receives a
//! value implementing [`DocumentStore`], opens one [`WriteBatch`] at a time,
//! stages documents into it and commits it.

use async_trait::async_trait;
use rand::distr::Alphanumeric;
use rand::Rng;

use crate::config::DOCUMENT_ID_LENGTH;
use crate::error_handling::StoreError;

use super::document::Document;

/// A handle to one collection of a document store.
pub trait DocumentStore {
    /// Write unit produced by [`DocumentStore::new_batch`].
    type Batch: WriteBatch;

    /// Begins an empty atomic write unit.
    fn new_batch(&self) -> Self::Batch;
}

/// An atomic unit of document writes.
#[async_trait]
pub trait WriteBatch: Send {
    /// Stages `doc` under a freshly generated identifier and returns that identifier.
    ///
    /// Staging merges into any existing document with the same identifier;
    /// since identifiers are always fresh this does not happen in practice.
    fn stage(&mut self, doc: Document) -> String;

    /// Number of documents staged so far.
    fn len(&self) -> usize;

    /// Whether nothing has been staged yet.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Persists every staged document atomically. On error nothing from this
    /// batch is persisted.
    async fn commit(self) -> Result<(), StoreError>;
}

/// Generates a random alphanumeric document identifier.
pub fn generate_document_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(DOCUMENT_ID_LENGTH)
        .map(char::from)
        .collect()
}
