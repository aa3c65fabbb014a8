//! Import pipeline.
//!
//! Raw records are loaded from the input file, normalized, filtered on
//! validity, and handed to the batch committer which drives every
//! interaction with the store handle.

mod commit;
mod input;


use crate::error_handling::ImportError;
use crate::normalize::{normalize, RawRecord};
use crate::storage::DocumentStore;

pub use commit::{commit_all, ImportResult};
pub use input::load_raw_records;

/// Outcome of [`import_records`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportOutcome {
    /// What the batch committer persisted.
    pub result: ImportResult,
    /// Records dropped because their title was blank after normalization.
    pub skipped: usize,
}

/// Normalizes `raw`, drops invalid records, and commits the rest in
/// batches of `capacity`.
pub async fn import_records<S: DocumentStore>(
    raw: &[RawRecord],
    store: &S,
    capacity: usize,
) -> Result<ImportOutcome, ImportError> {
    let valid: Vec<_> = raw
        .iter()
        .map(normalize)
        .filter(|record| record.is_valid())
        .collect();
    let skipped = raw.len() - valid.len();

    let result = commit_all(valid, store, capacity).await?;
    Ok(ImportOutcome { result, skipped })
}
