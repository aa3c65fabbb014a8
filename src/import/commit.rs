//! Batched commit of normalized records.

use log::debug;

use crate::error_handling::ImportError;
use crate::normalize::NormalizedRecord;
use crate::storage::{DocumentStore, WriteBatch};

/// Aggregate result of committing a record stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportResult {
    /// Records persisted.
    pub count: usize,
    /// Batches committed.
    pub batches_committed: usize,
}

/// Stages `records` into batches of `capacity` and commits them in order.
///
/// A batch is committed whenever the running record total reaches a
/// multiple of `capacity`; whatever remains staged after the last record is
/// committed once more. Batches are strictly sequential: the next batch is
/// only filled after the previous commit has resolved.
///
/// # Errors
///
/// - [`ImportError::InvalidCapacity`] if `capacity` is zero
/// - [`ImportError::Commit`] on the first failed commit; batches committed
///   before it stay persisted and nothing after it is attempted
pub async fn commit_all<S, I>(
    records: I,
    store: &S,
    capacity: usize,
) -> Result<ImportResult, ImportError>
where
    S: DocumentStore,
    I: IntoIterator<Item = NormalizedRecord>,
{
    if capacity == 0 {
        return Err(ImportError::InvalidCapacity(capacity));
    }

    let mut result = ImportResult::default();
    let mut batch = store.new_batch();

    for record in records {
        batch.stage(record.into_document());
        result.count += 1;

        // Checkpoint on the running total, not on the batch's own size
        if result.count % capacity == 0 {
            let full = std::mem::replace(&mut batch, store.new_batch());
            commit_batch(full, &mut result).await?;
        }
    }

    if result.count % capacity != 0 {
        commit_batch(batch, &mut result).await?;
    }

    Ok(result)
}

async fn commit_batch<B: WriteBatch>(batch: B, result: &mut ImportResult) -> Result<(), ImportError> {
    let number = result.batches_committed + 1;
    let staged = batch.len();
    batch
        .commit()
        .await
        .map_err(|source| ImportError::Commit {
            batch: number,
            staged,
            source,
        })?;
    result.batches_committed = number;
    debug!(
        "Committed batch {} ({} documents, {} total)",
        number, staged, result.count
    );
    Ok(())
}
