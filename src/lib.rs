//! food_import library: batched import of food records into a document store
//!
//! This library reads a JSON array of food records, normalizes each record
//! into the canonical document shape, drops records without a title, and
//! commits the rest to a document collection in bounded batches.
//!
//! # Example
//!
//! ```no_run
//! use food_import::{Config, run_import};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     file: std::path::PathBuf::from("data/foods.json"),
//!     batch_size: 400,
//!     ..Default::default()
//! };
//!
//! let report = run_import(config).await?;
//! println!("Imported {} food items", report.imported);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod config;
pub mod error_handling;
pub mod import;
pub mod initialization;
pub mod normalize;
pub mod storage;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{ConfigValidationError, ImportError, StoreError};
pub use import::{commit_all, import_records, load_raw_records, ImportOutcome, ImportResult};
pub use normalize::{normalize, NormalizedRecord, RawRecord};
pub use run::{run_import, ImportReport};
pub use storage::{DocumentStore, MemoryStore, SqliteStore, WriteBatch};

// Internal run module (contains the import orchestration)
mod run {
    use std::path::PathBuf;
    use std::time::Instant;

    use anyhow::{Context, Result};
    use log::info;

    use crate::config::Config;
    use crate::import::{import_records, load_raw_records, ImportOutcome};
    use crate::initialization::{load_service_account, resolve_credentials_path};
    use crate::storage::{open_sqlite_store, MemoryStore};

    /// Results of an import run.
    #[derive(Debug, Clone)]
    pub struct ImportReport {
        /// Number of documents committed
        pub imported: usize,
        /// Number of input records dropped for having no title
        pub skipped: usize,
        /// Number of batches committed
        pub batches_committed: usize,
        /// Project named by the service-account key
        pub project_id: String,
        /// Destination collection
        pub collection: String,
        /// SQLite file written to; `None` for a dry run
        pub db_path: Option<PathBuf>,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Runs an import with the provided configuration.
    ///
    /// Preconditions are checked in order before anything is written:
    /// configuration values, then the service-account key, then the input
    /// file. The database is only opened once all of them hold.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - a configuration value is out of range
    /// - the service-account key is missing or malformed
    /// - the input file is missing, is not JSON, or is not an array
    /// - the database cannot be opened
    /// - any batch commit fails (batches committed before it remain)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use food_import::{Config, run_import};
    /// use std::path::PathBuf;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = Config {
    ///     file: PathBuf::from("data/foods.json"),
    ///     credentials: Some(PathBuf::from("serviceAccountKey.json")),
    ///     ..Default::default()
    /// };
    /// let report = run_import(config).await?;
    /// println!("Imported {} food items", report.imported);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run_import(config: Config) -> Result<ImportReport> {
        let start_time = Instant::now();

        config.validate().context("Invalid configuration")?;
        let collection = config.collection.trim().to_string();

        let credentials_path = resolve_credentials_path(config.credentials.as_deref());
        let account = load_service_account(&credentials_path).await?;
        info!(
            "Using service account {} for project {}",
            account.client_email.as_deref().unwrap_or("<unknown>"),
            account.project_id
        );

        let raw = load_raw_records(&config.file).await?;

        let (outcome, db_path) = if config.dry_run {
            info!("Dry run: batching into memory, nothing will be written");
            let store = MemoryStore::new();
            let outcome = import_records(&raw, &store, config.batch_size).await?;
            (outcome, None)
        } else {
            let store = open_sqlite_store(&config.db_path, &account.project_id, &collection)
                .await
                .context("Failed to open document store")?;
            let outcome = import_records(&raw, &store, config.batch_size).await?;
            (outcome, Some(config.db_path.clone()))
        };

        let ImportOutcome { result, skipped } = outcome;
        if skipped > 0 {
            info!("Skipped {} records without a title", skipped);
        }

        let elapsed_seconds = start_time.elapsed().as_secs_f64();
        info!(
            "Committed {} documents to '{}' in {} batches ({:.2}s)",
            result.count, collection, result.batches_committed, elapsed_seconds
        );

        Ok(ImportReport {
            imported: result.count,
            skipped,
            batches_committed: result.batches_committed,
            project_id: account.project_id,
            collection,
            db_path,
            elapsed_seconds,
        })
    }
}
