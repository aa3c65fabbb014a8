//! Configuration constants.
//!
//! This module defines the defaults and limits used throughout the importer.

/// Default input file (a single JSON array of food records).
pub const DEFAULT_INPUT_PATH: &str = "data/foods.json";

/// Default SQLite file backing the document store.
pub const DB_PATH: &str = "./foods.db";

/// Destination collection when none is given on the command line.
pub const DEFAULT_COLLECTION: &str = "foods";

/// Number of documents committed per batch.
///
/// Kept below the store's per-request mutation limit so a batch never
/// trips it even if a future field transform counts as an extra write.
pub const DEFAULT_BATCH_CAPACITY: usize = 400;

/// Per-request mutation limit of the document store.
pub const MAX_BATCH_CAPACITY: usize = 500;

// Credential resolution
/// Environment variable naming the service-account key file
pub const CREDENTIALS_ENV_VAR: &str = "GOOGLE_APPLICATION_CREDENTIALS";
/// Key file looked up in the working directory when nothing else is configured
pub const DEFAULT_CREDENTIALS_PATH: &str = "serviceAccountKey.json";

// Document shape
/// Length of generated document identifiers
pub const DOCUMENT_ID_LENGTH: usize = 20;
/// Field receiving the write-time marker on every imported document
pub const UPDATED_AT_FIELD: &str = "updatedAt";
