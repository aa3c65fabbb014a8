//! Error type definitions.
//!
//! This module defines all error types used throughout the application.

use std::path::PathBuf;

use log::SetLoggerError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Error types for document store operations.
///
/// Variants wrapping another error leave it out of their own message; it is
/// reachable through [`std::error::Error::source`] and printed by `{:#}`.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error")]
    SqlError(#[from] sqlx::Error),

    /// Migration error while preparing the schema.
    #[error("Migration error")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    /// A staged document could not be encoded for storage.
    #[error("Document encoding error")]
    EncodeError(#[from] serde_json::Error),

    /// The store refused the write.
    #[error("Write rejected by store: {0}")]
    Rejected(String),
}

/// Error types for the import pipeline.
///
/// Everything except [`ImportError::Commit`] is a precondition failure raised
/// before any document is written.
#[derive(Error, Debug)]
pub enum ImportError {
    /// No service-account key was found at the resolved location.
    #[error(
        "Missing service account key at {}. Set GOOGLE_APPLICATION_CREDENTIALS, pass --credentials, or place serviceAccountKey.json in the working directory.",
        path.display()
    )]
    MissingCredentials {
        /// Resolved key location
        path: PathBuf,
    },

    /// The key file exists but is not a usable service-account key.
    #[error("Invalid service account key {}: {reason}", path.display())]
    InvalidCredentials {
        /// Key file that was read
        path: PathBuf,
        /// Why it was rejected
        reason: String,
    },

    /// The input file does not exist.
    #[error("Missing data file: {}", path.display())]
    MissingInputFile {
        /// Configured input location
        path: PathBuf,
    },

    /// The input file exists but could not be read.
    #[error("Failed to read data file {}", path.display())]
    InputRead {
        /// Input file
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The input file is not valid JSON.
    #[error("Failed to parse data file {} as JSON", path.display())]
    InputParse {
        /// Input file
        path: PathBuf,
        /// Underlying JSON syntax error
        #[source]
        source: serde_json::Error,
    },

    /// The input file is valid JSON but its top-level value is not an array.
    #[error("{} must be an array of objects (found {found}).", path.display())]
    InputNotArray {
        /// Input file
        path: PathBuf,
        /// JSON type of the top-level value
        found: &'static str,
    },

    /// A batch capacity of zero can never be committed.
    #[error("Batch capacity must be greater than 0, got {0}")]
    InvalidCapacity(usize),

    /// The store could not be opened.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A batch commit failed; earlier batches remain persisted.
    #[error("Failed to commit batch {batch} ({staged} documents)")]
    Commit {
        /// 1-based number of the failed batch
        batch: usize,
        /// Documents staged in it
        staged: usize,
        /// Store failure
        #[source]
        source: StoreError,
    },
}

/// A configuration value outside its accepted range.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid value for {field}: {message}")]
pub struct ConfigValidationError {
    /// Name of the offending option
    pub field: &'static str,
    /// What the accepted values are
    pub message: String,
}

impl ConfigValidationError {
    /// Builds an error for `field`.
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}
