//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DB_PATH, DEFAULT_BATCH_CAPACITY, DEFAULT_COLLECTION, DEFAULT_INPUT_PATH, MAX_BATCH_CAPACITY,
};
use crate::error_handling::ConfigValidationError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Importer configuration.
///
/// Parsed from the command line by the binary, or constructed directly by
/// library callers.
///
/// # Examples
///
/// ```no_run
/// use food_import::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     file: PathBuf::from("data/foods.json"),
///     batch_size: 250,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "food_import",
    about = "Imports a JSON array of food records into a document store collection."
)]
pub struct Config {
    /// JSON file holding a single array of food records
    #[arg(value_parser, default_value = DEFAULT_INPUT_PATH)]
    pub file: PathBuf,

    /// Service-account key file.
    ///
    /// Falls back to $GOOGLE_APPLICATION_CREDENTIALS, then to
    /// ./serviceAccountKey.json.
    #[arg(long, value_parser)]
    pub credentials: Option<PathBuf>,

    /// Database path (SQLite file backing the document store)
    #[arg(long, value_parser, default_value = DB_PATH)]
    pub db_path: PathBuf,

    /// Destination collection
    #[arg(long, default_value = DEFAULT_COLLECTION)]
    pub collection: String,

    /// Documents per committed batch (1-500)
    #[arg(long, default_value_t = DEFAULT_BATCH_CAPACITY)]
    pub batch_size: usize,

    /// Normalize and batch records without writing to the database
    #[arg(long)]
    pub dry_run: bool,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_INPUT_PATH),
            credentials: None,
            db_path: PathBuf::from(DB_PATH),
            collection: DEFAULT_COLLECTION.to_string(),
            batch_size: DEFAULT_BATCH_CAPACITY,
            dry_run: false,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

impl Config {
    /// Checks option values that clap cannot check on its own.
    ///
    /// # Errors
    ///
    /// Returns the first offending field with a message describing the
    /// accepted range.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.batch_size == 0 || self.batch_size > MAX_BATCH_CAPACITY {
            return Err(ConfigValidationError::new(
                "batch_size",
                format!(
                    "must be between 1 and {} (the store's per-request write limit), got {}",
                    MAX_BATCH_CAPACITY, self.batch_size
                ),
            ));
        }

        let collection = self.collection.trim();
        if collection.is_empty() {
            return Err(ConfigValidationError::new(
                "collection",
                "must not be empty",
            ));
        }
        if collection.contains('/') {
            return Err(ConfigValidationError::new(
                "collection",
                format!("must be a single path segment without '/', got '{}'", collection),
            ));
        }

        Ok(())
    }
}
