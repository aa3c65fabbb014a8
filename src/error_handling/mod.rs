//! Error handling.
//!
//! Error types are grouped by where they arise:
//! - **Initialization**: logger setup
//! - **Store**: opening the database and committing batches
//! - **Import**: precondition failures (credentials, input file) and commit failures
//! - **Configuration**: option values outside their accepted range
//!
//! Records that fail normalization are not errors; they are skipped and counted.

mod types;

// Re-export public API
pub use types::{ConfigValidationError, ImportError, InitializationError, StoreError};
