//! Application initialization.
//!
//! This module provides the setup steps that run before any record is read:
//! - Logger configuration
//! - Service-account credential resolution
//!
//! All initialization functions return proper error types for error handling.

mod credentials;
mod logger;

// Re-export public API
pub use credentials::{
    load_service_account, resolve_credentials_path, resolve_credentials_path_from, ServiceAccount,
};
pub use logger::init_logger_with;
