//! Service-account credential resolution.
//!
//! The key file is located in this order:
//! 1. An explicit path (`--credentials`)
//! 2. `$GOOGLE_APPLICATION_CREDENTIALS`, when set and non-empty
//! 3. `serviceAccountKey.json` in the working directory

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use crate::config::{CREDENTIALS_ENV_VAR, DEFAULT_CREDENTIALS_PATH};
use crate::error_handling::ImportError;

/// The subset of a service-account key the importer relies on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceAccount {
    /// Project whose document store receives the import
    pub project_id: String,
    /// Identity the key belongs to
    #[serde(default)]
    pub client_email: Option<String>,
    /// Key kind, normally `service_account`
    #[serde(default, rename = "type")]
    pub account_type: Option<String>,
}

/// Resolves the key file location from the CLI override and the process environment.
pub fn resolve_credentials_path(explicit: Option<&Path>) -> PathBuf {
    resolve_credentials_path_from(explicit, std::env::var_os(CREDENTIALS_ENV_VAR))
}

/// Resolves the key file location from an explicit override and an environment value.
///
/// Split out from [`resolve_credentials_path`] so resolution can be tested
/// without touching the process environment.
pub fn resolve_credentials_path_from(explicit: Option<&Path>, env_value: Option<OsString>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    match env_value {
        Some(value) if !value.is_empty() => PathBuf::from(value),
        _ => PathBuf::from(DEFAULT_CREDENTIALS_PATH),
    }
}

/// Loads and checks the service-account key at `path`.
///
/// # Errors
///
/// - [`ImportError::MissingCredentials`] if nothing exists at `path`
/// - [`ImportError::InvalidCredentials`] if the path cannot be inspected or
///   read, is not JSON, or has an empty `project_id`
pub async fn load_service_account(path: &Path) -> Result<ServiceAccount, ImportError> {
    let invalid = |reason: String| ImportError::InvalidCredentials {
        path: path.to_path_buf(),
        reason,
    };

    if !tokio::fs::try_exists(path)
        .await
        .map_err(|e| invalid(e.to_string()))?
    {
        return Err(ImportError::MissingCredentials {
            path: path.to_path_buf(),
        });
    }

    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| invalid(e.to_string()))?;
    let account: ServiceAccount = serde_json::from_str(&raw).map_err(|e| invalid(e.to_string()))?;

    if account.project_id.trim().is_empty() {
        return Err(invalid("project_id is empty".to_string()));
    }

    debug!(
        "Loaded service account key from {} (project {})",
        path.display(),
        account.project_id
    );
    Ok(account)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_key(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp key file");
        file.write_all(contents.as_bytes())
            .expect("Failed to write key file");
        file
    }

    #[test]
    fn test_explicit_path_wins_over_environment() {
        let resolved = resolve_credentials_path_from(
            Some(Path::new("cli-key.json")),
            Some(OsString::from("/etc/env-key.json")),
        );
        assert_eq!(resolved, PathBuf::from("cli-key.json"));
    }

    #[test]
    fn test_environment_used_when_no_explicit_path() {
        let resolved =
            resolve_credentials_path_from(None, Some(OsString::from("/etc/env-key.json")));
        assert_eq!(resolved, PathBuf::from("/etc/env-key.json"));
    }

    #[test]
    fn test_empty_environment_falls_back_to_default() {
        let resolved = resolve_credentials_path_from(None, Some(OsString::new()));
        assert_eq!(resolved, PathBuf::from("serviceAccountKey.json"));

        let resolved = resolve_credentials_path_from(None, None);
        assert_eq!(resolved, PathBuf::from("serviceAccountKey.json"));
    }

    #[tokio::test]
    async fn test_load_valid_key() {
        let key = write_key(
            r#"{"type":"service_account","project_id":"menu-app","client_email":"importer@menu-app.iam.gserviceaccount.com","private_key":"unused"}"#,
        );
        let account = load_service_account(key.path()).await.expect("key should load");
        assert_eq!(account.project_id, "menu-app");
        assert_eq!(
            account.client_email.as_deref(),
            Some("importer@menu-app.iam.gserviceaccount.com")
        );
        assert_eq!(account.account_type.as_deref(), Some("service_account"));
    }

    #[tokio::test]
    async fn test_missing_key_is_reported() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("serviceAccountKey.json");
        let err = load_service_account(&path).await.unwrap_err();
        assert!(matches!(err, ImportError::MissingCredentials { path: p } if p == path));
    }

    #[tokio::test]
    async fn test_malformed_key_is_invalid() {
        let key = write_key("not json");
        let err = load_service_account(key.path()).await.unwrap_err();
        assert!(matches!(err, ImportError::InvalidCredentials { .. }));
    }

    #[tokio::test]
    async fn test_key_without_project_is_invalid() {
        let key = write_key(r#"{"type":"service_account"}"#);
        assert!(matches!(
            load_service_account(key.path()).await,
            Err(ImportError::InvalidCredentials { .. })
        ));

        let blank = write_key(r#"{"project_id":"  "}"#);
        let err = load_service_account(blank.path()).await.unwrap_err();
        assert!(err.to_string().contains("project_id is empty"));
    }

    #[tokio::test]
    async fn test_uninspectable_key_path_is_invalid_not_missing() {
        let err = load_service_account(Path::new("service\0key.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, ImportError::InvalidCredentials { .. }), "got {err:?}");
    }
}
