//! Input file loading.

use std::path::Path;

use log::info;
use serde_json::Value;

use crate::error_handling::ImportError;
use crate::normalize::RawRecord;

/// Reads `path` and returns the elements of its top-level JSON array.
///
/// # Errors
///
/// - [`ImportError::MissingInputFile`] if `path` does not exist
/// - [`ImportError::InputRead`] if it cannot be inspected or read
/// - [`ImportError::InputParse`] if it is not valid JSON
/// - [`ImportError::InputNotArray`] if the top-level value is not an array
pub async fn load_raw_records(path: &Path) -> Result<Vec<RawRecord>, ImportError> {
    let exists = tokio::fs::try_exists(path)
        .await
        .map_err(|source| ImportError::InputRead {
            path: path.to_path_buf(),
            source,
        })?;
    if !exists {
        return Err(ImportError::MissingInputFile {
            path: path.to_path_buf(),
        });
    }

    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ImportError::InputRead {
            path: path.to_path_buf(),
            source,
        })?;

    let records = parse_records(&raw).map_err(|e| match e {
        ParseFailure::Json(source) => ImportError::InputParse {
            path: path.to_path_buf(),
            source,
        },
        ParseFailure::NotArray(found) => ImportError::InputNotArray {
            path: path.to_path_buf(),
            found,
        },
    })?;

    info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

enum ParseFailure {
    Json(serde_json::Error),
    NotArray(&'static str),
}

fn parse_records(raw: &str) -> Result<Vec<RawRecord>, ParseFailure> {
    match serde_json::from_str::<Value>(raw).map_err(ParseFailure::Json)? {
        Value::Array(items) => Ok(items.into_iter().map(RawRecord::from).collect()),
        other => Err(ParseFailure::NotArray(json_type_name(&other))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_input(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp input file");
        file.write_all(contents.as_bytes())
            .expect("Failed to write input file");
        file
    }

    #[tokio::test]
    async fn test_loads_every_array_element() {
        let file = write_input(r#"[{"title":"Soup"}, {"title":"  "}, 7, null]"#);
        let records = load_raw_records(file.path()).await.expect("should load");
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].field("title"), Some(&Value::from("Soup")));
        assert_eq!(records[2].field("title"), None);
    }

    #[tokio::test]
    async fn test_empty_array_loads_no_records() {
        let file = write_input("[]");
        let records = load_raw_records(file.path()).await.expect("should load");
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_is_precondition_failure() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("foods.json");
        let err = load_raw_records(&path).await.unwrap_err();
        assert!(matches!(err, ImportError::MissingInputFile { .. }));
    }

    #[tokio::test]
    async fn test_uninspectable_path_is_read_failure() {
        // A NUL byte fails the existence check itself rather than reporting absence
        let err = load_raw_records(Path::new("foods\0.json")).await.unwrap_err();
        assert!(matches!(err, ImportError::InputRead { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn test_invalid_json_is_parse_failure() {
        let file = write_input(r#"[{"title": "Soup",]"#);
        let err = load_raw_records(file.path()).await.unwrap_err();
        assert!(matches!(err, ImportError::InputParse { .. }));
    }

    #[tokio::test]
    async fn test_top_level_object_is_rejected() {
        let file = write_input(r#"{"foods": [{"title": "Soup"}]}"#);
        let err = load_raw_records(file.path()).await.unwrap_err();
        assert!(matches!(
            err,
            ImportError::InputNotArray { found: "object", .. }
        ));
    }
}
