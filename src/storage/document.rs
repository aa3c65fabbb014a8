//! Document and field value types.
//!
//! A [`Document`] is what a [`WriteBatch`](super::WriteBatch) stages. Field
//! values are ordinary data except [`FieldValue::ServerTimestamp`], which
//! only tells the store to write its own clock reading at commit time.

use std::collections::BTreeMap;

use serde_json::{Map, Number, Value};

/// A single field value in a stored document.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Text value.
    String(String),
    /// Numeric value.
    Number(f64),
    /// Passed through as given; element types are not checked.
    Array(Vec<Value>),
    /// Write-time marker, replaced by the store's clock when the batch commits.
    ServerTimestamp,
}

/// A document awaiting commit: field name to value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    fields: BTreeMap<String, FieldValue>,
}

impl Document {
    /// An empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name`, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.insert(name.into(), value);
    }

    /// Builder-style [`Document::set`].
    pub fn with(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.set(name, value);
        self
    }

    /// Value of field `name`, if set.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the document has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Renders the document as a JSON object, writing `write_time` wherever a
    /// [`FieldValue::ServerTimestamp`] marker appears.
    ///
    /// Non-finite numbers have no JSON form and are written as `null`.
    pub fn resolve(&self, write_time: &str) -> Map<String, Value> {
        self.fields
            .iter()
            .map(|(name, value)| {
                let json = match value {
                    FieldValue::String(s) => Value::String(s.clone()),
                    FieldValue::Number(n) => Number::from_f64(*n).map_or(Value::Null, Value::Number),
                    FieldValue::Array(items) => Value::Array(items.clone()),
                    FieldValue::ServerTimestamp => Value::String(write_time.to_string()),
                };
                (name.clone(), json)
            })
            .collect()
    }
}

/// A document as read back from a store after commit.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    /// Store-generated identifier
    pub id: String,
    /// Fields with write-time markers resolved
    pub data: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_replaces_every_marker_with_write_time() {
        let doc = Document::new()
            .with("title", FieldValue::String("Soup".to_string()))
            .with("createdAt", FieldValue::ServerTimestamp)
            .with("updatedAt", FieldValue::ServerTimestamp);

        let resolved = doc.resolve("2026-10-16T09:30:00.000Z");
        assert_eq!(resolved["title"], json!("Soup"));
        assert_eq!(resolved["createdAt"], json!("2026-10-16T09:30:00.000Z"));
        assert_eq!(resolved["updatedAt"], json!("2026-10-16T09:30:00.000Z"));
    }

    #[test]
    fn test_resolve_numbers_and_arrays() {
        let doc = Document::new()
            .with("price", FieldValue::Number(4.5))
            .with("nan", FieldValue::Number(f64::NAN))
            .with("ingredients", FieldValue::Array(vec![json!("salt"), json!(3)]));

        let resolved = doc.resolve("t");
        assert_eq!(resolved["price"], json!(4.5));
        assert_eq!(resolved["nan"], Value::Null);
        assert_eq!(resolved["ingredients"], json!(["salt", 3]));
    }

    #[test]
    fn test_set_replaces_existing_field() {
        let mut doc = Document::new().with("title", FieldValue::String("Old".to_string()));
        doc.set("title", FieldValue::String("New".to_string()));
        assert_eq!(doc.len(), 1);
        assert_eq!(
            doc.get("title"),
            Some(&FieldValue::String("New".to_string()))
        );
    }
}
