//! Record normalization.
//!
//! Maps one raw input record onto the canonical food document shape:
//! every field present, strings trimmed, numbers finite, lists defaulted.
//! A normalized record is eligible for persistence only if its title is
//! non-empty.

mod coerce;


use serde_json::Value;

use crate::config::UPDATED_AT_FIELD;
use crate::storage::{Document, FieldValue};

pub use coerce::{coerce_list, coerce_number, coerce_string};

/// A record exactly as it appeared in the input array.
///
/// Any JSON value is accepted; non-objects simply have no fields.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord(Value);

impl RawRecord {
    /// Looks up a top-level field. Always `None` for non-object records.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.as_object().and_then(|fields| fields.get(name))
    }
}

impl From<Value> for RawRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// The canonical food record.
///
/// `updatedAt` is not carried here: it is a write-time marker added when
/// the record becomes a [`Document`].
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)] // field names mirror the stored document fields
pub struct NormalizedRecord {
    pub title: String,
    pub subtitle: String,
    pub category: String,
    pub description: String,
    /// Stored as `imageUrl`
    pub image_url: String,
    /// Preparation time, free text
    pub time: String,
    pub price: f64,
    pub rating: f64,
    pub calories: f64,
    pub ingredients: Vec<Value>,
    /// Stored as `foodType`
    pub food_type: Vec<Value>,
}

impl NormalizedRecord {
    /// Whether the record may be persisted.
    pub fn is_valid(&self) -> bool {
        !self.title.is_empty()
    }

    /// Converts the record into a stageable document, adding the
    /// `updatedAt` write-time marker.
    pub fn into_document(self) -> Document {
        Document::new()
            .with("title", FieldValue::String(self.title))
            .with("subtitle", FieldValue::String(self.subtitle))
            .with("category", FieldValue::String(self.category))
            .with("description", FieldValue::String(self.description))
            .with("imageUrl", FieldValue::String(self.image_url))
            .with("time", FieldValue::String(self.time))
            .with("price", FieldValue::Number(self.price))
            .with("rating", FieldValue::Number(self.rating))
            .with("calories", FieldValue::Number(self.calories))
            .with("ingredients", FieldValue::Array(self.ingredients))
            .with("foodType", FieldValue::Array(self.food_type))
            .with(UPDATED_AT_FIELD, FieldValue::ServerTimestamp)
    }
}

/// Normalizes one raw record. Total and deterministic.
pub fn normalize(raw: &RawRecord) -> NormalizedRecord {
    NormalizedRecord {
        title: coerce_string(raw.field("title")),
        subtitle: coerce_string(raw.field("subtitle")),
        category: coerce_string(raw.field("category")),
        description: coerce_string(raw.field("description")),
        image_url: coerce_string(raw.field("imageUrl")),
        time: coerce_string(raw.field("time")),
        price: coerce_number(raw.field("price")),
        rating: coerce_number(raw.field("rating")),
        calories: coerce_number(raw.field("calories")),
        ingredients: coerce_list(raw.field("ingredients")),
        food_type: coerce_list(raw.field("foodType")),
    }
}
