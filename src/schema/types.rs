//! Schema value types
//!
//! The boundary contract with warehouse collaborators: a schema is an ordered
//! sequence of field entries, each serialized as
//! `{"name": ..., "type": ..., "mode": ...}` with a nested `"fields"` list
//! present exactly when the type is `RECORD`.

use serde::{Deserialize, Serialize};

/// Field type, the closed set of kinds a warehouse column can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FieldType {
    Boolean,
    Integer,
    Float,
    String,
    Timestamp,
    Record,
}

impl FieldType {
    /// Check if this is the composite record type
    pub fn is_record(self) -> bool {
        self == FieldType::Record
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldType::Boolean => write!(f, "BOOLEAN"),
            FieldType::Integer => write!(f, "INTEGER"),
            FieldType::Float => write!(f, "FLOAT"),
            FieldType::String => write!(f, "STRING"),
            FieldType::Timestamp => write!(f, "TIMESTAMP"),
            FieldType::Record => write!(f, "RECORD"),
        }
    }
}

/// Field mode
///
/// REQUIRED: every document seen so far provided a non-null value.
/// NULLABLE: at least one document omitted or nulled the field.
/// REPEATED: the field holds an array of homogeneous values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FieldMode {
    Required,
    Nullable,
    Repeated,
}

impl std::fmt::Display for FieldMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldMode::Required => write!(f, "REQUIRED"),
            FieldMode::Nullable => write!(f, "NULLABLE"),
            FieldMode::Repeated => write!(f, "REPEATED"),
        }
    }
}

/// One named, typed, moded description of a document field
///
/// Immutable once produced: the extractor creates fresh instances, the merger
/// derives new instances from two inputs and never mutates either.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Field name, unique among siblings
    pub name: String,

    /// Field type
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Field mode
    pub mode: FieldMode,

    /// Child fields, present exactly when `field_type` is `RECORD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldSchema>>,
}

/// Ordered sequence of sibling fields describing one nesting level
pub type Schema = Vec<FieldSchema>;

impl FieldSchema {
    /// Create a required primitive field
    pub fn primitive(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            mode: FieldMode::Required,
            fields: None,
        }
    }

    /// Create a required record field with the given children
    pub fn record(name: impl Into<String>, fields: Vec<FieldSchema>) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::Record,
            mode: FieldMode::Required,
            fields: Some(fields),
        }
    }

    /// Set the mode
    #[must_use]
    pub fn with_mode(mut self, mode: FieldMode) -> Self {
        self.mode = mode;
        self
    }

    /// Child fields, empty for non-record fields
    pub fn children(&self) -> &[FieldSchema] {
        self.fields.as_deref().unwrap_or(&[])
    }
}

/// Serialize a schema to the boundary JSON value
pub fn schema_to_json(schema: &Schema) -> serde_json::Value {
    serde_json::to_value(schema).unwrap_or_default()
}

/// Serialize a schema to pretty-printed boundary JSON
pub fn schema_to_json_pretty(schema: &Schema) -> String {
    serde_json::to_string_pretty(schema).unwrap_or_default()
}

/// Deserialize a schema from boundary JSON text
pub fn schema_from_json(text: &str) -> crate::error::Result<Schema> {
    Ok(serde_json::from_str(text)?)
}
