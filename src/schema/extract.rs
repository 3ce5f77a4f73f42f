//! Schema extraction from JSON documents
//!
//! Converts one parsed JSON document into an ordered sequence of field
//! schemas, recursing into nested objects and folding array elements through
//! the merger.

use super::detect::DetectorChain;
use super::merge;
use super::types::{FieldMode, FieldSchema, FieldType, Schema};
use crate::error::{Error, Result};
use serde_json::{Map, Value};
use tracing::warn;

/// Extracts a field schema from a single JSON document
#[derive(Debug, Default)]
pub struct SchemaExtractor {
    detectors: DetectorChain,
}

impl SchemaExtractor {
    /// Create an extractor with the standard detector chain
    pub fn new() -> Self {
        Self {
            detectors: DetectorChain::standard(),
        }
    }

    /// Create an extractor with a custom detector chain
    pub fn with_detectors(detectors: DetectorChain) -> Self {
        Self { detectors }
    }

    /// Extract the schema of one document
    ///
    /// The document must be a JSON object; its top-level keys become the
    /// emitted fields, in document order.
    pub fn extract(&self, document: &Value) -> Result<Schema> {
        match document {
            Value::Object(map) => self.extract_fields(map),
            other => Err(Error::extract(format!(
                "top-level document must be an object, got {}",
                value_kind(other)
            ))),
        }
    }

    /// Extract the child fields of an object value
    fn extract_fields(&self, map: &Map<String, Value>) -> Result<Schema> {
        let mut fields = Vec::new();
        for (name, value) in map {
            match value {
                // Null fields are omitted; the merger reads absence as "not required"
                Value::Null => {}
                Value::Array(elements) => {
                    // Empty arrays carry no element type and are omitted
                    if !elements.is_empty() {
                        fields.push(self.extract_array(name, elements)?);
                    }
                }
                Value::Object(child) => {
                    fields.push(FieldSchema::record(name.as_str(), self.extract_fields(child)?));
                }
                scalar => {
                    fields.push(FieldSchema::primitive(name.as_str(), self.scalar_type(scalar)));
                }
            }
        }
        Ok(fields)
    }

    /// Extract a REPEATED field from a non-empty array
    ///
    /// Every element becomes a one-field probe schema named after the array
    /// field; the probes fold through the merger and the surviving field is
    /// forced REPEATED. Null elements are skipped, nested arrays are a hard
    /// error, and a fold that does not leave exactly one field is a hard
    /// error as well.
    fn extract_array(&self, name: &str, elements: &[Value]) -> Result<FieldSchema> {
        let mut folded: Option<Schema> = None;
        for element in elements {
            let probe = match element {
                Value::Null => continue,
                Value::Array(_) => {
                    return Err(Error::merge(format!(
                        "nested arrays are not supported: array field '{name}'"
                    )));
                }
                Value::Object(child) => FieldSchema::record(name, self.extract_fields(child)?),
                scalar => FieldSchema::primitive(name, self.scalar_type(scalar)),
            };
            folded = merge::merge(folded, Some(vec![probe]))?;
        }

        match folded {
            Some(mut fields) if fields.len() == 1 => {
                let mut field = fields.remove(0);
                field.mode = FieldMode::Repeated;
                Ok(field)
            }
            _ => Err(Error::merge(format!(
                "failed to merge element schemas of array field '{name}'"
            ))),
        }
    }

    /// Determine the type of a scalar leaf value
    fn scalar_type(&self, value: &Value) -> FieldType {
        match value {
            Value::Bool(_) => FieldType::Boolean,
            Value::Number(n) => {
                if n.is_i64() || n.is_u64() {
                    FieldType::Integer
                } else if n.is_f64() {
                    FieldType::Float
                } else {
                    warn!(value = %n, "failed to classify number, falling back to STRING");
                    FieldType::String
                }
            }
            Value::String(s) => self.detectors.classify(s),
            other => {
                warn!(kind = value_kind(other), "failed to classify value, falling back to STRING");
                FieldType::String
            }
        }
    }
}

/// Extract the schema of one document with the standard detector chain
pub fn extract_schema(document: &Value) -> Result<Schema> {
    SchemaExtractor::new().extract(document)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
