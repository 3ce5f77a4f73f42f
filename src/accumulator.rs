//! Schema accumulation for distributed folds
//!
//! A fold cell over `Option<Schema>`: empty is the identity element, inputs
//! fold in one at a time, and two partial accumulators combine in any order
//! or grouping. This is the shape a tree-reduce over arbitrarily sharded
//! document batches needs, and it is correct because the merge operation is
//! associative and commutative.

use crate::error::Result;
use crate::schema::{self, extract_schema, Schema};
use serde_json::Value;

/// Accumulates per-document schemas into one relaxed schema
#[derive(Debug, Clone, Default)]
pub struct SchemaAccumulator {
    schema: Option<Schema>,
}

impl SchemaAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self { schema: None }
    }

    /// Extract one document and fold its schema in
    pub fn add_document(&mut self, document: &Value) -> Result<()> {
        self.add_schema(extract_schema(document)?)
    }

    /// Fold a pre-extracted schema in
    pub fn add_schema(&mut self, schema: Schema) -> Result<()> {
        self.schema = schema::merge(self.schema.take(), Some(schema))?;
        Ok(())
    }

    /// Combine another partial accumulator into this one
    pub fn merge(&mut self, other: SchemaAccumulator) -> Result<()> {
        self.schema = schema::merge(self.schema.take(), other.schema)?;
        Ok(())
    }

    /// Whether no schema has been accumulated yet
    pub fn is_empty(&self) -> bool {
        self.schema.is_none()
    }

    /// Finish, returning the accumulated schema if any input was seen
    pub fn finish(self) -> Option<Schema> {
        self.schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldMode, FieldType};
    use serde_json::json;

    #[test]
    fn test_empty_accumulator_is_identity() {
        let acc = SchemaAccumulator::new();
        assert!(acc.is_empty());
        assert_eq!(acc.finish(), None);
    }

    #[test]
    fn test_fold_documents() {
        let mut acc = SchemaAccumulator::new();
        acc.add_document(&json!({"a": 1})).unwrap();
        acc.add_document(&json!({"a": 2, "b": "x"})).unwrap();

        let schema = acc.finish().unwrap();
        assert_eq!(schema.len(), 2);

        let a = schema.iter().find(|f| f.name == "a").unwrap();
        assert_eq!(a.field_type, FieldType::Integer);
        assert_eq!(a.mode, FieldMode::Required);

        let b = schema.iter().find(|f| f.name == "b").unwrap();
        assert_eq!(b.mode, FieldMode::Nullable);
    }

    #[test]
    fn test_merge_partial_accumulators() {
        let mut left = SchemaAccumulator::new();
        left.add_document(&json!({"a": 1})).unwrap();

        let mut right = SchemaAccumulator::new();
        right.add_document(&json!({"a": 2.5})).unwrap();

        left.merge(right).unwrap();

        let schema = left.finish().unwrap();
        assert_eq!(schema[0].field_type, FieldType::Float);
        assert_eq!(schema[0].mode, FieldMode::Required);
    }

    #[test]
    fn test_merge_with_empty_partial() {
        let mut left = SchemaAccumulator::new();
        left.add_document(&json!({"a": 1})).unwrap();
        let before = left.clone().finish();

        left.merge(SchemaAccumulator::new()).unwrap();

        assert_eq!(left.finish(), before);
    }

    #[test]
    fn test_incompatible_documents_fail() {
        let mut acc = SchemaAccumulator::new();
        acc.add_document(&json!({"a": 1})).unwrap();

        let err = acc.add_document(&json!({"a": "text"})).unwrap_err();
        assert!(err.is_merge());
    }
}
