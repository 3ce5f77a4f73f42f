//! Schema inference and lattice merging
//!
//! The core of schemaforge: converts one JSON document into a typed field
//! schema and combines any two schemas into a single relaxed schema that both
//! inputs satisfy.
//!
//! # Features
//!
//! - **Extraction**: recursive conversion of a JSON document to field schemas
//! - **Merging**: commutative, associative lattice join with an identity
//!   element, suitable as a distributed fold operator
//! - **Relaxation**: fields missing from one side demote REQUIRED → NULLABLE
//! - **Detectors**: pluggable recognition of specialized string types

mod detect;
mod extract;
mod merge;
mod types;

pub use detect::{parse_timestamp, DetectorChain, StringDetector, TimestampDetector};
pub use extract::{extract_schema, SchemaExtractor};
pub use merge::{merge, merge_field, merge_schemas, relax_field};
pub use types::{
    schema_from_json, schema_to_json, schema_to_json_pretty, FieldMode, FieldSchema, FieldType,
    Schema,
};
