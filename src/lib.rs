//! # schemaforge
//!
//! Streaming JSON schema inference with lattice merging and warehouse
//! loading.
//!
//! schemaforge reads semi-structured JSON documents, infers a typed field
//! schema per document, and folds the per-document schemas into one relaxed
//! schema every document satisfies. The fold is commutative and associative
//! with an identity element, so batches can be extracted and combined in any
//! order and grouping. The final schema drives table creation/reconciliation
//! and bulk loading in a DuckDB warehouse.
//!
//! ## Quick Start
//!
//! ```rust
//! use schemaforge::schema::{extract_schema, merge_schemas};
//! use serde_json::json;
//!
//! let a = extract_schema(&json!({"ts": "2020-06-18T10:44:12", "started": {"pid": 45678}}))?;
//! let b = extract_schema(&json!({"ts": "2020-06-18T10:44:13", "logged_in": {"username": "foo"}}))?;
//!
//! let merged = merge_schemas(&a, &b)?;
//! // ts is REQUIRED TIMESTAMP; started and logged_in are NULLABLE RECORDs
//! # Ok::<(), schemaforge::Error>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          engine                             │
//! │   decode documents → extract per batch → fold partials      │
//! └──────────────────────────────┬──────────────────────────────┘
//!                                │
//! ┌──────────┬───────────────────┴─────────────┬────────────────┐
//! │  decode  │            schema               │   warehouse    │
//! ├──────────┼─────────────────────────────────┼────────────────┤
//! │ JSONL    │ extract   merge   detect        │ DDL  reconcile │
//! │ JSON     │ (lattice join, relaxation)      │ Parquet load   │
//! └──────────┴─────────────────────────────────┴────────────────┘
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Schema inference and lattice merging
pub mod schema;

/// Schema accumulation for distributed folds
pub mod accumulator;

/// Document decoding (JSONL, JSON)
pub mod decode;

/// Batch-parallel inference engine
pub mod engine;

/// Schema-driven Arrow conversion and Parquet output
pub mod output;

/// DuckDB warehouse client
pub mod warehouse;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use accumulator::SchemaAccumulator;
pub use error::{Error, Result};
pub use schema::{FieldMode, FieldSchema, FieldType, Schema};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
