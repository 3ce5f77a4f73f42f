//! Schema-driven output
//!
//! Converts JSON documents to Arrow RecordBatches typed by the inferred
//! schema, and writes batches to Parquet files. This is the bulk-load side
//! of the boundary contract: the final schema decides how raw records are
//! coerced for loading.

mod schema;
mod writer;

pub use schema::{records_to_batch, schema_to_arrow};
pub use writer::{stage_records, ParquetOptions, ParquetSink};
