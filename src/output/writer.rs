//! Parquet staging
//!
//! Writes schema-typed record batches to Parquet files. Bulk loads into the
//! warehouse stage their records through this path.

use crate::error::{Error, Result};
use super::schema::{records_to_batch, schema_to_arrow};
use crate::schema::Schema;
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

/// Options for staged Parquet files
#[derive(Debug, Clone)]
pub struct ParquetOptions {
    /// Compression applied to data pages
    pub compression: Compression,
    /// Maximum rows per row group
    pub row_group_rows: usize,
}

impl Default for ParquetOptions {
    fn default() -> Self {
        Self {
            compression: Compression::SNAPPY,
            row_group_rows: 1024 * 1024,
        }
    }
}

impl ParquetOptions {
    fn writer_properties(&self) -> WriterProperties {
        WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_rows)
            .build()
    }
}

/// Incremental Parquet sink typed by an inferred schema
///
/// Batches appended to the sink must carry the Arrow schema derived from the
/// inferred schema the sink was created with.
pub struct ParquetSink {
    writer: ArrowWriter<File>,
    rows: usize,
}

impl ParquetSink {
    /// Create a sink for the given inferred schema
    pub fn create(path: impl AsRef<Path>, schema: &Schema, options: &ParquetOptions) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|e| Error::output(format!("failed to create {}: {e}", path.display())))?;
        let arrow_schema = Arc::new(schema_to_arrow(schema));
        let writer = ArrowWriter::try_new(file, arrow_schema, Some(options.writer_properties()))?;
        Ok(Self { writer, rows: 0 })
    }

    /// Append one batch
    pub fn append(&mut self, batch: &RecordBatch) -> Result<()> {
        self.writer.write(batch)?;
        self.rows += batch.num_rows();
        Ok(())
    }

    /// Rows appended so far
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush and finalize the file, returning the total row count
    pub fn finish(self) -> Result<usize> {
        self.writer.close()?;
        Ok(self.rows)
    }
}

/// Stage documents as one Parquet file, coerced by the inferred schema
///
/// Returns the number of rows staged.
pub fn stage_records(
    path: impl AsRef<Path>,
    schema: &Schema,
    records: &[serde_json::Value],
) -> Result<usize> {
    let batch = records_to_batch(schema, records)?;
    let mut sink = ParquetSink::create(path, schema, &ParquetOptions::default())?;
    sink.append(&batch)?;
    sink.finish()
}
