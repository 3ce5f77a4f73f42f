//! DuckDB-backed warehouse client
//!
//! The table-management side of the boundary contract: creates a table from
//! an inferred schema, or merges the proposed schema with the table's
//! recorded schema and alters the table to match. Bulk loading stages typed
//! records as Parquet and inserts by column name.
//!
//! Each managed table's schema is recorded as boundary JSON in a metadata
//! table; the SQL catalog alone cannot round-trip nested field modes.

mod ddl;

pub use ddl::{alter_statements, column_type, create_table_sql};

use crate::error::{Error, Result};
use crate::output::stage_records;
use crate::schema::{merge_schemas, schema_from_json, schema_to_json, Schema};
use duckdb::Connection;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

/// Metadata table holding recorded schemas for managed tables
const SCHEMA_TABLE: &str = "_schemaforge_tables";

/// DuckDB warehouse client
pub struct Warehouse {
    conn: Connection,
}

impl Warehouse {
    /// Open an in-memory warehouse
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::warehouse(format!("failed to open in-memory database: {e}")))?;
        Self::init(conn)
    }

    /// Open a warehouse backed by a database file
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| {
            Error::warehouse(format!("failed to open database {}: {e}", path.display()))
        })?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {SCHEMA_TABLE} (table_name VARCHAR PRIMARY KEY, schema_json VARCHAR NOT NULL)"
        ))
        .map_err(|e| Error::warehouse(format!("failed to initialize metadata table: {e}")))?;
        Ok(Self { conn })
    }

    /// Get the recorded schema of a managed table, if any
    pub fn recorded_schema(&self, table: &str) -> Result<Option<Schema>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT schema_json FROM {SCHEMA_TABLE} WHERE table_name = ?"
            ))
            .map_err(|e| Error::warehouse(e.to_string()))?;
        let mut rows = stmt
            .query([table])
            .map_err(|e| Error::warehouse(e.to_string()))?;

        match rows.next().map_err(|e| Error::warehouse(e.to_string()))? {
            Some(row) => {
                let json: String = row.get(0).map_err(|e| Error::warehouse(e.to_string()))?;
                Ok(Some(schema_from_json(&json)?))
            }
            None => Ok(None),
        }
    }

    fn record_schema(&self, table: &str, schema: &Schema) -> Result<()> {
        let json = schema_to_json(schema).to_string();
        self.conn
            .execute(
                &format!("INSERT OR REPLACE INTO {SCHEMA_TABLE} VALUES (?, ?)"),
                [table, json.as_str()],
            )
            .map_err(|e| Error::warehouse(format!("failed to record schema: {e}")))?;
        Ok(())
    }

    /// Create the table from the proposed schema, or reconcile an existing
    /// table by merging its recorded schema with the proposed one
    ///
    /// Returns the schema the table holds afterwards. A proposed schema that
    /// is incompatible with the recorded one surfaces the merge error.
    pub fn ensure_table(&self, table: &str, proposed: &Schema) -> Result<Schema> {
        if proposed.is_empty() {
            return Err(Error::warehouse(
                "cannot create a table from an empty schema",
            ));
        }

        match self.recorded_schema(table)? {
            None => {
                let sql = create_table_sql(table, proposed);
                debug!(%sql, "creating table");
                self.conn
                    .execute_batch(&sql)
                    .map_err(|e| Error::warehouse(format!("failed to create table: {e}")))?;
                self.record_schema(table, proposed)?;
                info!(table, "created table");
                Ok(proposed.clone())
            }
            Some(existing) => {
                let merged = merge_schemas(&existing, proposed)?;
                let statements = alter_statements(table, &existing, &merged);
                for sql in &statements {
                    debug!(%sql, "altering table");
                    self.conn
                        .execute_batch(sql)
                        .map_err(|e| Error::warehouse(format!("failed to alter table: {e}")))?;
                }
                if merged != existing {
                    self.record_schema(table, &merged)?;
                }
                info!(table, changes = statements.len(), "reconciled table schema");
                Ok(merged)
            }
        }
    }

    /// Bulk-load documents into a table, typed by the schema
    ///
    /// Records are staged as a Parquet file and inserted by column name, so
    /// the table may carry columns the batch does not.
    pub fn load(&self, table: &str, schema: &Schema, records: &[Value]) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let staged = tempfile::Builder::new()
            .prefix("schemaforge-load-")
            .suffix(".parquet")
            .tempfile()?;
        stage_records(staged.path(), schema, records)?;

        let sql = format!(
            "INSERT INTO {} BY NAME SELECT * FROM read_parquet('{}')",
            ddl::quote_ident(table),
            staged.path().display()
        );
        debug!(%sql, "loading staged records");
        let inserted = self
            .conn
            .execute(&sql, [])
            .map_err(|e| Error::warehouse(format!("failed to load records: {e}")))?;

        info!(table, rows = inserted, "loaded records");
        Ok(inserted)
    }

    /// Count the rows of a table
    pub fn count_rows(&self, table: &str) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row(
                &format!("SELECT count(*) FROM {}", ddl::quote_ident(table)),
                [],
                |row| row.get(0),
            )
            .map_err(|e| Error::warehouse(format!("failed to count rows: {e}")))?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests;
