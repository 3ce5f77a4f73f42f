//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::engine::{EngineConfig, InferenceEngine};
use crate::error::{Error, Result};
use crate::schema::{merge, schema_from_json, schema_to_json, schema_to_json_pretty, Schema};
use crate::warehouse::Warehouse;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Infer {
                input,
                max_documents,
                batch_size,
                skip_bad,
                no_timestamps,
            } => {
                self.infer(input, *max_documents, *batch_size, *skip_bad, *no_timestamps)
                    .await
            }
            Commands::Merge { schemas } => self.merge_schemas(schemas),
            Commands::Load {
                input,
                table,
                database,
                schema_only,
                batch_size,
                skip_bad,
            } => {
                self.load(
                    input,
                    table,
                    database.as_deref(),
                    *schema_only,
                    *batch_size,
                    *skip_bad,
                )
                .await
            }
            Commands::Sample { output, count } => self.sample(output, *count).await,
        }
    }

    fn print_schema(&self, schema: &Schema) {
        match self.cli.format {
            OutputFormat::Json => println!("{}", schema_to_json(schema)),
            OutputFormat::Pretty => println!("{}", schema_to_json_pretty(schema)),
        }
    }

    async fn infer(
        &self,
        input: &Path,
        max_documents: usize,
        batch_size: usize,
        skip_bad: bool,
        no_timestamps: bool,
    ) -> Result<()> {
        let config = EngineConfig::new()
            .with_batch_size(batch_size)
            .with_max_documents(max_documents)
            .with_skip_bad_documents(skip_bad)
            .with_timestamp_detection(!no_timestamps);
        let mut engine = InferenceEngine::new().with_config(config);

        let schema = engine.infer_file(input).await?.ok_or_else(|| {
            Error::config(format!("no documents found in {}", input.display()))
        })?;
        self.print_schema(&schema);

        let stats = engine.stats();
        info!(
            documents = stats.documents_seen,
            skipped = stats.documents_skipped,
            batches = stats.batches_folded,
            duration_ms = stats.duration_ms,
            "inference complete"
        );
        Ok(())
    }

    fn merge_schemas(&self, paths: &[PathBuf]) -> Result<()> {
        let mut merged: Option<Schema> = None;
        for path in paths {
            let text = std::fs::read_to_string(path)?;
            merged = merge(merged, Some(schema_from_json(&text)?))?;
        }

        let schema =
            merged.ok_or_else(|| Error::config("no schemas to merge"))?;
        self.print_schema(&schema);
        Ok(())
    }

    async fn load(
        &self,
        input: &Path,
        table: &str,
        database: Option<&Path>,
        schema_only: bool,
        batch_size: usize,
        skip_bad: bool,
    ) -> Result<()> {
        let config = EngineConfig::new()
            .with_batch_size(batch_size)
            .with_skip_bad_documents(skip_bad);
        let mut engine = InferenceEngine::new().with_config(config);

        let documents = Arc::new(engine.read_documents(input).await?);
        let schema = engine
            .infer_documents(Arc::clone(&documents))
            .await?
            .ok_or_else(|| {
                Error::config(format!("no documents found in {}", input.display()))
            })?;

        let warehouse = match database {
            Some(path) => Warehouse::open(path)?,
            None => Warehouse::open_in_memory()?,
        };

        // The table may already exist; the final schema is the merge of its
        // recorded schema with the inferred one
        let final_schema = warehouse.ensure_table(table, &schema)?;
        self.print_schema(&final_schema);

        if !schema_only {
            let loaded = warehouse.load(table, &final_schema, &documents)?;
            info!(table, rows = loaded, "load complete");
        }
        Ok(())
    }

    async fn sample(&self, output: &Path, count: usize) -> Result<()> {
        let mut body = String::new();
        for index in 0..count {
            body.push_str(&sample_document(index).to_string());
            body.push('\n');
        }
        tokio::fs::write(output, body).await?;

        info!(path = %output.display(), documents = count, "wrote sample corpus");
        Ok(())
    }
}

/// Deterministic example document; optional fields vary by index
fn sample_document(index: usize) -> Value {
    let mut doc = serde_json::Map::new();
    doc.insert("always_there".into(), json!("hello!"));
    doc.insert(
        "ts".into(),
        json!(format!(
            "2020-06-18T{:02}:{:02}:{:02}",
            10 + (index / 3600) % 12,
            (index / 60) % 60,
            index % 60
        )),
    );
    if index % 2 == 0 {
        doc.insert("integer".into(), json!(index % 5 + 1));
    }
    if index % 3 == 0 {
        doc.insert(
            "string".into(),
            json!(if index % 2 == 0 { "hello" } else { "world" }),
        );
    }
    if index % 5 == 0 {
        doc.insert("boolean".into(), json!(index % 2 == 0));
    }
    if index % 7 == 0 {
        doc.insert(
            "complex".into(),
            json!({"always_there": "hello!", "integer": index % 3}),
        );
    }
    if index % 4 == 0 {
        doc.insert("list".into(), json!([1, 2, 3]));
    }
    Value::Object(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_documents_are_valid() {
        for index in 0..100 {
            let doc = sample_document(index);
            let schema = crate::schema::extract_schema(&doc).unwrap();
            assert!(!schema.is_empty());

            let ts = doc.get("ts").and_then(Value::as_str).unwrap();
            assert!(crate::schema::parse_timestamp(ts).is_some());
        }
    }

    #[test]
    fn test_sample_documents_vary() {
        let with_integer = sample_document(0);
        let without_integer = sample_document(1);
        assert!(with_integer.get("integer").is_some());
        assert!(without_integer.get("integer").is_none());
    }
}
