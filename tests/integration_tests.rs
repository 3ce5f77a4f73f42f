//! Integration tests
//!
//! Tests the full end-to-end flow: JSONL input → inference engine →
//! merged schema → warehouse table → bulk load.

use pretty_assertions::assert_eq;
use schemaforge::engine::{EngineConfig, InferenceEngine};
use schemaforge::schema::{schema_from_json, schema_to_json, FieldMode, FieldType};
use schemaforge::warehouse::Warehouse;
use schemaforge::SchemaAccumulator;
use serde_json::json;
use std::io::Write;
use std::sync::Arc;

fn write_jsonl(lines: &[serde_json::Value]) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".jsonl")
        .tempfile()
        .unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file.flush().unwrap();
    file
}

// ============================================================================
// Inference Pipeline
// ============================================================================

#[tokio::test]
async fn test_infer_file_end_to_end() {
    let file = write_jsonl(&[
        json!({"ts": "2020-06-18T10:44:12", "started": {"pid": 45678}}),
        json!({"ts": "2020-06-18T10:44:13", "logged_in": {"username": "foo"}}),
    ]);

    let mut engine = InferenceEngine::new();
    let schema = engine.infer_file(file.path()).await.unwrap().unwrap();

    assert_eq!(
        schema_to_json(&schema),
        json!([
            {"name": "ts", "type": "TIMESTAMP", "mode": "REQUIRED"},
            {
                "name": "started", "type": "RECORD", "mode": "NULLABLE",
                "fields": [{"name": "pid", "type": "INTEGER", "mode": "REQUIRED"}]
            },
            {
                "name": "logged_in", "type": "RECORD", "mode": "NULLABLE",
                "fields": [{"name": "username", "type": "STRING", "mode": "REQUIRED"}]
            }
        ])
    );
}

#[tokio::test]
async fn test_infer_is_batch_shape_independent() {
    let documents: Vec<serde_json::Value> = (0..50)
        .map(|i| {
            let mut doc = serde_json::Map::new();
            doc.insert("id".into(), json!(i));
            if i % 2 == 0 {
                doc.insert("score".into(), json!(i as f64 / 2.0));
            }
            if i % 3 == 0 {
                doc.insert("nested".into(), json!({"k": "v"}));
            }
            serde_json::Value::Object(doc)
        })
        .collect();

    // Fold with wildly different batch sizes; the schema must not change
    let mut sequential = InferenceEngine::new()
        .with_config(EngineConfig::new().with_batch_size(1000));
    let expected = sequential
        .infer_documents(Arc::new(documents.clone()))
        .await
        .unwrap()
        .unwrap();

    for batch_size in [1, 3, 7] {
        let mut engine = InferenceEngine::new()
            .with_config(EngineConfig::new().with_batch_size(batch_size));
        let mut schema = engine
            .infer_documents(Arc::new(documents.clone()))
            .await
            .unwrap()
            .unwrap();

        let mut expected = expected.clone();
        schema.sort_by(|a, b| a.name.cmp(&b.name));
        expected.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(schema, expected, "batch_size {batch_size}");
    }
}

#[tokio::test]
async fn test_incompatible_file_fails() {
    let file = write_jsonl(&[
        json!({"field": {"a": 1}}),
        json!({"field": "scalar"}),
    ]);

    let mut engine = InferenceEngine::new();
    let err = engine.infer_file(file.path()).await.unwrap_err();
    assert!(err.is_merge());
}

// ============================================================================
// Accumulator as a tree reduce
// ============================================================================

#[test]
fn test_accumulator_tree_reduce() {
    let documents = [
        json!({"a": 1}),
        json!({"a": 2, "b": "x"}),
        json!({"b": "y", "c": true}),
        json!({"a": 3, "c": false}),
    ];

    // Linear fold
    let mut linear = SchemaAccumulator::new();
    for doc in &documents {
        linear.add_document(doc).unwrap();
    }

    // Tree fold: (0,1) and (2,3) folded separately, then combined
    let mut left = SchemaAccumulator::new();
    left.add_document(&documents[0]).unwrap();
    left.add_document(&documents[1]).unwrap();
    let mut right = SchemaAccumulator::new();
    right.add_document(&documents[2]).unwrap();
    right.add_document(&documents[3]).unwrap();
    left.merge(right).unwrap();

    let mut linear_schema = linear.finish().unwrap();
    let mut tree_schema = left.finish().unwrap();
    linear_schema.sort_by(|a, b| a.name.cmp(&b.name));
    tree_schema.sort_by(|a, b| a.name.cmp(&b.name));
    assert_eq!(linear_schema, tree_schema);
}

// ============================================================================
// Warehouse
// ============================================================================

#[tokio::test]
async fn test_infer_and_load() {
    let file = write_jsonl(&[
        json!({"ts": "2020-06-18T10:44:12", "name": "a", "count": 1}),
        json!({"ts": "2020-06-18T10:44:13", "name": "b"}),
        json!({"ts": "2020-06-18T10:44:14", "name": "c", "count": 3}),
    ]);

    let mut engine = InferenceEngine::new();
    let documents = Arc::new(engine.read_documents(file.path()).await.unwrap());
    let schema = engine
        .infer_documents(Arc::clone(&documents))
        .await
        .unwrap()
        .unwrap();

    let warehouse = Warehouse::open_in_memory().unwrap();
    let final_schema = warehouse.ensure_table("events", &schema).unwrap();

    let loaded = warehouse.load("events", &final_schema, &documents).unwrap();
    assert_eq!(loaded, 3);
    assert_eq!(warehouse.count_rows("events").unwrap(), 3);
}

#[tokio::test]
async fn test_second_run_relaxes_table() {
    let warehouse = Warehouse::open_in_memory().unwrap();

    let first = write_jsonl(&[json!({"name": "a", "count": 1})]);
    let mut engine = InferenceEngine::new();
    let schema1 = engine.infer_file(first.path()).await.unwrap().unwrap();
    warehouse.ensure_table("events", &schema1).unwrap();

    // Second batch misses `count` and adds `extra`
    let second = write_jsonl(&[json!({"name": "b", "extra": true})]);
    let mut engine = InferenceEngine::new();
    let schema2 = engine.infer_file(second.path()).await.unwrap().unwrap();
    let reconciled = warehouse.ensure_table("events", &schema2).unwrap();

    let count = reconciled.iter().find(|f| f.name == "count").unwrap();
    assert_eq!(count.mode, FieldMode::Nullable);
    assert_eq!(count.field_type, FieldType::Integer);

    let extra = reconciled.iter().find(|f| f.name == "extra").unwrap();
    assert_eq!(extra.mode, FieldMode::Nullable);

    // Both batches load into the reconciled table
    let docs1 = Arc::new(engine.read_documents(first.path()).await.unwrap());
    let docs2 = Arc::new(engine.read_documents(second.path()).await.unwrap());
    warehouse.load("events", &reconciled, &docs1).unwrap();
    warehouse.load("events", &reconciled, &docs2).unwrap();
    assert_eq!(warehouse.count_rows("events").unwrap(), 2);
}

// ============================================================================
// Boundary contract
// ============================================================================

#[test]
fn test_schema_boundary_round_trip() {
    let text = r#"[
        {"name": "ts", "type": "TIMESTAMP", "mode": "REQUIRED"},
        {"name": "tags", "type": "STRING", "mode": "REPEATED"},
        {
            "name": "started", "type": "RECORD", "mode": "NULLABLE",
            "fields": [{"name": "pid", "type": "INTEGER", "mode": "REQUIRED"}]
        }
    ]"#;

    let schema = schema_from_json(text).unwrap();
    assert_eq!(schema.len(), 3);
    assert_eq!(schema[0].field_type, FieldType::Timestamp);
    assert_eq!(schema[1].mode, FieldMode::Repeated);
    assert_eq!(schema[2].children().len(), 1);

    let round_tripped = schema_from_json(&schema_to_json(&schema).to_string()).unwrap();
    assert_eq!(round_tripped, schema);
}
