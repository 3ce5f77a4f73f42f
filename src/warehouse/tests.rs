//! Warehouse tests

use super::*;
use crate::schema::{FieldMode, FieldSchema, FieldType};
use pretty_assertions::assert_eq;
use serde_json::json;

fn field(name: &str, field_type: FieldType, mode: FieldMode) -> FieldSchema {
    FieldSchema::primitive(name, field_type).with_mode(mode)
}

#[test]
fn test_column_type_rendering() {
    assert_eq!(
        column_type(&field("f", FieldType::Integer, FieldMode::Required)),
        "BIGINT"
    );
    assert_eq!(
        column_type(&field("f", FieldType::Timestamp, FieldMode::Nullable)),
        "TIMESTAMP"
    );
    assert_eq!(
        column_type(&field("f", FieldType::Integer, FieldMode::Repeated)),
        "BIGINT[]"
    );
    assert_eq!(
        column_type(&FieldSchema::record(
            "r",
            vec![
                field("a", FieldType::String, FieldMode::Required),
                field("b", FieldType::Float, FieldMode::Repeated),
            ],
        )),
        "STRUCT(\"a\" VARCHAR, \"b\" DOUBLE[])"
    );
}

#[test]
fn test_create_table_sql() {
    let schema = vec![
        field("name", FieldType::String, FieldMode::Required),
        field("count", FieldType::Integer, FieldMode::Nullable),
    ];

    assert_eq!(
        create_table_sql("events", &schema),
        "CREATE TABLE \"events\" (\"name\" VARCHAR NOT NULL, \"count\" BIGINT)"
    );
}

#[test]
fn test_alter_statements() {
    let existing = vec![
        field("name", FieldType::String, FieldMode::Required),
        field("count", FieldType::Integer, FieldMode::Required),
    ];
    let merged = vec![
        field("name", FieldType::String, FieldMode::Required),
        field("count", FieldType::Float, FieldMode::Nullable),
        field("extra", FieldType::Boolean, FieldMode::Nullable),
    ];

    let statements = alter_statements("events", &existing, &merged);

    assert_eq!(
        statements,
        vec![
            "ALTER TABLE \"events\" ALTER COLUMN \"count\" SET DATA TYPE DOUBLE".to_string(),
            "ALTER TABLE \"events\" ALTER COLUMN \"count\" DROP NOT NULL".to_string(),
            "ALTER TABLE \"events\" ADD COLUMN \"extra\" BOOLEAN".to_string(),
        ]
    );
}

#[test]
fn test_ensure_table_creates_and_records() {
    let warehouse = Warehouse::open_in_memory().unwrap();
    let schema = vec![field("name", FieldType::String, FieldMode::Required)];

    let created = warehouse.ensure_table("events", &schema).unwrap();
    assert_eq!(created, schema);

    let recorded = warehouse.recorded_schema("events").unwrap().unwrap();
    assert_eq!(recorded, schema);
}

#[test]
fn test_ensure_table_rejects_empty_schema() {
    let warehouse = Warehouse::open_in_memory().unwrap();

    let err = warehouse.ensure_table("events", &vec![]).unwrap_err();
    assert!(matches!(err, Error::Warehouse { .. }));
}

#[test]
fn test_ensure_table_reconciles() {
    let warehouse = Warehouse::open_in_memory().unwrap();

    let first = vec![
        field("name", FieldType::String, FieldMode::Required),
        field("count", FieldType::Integer, FieldMode::Required),
    ];
    warehouse.ensure_table("events", &first).unwrap();

    let second = vec![
        field("name", FieldType::String, FieldMode::Required),
        field("count", FieldType::Float, FieldMode::Required),
        field("extra", FieldType::Boolean, FieldMode::Required),
    ];
    let merged = warehouse.ensure_table("events", &second).unwrap();

    let count = merged.iter().find(|f| f.name == "count").unwrap();
    assert_eq!(count.field_type, FieldType::Float);

    // Fields on one side only are nullable after reconciliation
    let extra = merged.iter().find(|f| f.name == "extra").unwrap();
    assert_eq!(extra.mode, FieldMode::Nullable);

    let recorded = warehouse.recorded_schema("events").unwrap().unwrap();
    assert_eq!(recorded, merged);
}

#[test]
fn test_ensure_table_incompatible_schema_fails() {
    let warehouse = Warehouse::open_in_memory().unwrap();

    warehouse
        .ensure_table(
            "events",
            &vec![field("x", FieldType::Integer, FieldMode::Required)],
        )
        .unwrap();

    let err = warehouse
        .ensure_table(
            "events",
            &vec![field("x", FieldType::String, FieldMode::Required)],
        )
        .unwrap_err();
    assert!(err.is_merge());
}

#[test]
fn test_load_records() {
    let warehouse = Warehouse::open_in_memory().unwrap();
    let schema = vec![
        field("name", FieldType::String, FieldMode::Required),
        field("count", FieldType::Integer, FieldMode::Nullable),
    ];
    warehouse.ensure_table("events", &schema).unwrap();

    let records = vec![
        json!({"name": "a", "count": 1}),
        json!({"name": "b"}),
    ];
    let loaded = warehouse.load("events", &schema, &records).unwrap();

    assert_eq!(loaded, 2);
    assert_eq!(warehouse.count_rows("events").unwrap(), 2);
}

#[test]
fn test_load_nested_records() {
    let warehouse = Warehouse::open_in_memory().unwrap();
    let schema = vec![
        field("ts", FieldType::Timestamp, FieldMode::Required),
        FieldSchema::record(
            "started",
            vec![field("pid", FieldType::Integer, FieldMode::Required)],
        )
        .with_mode(FieldMode::Nullable),
        field("tags", FieldType::String, FieldMode::Repeated),
    ];
    warehouse.ensure_table("events", &schema).unwrap();

    let records = vec![
        json!({"ts": "2020-06-18T10:44:12", "started": {"pid": 45678}, "tags": ["a"]}),
        json!({"ts": "2020-06-18T10:44:13"}),
    ];
    let loaded = warehouse.load("events", &schema, &records).unwrap();

    assert_eq!(loaded, 2);
}

#[test]
fn test_load_empty_records() {
    let warehouse = Warehouse::open_in_memory().unwrap();
    let schema = vec![field("name", FieldType::String, FieldMode::Required)];
    warehouse.ensure_table("events", &schema).unwrap();

    assert_eq!(warehouse.load("events", &schema, &[]).unwrap(), 0);
}
