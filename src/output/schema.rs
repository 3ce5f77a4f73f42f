//! Schema-driven JSON to Arrow conversion
//!
//! Builds Arrow RecordBatches from raw JSON documents, typed by the inferred
//! schema rather than re-inferred from the records. Values that do not
//! coerce to their column type become null.

use crate::error::{Error, Result};
use crate::schema::{parse_timestamp, FieldMode, FieldSchema, FieldType, Schema};
use arrow::array::{
    ArrayRef, BooleanArray, Float64Array, Int64Array, ListArray, StringArray, StructArray,
    TimestampMicrosecondArray,
};
use arrow::buffer::{NullBuffer, OffsetBuffer};
use arrow::datatypes::{DataType, Field, Fields, Schema as ArrowSchema, TimeUnit};
use arrow::record_batch::RecordBatch;
use serde_json::Value;
use std::sync::Arc;

/// Convert an inferred schema to an Arrow schema
///
/// All Arrow fields are declared nullable; REQUIRED-ness is enforced at the
/// warehouse DDL layer, not in Arrow.
pub fn schema_to_arrow(schema: &Schema) -> ArrowSchema {
    ArrowSchema::new(schema.iter().map(field_to_arrow).collect::<Vec<_>>())
}

fn field_to_arrow(field: &FieldSchema) -> Field {
    let element = element_type(field);
    let data_type = if field.mode == FieldMode::Repeated {
        DataType::List(Arc::new(Field::new("item", element, true)))
    } else {
        element
    };
    Field::new(&field.name, data_type, true)
}

fn element_type(field: &FieldSchema) -> DataType {
    match field.field_type {
        FieldType::Boolean => DataType::Boolean,
        FieldType::Integer => DataType::Int64,
        FieldType::Float => DataType::Float64,
        FieldType::String => DataType::Utf8,
        FieldType::Timestamp => DataType::Timestamp(TimeUnit::Microsecond, None),
        FieldType::Record => DataType::Struct(Fields::from(
            field.children().iter().map(field_to_arrow).collect::<Vec<_>>(),
        )),
    }
}

/// Convert JSON documents to an Arrow RecordBatch typed by the schema
pub fn records_to_batch(schema: &Schema, records: &[Value]) -> Result<RecordBatch> {
    let arrow_schema = Arc::new(schema_to_arrow(schema));
    if schema.is_empty() {
        return Ok(RecordBatch::new_empty(arrow_schema));
    }

    let mut columns: Vec<ArrayRef> = Vec::with_capacity(schema.len());
    for field in schema {
        let values: Vec<Option<&Value>> = records.iter().map(|r| r.get(&field.name)).collect();
        columns.push(build_column(field, &values)?);
    }

    RecordBatch::try_new(arrow_schema, columns)
        .map_err(|e| Error::output(format!("failed to create record batch: {e}")))
}

/// Build the Arrow column for one field
fn build_column(field: &FieldSchema, values: &[Option<&Value>]) -> Result<ArrayRef> {
    if field.mode == FieldMode::Repeated {
        build_list_column(field, values)
    } else {
        build_element_array(field, values)
    }
}

/// Build a flat array of one field's element type
fn build_element_array(field: &FieldSchema, values: &[Option<&Value>]) -> Result<ArrayRef> {
    match field.field_type {
        FieldType::Boolean => {
            let arr: BooleanArray = values.iter().map(|v| v.and_then(Value::as_bool)).collect();
            Ok(Arc::new(arr))
        }
        FieldType::Integer => {
            let arr: Int64Array = values.iter().map(|v| v.and_then(Value::as_i64)).collect();
            Ok(Arc::new(arr))
        }
        FieldType::Float => {
            let arr: Float64Array = values.iter().map(|v| v.and_then(Value::as_f64)).collect();
            Ok(Arc::new(arr))
        }
        FieldType::String => {
            let arr: StringArray = values
                .iter()
                .map(|v| {
                    v.map(|v| match v {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                })
                .collect();
            Ok(Arc::new(arr))
        }
        FieldType::Timestamp => {
            let arr: TimestampMicrosecondArray = values
                .iter()
                .map(|v| {
                    v.and_then(Value::as_str)
                        .and_then(parse_timestamp)
                        .map(|dt| dt.and_utc().timestamp_micros())
                })
                .collect();
            Ok(Arc::new(arr))
        }
        FieldType::Record => build_struct_array(field, values),
    }
}

/// Build a struct array for a record field
fn build_struct_array(field: &FieldSchema, values: &[Option<&Value>]) -> Result<ArrayRef> {
    let validity: NullBuffer = values
        .iter()
        .map(|v| matches!(v, Some(Value::Object(_))))
        .collect::<Vec<bool>>()
        .into();

    let children = field.children();
    if children.is_empty() {
        return Ok(Arc::new(StructArray::new_empty_fields(
            values.len(),
            Some(validity),
        )));
    }

    let mut child_arrays: Vec<ArrayRef> = Vec::with_capacity(children.len());
    for child in children {
        let child_values: Vec<Option<&Value>> = values
            .iter()
            .map(|v| v.and_then(|v| v.get(&child.name)))
            .collect();
        child_arrays.push(build_column(child, &child_values)?);
    }

    let fields = Fields::from(children.iter().map(field_to_arrow).collect::<Vec<_>>());
    Ok(Arc::new(StructArray::new(
        fields,
        child_arrays,
        Some(validity),
    )))
}

/// Build a list array for a REPEATED field
fn build_list_column(field: &FieldSchema, values: &[Option<&Value>]) -> Result<ArrayRef> {
    let mut items: Vec<Option<&Value>> = Vec::new();
    let mut offsets: Vec<i32> = vec![0];
    let mut validity: Vec<bool> = Vec::with_capacity(values.len());

    for value in values {
        if let Some(Value::Array(elements)) = value {
            for item in elements {
                items.push(Some(item));
            }
            validity.push(true);
        } else {
            validity.push(false);
        }
        let offset = i32::try_from(items.len())
            .map_err(|_| Error::output("array column too large for i32 offsets"))?;
        offsets.push(offset);
    }

    let element_array = build_element_array(field, &items)?;
    let item_field = Arc::new(Field::new("item", element_type(field), true));

    Ok(Arc::new(ListArray::new(
        item_field,
        OffsetBuffer::new(offsets.into()),
        element_array,
        Some(NullBuffer::from(validity)),
    )))
}
