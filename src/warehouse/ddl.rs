//! Schema to DuckDB DDL rendering

use crate::schema::{FieldMode, FieldSchema, Schema};

/// Quote an identifier for use in SQL
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Render the DuckDB type of one field, including list and struct wrappers
pub fn column_type(field: &FieldSchema) -> String {
    use crate::schema::FieldType;

    let element = match field.field_type {
        FieldType::Boolean => "BOOLEAN".to_string(),
        FieldType::Integer => "BIGINT".to_string(),
        FieldType::Float => "DOUBLE".to_string(),
        FieldType::String => "VARCHAR".to_string(),
        FieldType::Timestamp => "TIMESTAMP".to_string(),
        FieldType::Record => {
            let children: Vec<String> = field
                .children()
                .iter()
                .map(|c| format!("{} {}", quote_ident(&c.name), column_type(c)))
                .collect();
            format!("STRUCT({})", children.join(", "))
        }
    };

    if field.mode == FieldMode::Repeated {
        format!("{element}[]")
    } else {
        element
    }
}

/// Render the CREATE TABLE statement for a schema
///
/// REQUIRED top-level columns are NOT NULL; nested modes are recorded in the
/// metadata table instead, because SQL cannot express them on struct members.
pub fn create_table_sql(table: &str, schema: &Schema) -> String {
    let columns: Vec<String> = schema
        .iter()
        .map(|field| {
            let mut column = format!("{} {}", quote_ident(&field.name), column_type(field));
            if field.mode == FieldMode::Required {
                column.push_str(" NOT NULL");
            }
            column
        })
        .collect();
    format!("CREATE TABLE {} ({})", quote_ident(table), columns.join(", "))
}

/// Render the ALTER statements that take a table from the existing schema to
/// the merged one
///
/// New top-level fields become ADD COLUMN (they are NULLABLE by relaxation,
/// so no NOT NULL). Fields whose rendered type changed get SET DATA TYPE,
/// which also covers nested struct widening. Newly relaxed columns get
/// DROP NOT NULL.
pub fn alter_statements(table: &str, existing: &Schema, merged: &Schema) -> Vec<String> {
    let table_ident = quote_ident(table);
    let mut statements = Vec::new();

    for field in merged {
        let column = quote_ident(&field.name);
        match existing.iter().find(|f| f.name == field.name) {
            None => {
                statements.push(format!(
                    "ALTER TABLE {table_ident} ADD COLUMN {column} {}",
                    column_type(field)
                ));
            }
            Some(old) => {
                let new_type = column_type(field);
                if column_type(old) != new_type {
                    statements.push(format!(
                        "ALTER TABLE {table_ident} ALTER COLUMN {column} SET DATA TYPE {new_type}"
                    ));
                }
                if old.mode == FieldMode::Required && field.mode == FieldMode::Nullable {
                    statements.push(format!(
                        "ALTER TABLE {table_ident} ALTER COLUMN {column} DROP NOT NULL"
                    ));
                }
            }
        }
    }

    statements
}
