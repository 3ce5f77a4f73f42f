//! Schema merging
//!
//! Combines two schemas into the least restrictive schema both satisfy,
//! following the type and mode compatibility lattices. The operation is
//! commutative and associative with absence as the identity element, so it
//! can fold arbitrarily sharded, arbitrarily ordered document batches.

use super::types::{FieldMode, FieldSchema, FieldType, Schema};
use crate::error::{Error, Result};

/// Merge two optional schemas; absence is the two-sided identity
pub fn merge(a: Option<Schema>, b: Option<Schema>) -> Result<Option<Schema>> {
    match (a, b) {
        (None, b) => Ok(b),
        (a, None) => Ok(a),
        (Some(a), Some(b)) => Ok(Some(merge_schemas(&a, &b)?)),
    }
}

/// Merge two schemas into one relaxed schema compatible with both
///
/// Fields present in both sides merge pairwise; fields present on one side
/// only are relaxed, because a field absent from one branch must not be
/// required. Matched fields come first (left operand order), then left-only
/// fields, then right-only fields.
pub fn merge_schemas(a: &[FieldSchema], b: &[FieldSchema]) -> Result<Schema> {
    let mut merged = Vec::with_capacity(a.len().max(b.len()));

    for field_a in a {
        if let Some(field_b) = b.iter().find(|f| f.name == field_a.name) {
            merged.push(merge_field(field_a, field_b)?);
        }
    }
    for field_a in a {
        if !b.iter().any(|f| f.name == field_a.name) {
            merged.push(relax_field(field_a));
        }
    }
    for field_b in b {
        if !a.iter().any(|f| f.name == field_b.name) {
            merged.push(relax_field(field_b));
        }
    }

    Ok(merged)
}

/// Merge two fields of the same name
///
/// Records merge recursively on their children; scalars merge type and mode
/// through the lattices. A record on one side and a scalar on the other is a
/// hard incompatibility.
pub fn merge_field(a: &FieldSchema, b: &FieldSchema) -> Result<FieldSchema> {
    if a.name != b.name {
        return Err(Error::merge(format!(
            "cannot merge fields with different names: '{}' vs '{}'",
            a.name, b.name
        )));
    }

    match (a.field_type.is_record(), b.field_type.is_record()) {
        (true, true) => Ok(FieldSchema {
            name: a.name.clone(),
            field_type: FieldType::Record,
            mode: common_mode(a.mode, b.mode, &a.name)?,
            fields: Some(merge_schemas(a.children(), b.children())?),
        }),
        (false, false) => Ok(FieldSchema {
            name: a.name.clone(),
            field_type: common_type(a.field_type, b.field_type, &a.name)?,
            mode: common_mode(a.mode, b.mode, &a.name)?,
            fields: None,
        }),
        _ => Err(Error::merge(format!(
            "field '{}' is a record on one side and a scalar on the other",
            a.name
        ))),
    }
}

/// Relax a field that is absent from the other side of a merge
///
/// REQUIRED demotes to NULLABLE; NULLABLE and REPEATED are already
/// compatible with absence. Record children are left untouched: they are
/// self-consistent within the branch that carries them.
pub fn relax_field(field: &FieldSchema) -> FieldSchema {
    let mut relaxed = field.clone();
    if relaxed.mode == FieldMode::Required {
        relaxed.mode = FieldMode::Nullable;
    }
    relaxed
}

/// Type lattice: T+T=T, INTEGER+FLOAT=FLOAT, anything else is incompatible
fn common_type(a: FieldType, b: FieldType, field: &str) -> Result<FieldType> {
    match (a, b) {
        _ if a == b => Ok(a),
        (FieldType::Integer, FieldType::Float) | (FieldType::Float, FieldType::Integer) => {
            Ok(FieldType::Float)
        }
        _ => Err(Error::merge(format!(
            "incompatible types for field '{field}': {a} vs {b}"
        ))),
    }
}

/// Mode lattice: M+M=M, NULLABLE+REQUIRED=NULLABLE; REPEATED never pairs
/// with another mode
fn common_mode(a: FieldMode, b: FieldMode, field: &str) -> Result<FieldMode> {
    match (a, b) {
        _ if a == b => Ok(a),
        (FieldMode::Nullable, FieldMode::Required) | (FieldMode::Required, FieldMode::Nullable) => {
            Ok(FieldMode::Nullable)
        }
        _ => Err(Error::merge(format!(
            "incompatible modes for field '{field}': {a} vs {b}"
        ))),
    }
}
