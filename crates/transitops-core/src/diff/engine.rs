//! Record diff computation engine.
//!
//! The core entry point is [`compare_records`], which accepts the working
//! copy and the backup snapshot of an entity as flat JSON objects and
//! produces a [`Comparison`]. [`compare`] is the typed convenience wrapper
//! used by the save handlers.

use crate::diff::model::{Comparison, FieldChange, Record};
use serde::Serialize;
use serde_json::Value;

/// True for the values a shallow comparison can handle: null, bool,
/// number, string.
fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Object(_) | Value::Array(_))
}

/// Find the first non-scalar field across both records, in sorted key order.
///
/// `serde_json::Map` iterates in sorted key order, so the working record's
/// keys are scanned first, then any backup-only keys.
fn first_non_scalar_field<'a>(working: &'a Record, backup: &'a Record) -> Option<&'a str> {
    for (key, value) in working {
        if !is_scalar(value) {
            return Some(key.as_str());
        }
    }
    for (key, value) in backup {
        if !is_scalar(value) && !working.contains_key(key) {
            return Some(key.as_str());
        }
    }
    None
}

/// Compare a working record against its backup snapshot.
///
/// Shallow, field-by-field comparison under strict `serde_json::Value`
/// equality. Pure and total: no side effects, never fails, never panics.
/// All abnormal conditions are encoded in the returned [`Comparison`]:
///
/// - Any object/array value on either side → `Unsupported`. A shallow
///   comparison of composite fields would report false positives, so the
///   limitation is made explicit instead.
/// - Differing key counts → `KeyCountMismatch`, without enumerating
///   individual diffs. Guards against partial/malformed backups.
/// - Otherwise the working record's key set is iterated; each field whose
///   value differs yields a [`FieldChange`] recording the backup's value as
///   `old` and the working value as `new`. A working key absent from the
///   backup reads as `Null` on the old side.
pub fn compare_records(working: &Record, backup: &Record) -> Comparison {
    if let Some(field) = first_non_scalar_field(working, backup) {
        return Comparison::Unsupported {
            field: field.to_string(),
            reason: "is not a scalar value; shallow comparison refused".to_string(),
        };
    }

    if working.len() != backup.len() {
        return Comparison::KeyCountMismatch {
            working: working.len(),
            backup: backup.len(),
        };
    }

    let mut changes: Vec<FieldChange> = Vec::new();
    for (key, new_value) in working {
        let old_value = backup.get(key).cloned().unwrap_or(Value::Null);
        if *new_value != old_value {
            changes.push(FieldChange {
                field: key.clone(),
                old: old_value,
                new: new_value.clone(),
            });
        }
    }

    if changes.is_empty() {
        Comparison::Match
    } else {
        Comparison::Changed { changes }
    }
}

/// Serialize an entity into the flat [`Record`] form the diff engine
/// consumes.
///
/// # Errors
///
/// - `Serialization`: the value cannot be serialized (e.g. a non-finite
///   float)
/// - `NotARecord`: the serialized root is not a JSON object
pub fn to_record<T: Serialize>(value: &T) -> crate::errors::Result<Record> {
    let raw = serde_json::to_value(value)?;
    match raw {
        Value::Object(map) => Ok(map),
        other => Err(crate::errors::OpsError::new(
            crate::errors::OpsErrorKind::NotARecord,
        )
        .with_op("to_record")
        .with_message(format!(
            "expected a JSON object at the record root, got: {}",
            other
        ))),
    }
}

/// Typed entry point: serialize both sides and compare.
///
/// Total like [`compare_records`]: a value whose serialized root is not a
/// flat object is reported as `Unsupported`, never raised.
pub fn compare<T: Serialize>(working: &T, backup: &T) -> Comparison {
    let working_rec = match to_record(working) {
        Ok(rec) => rec,
        Err(e) => {
            return Comparison::Unsupported {
                field: "<root>".to_string(),
                reason: e.display_message(),
            }
        }
    };
    let backup_rec = match to_record(backup) {
        Ok(rec) => rec,
        Err(e) => {
            return Comparison::Unsupported {
                field: "<root>".to_string(),
                reason: e.display_message(),
            }
        }
    };
    compare_records(&working_rec, &backup_rec)
}
