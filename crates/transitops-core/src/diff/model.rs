//! Record diff output types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq`.
//! Change entries are kept in a sorted `Vec` for deterministic serialization.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A flat record: a JSON object whose values are expected to be scalars.
pub type Record = serde_json::Map<String, Value>;

/// A change to a single record field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldChange {
    /// Field name
    pub field: String,
    /// Value in the backup snapshot (`Null` when the field is absent there)
    pub old: Value,
    /// Value in the working copy
    pub new: Value,
}

/// The outcome of comparing a working record against its backup snapshot.
///
/// The comparison is total: every abnormal condition is encoded here, never
/// raised. Callers must check [`Comparison::is_error`] before trusting
/// [`Comparison::is_matching`]: an `Unsupported` outcome is indeterminate,
/// not "no changes".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Comparison {
    /// No field differs
    Match,
    /// At least one field differs under strict value equality
    Changed {
        /// One entry per changed field, in sorted key order
        changes: Vec<FieldChange>,
    },
    /// The two records have differing key counts; no per-field diff was
    /// attempted. Guards against partial or malformed backups.
    KeyCountMismatch {
        /// Key count of the working record
        working: usize,
        /// Key count of the backup record
        backup: usize,
    },
    /// A non-scalar (object/array) top-level field was present; the shallow
    /// comparison refuses to proceed rather than report false positives.
    Unsupported {
        /// First offending field, in sorted key order
        field: String,
        /// Human-readable description of the refusal
        reason: String,
    },
}

impl Comparison {
    /// True iff no field differs and the comparison was trustworthy.
    pub fn is_matching(&self) -> bool {
        matches!(self, Comparison::Match)
    }

    /// True iff the comparison could not be performed at all.
    ///
    /// A key-count mismatch is reported as non-matching but is not an
    /// error: the records were at least both flat and scalar.
    pub fn is_error(&self) -> bool {
        matches!(self, Comparison::Unsupported { .. })
    }

    /// The per-field change entries; empty for every non-`Changed` outcome.
    pub fn changes(&self) -> &[FieldChange] {
        match self {
            Comparison::Changed { changes } => changes,
            _ => &[],
        }
    }

    /// Human-readable description of an abnormal outcome, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            Comparison::Match | Comparison::Changed { .. } => None,
            Comparison::KeyCountMismatch { working, backup } => Some(format!(
                "records have a different property count ({} vs {})",
                working, backup
            )),
            Comparison::Unsupported { field, reason } => {
                Some(format!("field `{}` {}", field, reason))
            }
        }
    }
}
