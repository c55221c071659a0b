//! Human-readable rendering of a [`Comparison`].
//!
//! The console logs what changed before a save request goes out; this
//! module turns the structured outcome into the short lines those logs
//! carry.

use crate::diff::model::{Comparison, FieldChange};
use serde_json::Value;

/// Render a single JSON scalar for display. Strings are quoted so an
/// empty string stays visible; null reads as "(none)".
fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "(none)".to_string(),
        Value::String(s) => format!("\"{}\"", s),
        other => other.to_string(),
    }
}

fn render_change(change: &FieldChange) -> String {
    format!(
        "{}: {} -> {}",
        change.field,
        render_value(&change.old),
        render_value(&change.new)
    )
}

/// Render a comparison outcome as display lines, one per change.
///
/// `Match` renders as a single "no changes" line; the error outcomes
/// render their [`Comparison::message`].
pub fn render_change_summary(comparison: &Comparison) -> Vec<String> {
    match comparison {
        Comparison::Match => vec!["no changes".to_string()],
        Comparison::Changed { changes } => changes.iter().map(render_change).collect(),
        other => vec![other.message().unwrap_or_default()],
    }
}
