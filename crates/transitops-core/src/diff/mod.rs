//! Record diff engine.
//!
//! Compares a live in-memory record (`working`) against its last-known
//! persisted snapshot (`backup`) and produces a shallow, field-by-field
//! change report consumed by the save handlers before an update request
//! is issued.
//!
//! ## Entry points
//!
//! ```ignore
//! use transitops_core::diff::engine::{compare, compare_records};
//!
//! let comparison = compare(&working_bus, &backup_bus);
//! let summary = transitops_core::diff::human_summary::render_change_summary(&comparison);
//! ```
//!
//! ## Guarantees
//!
//! - **Totality**: the comparison never fails and never panics; abnormal
//!   conditions are encoded in the returned [`model::Comparison`].
//! - **Shallow by contract**: records with object/array fields are refused
//!   (`Unsupported`) rather than diffed with reference-style false positives.
//! - **Determinism**: change entries are emitted in sorted key order.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::{compare, compare_records, to_record};
pub use human_summary::render_change_summary;
pub use model::{Comparison, FieldChange, Record};
