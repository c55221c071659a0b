//! TransitOps Core - change detection and snapshot reconciliation
//!
//! This crate provides the client-side core for the transit admin console,
//! including:
//! - Shallow record diff engine with explicit refusal semantics
//! - Working/backup snapshot pairs and diff-gated save decisions
//! - Entity models matching the backend's wire contracts
//! - Structured error facility with stable error codes
//! - Logging facility with operation-lifecycle macros and test capture

pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod snapshot;

// Re-export commonly used types
pub use diff::{compare, compare_records, render_change_summary, Comparison, FieldChange, Record};
pub use errors::{OpsError, OpsErrorKind, Result};
pub use transitops_core_types::{RequestContext, RequestId, TraceId};
pub use snapshot::{DraftPair, SaveDecision};
