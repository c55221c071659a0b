//! TransitOps Client - REST boundary for the transit admin console
//!
//! This crate wraps the backend's REST API:
//! - Fetch-by-id with 404 mapped to `None`
//! - Create/update endpoints returning the persisted record
//! - Per-entity search with blank-aware filter structs
//! - Paginated bus search via the backend's `Page` envelope
//! - Diff-gated save handlers over draft pairs

pub mod client;
pub mod editor;
pub mod error;
pub mod types;

pub use client::ApiClient;
pub use editor::SaveOutcome;
pub use error::{ClientError, Result};
pub use types::{
    AuditFilter, BusFilter, ClientConfig, EmployeeFilter, Page, RouteFilter, TripFilter,
};
