//! TransitOps Search - cancellable query controllers
//!
//! This crate provides the data-fetching layer for list/search screens:
//! - Generation-tokened search controller guaranteeing at most one
//!   applied result per parameter tuple
//! - Infinite-scroll pagination controller with an explicit phase machine
//! - Per-entity query bindings over the REST client

pub mod controller;
pub mod pager;
pub mod queries;

pub use controller::{SearchController, SearchParams, SearchQuery, SearchState};
pub use pager::{FetchPhase, PagedController, PagedQuery};
pub use queries::{
    BusPageSearch, BusSearch, ConductorSearch, DriverSearch, EmployeeSearch, RouteSearch,
    TripSearch,
};
