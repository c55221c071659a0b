//! Client configuration, filter structs, and the pagination envelope.

use serde::{Deserialize, Serialize};

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL, e.g. "https://transit.example.com/api"
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            timeout_secs: 30,
        }
    }
}

/// The backend's pagination envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Records on this page
    pub content: Vec<T>,

    /// Total number of pages for the query
    pub total_pages: u32,

    /// Zero-based index of this page
    pub number: u32,
}

impl<T> Page<T> {
    /// True when this is the final page; further requests would run past
    /// the end.
    pub fn is_last(&self) -> bool {
        self.total_pages == 0 || self.number >= self.total_pages - 1
    }
}

fn blank(s: &Option<String>) -> bool {
    match s {
        Some(v) => v.trim().is_empty(),
        None => true,
    }
}

/// Bus search filters. All fields optional; a fully blank filter never
/// reaches the network.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BusFilter {
    pub registration_number: Option<String>,
    pub model: Option<String>,
    pub active: Option<bool>,
}

impl BusFilter {
    pub fn is_blank(&self) -> bool {
        blank(&self.registration_number) && blank(&self.model) && self.active.is_none()
    }
}

/// Crew search filters, shared by driver, conductor, and mixed-role
/// employee searches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeFilter {
    pub name: Option<String>,
    pub nic: Option<String>,
}

impl EmployeeFilter {
    pub fn is_blank(&self) -> bool {
        blank(&self.name) && blank(&self.nic)
    }
}

/// Route search filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteFilter {
    pub route_number: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
}

impl RouteFilter {
    pub fn is_blank(&self) -> bool {
        blank(&self.route_number) && blank(&self.origin) && blank(&self.destination)
    }
}

/// Scheduled trip search filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripFilter {
    pub route_id: Option<i64>,
    pub bus_id: Option<i64>,
    pub service_date: Option<String>,
}

impl TripFilter {
    pub fn is_blank(&self) -> bool {
        self.route_id.is_none() && self.bus_id.is_none() && blank(&self.service_date)
    }
}

/// Audit log listing filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditFilter {
    pub actor: Option<String>,
    pub entity_kind: Option<String>,
}

impl AuditFilter {
    pub fn is_blank(&self) -> bool {
        blank(&self.actor) && blank(&self.entity_kind)
    }
}
