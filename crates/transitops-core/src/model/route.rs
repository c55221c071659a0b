use serde::{Deserialize, Serialize};

/// A bus route.
///
/// Carries a composite field (`major_stops`), so the shallow diff engine
/// refuses this record by design. Route edit screens must surface the
/// comparison as indeterminate instead of treating it as "no changes".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: i64,

    /// Public route number, e.g. "138"
    pub route_number: String,

    pub origin: String,
    pub destination: String,

    /// Route length in kilometres
    pub distance_km: f64,

    /// Named intermediate stops in travel order
    pub major_stops: Vec<String>,
}

impl Route {
    pub fn new(id: i64, route_number: String, origin: String, destination: String) -> Self {
        Self {
            id,
            route_number,
            origin,
            destination,
            distance_km: 0.0,
            major_stops: Vec::new(),
        }
    }

    pub fn has_stops(&self) -> bool {
        !self.major_stops.is_empty()
    }

    /// "Origin - Destination" display label.
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.origin, self.destination)
    }
}
