use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of travel along a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripDirection {
    Outbound,
    Inbound,
}

/// A scheduled departure of a bus along a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTrip {
    pub id: i64,
    pub route_id: i64,
    pub bus_id: i64,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub direction: TripDirection,
}

impl ScheduledTrip {
    pub fn is_outbound(&self) -> bool {
        self.direction == TripDirection::Outbound
    }
}

/// Lifecycle state of a crew assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

/// Crew assignment binding a driver and conductor to a scheduled trip on
/// a service date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: i64,
    pub trip_id: i64,
    pub driver_id: i64,
    pub conductor_id: i64,

    /// Service date as "YYYY-MM-DD"
    pub service_date: String,

    pub status: AssignmentStatus,
}

impl Assignment {
    pub fn is_settled(&self) -> bool {
        matches!(
            self.status,
            AssignmentStatus::Completed | AssignmentStatus::Cancelled
        )
    }
}
