use serde::{Deserialize, Serialize};

/// A bus in the fleet.
///
/// Flat scalar record, safe for shallow comparison in the diff engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bus {
    /// Server-assigned identifier
    pub id: i64,

    /// Registration plate, e.g. "NB-1234"
    pub registration_number: String,

    /// Manufacturer model name
    pub model: String,

    /// Seated passenger capacity
    pub seating_capacity: u32,

    /// Standing passenger capacity
    pub standing_capacity: u32,

    /// False when the bus is withdrawn from service
    pub active: bool,
}

impl Bus {
    pub fn new(id: i64, registration_number: String, model: String) -> Self {
        Self {
            id,
            registration_number,
            model,
            seating_capacity: 0,
            standing_capacity: 0,
            active: true,
        }
    }

    /// Total passenger capacity, seated plus standing.
    pub fn total_capacity(&self) -> u32 {
        self.seating_capacity + self.standing_capacity
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}
