use serde::{Deserialize, Serialize};

/// A bus driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: i64,
    pub name: String,

    /// National identity card number
    pub nic: String,

    pub driving_license_number: String,
    pub contact_number: String,
    pub address: String,
}

/// A bus conductor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conductor {
    pub id: i64,
    pub name: String,

    /// National identity card number
    pub nic: String,

    pub conductor_license_number: String,
    pub contact_number: String,
    pub address: String,
}

/// Either kind of crew member, discriminated by an explicit `role` field
/// set by the server contract.
///
/// Mixed-role listings carry the discriminant on the wire, so driver and
/// conductor records are told apart by tag rather than by probing for a
/// licence field that only one variant carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Employee {
    Driver(Driver),
    Conductor(Conductor),
}

impl Employee {
    pub fn id(&self) -> i64 {
        match self {
            Employee::Driver(d) => d.id,
            Employee::Conductor(c) => c.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Employee::Driver(d) => &d.name,
            Employee::Conductor(c) => &c.name,
        }
    }

    pub fn nic(&self) -> &str {
        match self {
            Employee::Driver(d) => &d.nic,
            Employee::Conductor(c) => &c.nic,
        }
    }

    pub fn is_driver(&self) -> bool {
        matches!(self, Employee::Driver(_))
    }

    pub fn is_conductor(&self) -> bool {
        matches!(self, Employee::Conductor(_))
    }
}
