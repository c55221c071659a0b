use serde::{Deserialize, Serialize};

/// A console user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub email: String,

    /// Access role, e.g. "admin" or "operator"
    pub role: String,

    pub active: bool,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}
