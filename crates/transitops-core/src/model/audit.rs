use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry in the console's audit trail.
///
/// Read-only on the client; the backend appends entries as mutations are
/// confirmed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    pub id: i64,

    /// Username of the account that performed the action
    pub actor: String,

    /// Action verb, e.g. "update", "create"
    pub action: String,

    /// Kind of record touched, e.g. "bus"
    pub entity_kind: String,

    pub entity_id: i64,

    /// Human-readable detail, typically the rendered change summary
    pub detail: String,

    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let entry = AuditLog {
            id: 1,
            actor: "sanjeewa".to_string(),
            action: "update".to_string(),
            entity_kind: "bus".to_string(),
            entity_id: 42,
            detail: "seatingCapacity: 49 -> 54".to_string(),
            timestamp: Utc::now(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("entityKind").is_some());
        assert!(json.get("entityId").is_some());
    }
}
