//! Audit log records (`administracion/bitacoras/`). Read-only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::AuditEntryId;

/// One audit log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: AuditEntryId,
    #[serde(rename = "usuario", default)]
    pub username: Option<String>,
    #[serde(rename = "accion")]
    pub action: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(rename = "fecha", default)]
    pub timestamp: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_entry_from_wire() {
        let json = r#"{
            "id": 100,
            "usuario": "admin",
            "accion": "LOGIN",
            "ip": "10.0.0.5",
            "fecha": "2025-03-01T12:30:00Z"
        }"#;
        let entry: AuditEntry = serde_json::from_str(json).expect("deserialize");
        assert_eq!(entry.action, "LOGIN");
        assert_eq!(entry.username.as_deref(), Some("admin"));
        assert!(entry.timestamp.is_some());
    }
}
