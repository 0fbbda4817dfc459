//! Role and permission records (`administracion/roles/`, `administracion/permissions/`).

use serde::{Deserialize, Serialize};

use crate::types::{PermissionId, RoleId};

/// An access role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: Vec<PermissionId>,
}

/// A grantable permission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    pub id: PermissionId,
    pub name: String,
    #[serde(default)]
    pub codename: Option<String>,
}

/// Writable role fields for create/update calls.
#[derive(Debug, Clone, Serialize)]
pub struct RoleInput {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub permissions: Vec<PermissionId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_wire() {
        let json = r#"{"id": 1, "nombre": "Vendedor", "permissions": [3, 8]}"#;
        let role: Role = serde_json::from_str(json).expect("deserialize");
        assert_eq!(role.name, "Vendedor");
        assert_eq!(role.permissions.len(), 2);
    }
}
