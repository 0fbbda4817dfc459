//! Platform user records (`administracion/users/`).

use serde::{Deserialize, Serialize};

use crate::types::{RoleId, UserId};

use super::default_true;

/// A platform user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "nombre", default)]
    pub first_name: Option<String>,
    #[serde(rename = "apellido", default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Role name for display; the role id is only used in write payloads.
    #[serde(rename = "rol", default)]
    pub role: Option<String>,
}

impl User {
    /// Display name: full name when present, username otherwise.
    #[must_use]
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.clone(),
            _ => self.username.clone(),
        }
    }
}

/// Writable user fields for admin create/update calls.
#[derive(Debug, Clone, Serialize)]
pub struct UserInput {
    pub username: String,
    pub email: String,
    /// Omitted on update when the password is left unchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(rename = "rol_id", skip_serializing_if = "Option::is_none")]
    pub role_id: Option<RoleId>,
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_defaults() {
        let json = r#"{"id": 1, "username": "root"}"#;
        let user: User = serde_json::from_str(json).expect("deserialize");
        assert!(user.is_active);
        assert!(!user.is_staff);
        assert_eq!(user.display_name(), "root");
    }

    #[test]
    fn test_display_name_prefers_full_name() {
        let json = r#"{"id": 1, "username": "aflores", "nombre": "Ana", "apellido": "Flores"}"#;
        let user: User = serde_json::from_str(json).expect("deserialize");
        assert_eq!(user.display_name(), "Ana Flores");
    }
}
