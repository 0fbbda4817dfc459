//! Authentication payloads.

use serde::{Deserialize, Serialize};

use super::user::User;

/// Payload for `POST login/`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response of `POST login/` and `POST register/`: the token pair plus the
/// authenticated user.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthTokens {
    pub access: String,
    pub refresh: String,
    pub user: User,
}

/// Payload for `POST register/`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Payload for `POST logout/` (blacklists the refresh token).
#[derive(Debug, Clone, Serialize)]
pub struct LogoutRequest {
    pub refresh: String,
}

/// Payload for `POST refresh/`.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Response of `POST refresh/`.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
}

/// Payload for `POST change-password/`.
#[derive(Debug, Clone, Serialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

/// Payload for `PUT profile/`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "apellido", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "direccion", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_tokens_from_wire() {
        let json = r#"{
            "access": "eyJ.access",
            "refresh": "eyJ.refresh",
            "user": {"id": 1, "username": "ana", "email": "ana@example.com", "is_staff": false}
        }"#;
        let tokens: AuthTokens = serde_json::from_str(json).expect("deserialize");
        assert_eq!(tokens.user.username, "ana");
        assert!(!tokens.user.is_staff);
    }

    #[test]
    fn test_register_request_omits_empty_optionals() {
        let request = RegisterRequest {
            username: "ana".into(),
            email: "ana@example.com".into(),
            password: "hunter2hunter2".into(),
            first_name: "Ana".into(),
            last_name: None,
            phone: None,
        };
        let json = serde_json::to_value(&request).expect("serialize");
        assert!(json.get("apellido").is_none());
        assert!(json.get("telefono").is_none());
        assert_eq!(json["nombre"], "Ana");
    }
}
