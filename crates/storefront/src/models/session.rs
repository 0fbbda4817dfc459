//! Session-related types.
//!
//! The session is the server-side analog of the original client's local
//! storage: it holds the user plus the access/refresh token pair, created on
//! login/register and destroyed wholesale on logout.

use serde::{Deserialize, Serialize};

use smartsales_core::api::AuthTokens;
use smartsales_core::types::UserId;

/// Session-stored user identity and credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's backend ID.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Email address, when the backend has one.
    pub email: Option<String>,
    /// Whether the user may enter the admin console.
    pub is_staff: bool,
    /// Bearer token attached to every backend request.
    pub access_token: String,
    /// Refresh token, only sent to the backend on logout/refresh.
    pub refresh_token: String,
}

impl CurrentUser {
    /// Build the session record from a login/register response.
    #[must_use]
    pub fn from_tokens(tokens: AuthTokens) -> Self {
        Self {
            id: tokens.user.id,
            username: tokens.user.username,
            email: tokens.user.email,
            is_staff: tokens.user.is_staff,
            access_token: tokens.access,
            refresh_token: tokens.refresh,
        }
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartsales_core::api::User;

    #[test]
    fn test_from_tokens() {
        let tokens = AuthTokens {
            access: "acc".into(),
            refresh: "ref".into(),
            user: User {
                id: UserId::new(4),
                username: "ana".into(),
                email: Some("ana@example.com".into()),
                first_name: None,
                last_name: None,
                is_staff: false,
                is_active: true,
                role: None,
            },
        };

        let current = CurrentUser::from_tokens(tokens);
        assert_eq!(current.id, UserId::new(4));
        assert_eq!(current.access_token, "acc");
        assert!(!current.is_staff);
    }
}
