//! Session-related types.

use serde::{Deserialize, Serialize};

use smartsales_core::api::AuthTokens;
use smartsales_core::types::UserId;

/// Session-stored operator identity and credentials.
///
/// Only staff accounts are stored here; the login handler rejects non-staff
/// users before the session is written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentOperator {
    /// Operator's backend ID.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Bearer token attached to every backend request.
    pub access_token: String,
    /// Refresh token, only sent to the backend on logout.
    pub refresh_token: String,
}

impl CurrentOperator {
    /// Build the session record from a login response.
    #[must_use]
    pub fn from_tokens(tokens: AuthTokens) -> Self {
        Self {
            id: tokens.user.id,
            username: tokens.user.username,
            access_token: tokens.access,
            refresh_token: tokens.refresh,
        }
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in operator.
    pub const CURRENT_OPERATOR: &str = "current_operator";
}
