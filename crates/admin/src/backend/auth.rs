//! Admin authentication client.

use tracing::instrument;

use smartsales_core::api::{AuthTokens, LoginRequest, LogoutRequest};

use super::{ApiError, Backend};

/// Client for operator login/logout.
#[derive(Clone)]
pub struct AuthApi {
    backend: Backend,
}

impl AuthApi {
    /// Create a new auth client.
    #[must_use]
    pub const fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// Exchange credentials for a token pair and the user record.
    ///
    /// The staff check happens at the session layer - the backend issues
    /// tokens for any valid account.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] on bad credentials.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthTokens, ApiError> {
        let payload = LoginRequest {
            username: username.to_owned(),
            password: password.to_owned(),
        };
        self.backend.post("login/", "", &payload).await
    }

    /// Blacklist the refresh token on logout. Best effort.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token, refresh_token))]
    pub async fn logout(&self, token: &str, refresh_token: &str) -> Result<(), ApiError> {
        let payload = LogoutRequest {
            refresh: refresh_token.to_owned(),
        };
        self.backend.post_no_content("logout/", token, &payload).await
    }
}
