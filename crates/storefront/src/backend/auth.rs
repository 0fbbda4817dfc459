//! Authentication API client.

use tracing::instrument;

use smartsales_core::api::{
    AuthTokens, ChangePasswordRequest, LoginRequest, LogoutRequest, RefreshRequest,
    RefreshResponse, RegisterRequest, UpdateProfileRequest, User,
};

use super::{ApiError, Backend};

/// Client for the session/auth endpoints.
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
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] on bad credentials.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthTokens, ApiError> {
        let payload = LoginRequest {
            username: username.to_owned(),
            password: password.to_owned(),
        };
        self.backend.post("login/", None, &payload).await
    }

    /// Register a new account; the backend logs the user in and returns a
    /// token pair.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] with per-field messages on rejected
    /// input.
    #[instrument(skip(self, request))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthTokens, ApiError> {
        self.backend.post("register/", None, request).await
    }

    /// Blacklist the refresh token. Best effort - logout proceeds locally
    /// even when this fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, refresh_token))]
    pub async fn logout(&self, refresh_token: &str) -> Result<(), ApiError> {
        let payload = LogoutRequest {
            refresh: refresh_token.to_owned(),
        };
        self.backend.post_no_content("logout/", None, &payload).await
    }

    /// Exchange a refresh token for a fresh access token.
    ///
    /// # Errors
    ///
    /// Returns an error if the refresh token is expired or revoked.
    #[instrument(skip(self, refresh_token))]
    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshResponse, ApiError> {
        let payload = RefreshRequest {
            refresh: refresh_token.to_owned(),
        };
        self.backend.post("refresh/", None, &payload).await
    }

    /// Fetch the caller's profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn profile(&self, token: &str) -> Result<User, ApiError> {
        self.backend.get("profile/", Some(token)).await
    }

    /// Update the caller's profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token, request))]
    pub async fn update_profile(
        &self,
        token: &str,
        request: &UpdateProfileRequest,
    ) -> Result<User, ApiError> {
        self.backend.put("profile/", Some(token), request).await
    }

    /// Change the caller's password.
    ///
    /// # Errors
    ///
    /// Returns an error if the old password does not match or the new one is
    /// rejected.
    #[instrument(skip(self, token, request))]
    pub async fn change_password(
        &self,
        token: &str,
        request: &ChangePasswordRequest,
    ) -> Result<(), ApiError> {
        self.backend
            .post_no_content("change-password/", Some(token), request)
            .await
    }
}
