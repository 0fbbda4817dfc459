//! User administration client (`administracion/users/`).

use tracing::instrument;

use smartsales_core::api::{ListResponse, User, UserInput};
use smartsales_core::types::UserId;

use super::{ApiError, Backend};

/// Client for user CRUD.
#[derive(Clone)]
pub struct UsersApi {
    backend: Backend,
}

impl UsersApi {
    #[must_use]
    pub const fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// List all users.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn list(&self, token: &str) -> Result<Vec<User>, ApiError> {
        let response: ListResponse<User> =
            self.backend.get("administracion/users/", token).await?;
        Ok(response.into_items())
    }

    /// Fetch one user.
    ///
    /// # Errors
    ///
    /// Returns an error if the user is not found.
    #[instrument(skip(self, token))]
    pub async fn get(&self, token: &str, id: UserId) -> Result<User, ApiError> {
        self.backend
            .get(&format!("administracion/users/{id}/"), token)
            .await
    }

    /// Create a user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] on rejected input.
    #[instrument(skip(self, token, input))]
    pub async fn create(&self, token: &str, input: &UserInput) -> Result<User, ApiError> {
        self.backend
            .post("administracion/users/", token, input)
            .await
    }

    /// Update a user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] on rejected input.
    #[instrument(skip(self, token, input))]
    pub async fn update(
        &self,
        token: &str,
        id: UserId,
        input: &UserInput,
    ) -> Result<User, ApiError> {
        self.backend
            .put(&format!("administracion/users/{id}/"), token, input)
            .await
    }

    /// Delete a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn delete(&self, token: &str, id: UserId) -> Result<(), ApiError> {
        self.backend
            .delete(&format!("administracion/users/{id}/"), token)
            .await
    }
}
