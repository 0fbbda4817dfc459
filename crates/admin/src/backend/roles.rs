//! Role and permission administration client.

use tracing::instrument;

use smartsales_core::api::{ListResponse, Permission, Role, RoleInput};
use smartsales_core::types::RoleId;

use super::{ApiError, Backend};

/// Client for role CRUD and the permission listing.
#[derive(Clone)]
pub struct RolesApi {
    backend: Backend,
}

impl RolesApi {
    #[must_use]
    pub const fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// List all roles.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn list(&self, token: &str) -> Result<Vec<Role>, ApiError> {
        let response: ListResponse<Role> =
            self.backend.get("administracion/roles/", token).await?;
        Ok(response.into_items())
    }

    /// Fetch one role.
    ///
    /// # Errors
    ///
    /// Returns an error if the role is not found.
    #[instrument(skip(self, token))]
    pub async fn get(&self, token: &str, id: RoleId) -> Result<Role, ApiError> {
        self.backend
            .get(&format!("administracion/roles/{id}/"), token)
            .await
    }

    /// Create a role.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] on rejected input.
    #[instrument(skip(self, token, input))]
    pub async fn create(&self, token: &str, input: &RoleInput) -> Result<Role, ApiError> {
        self.backend
            .post("administracion/roles/", token, input)
            .await
    }

    /// Update a role.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] on rejected input.
    #[instrument(skip(self, token, input))]
    pub async fn update(
        &self,
        token: &str,
        id: RoleId,
        input: &RoleInput,
    ) -> Result<Role, ApiError> {
        self.backend
            .patch(&format!("administracion/roles/{id}/"), token, input)
            .await
    }

    /// Delete a role.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn delete(&self, token: &str, id: RoleId) -> Result<(), ApiError> {
        self.backend
            .delete(&format!("administracion/roles/{id}/"), token)
            .await
    }

    /// List grantable permissions (for the role form's multi-select).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn permissions(&self, token: &str) -> Result<Vec<Permission>, ApiError> {
        let response: ListResponse<Permission> = self
            .backend
            .get("administracion/permissions/", token)
            .await?;
        Ok(response.into_items())
    }
}
