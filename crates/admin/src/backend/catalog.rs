//! Catalog item administration client (`catalogo/`).

use tracing::instrument;

use smartsales_core::api::{Brand, CatalogItem, CatalogItemInput, Category, ListResponse};
use smartsales_core::types::CatalogItemId;

use super::{ApiError, Backend};

/// Client for catalog item CRUD.
#[derive(Clone)]
pub struct CatalogAdminApi {
    backend: Backend,
}

impl CatalogAdminApi {
    #[must_use]
    pub const fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// List all catalog items (including inactive ones).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn list(&self, token: &str) -> Result<Vec<CatalogItem>, ApiError> {
        let response: ListResponse<CatalogItem> = self.backend.get("catalogo/", token).await?;
        Ok(response.into_items())
    }

    /// Fetch one catalog item.
    ///
    /// # Errors
    ///
    /// Returns an error if the item is not found.
    #[instrument(skip(self, token))]
    pub async fn get(&self, token: &str, id: CatalogItemId) -> Result<CatalogItem, ApiError> {
        self.backend.get(&format!("catalogo/{id}/"), token).await
    }

    /// Create a catalog item.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] on rejected input.
    #[instrument(skip(self, token, input))]
    pub async fn create(
        &self,
        token: &str,
        input: &CatalogItemInput,
    ) -> Result<CatalogItem, ApiError> {
        self.backend.post("catalogo/", token, input).await
    }

    /// Update a catalog item.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] on rejected input.
    #[instrument(skip(self, token, input))]
    pub async fn update(
        &self,
        token: &str,
        id: CatalogItemId,
        input: &CatalogItemInput,
    ) -> Result<CatalogItem, ApiError> {
        self.backend
            .put(&format!("catalogo/{id}/"), token, input)
            .await
    }

    /// Delete a catalog item.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn delete(&self, token: &str, id: CatalogItemId) -> Result<(), ApiError> {
        self.backend.delete(&format!("catalogo/{id}/"), token).await
    }

    /// List brands for form datalists.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn brands(&self, token: &str) -> Result<Vec<Brand>, ApiError> {
        let response: ListResponse<Brand> = self.backend.get("marcas/", token).await?;
        Ok(response.into_items())
    }

    /// List categories for form datalists.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn categories(&self, token: &str) -> Result<Vec<Category>, ApiError> {
        let response: ListResponse<Category> = self.backend.get("categorias/", token).await?;
        Ok(response.into_items())
    }
}
