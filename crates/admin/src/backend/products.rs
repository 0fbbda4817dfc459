//! Serialized product unit administration client (`productos/`).

use tracing::instrument;

use smartsales_core::api::{ListResponse, Product, ProductInput};
use smartsales_core::types::ProductId;

use super::{ApiError, Backend};

/// Client for product unit CRUD.
#[derive(Clone)]
pub struct ProductsApi {
    backend: Backend,
}

impl ProductsApi {
    #[must_use]
    pub const fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// List all product units.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn list(&self, token: &str) -> Result<Vec<Product>, ApiError> {
        let response: ListResponse<Product> = self.backend.get("productos/", token).await?;
        Ok(response.into_items())
    }

    /// Fetch one product unit.
    ///
    /// # Errors
    ///
    /// Returns an error if the unit is not found.
    #[instrument(skip(self, token))]
    pub async fn get(&self, token: &str, id: ProductId) -> Result<Product, ApiError> {
        self.backend.get(&format!("productos/{id}/"), token).await
    }

    /// Create a product unit.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] on rejected input.
    #[instrument(skip(self, token, input))]
    pub async fn create(&self, token: &str, input: &ProductInput) -> Result<Product, ApiError> {
        self.backend.post("productos/", token, input).await
    }

    /// Update a product unit.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] on rejected input.
    #[instrument(skip(self, token, input))]
    pub async fn update(
        &self,
        token: &str,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<Product, ApiError> {
        self.backend
            .put(&format!("productos/{id}/"), token, input)
            .await
    }

    /// Delete a product unit.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn delete(&self, token: &str, id: ProductId) -> Result<(), ApiError> {
        self.backend.delete(&format!("productos/{id}/"), token).await
    }
}
