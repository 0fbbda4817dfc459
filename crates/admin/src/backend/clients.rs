//! Client (customer) administration client.

use tracing::instrument;

use smartsales_core::api::{Client, ClientInput, ListResponse};
use smartsales_core::types::ClientId;

use super::{ApiError, Backend};

/// Client for store-client CRUD.
#[derive(Clone)]
pub struct ClientsApi {
    backend: Backend,
}

impl ClientsApi {
    #[must_use]
    pub const fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// List all clients.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn list(&self, token: &str) -> Result<Vec<Client>, ApiError> {
        let response: ListResponse<Client> =
            self.backend.get("administracion/clientes/", token).await?;
        Ok(response.into_items())
    }

    /// Fetch one client.
    ///
    /// # Errors
    ///
    /// Returns an error if the client is not found.
    #[instrument(skip(self, token))]
    pub async fn get(&self, token: &str, id: ClientId) -> Result<Client, ApiError> {
        self.backend
            .get(&format!("administracion/clientes/{id}/"), token)
            .await
    }

    /// Create a client.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] on rejected input.
    #[instrument(skip(self, token, input))]
    pub async fn create(&self, token: &str, input: &ClientInput) -> Result<Client, ApiError> {
        self.backend
            .post("administracion/clientes/", token, input)
            .await
    }

    /// Update a client.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] on rejected input.
    #[instrument(skip(self, token, input))]
    pub async fn update(
        &self,
        token: &str,
        id: ClientId,
        input: &ClientInput,
    ) -> Result<Client, ApiError> {
        self.backend
            .put(&format!("administracion/clientes/{id}/"), token, input)
            .await
    }

    /// Delete a client.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn delete(&self, token: &str, id: ClientId) -> Result<(), ApiError> {
        self.backend
            .delete(&format!("administracion/clientes/{id}/"), token)
            .await
    }
}
