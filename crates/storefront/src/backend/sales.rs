//! Sales API client (customer-facing subset).

use tracing::instrument;

use smartsales_core::api::{ListResponse, Sale, SaleLine};
use smartsales_core::types::SaleId;

use super::{ApiError, Backend};

/// Client for the sales endpoints visible to a customer.
#[derive(Clone)]
pub struct SalesApi {
    backend: Backend,
}

impl SalesApi {
    /// Create a new sales client.
    #[must_use]
    pub const fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// Fetch one sale by id.
    ///
    /// The backend scopes access: a customer can only read their own sales.
    ///
    /// # Errors
    ///
    /// Returns an error if the sale is not found or not visible to the caller.
    #[instrument(skip(self, token), fields(sale_id = %id))]
    pub async fn get(&self, token: &str, id: SaleId) -> Result<Sale, ApiError> {
        self.backend.get(&format!("ventas/{id}/"), Some(token)).await
    }

    /// List the caller's sales.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn list_mine(&self, token: &str) -> Result<Vec<Sale>, ApiError> {
        let response: ListResponse<Sale> = self.backend.get("ventas/", Some(token)).await?;
        Ok(response.into_items())
    }

    /// Fetch the line items of a sale.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token), fields(sale_id = %sale_id))]
    pub async fn lines(&self, token: &str, sale_id: SaleId) -> Result<Vec<SaleLine>, ApiError> {
        let response: ListResponse<SaleLine> = self
            .backend
            .get_with_query(
                "detalle-ventas/",
                Some(token),
                &[("venta", sale_id.to_string())],
            )
            .await?;
        Ok(response.into_items())
    }
}
