//! Sales administration client, including statistics and ML predictions.

use tracing::instrument;

use smartsales_core::api::{
    ChangeStatusRequest, ListResponse, Sale, SaleInput, SaleLine, SalesStats,
};
use smartsales_core::types::{SaleId, SaleStatus};

use super::{ApiError, Backend};

/// Filters accepted by the sales listing.
#[derive(Debug, Clone, Default)]
pub struct SalesFilter {
    pub status: Option<SaleStatus>,
    pub client: Option<i64>,
}

impl SalesFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            pairs.push(("estado", status.to_string()));
        }
        if let Some(client) = self.client {
            pairs.push(("cliente", client.to_string()));
        }
        pairs
    }
}

/// Client for the full sales surface.
#[derive(Clone)]
pub struct SalesAdminApi {
    backend: Backend,
}

impl SalesAdminApi {
    #[must_use]
    pub const fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// List sales, optionally filtered.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn list(&self, token: &str, filter: &SalesFilter) -> Result<Vec<Sale>, ApiError> {
        let response: ListResponse<Sale> = self
            .backend
            .get_with_query("ventas/", token, &filter.query_pairs())
            .await?;
        Ok(response.into_items())
    }

    /// Fetch one sale.
    ///
    /// # Errors
    ///
    /// Returns an error if the sale is not found.
    #[instrument(skip(self, token))]
    pub async fn get(&self, token: &str, id: SaleId) -> Result<Sale, ApiError> {
        self.backend.get(&format!("ventas/{id}/"), token).await
    }

    /// Fetch the line items of a sale.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn lines(&self, token: &str, sale_id: SaleId) -> Result<Vec<SaleLine>, ApiError> {
        let response: ListResponse<SaleLine> = self
            .backend
            .get_with_query("detalle-ventas/", token, &[("venta", sale_id.to_string())])
            .await?;
        Ok(response.into_items())
    }

    /// Create a sale manually.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] on rejected input.
    #[instrument(skip(self, token, input))]
    pub async fn create(&self, token: &str, input: &SaleInput) -> Result<Sale, ApiError> {
        self.backend.post("ventas/", token, input).await
    }

    /// Move a sale to a new status.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is rejected.
    #[instrument(skip(self, token))]
    pub async fn change_status(
        &self,
        token: &str,
        id: SaleId,
        status: SaleStatus,
    ) -> Result<Sale, ApiError> {
        let payload = ChangeStatusRequest { status };
        self.backend
            .post(&format!("ventas/{id}/cambiar_estado/"), token, &payload)
            .await
    }

    /// Fetch aggregates and ML predictions for the dashboard.
    ///
    /// Both series are computed server-side; the console only renders them.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn stats(&self, token: &str) -> Result<SalesStats, ApiError> {
        self.backend.get("ventas/estadisticas/", token).await
    }
}
