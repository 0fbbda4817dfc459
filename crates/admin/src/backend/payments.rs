//! Payment administration client (read-only listing).

use tracing::instrument;

use smartsales_core::api::{ListResponse, Payment};
use smartsales_core::types::{PaymentId, PaymentStatus};

use super::{ApiError, Backend};

/// Filters accepted by the payments listing.
#[derive(Debug, Clone, Default)]
pub struct PaymentsFilter {
    pub sale: Option<i64>,
    pub status: Option<PaymentStatus>,
    pub client: Option<i64>,
}

impl PaymentsFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(sale) = self.sale {
            pairs.push(("venta", sale.to_string()));
        }
        if let Some(status) = self.status {
            let wire = match status {
                PaymentStatus::Pending => "pendiente",
                PaymentStatus::Completed => "completado",
                PaymentStatus::Failed => "fallido",
                PaymentStatus::Refunded => "reembolsado",
            };
            pairs.push(("estado", wire.to_string()));
        }
        if let Some(client) = self.client {
            pairs.push(("cliente", client.to_string()));
        }
        pairs
    }
}

/// Client for the recorded-payments endpoints.
#[derive(Clone)]
pub struct PaymentsAdminApi {
    backend: Backend,
}

impl PaymentsAdminApi {
    #[must_use]
    pub const fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// List payments, optionally filtered.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn list(
        &self,
        token: &str,
        filter: &PaymentsFilter,
    ) -> Result<Vec<Payment>, ApiError> {
        let response: ListResponse<Payment> = self
            .backend
            .get_with_query("finanzas/pagos-stripe/", token, &filter.query_pairs())
            .await?;
        Ok(response.into_items())
    }

    /// Fetch one payment.
    ///
    /// # Errors
    ///
    /// Returns an error if the payment is not found.
    #[instrument(skip(self, token))]
    pub async fn get(&self, token: &str, id: PaymentId) -> Result<Payment, ApiError> {
        self.backend
            .get(&format!("finanzas/pagos-stripe/{id}/"), token)
            .await
    }
}
