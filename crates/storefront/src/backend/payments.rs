//! Payments API client (Stripe payment-intent lifecycle lives server-side).

use serde::Serialize;
use tracing::instrument;

use smartsales_core::api::{CreatePaymentIntent, ListResponse, Payment, PaymentIntent, PaymentVerification};

use super::{ApiError, Backend};

#[derive(Debug, Serialize)]
struct VerifyPaymentRequest<'a> {
    payment_intent_id: &'a str,
}

/// Client for the payment endpoints.
#[derive(Clone)]
pub struct PaymentsApi {
    backend: Backend,
}

impl PaymentsApi {
    /// Create a new payments client.
    #[must_use]
    pub const fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// Request a payment-intent for a sale.
    ///
    /// `idempotency_key` is minted once per (session, sale); the backend
    /// deduplicates on it, so repeated requests return the same intent.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token, request))]
    pub async fn create_intent(
        &self,
        token: &str,
        request: &CreatePaymentIntent,
        idempotency_key: &str,
    ) -> Result<PaymentIntent, ApiError> {
        self.backend
            .post_idempotent(
                "finanzas/stripe/create-payment-intent/",
                Some(token),
                request,
                idempotency_key,
            )
            .await
    }

    /// Ask the backend to verify a payment after the widget reports success.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token), fields(payment_intent_id = %payment_intent_id))]
    pub async fn verify(
        &self,
        token: &str,
        payment_intent_id: &str,
    ) -> Result<PaymentVerification, ApiError> {
        let payload = VerifyPaymentRequest { payment_intent_id };
        self.backend
            .post("finanzas/stripe/verify-payment/", Some(token), &payload)
            .await
    }

    /// List the caller's payments.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn list_mine(&self, token: &str) -> Result<Vec<Payment>, ApiError> {
        let response: ListResponse<Payment> = self
            .backend
            .get("finanzas/pagos-stripe/", Some(token))
            .await?;
        Ok(response.into_items())
    }
}
