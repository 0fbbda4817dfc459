//! Payment records and payment-intent payloads.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CurrencyCode, PaymentId, PaymentStatus, SaleId};

/// A recorded payment, from `GET finanzas/pagos-stripe/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    #[serde(rename = "venta", default)]
    pub sale_id: Option<SaleId>,
    #[serde(rename = "monto", default)]
    pub amount: Decimal,
    #[serde(rename = "moneda", default)]
    pub currency: CurrencyCode,
    #[serde(rename = "estado", default)]
    pub status: PaymentStatus,
    #[serde(rename = "proveedor", default)]
    pub provider: Option<String>,
    #[serde(rename = "payment_intent_id", default)]
    pub payment_intent_id: Option<String>,
    #[serde(rename = "fecha_creacion", default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for `POST finanzas/stripe/create-payment-intent/`.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePaymentIntent {
    #[serde(rename = "venta_id")]
    pub sale_id: SaleId,
    #[serde(rename = "monto")]
    pub amount: Decimal,
    #[serde(rename = "moneda")]
    pub currency: CurrencyCode,
    #[serde(rename = "descripcion")]
    pub description: String,
}

/// A payment-intent handle for the hosted card widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub client_secret: String,
    pub payment_intent_id: String,
    /// Set when the backend honored the idempotency key and returned an
    /// intent created by an earlier request.
    #[serde(rename = "reutilizado", default)]
    pub reused: bool,
}

/// Result of `POST finanzas/stripe/verify-payment/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentVerification {
    #[serde(rename = "estado", default)]
    pub status: PaymentStatus,
    #[serde(rename = "venta_id", default)]
    pub sale_id: Option<SaleId>,
    #[serde(rename = "mensaje", default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_intent_reuse_flag_defaults_false() {
        let json = r#"{"client_secret": "pi_1_secret_2", "payment_intent_id": "pi_1"}"#;
        let intent: PaymentIntent = serde_json::from_str(json).expect("deserialize");
        assert!(!intent.reused);
    }

    #[test]
    fn test_verification_status() {
        let json = r#"{"estado": "completado", "venta_id": 7}"#;
        let verification: PaymentVerification = serde_json::from_str(json).expect("deserialize");
        assert!(verification.status.is_completed());
        assert_eq!(verification.sale_id, Some(SaleId::new(7)));
    }
}
