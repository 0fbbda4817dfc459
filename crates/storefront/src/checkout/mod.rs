//! Checkout/payment flow helpers.
//!
//! The flow walks a single sale from "pending" to "paid" with the hosted
//! card widget: load sale, refuse non-payable amounts, request a
//! payment-intent under an idempotency key, render the widget, then verify
//! exactly once on the return redirect. The route handlers in
//! [`crate::routes::checkout`] drive it; the pure pieces live here.

use rust_decimal::Decimal;
use uuid::Uuid;

use smartsales_core::api::{CreatePaymentIntent, Sale};
use smartsales_core::types::{CurrencyCode, SaleId, SaleStatus};

/// Why a sale cannot enter the payment flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NotPayable {
    /// The sale total is zero or negative; no payment-intent may be
    /// requested for it.
    #[error("monto de pago inválido")]
    InvalidAmount,
    /// The sale is already paid; the flow short-circuits to the success
    /// screen.
    #[error("la venta ya fue pagada")]
    AlreadyPaid,
    /// The sale was cancelled.
    #[error("la venta fue cancelada")]
    Cancelled,
}

/// Gate a sale into the payment flow.
///
/// # Errors
///
/// Returns the reason the sale cannot be paid.
pub fn ensure_payable(sale: &Sale) -> Result<(), NotPayable> {
    match sale.status {
        SaleStatus::Paid | SaleStatus::Shipped | SaleStatus::Delivered => {
            return Err(NotPayable::AlreadyPaid);
        }
        SaleStatus::Cancelled => return Err(NotPayable::Cancelled),
        SaleStatus::Pending => {}
    }

    if sale.total <= Decimal::ZERO {
        return Err(NotPayable::InvalidAmount);
    }

    Ok(())
}

/// Build the payment-intent request for a sale.
#[must_use]
pub fn intent_request(sale: &Sale) -> CreatePaymentIntent {
    CreatePaymentIntent {
        sale_id: sale.id,
        amount: sale.total,
        currency: CurrencyCode::Bob,
        description: payment_description(sale),
    }
}

/// Human-readable description attached to the payment.
#[must_use]
pub fn payment_description(sale: &Sale) -> String {
    let client = sale.client_name.as_deref().unwrap_or("N/A");
    format!("Pago de Venta #{} - Cliente: {client}", sale.id)
}

/// Mint a fresh idempotency key for payment-intent creation.
///
/// One key is stored in the session per (session, sale); every intent
/// request for that sale carries it, so re-renders and manual retries reuse
/// the same backend-side intent instead of minting duplicates.
#[must_use]
pub fn mint_idempotency_key() -> String {
    Uuid::new_v4().to_string()
}

/// Session keys used by the payment flow.
pub mod session_keys {
    use super::SaleId;

    /// Key holding the idempotency key for one sale's payment-intent.
    #[must_use]
    pub fn intent_key(sale_id: SaleId) -> String {
        format!("checkout_intent_key:{sale_id}")
    }

    /// Completion flag making the verify/clear step idempotent: set right
    /// after the first successful verification.
    #[must_use]
    pub fn paid_flag(sale_id: SaleId) -> String {
        format!("sale_paid:{sale_id}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sale(total: Decimal, status: SaleStatus) -> Sale {
        Sale {
            id: SaleId::new(15),
            client_id: None,
            client_name: Some("Ana Flores".into()),
            date: None,
            status,
            subtotal: total,
            tax: Decimal::ZERO,
            discount: Decimal::ZERO,
            shipping_cost: Decimal::ZERO,
            total,
            address: None,
        }
    }

    #[test]
    fn test_zero_total_is_not_payable() {
        let result = ensure_payable(&sale(Decimal::ZERO, SaleStatus::Pending));
        assert_eq!(result, Err(NotPayable::InvalidAmount));
    }

    #[test]
    fn test_negative_total_is_not_payable() {
        let result = ensure_payable(&sale(Decimal::new(-100, 2), SaleStatus::Pending));
        assert_eq!(result, Err(NotPayable::InvalidAmount));
    }

    #[test]
    fn test_paid_sale_short_circuits() {
        let result = ensure_payable(&sale(Decimal::new(12300, 2), SaleStatus::Paid));
        assert_eq!(result, Err(NotPayable::AlreadyPaid));
    }

    #[test]
    fn test_pending_sale_with_positive_total_is_payable() {
        let result = ensure_payable(&sale(Decimal::new(12300, 2), SaleStatus::Pending));
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn test_payment_description() {
        let sale = sale(Decimal::new(12300, 2), SaleStatus::Pending);
        assert_eq!(
            payment_description(&sale),
            "Pago de Venta #15 - Cliente: Ana Flores"
        );
    }

    #[test]
    fn test_intent_request_carries_sale_total() {
        let sale = sale(Decimal::new(12300, 2), SaleStatus::Pending);
        let request = intent_request(&sale);
        assert_eq!(request.amount, Decimal::new(12300, 2));
        assert_eq!(request.sale_id, sale.id);
    }

    #[test]
    fn test_minted_keys_are_unique() {
        assert_ne!(mint_idempotency_key(), mint_idempotency_key());
    }
}
