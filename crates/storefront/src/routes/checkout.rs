//! Payment route handlers.
//!
//! Drives a single sale from "pending" to "paid" with the Stripe hosted
//! card widget. The completion route is idempotent: a session flag records
//! the first successful verification, so re-renders and repeated redirects
//! verify the payment exactly once and clear the cart exactly once.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use smartsales_core::api::Sale;
use smartsales_core::types::SaleId;

use crate::cart::CartUser;
use crate::checkout::{self, NotPayable, session_keys};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{CspNonce, RequireAuth};
use crate::routes::format_price;
use crate::state::AppState;

/// Sale display data for the payment templates.
#[derive(Clone)]
pub struct SaleView {
    pub id: i64,
    pub client_name: String,
    pub subtotal: String,
    pub tax: String,
    pub discount: String,
    pub shipping_cost: String,
    pub total: String,
    pub status: &'static str,
}

impl From<&Sale> for SaleView {
    fn from(sale: &Sale) -> Self {
        Self {
            id: sale.id.as_i64(),
            client_name: sale.client_name.clone().unwrap_or_else(|| "N/A".to_string()),
            subtotal: format_price(sale.subtotal),
            tax: format_price(sale.tax),
            discount: format_price(sale.discount),
            shipping_cost: format_price(sale.shipping_cost),
            total: format_price(sale.total),
            status: sale.status.label(),
        }
    }
}

/// Payment page template: renders the hosted card widget.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/pay.html")]
pub struct PayTemplate {
    pub sale: SaleView,
    pub client_secret: String,
    pub publishable_key: String,
    pub return_url: String,
    pub nonce: String,
}

/// Payment page when the flow cannot proceed (invalid amount, backend
/// failure). Offers a manual retry; nothing retries automatically.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/error.html")]
pub struct PayErrorTemplate {
    pub sale_id: i64,
    pub message: String,
    pub retryable: bool,
}

/// Success screen template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/success.html")]
pub struct PaySuccessTemplate {
    pub sale: SaleView,
}

/// Query parameters Stripe appends to the return redirect.
#[derive(Debug, Deserialize)]
pub struct CompleteQuery {
    #[serde(default)]
    pub payment_intent: Option<String>,
    #[serde(default)]
    pub redirect_status: Option<String>,
}

/// Display the payment page for a sale.
///
/// Refuses to request a payment-intent when the sale is not payable; a sale
/// with a non-positive total renders "monto de pago inválido" and never
/// reaches the payment backend.
#[instrument(skip(state, session, user, nonce))]
pub async fn pay(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
    Path(venta_id): Path<i64>,
    CspNonce(nonce): CspNonce,
) -> Result<Response> {
    let sale_id = SaleId::new(venta_id);
    let sale = state.sales().get(&user.access_token, sale_id).await?;

    // Completed earlier in this session: show the success screen again
    // instead of re-entering the flow.
    if is_marked_paid(&session, sale_id).await {
        return Ok(PaySuccessTemplate {
            sale: SaleView::from(&sale),
        }
        .into_response());
    }

    match checkout::ensure_payable(&sale) {
        Ok(()) => {}
        Err(NotPayable::AlreadyPaid) => {
            return Ok(PaySuccessTemplate {
                sale: SaleView::from(&sale),
            }
            .into_response());
        }
        Err(reason @ (NotPayable::InvalidAmount | NotPayable::Cancelled)) => {
            return Ok(PayErrorTemplate {
                sale_id: venta_id,
                message: reason.to_string(),
                retryable: false,
            }
            .into_response());
        }
    }

    let idempotency_key = intent_idempotency_key(&session, sale_id).await?;
    let request = checkout::intent_request(&sale);

    match state
        .payments()
        .create_intent(&user.access_token, &request, &idempotency_key)
        .await
    {
        Ok(intent) => {
            if intent.reused {
                tracing::debug!(
                    payment_intent_id = %intent.payment_intent_id,
                    "Reused existing payment intent"
                );
            }
            Ok(PayTemplate {
                sale: SaleView::from(&sale),
                client_secret: intent.client_secret,
                publishable_key: state.config().stripe.publishable_key.clone(),
                return_url: format!(
                    "{}/checkout/pago/{venta_id}/completar",
                    state.config().base_url.trim_end_matches('/')
                ),
                nonce,
            }
            .into_response())
        }
        Err(error) => {
            tracing::error!("Failed to create payment intent: {error}");
            Ok(PayErrorTemplate {
                sale_id: venta_id,
                message: "No se pudo inicializar el pago".to_string(),
                retryable: true,
            }
            .into_response())
        }
    }
}

/// Handle the widget's return redirect.
///
/// Verifies the payment with the backend exactly once, then best-effort
/// clears the cart - a clear failure is logged, never shown, because the
/// payment itself already succeeded.
#[instrument(skip(state, session, user, query))]
pub async fn complete(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
    Path(venta_id): Path<i64>,
    Query(query): Query<CompleteQuery>,
) -> Result<Response> {
    let sale_id = SaleId::new(venta_id);

    // Already verified in this session: idempotent success, no second
    // verify call and no second cart clear.
    if is_marked_paid(&session, sale_id).await {
        let sale = state.sales().get(&user.access_token, sale_id).await?;
        return Ok(PaySuccessTemplate {
            sale: SaleView::from(&sale),
        }
        .into_response());
    }

    if matches!(query.redirect_status.as_deref(), Some("failed")) {
        return Ok(PayErrorTemplate {
            sale_id: venta_id,
            message: "El pago fue rechazado".to_string(),
            retryable: true,
        }
        .into_response());
    }

    let Some(payment_intent_id) = query.payment_intent.as_deref() else {
        return Err(AppError::BadRequest(
            "falta el identificador del pago".to_string(),
        ));
    };

    match state
        .payments()
        .verify(&user.access_token, payment_intent_id)
        .await
    {
        Ok(verification) if verification.status.is_completed() => {
            session
                .insert(&session_keys::paid_flag(sale_id), true)
                .await?;

            // Best-effort cart clear; the payment already succeeded, so a
            // failure here is logged and never surfaced.
            let cleared = state
                .cart()
                .clear(Some(CartUser {
                    id: user.id,
                    token: &user.access_token,
                }))
                .await;
            if !cleared.is_updated() {
                tracing::warn!(sale_id = venta_id, "Failed to clear cart after payment");
            }

            let sale = state.sales().get(&user.access_token, sale_id).await?;
            Ok(PaySuccessTemplate {
                sale: SaleView::from(&sale),
            }
            .into_response())
        }
        Ok(verification) => {
            tracing::warn!(
                status = ?verification.status,
                "Payment verification did not confirm completion"
            );
            Ok(PayErrorTemplate {
                sale_id: venta_id,
                message: "El pago no pudo ser confirmado".to_string(),
                retryable: true,
            }
            .into_response())
        }
        Err(error) => {
            tracing::error!("Payment verification failed: {error}");
            Ok(PayErrorTemplate {
                sale_id: venta_id,
                message: "Error al verificar el pago".to_string(),
                retryable: true,
            }
            .into_response())
        }
    }
}

/// Whether this session already completed the sale's payment.
async fn is_marked_paid(session: &Session, sale_id: SaleId) -> bool {
    session
        .get::<bool>(&session_keys::paid_flag(sale_id))
        .await
        .ok()
        .flatten()
        .unwrap_or(false)
}

/// Get or mint the idempotency key for one sale's payment-intent.
async fn intent_idempotency_key(
    session: &Session,
    sale_id: SaleId,
) -> std::result::Result<String, AppError> {
    let name = session_keys::intent_key(sale_id);
    if let Some(existing) = session.get::<String>(&name).await? {
        return Ok(existing);
    }

    let minted = checkout::mint_idempotency_key();
    session.insert(&name, &minted).await?;
    Ok(minted)
}
