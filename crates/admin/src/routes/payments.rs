//! Payment listing screen (read-only).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use smartsales_core::api::Payment;
use smartsales_core::types::PaymentStatus;

use crate::backend::PaymentsFilter;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireOperator;
use crate::routes::format_price;
use crate::state::AppState;

/// Payment row display data.
#[derive(Clone)]
pub struct PaymentView {
    pub id: i64,
    pub sale_id: Option<i64>,
    pub amount: String,
    pub currency: &'static str,
    pub status: &'static str,
    pub provider: String,
    pub intent: String,
    pub date: String,
}

impl From<&Payment> for PaymentView {
    fn from(payment: &Payment) -> Self {
        Self {
            id: payment.id.as_i64(),
            sale_id: payment.sale_id.map(|id| id.as_i64()),
            amount: format_price(payment.amount),
            currency: payment.currency.code(),
            status: payment.status.label(),
            provider: payment.provider.clone().unwrap_or_else(|| "Stripe".to_string()),
            intent: payment.payment_intent_id.clone().unwrap_or_default(),
            date: payment
                .created_at
                .map(|date| date.format("%d/%m/%Y %H:%M").to_string())
                .unwrap_or_default(),
        }
    }
}

/// Listing filter query.
#[derive(Debug, Deserialize)]
pub struct PaymentsQuery {
    #[serde(default)]
    pub estado: Option<String>,
    #[serde(default)]
    pub venta: Option<i64>,
}

/// Payments listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "payments/list.html")]
pub struct PaymentsListTemplate {
    pub payments: Vec<PaymentView>,
    pub selected_status: String,
}

fn parse_status(value: &str) -> Option<PaymentStatus> {
    match value {
        "pendiente" => Some(PaymentStatus::Pending),
        "completado" => Some(PaymentStatus::Completed),
        "fallido" => Some(PaymentStatus::Failed),
        "reembolsado" => Some(PaymentStatus::Refunded),
        _ => None,
    }
}

/// List payments, optionally filtered.
#[instrument(skip(state, operator))]
pub async fn list(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    Query(query): Query<PaymentsQuery>,
) -> Result<impl IntoResponse> {
    let filter = PaymentsFilter {
        sale: query.venta,
        status: query.estado.as_deref().and_then(parse_status),
        client: None,
    };
    let payments = state
        .payments()
        .list(&operator.access_token, &filter)
        .await?;

    Ok(PaymentsListTemplate {
        payments: payments.iter().map(PaymentView::from).collect(),
        selected_status: query.estado.unwrap_or_default(),
    })
}
