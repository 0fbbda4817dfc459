//! Sales administration screens.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use smartsales_core::api::{Sale, SaleInput, SaleLine};
use smartsales_core::types::{ClientId, SaleId, SaleStatus};

use crate::backend::{ApiError, SalesFilter};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireOperator;
use crate::routes::format_price;
use crate::state::AppState;

/// Sale row display data.
#[derive(Clone)]
pub struct SaleView {
    pub id: i64,
    pub client: String,
    pub date: String,
    pub status: &'static str,
    pub status_value: &'static str,
    pub subtotal: String,
    pub tax: String,
    pub discount: String,
    pub shipping_cost: String,
    pub total: String,
    pub address: String,
}

impl From<&Sale> for SaleView {
    fn from(sale: &Sale) -> Self {
        Self {
            id: sale.id.as_i64(),
            client: sale.client_name.clone().unwrap_or_default(),
            date: sale
                .date
                .map(|date| date.format("%d/%m/%Y %H:%M").to_string())
                .unwrap_or_default(),
            status: sale.status.label(),
            status_value: sale.status.as_str(),
            subtotal: format_price(sale.subtotal),
            tax: format_price(sale.tax),
            discount: format_price(sale.discount),
            shipping_cost: format_price(sale.shipping_cost),
            total: format_price(sale.total),
            address: sale.address.clone().unwrap_or_default(),
        }
    }
}

/// Sale line row display data.
#[derive(Clone)]
pub struct SaleLineView {
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub subtotal: String,
}

impl From<&SaleLine> for SaleLineView {
    fn from(line: &SaleLine) -> Self {
        Self {
            name: line.item_name.clone().unwrap_or_else(|| "-".to_string()),
            quantity: line.quantity,
            unit_price: format_price(line.unit_price),
            subtotal: format_price(line.subtotal),
        }
    }
}

/// One status option for the select inputs.
#[derive(Clone)]
pub struct StatusOption {
    pub value: &'static str,
    pub label: &'static str,
}

fn status_options() -> Vec<StatusOption> {
    SaleStatus::all()
        .into_iter()
        .map(|status| StatusOption {
            value: status.as_str(),
            label: status.label(),
        })
        .collect()
}

/// Listing filter query.
#[derive(Debug, Deserialize)]
pub struct SalesQuery {
    #[serde(default)]
    pub estado: Option<String>,
}

/// Manual sale creation form data.
#[derive(Debug, Deserialize)]
pub struct SaleForm {
    pub cliente: i64,
    pub direccion: String,
    #[serde(default)]
    pub impuesto: Option<Decimal>,
    #[serde(default)]
    pub descuento: Option<Decimal>,
    #[serde(default)]
    pub costo_envio: Option<Decimal>,
}

/// Status change form data.
#[derive(Debug, Deserialize)]
pub struct ChangeStatusForm {
    pub estado: String,
}

/// Sales listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "sales/list.html")]
pub struct SalesListTemplate {
    pub sales: Vec<SaleView>,
    pub statuses: Vec<StatusOption>,
    pub selected_status: String,
}

/// Manual sale form page template.
#[derive(Template, WebTemplate)]
#[template(path = "sales/form.html")]
pub struct SaleFormTemplate {
    pub field_errors: Vec<(String, String)>,
}

/// Sale detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "sales/detail.html")]
pub struct SaleDetailTemplate {
    pub sale: SaleView,
    pub lines: Vec<SaleLineView>,
    pub statuses: Vec<StatusOption>,
}

/// List sales, optionally filtered by status.
#[instrument(skip(state, operator))]
pub async fn list(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    Query(query): Query<SalesQuery>,
) -> Result<impl IntoResponse> {
    let status = query
        .estado
        .as_deref()
        .and_then(|s| s.parse::<SaleStatus>().ok());
    let filter = SalesFilter {
        status,
        client: None,
    };
    let sales = state.sales().list(&operator.access_token, &filter).await?;

    Ok(SalesListTemplate {
        sales: sales.iter().map(SaleView::from).collect(),
        statuses: status_options(),
        selected_status: query.estado.unwrap_or_default(),
    })
}

/// Display the manual sale form.
pub async fn new_form(RequireOperator(_operator): RequireOperator) -> impl IntoResponse {
    SaleFormTemplate {
        field_errors: Vec::new(),
    }
}

/// Create a sale manually.
#[instrument(skip(state, operator, form))]
pub async fn create(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    Form(form): Form<SaleForm>,
) -> Result<Response> {
    let input = SaleInput {
        client_id: ClientId::new(form.cliente),
        address: form.direccion.trim().to_string(),
        tax: form.impuesto.unwrap_or(Decimal::ZERO),
        discount: form.descuento.unwrap_or(Decimal::ZERO),
        shipping_cost: form.costo_envio.unwrap_or(Decimal::ZERO),
    };

    match state.sales().create(&operator.access_token, &input).await {
        Ok(sale) => Ok(Redirect::to(&format!("/ventas/detail/{}", sale.id)).into_response()),
        Err(ApiError::Validation(fields)) => Ok(SaleFormTemplate {
            field_errors: fields.into_iter().collect(),
        }
        .into_response()),
        Err(e) => Err(e.into()),
    }
}

/// Display one sale with its lines.
#[instrument(skip(state, operator))]
pub async fn detail(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let sale_id = SaleId::new(id);
    let sale = state.sales().get(&operator.access_token, sale_id).await?;
    let lines = state
        .sales()
        .lines(&operator.access_token, sale_id)
        .await
        .unwrap_or_default();

    Ok(SaleDetailTemplate {
        sale: SaleView::from(&sale),
        lines: lines.iter().map(SaleLineView::from).collect(),
        statuses: status_options(),
    })
}

/// Move a sale to a new status.
#[instrument(skip(state, operator, form))]
pub async fn change_status(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    Path(id): Path<i64>,
    Form(form): Form<ChangeStatusForm>,
) -> Result<Response> {
    let status = form
        .estado
        .parse::<SaleStatus>()
        .map_err(AppError::BadRequest)?;

    state
        .sales()
        .change_status(&operator.access_token, SaleId::new(id), status)
        .await?;

    Ok(Redirect::to(&format!("/ventas/detail/{id}")).into_response())
}
