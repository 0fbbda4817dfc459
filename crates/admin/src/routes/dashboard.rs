//! BI dashboard: server-computed aggregates and ML sales predictions.
//!
//! Pure display - every number on this page was computed by the backend.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use smartsales_core::api::MonthlyTotal;

use crate::error::Result;
use crate::filters;
use crate::middleware::RequireOperator;
use crate::routes::format_price;
use crate::state::AppState;

/// One month row for the dashboard tables.
#[derive(Clone)]
pub struct MonthView {
    pub month: String,
    pub total: String,
}

impl From<&MonthlyTotal> for MonthView {
    fn from(month: &MonthlyTotal) -> Self {
        Self {
            month: month.month.clone(),
            total: format_price(month.total),
        }
    }
}

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub operator: String,
    pub total_sales: String,
    pub sales_count: i64,
    pub average_ticket: String,
    pub monthly: Vec<MonthView>,
    pub predictions: Vec<MonthView>,
}

/// Display the dashboard.
#[instrument(skip(state, operator))]
pub async fn index(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
) -> Result<impl IntoResponse> {
    let stats = state.sales().stats(&operator.access_token).await?;

    Ok(DashboardTemplate {
        operator: operator.username,
        total_sales: format_price(stats.total_sales),
        sales_count: stats.sales_count,
        average_ticket: format_price(stats.average_ticket),
        monthly: stats.monthly.iter().map(MonthView::from).collect(),
        predictions: stats.predictions.iter().map(MonthView::from).collect(),
    })
}
