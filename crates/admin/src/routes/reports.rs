//! Report generator screens.
//!
//! The backend interprets the prompt and renders the PDF/Excel; these
//! handlers pass the produced bytes straight through to the browser with
//! the backend's content headers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use smartsales_core::api::StandardReport;

use crate::backend::BinaryDownload;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireOperator;
use crate::state::AppState;

/// Report generator page template.
#[derive(Template, WebTemplate)]
#[template(path = "reports/index.html")]
pub struct ReportsTemplate {
    pub error: Option<String>,
}

/// Prompt form data.
#[derive(Debug, Deserialize)]
pub struct ReportForm {
    pub prompt: String,
    /// "pdf" or "excel"; appended to the prompt the way the original UI did.
    #[serde(default)]
    pub formato: Option<String>,
}

/// Display the report generator page.
pub async fn page(RequireOperator(_operator): RequireOperator) -> impl IntoResponse {
    ReportsTemplate { error: None }
}

/// Generate a report from a natural-language prompt and stream it back.
#[instrument(skip(state, operator, form))]
pub async fn generate(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    Form(form): Form<ReportForm>,
) -> Result<Response> {
    let prompt = form.prompt.trim();
    if prompt.is_empty() {
        return Ok(ReportsTemplate {
            error: Some("Describe el reporte que necesitas".to_string()),
        }
        .into_response());
    }

    let full_prompt = match form.formato.as_deref() {
        Some(formato @ ("pdf" | "excel")) => format!("{prompt} en formato {formato}"),
        _ => prompt.to_string(),
    };

    match state
        .reports()
        .generate(&operator.access_token, &full_prompt)
        .await
    {
        Ok(download) => Ok(passthrough(download, "reporte.pdf")),
        Err(e) => {
            tracing::error!("Report generation failed: {e}");
            Ok(ReportsTemplate {
                error: Some("No se pudo generar el reporte".to_string()),
            }
            .into_response())
        }
    }
}

/// Download a predefined report.
#[instrument(skip(state, operator))]
pub async fn standard(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    Path(key): Path<String>,
) -> Result<Response> {
    let report = match key.as_str() {
        "sales_this_month_excel" => StandardReport::SalesThisMonthExcel,
        "inventory_available_pdf" => StandardReport::InventoryAvailablePdf,
        _ => return Err(AppError::NotFound(format!("reporte {key}"))),
    };

    let download = state
        .reports()
        .standard(&operator.access_token, report)
        .await?;

    Ok(passthrough(download, report.file_name()))
}

/// Build a download response from the backend's bytes and headers.
fn passthrough(download: BinaryDownload, fallback_name: &str) -> Response {
    let mut headers = HeaderMap::new();

    let content_type = download
        .content_type
        .as_deref()
        .unwrap_or("application/octet-stream");
    if let Ok(value) = HeaderValue::from_str(content_type) {
        headers.insert(header::CONTENT_TYPE, value);
    }

    let disposition = download
        .content_disposition
        .unwrap_or_else(|| format!("attachment; filename=\"{fallback_name}\""));
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }

    (headers, download.bytes).into_response()
}
