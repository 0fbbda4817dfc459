//! Audit log screen (read-only).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use smartsales_core::api::AuditEntry;

use crate::error::Result;
use crate::filters;
use crate::middleware::RequireOperator;
use crate::state::AppState;

/// Audit entry row display data.
#[derive(Clone)]
pub struct AuditEntryView {
    pub id: i64,
    pub username: String,
    pub action: String,
    pub description: String,
    pub ip: String,
    pub timestamp: String,
}

impl From<&AuditEntry> for AuditEntryView {
    fn from(entry: &AuditEntry) -> Self {
        Self {
            id: entry.id.as_i64(),
            username: entry.username.clone().unwrap_or_default(),
            action: entry.action.clone(),
            description: entry.description.clone().unwrap_or_default(),
            ip: entry.ip.clone().unwrap_or_default(),
            timestamp: entry
                .timestamp
                .map(|date| date.format("%d/%m/%Y %H:%M:%S").to_string())
                .unwrap_or_default(),
        }
    }
}

/// Listing filter query.
#[derive(Debug, Deserialize)]
pub struct AuditQuery {
    #[serde(default)]
    pub usuario: Option<String>,
}

/// Audit log page template.
#[derive(Template, WebTemplate)]
#[template(path = "audit/list.html")]
pub struct AuditListTemplate {
    pub entries: Vec<AuditEntryView>,
    pub filter_user: String,
}

/// List audit entries, optionally filtered by username.
#[instrument(skip(state, operator))]
pub async fn list(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    Query(query): Query<AuditQuery>,
) -> Result<impl IntoResponse> {
    let username = query.usuario.as_deref().filter(|u| !u.trim().is_empty());
    let entries = state.audit().list(&operator.access_token, username).await?;

    Ok(AuditListTemplate {
        entries: entries.iter().map(AuditEntryView::from).collect(),
        filter_user: query.usuario.unwrap_or_default(),
    })
}
