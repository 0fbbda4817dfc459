//! SmartSales365 REST backend clients.
//!
//! # Architecture
//!
//! - One thin client per resource, all sharing a [`Backend`] handle
//! - The backend is the source of truth - NO local sync, direct API calls
//! - Bearer tokens come from the caller's session and are attached per request
//! - Catalog reads are cached in-memory via `moka` (5 minute TTL)
//!
//! # Example
//!
//! ```rust,ignore
//! use smartsales_storefront::backend::{Backend, CatalogApi};
//!
//! let backend = Backend::new(&config.api);
//! let catalog = CatalogApi::new(backend.clone());
//!
//! let items = catalog.list(&CatalogFilter::default()).await?;
//! ```

mod auth;
mod cart;
mod catalog;
mod payments;
mod sales;

pub use auth::AuthApi;
pub use cart::CartApi;
pub use catalog::{CatalogApi, CatalogFilter};
pub use payments::PaymentsApi;
pub use sales::SalesApi;

use std::collections::BTreeMap;
use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::BackendConfig;

/// Errors that can occur when talking to the SmartSales365 backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request was rejected as unauthenticated (HTTP 401).
    ///
    /// Cart and auth flows treat this specially: it triggers a login prompt
    /// rather than a generic error banner.
    #[error("authentication required")]
    Unauthorized,

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The backend rejected the payload with per-field messages.
    #[error("validation failed: {}", format_field_errors(.0))]
    Validation(BTreeMap<String, String>),

    /// Rate limited by the backend.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Any other non-success status.
    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ApiError {
    /// Whether this error means the caller must log in.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

fn format_field_errors(errors: &BTreeMap<String, String>) -> String {
    if errors.is_empty() {
        return "(no field details provided)".to_string();
    }

    errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Shared low-level HTTP handle for the SmartSales365 REST API.
///
/// Cheaply cloneable; resource clients wrap it with typed methods.
#[derive(Clone)]
pub struct Backend {
    inner: Arc<BackendInner>,
}

struct BackendInner {
    client: reqwest::Client,
    base_url: String,
}

impl Backend {
    /// Create a new backend handle.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        let mut base_url = config.base_url.clone();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Self {
            inner: Arc::new(BackendInner {
                client: reqwest::Client::new(),
                base_url,
            }),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// Check that the backend is reachable.
    ///
    /// Any HTTP response counts as reachable; only transport failures are
    /// reported as errors.
    pub async fn ping(&self) -> Result<(), ApiError> {
        self.inner
            .client
            .get(&self.inner.base_url)
            .send()
            .await
            .map(|_| ())
            .map_err(ApiError::Http)
    }

    /// Execute a request and parse the JSON response body.
    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
        idempotency_key: Option<&str>,
    ) -> Result<T, ApiError> {
        let text = self
            .execute_raw(method, path, token, query, body, idempotency_key)
            .await?;

        serde_json::from_str(&text).map_err(|e| {
            tracing::error!(
                error = %e,
                path = %path,
                body = %text.chars().take(500).collect::<String>(),
                "Failed to parse backend response"
            );
            ApiError::Parse(e)
        })
    }

    /// Execute a request, returning the raw body for endpoints whose
    /// response is empty or irrelevant.
    async fn execute_raw(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
        idempotency_key: Option<&str>,
    ) -> Result<String, ApiError> {
        let mut request = self.inner.client.request(method, self.endpoint(path));

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(key) = idempotency_key {
            request = request.header("Idempotency-Key", key);
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ApiError::RateLimited(retry_after));
        }

        // Read the body as text first for better error diagnostics
        let text = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(path.to_owned()));
        }

        if status == StatusCode::BAD_REQUEST {
            return Err(parse_validation_errors(&text, status));
        }

        if !status.is_success() {
            tracing::error!(
                status = %status,
                path = %path,
                body = %text.chars().take(500).collect::<String>(),
                "Backend returned non-success status"
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: text.chars().take(200).collect(),
            });
        }

        Ok(text)
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        self.execute(Method::GET, path, token, &[], None, None).await
    }

    pub(crate) async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        self.execute(Method::GET, path, token, query, None, None)
            .await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)?;
        self.execute(Method::POST, path, token, &[], Some(body), None)
            .await
    }

    /// POST carrying an `Idempotency-Key` header, for mutations the backend
    /// deduplicates (payment-intent creation).
    pub(crate) async fn post_idempotent<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
        idempotency_key: &str,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)?;
        self.execute(
            Method::POST,
            path,
            token,
            &[],
            Some(body),
            Some(idempotency_key),
        )
        .await
    }

    /// POST with no payload, parsing the JSON response.
    pub(crate) async fn post_empty<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        self.execute(Method::POST, path, token, &[], None, None)
            .await
    }

    /// POST whose response body is ignored (logout, change-password).
    pub(crate) async fn post_no_content<B: Serialize>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<(), ApiError> {
        let body = serde_json::to_value(body)?;
        self.execute_raw(Method::POST, path, token, &[], Some(body), None)
            .await
            .map(|_| ())
    }

    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)?;
        self.execute(Method::PATCH, path, token, &[], Some(body), None)
            .await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)?;
        self.execute(Method::PUT, path, token, &[], Some(body), None)
            .await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        self.execute(Method::DELETE, path, token, &[], None, None)
            .await
    }
}

/// Map a 400 body to per-field validation messages.
///
/// The backend returns either `{"field": ["msg", ..]}` or `{"detail": "msg"}`;
/// anything else degrades to a generic status error.
fn parse_validation_errors(body: &str, status: StatusCode) -> ApiError {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return ApiError::Status {
            status: status.as_u16(),
            message: body.chars().take(200).collect(),
        };
    };

    let Some(object) = value.as_object() else {
        return ApiError::Status {
            status: status.as_u16(),
            message: value.to_string().chars().take(200).collect(),
        };
    };

    let mut errors = BTreeMap::new();
    for (field, messages) in object {
        let message = match messages {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Array(items) => items
                .iter()
                .filter_map(|v| v.as_str())
                .collect::<Vec<_>>()
                .join("; "),
            other => other.to_string(),
        };
        errors.insert(field.clone(), message);
    }

    ApiError::Validation(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_validation_errors_field_map() {
        let body = r#"{"email": ["Este campo es requerido."], "username": ["Ya existe."]}"#;
        let error = parse_validation_errors(body, StatusCode::BAD_REQUEST);
        match error {
            ApiError::Validation(fields) => {
                assert_eq!(
                    fields.get("email").map(String::as_str),
                    Some("Este campo es requerido.")
                );
                assert_eq!(fields.len(), 2);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_validation_errors_detail_string() {
        let body = r#"{"detail": "Solicitud inválida"}"#;
        let error = parse_validation_errors(body, StatusCode::BAD_REQUEST);
        match error {
            ApiError::Validation(fields) => {
                assert_eq!(
                    fields.get("detail").map(String::as_str),
                    Some("Solicitud inválida")
                );
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_validation_errors_non_json() {
        let error = parse_validation_errors("<html>bad request</html>", StatusCode::BAD_REQUEST);
        assert!(matches!(error, ApiError::Status { status: 400, .. }));
    }

    #[test]
    fn test_unauthorized_classification() {
        assert!(ApiError::Unauthorized.is_unauthorized());
        assert!(!ApiError::NotFound("x".into()).is_unauthorized());
    }
}
