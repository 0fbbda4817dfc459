//! SmartSales365 REST backend clients for the admin console.
//!
//! Same boundary rules as the storefront: bearer token per request from the
//! operator's session, typed records in and out, validation errors mapped to
//! per-field messages. Unlike the storefront there is no read cache - admin
//! screens always show fresh data - and the report endpoints stream binary
//! bodies (PDF/Excel) straight through.

mod audit;
mod auth;
mod catalog;
mod clients;
mod locations;
mod payments;
mod products;
mod reports;
mod roles;
mod sales;
mod users;

pub use audit::AuditApi;
pub use auth::AuthApi;
pub use catalog::CatalogAdminApi;
pub use clients::ClientsApi;
pub use locations::LocationsApi;
pub use payments::{PaymentsAdminApi, PaymentsFilter};
pub use products::ProductsApi;
pub use reports::{BinaryDownload, ReportsApi};
pub use roles::RolesApi;
pub use sales::{SalesAdminApi, SalesFilter};
pub use users::UsersApi;

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::body::Bytes;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::BackendConfig;

/// Errors from the SmartSales365 backend.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP 401 - the operator's token is missing or stale.
    #[error("authentication required")]
    Unauthorized,

    /// HTTP 403 - authenticated but not allowed (non-staff user).
    #[error("forbidden")]
    Forbidden,

    #[error("not found: {0}")]
    NotFound(String),

    /// HTTP 400 with a field->message object.
    #[error("validation failed")]
    Validation(BTreeMap<String, String>),

    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Shared low-level HTTP handle for the SmartSales365 REST API.
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
    pub async fn ping(&self) -> Result<(), ApiError> {
        self.inner
            .client
            .get(&self.inner.base_url)
            .send()
            .await
            .map(|_| ())
            .map_err(ApiError::Http)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        token: &str,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
    ) -> Result<reqwest::Response, ApiError> {
        let mut request = self.inner.client.request(method, self.endpoint(path));

        // Login is the one call without a token
        if !token.is_empty() {
            request = request.bearer_auth(token);
        }
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        match status {
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
            StatusCode::FORBIDDEN => Err(ApiError::Forbidden),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound(path.to_owned())),
            _ => Ok(response),
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        token: &str,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        let response = self.send(method, path, token, query, body).await?;
        let status = response.status();
        let text = response.text().await?;

        if status == StatusCode::BAD_REQUEST {
            return Err(validation_error(&text, status));
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

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
    ) -> Result<T, ApiError> {
        self.execute(Method::GET, path, token, &[], None).await
    }

    pub(crate) async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        self.execute(Method::GET, path, token, query, None).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)?;
        self.execute(Method::POST, path, token, &[], Some(body)).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)?;
        self.execute(Method::PUT, path, token, &[], Some(body)).await
    }

    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)?;
        self.execute(Method::PATCH, path, token, &[], Some(body))
            .await
    }

    /// POST whose response body is ignored (logout).
    pub(crate) async fn post_no_content<B: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let body = serde_json::to_value(body)?;
        let response = self
            .send(Method::POST, path, token, &[], Some(body))
            .await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: text.chars().take(200).collect(),
            });
        }
        Ok(())
    }

    /// DELETE expecting 204/200 with no useful body.
    pub(crate) async fn delete(&self, path: &str, token: &str) -> Result<(), ApiError> {
        let response = self.send(Method::DELETE, path, token, &[], None).await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: text.chars().take(200).collect(),
            });
        }
        Ok(())
    }

    /// Fetch a binary body (report download), preserving content headers.
    pub(crate) async fn fetch_bytes(
        &self,
        method: Method,
        path: &str,
        token: &str,
        body: Option<serde_json::Value>,
    ) -> Result<(Bytes, Option<String>, Option<String>), ApiError> {
        let response = self.send(method, path, token, &[], body).await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            if status == StatusCode::BAD_REQUEST {
                return Err(validation_error(&text, status));
            }
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: text.chars().take(200).collect(),
            });
        }

        let content_type = header_value(&response, "content-type");
        let content_disposition = header_value(&response, "content-disposition");
        let bytes = response.bytes().await?;
        Ok((bytes, content_type, content_disposition))
    }
}

fn header_value(response: &reqwest::Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

/// Map a 400 body to per-field validation messages.
fn validation_error(body: &str, status: StatusCode) -> ApiError {
    let Ok(serde_json::Value::Object(object)) = serde_json::from_str(body) else {
        return ApiError::Status {
            status: status.as_u16(),
            message: body.chars().take(200).collect(),
        };
    };

    let mut errors = BTreeMap::new();
    for (field, messages) in object {
        let message = match messages {
            serde_json::Value::String(s) => s,
            serde_json::Value::Array(items) => items
                .iter()
                .filter_map(|v| v.as_str())
                .collect::<Vec<_>>()
                .join("; "),
            other => other.to_string(),
        };
        errors.insert(field, message);
    }

    ApiError::Validation(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_from_field_map() {
        let body = r#"{"nombre": ["Requerido"]}"#;
        match validation_error(body, StatusCode::BAD_REQUEST) {
            ApiError::Validation(fields) => {
                assert_eq!(fields.get("nombre").map(String::as_str), Some("Requerido"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_forbidden_is_classified() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/administracion/users/")
            .with_status(403)
            .create_async()
            .await;

        let backend = Backend::new(&BackendConfig {
            base_url: server.url(),
        });
        let result: Result<serde_json::Value, ApiError> =
            backend.get("administracion/users/", "token").await;
        assert!(matches!(result, Err(ApiError::Forbidden)));
    }
}
