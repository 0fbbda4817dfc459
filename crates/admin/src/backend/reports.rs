//! Report generation client.
//!
//! The backend does all the work (NLP prompt interpretation, PDF/Excel
//! rendering); this client streams the produced bytes through unchanged.

use axum::body::Bytes;
use reqwest::Method;
use tracing::instrument;

use smartsales_core::api::{ReportPrompt, StandardReport};

use super::{ApiError, Backend};

/// A binary report body with its content headers.
#[derive(Debug, Clone)]
pub struct BinaryDownload {
    pub bytes: Bytes,
    pub content_type: Option<String>,
    pub content_disposition: Option<String>,
}

/// Client for the report endpoints.
#[derive(Clone)]
pub struct ReportsApi {
    backend: Backend,
}

impl ReportsApi {
    #[must_use]
    pub const fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// Generate a report from a natural-language prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the prompt or the request
    /// fails.
    #[instrument(skip(self, token))]
    pub async fn generate(&self, token: &str, prompt: &str) -> Result<BinaryDownload, ApiError> {
        let payload = ReportPrompt {
            prompt: prompt.to_owned(),
        };
        let body = serde_json::to_value(&payload)?;
        let (bytes, content_type, content_disposition) = self
            .backend
            .fetch_bytes(Method::POST, "reports/", token, Some(body))
            .await?;

        Ok(BinaryDownload {
            bytes,
            content_type,
            content_disposition,
        })
    }

    /// Download a predefined report.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn standard(
        &self,
        token: &str,
        report: StandardReport,
    ) -> Result<BinaryDownload, ApiError> {
        let path = format!("standard/{}/", report.key());
        let (bytes, content_type, content_disposition) = self
            .backend
            .fetch_bytes(Method::GET, &path, token, None)
            .await?;

        Ok(BinaryDownload {
            bytes,
            content_type,
            content_disposition,
        })
    }
}
