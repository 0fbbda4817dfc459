//! Audit log client (read-only).

use tracing::instrument;

use smartsales_core::api::{AuditEntry, ListResponse};

use super::{ApiError, Backend};

/// Client for the audit log listing.
#[derive(Clone)]
pub struct AuditApi {
    backend: Backend,
}

impl AuditApi {
    #[must_use]
    pub const fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// List audit entries, optionally filtered by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn list(
        &self,
        token: &str,
        username: Option<&str>,
    ) -> Result<Vec<AuditEntry>, ApiError> {
        let mut query = Vec::new();
        if let Some(username) = username {
            query.push(("usuario", username.to_string()));
        }
        let response: ListResponse<AuditEntry> = self
            .backend
            .get_with_query("administracion/bitacoras/", token, &query)
            .await?;
        Ok(response.into_items())
    }
}
