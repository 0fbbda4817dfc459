//! Location lookups for the client form selects.

use tracing::instrument;

use smartsales_core::api::{City, Department, ListResponse};
use smartsales_core::types::DepartmentId;

use super::{ApiError, Backend};

/// Client for department/city lookups.
#[derive(Clone)]
pub struct LocationsApi {
    backend: Backend,
}

impl LocationsApi {
    #[must_use]
    pub const fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// List all departments.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn departments(&self, token: &str) -> Result<Vec<Department>, ApiError> {
        let response: ListResponse<Department> = self
            .backend
            .get("administracion/departamentos/", token)
            .await?;
        Ok(response.into_items())
    }

    /// List cities, optionally scoped to a department.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn cities(
        &self,
        token: &str,
        department: Option<DepartmentId>,
    ) -> Result<Vec<City>, ApiError> {
        let mut query = Vec::new();
        if let Some(department) = department {
            query.push(("departamento", department.to_string()));
        }
        let response: ListResponse<City> = self
            .backend
            .get_with_query("administracion/ciudades/", token, &query)
            .await?;
        Ok(response.into_items())
    }
}
