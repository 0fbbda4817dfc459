//! Application state shared across handlers.

use std::sync::Arc;

use crate::backend::{
    AuditApi, AuthApi, Backend, CatalogAdminApi, ClientsApi, LocationsApi, PaymentsAdminApi,
    ProductsApi, ReportsApi, RolesApi, SalesAdminApi, UsersApi,
};
use crate::config::AdminConfig;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    backend: Backend,
    auth: AuthApi,
    users: UsersApi,
    roles: RolesApi,
    clients: ClientsApi,
    locations: LocationsApi,
    products: ProductsApi,
    catalog: CatalogAdminApi,
    sales: SalesAdminApi,
    payments: PaymentsAdminApi,
    audit: AuditApi,
    reports: ReportsApi,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        let backend = Backend::new(&config.api);

        Self {
            inner: Arc::new(AppStateInner {
                auth: AuthApi::new(backend.clone()),
                users: UsersApi::new(backend.clone()),
                roles: RolesApi::new(backend.clone()),
                clients: ClientsApi::new(backend.clone()),
                locations: LocationsApi::new(backend.clone()),
                products: ProductsApi::new(backend.clone()),
                catalog: CatalogAdminApi::new(backend.clone()),
                sales: SalesAdminApi::new(backend.clone()),
                payments: PaymentsAdminApi::new(backend.clone()),
                audit: AuditApi::new(backend.clone()),
                reports: ReportsApi::new(backend.clone()),
                backend,
                config,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn backend(&self) -> &Backend {
        &self.inner.backend
    }

    #[must_use]
    pub fn auth(&self) -> &AuthApi {
        &self.inner.auth
    }

    #[must_use]
    pub fn users(&self) -> &UsersApi {
        &self.inner.users
    }

    #[must_use]
    pub fn roles(&self) -> &RolesApi {
        &self.inner.roles
    }

    #[must_use]
    pub fn clients(&self) -> &ClientsApi {
        &self.inner.clients
    }

    #[must_use]
    pub fn locations(&self) -> &LocationsApi {
        &self.inner.locations
    }

    #[must_use]
    pub fn products(&self) -> &ProductsApi {
        &self.inner.products
    }

    #[must_use]
    pub fn catalog(&self) -> &CatalogAdminApi {
        &self.inner.catalog
    }

    #[must_use]
    pub fn sales(&self) -> &SalesAdminApi {
        &self.inner.sales
    }

    #[must_use]
    pub fn payments(&self) -> &PaymentsAdminApi {
        &self.inner.payments
    }

    #[must_use]
    pub fn audit(&self) -> &AuditApi {
        &self.inner.audit
    }

    #[must_use]
    pub fn reports(&self) -> &ReportsApi {
        &self.inner.reports
    }
}
