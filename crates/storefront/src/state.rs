//! Application state shared across handlers.

use std::sync::Arc;

use crate::backend::{AuthApi, Backend, CartApi, CatalogApi, PaymentsApi, SalesApi};
use crate::cart::CartCoordinator;
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the backend clients and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    backend: Backend,
    auth: AuthApi,
    catalog: CatalogApi,
    sales: SalesApi,
    payments: PaymentsApi,
    cart: CartCoordinator,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let backend = Backend::new(&config.api);
        let auth = AuthApi::new(backend.clone());
        let catalog = CatalogApi::new(backend.clone());
        let sales = SalesApi::new(backend.clone());
        let payments = PaymentsApi::new(backend.clone());
        let cart = CartCoordinator::new(CartApi::new(backend.clone()));

        Self {
            inner: Arc::new(AppStateInner {
                config,
                backend,
                auth,
                catalog,
                sales,
                payments,
                cart,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the low-level backend handle.
    #[must_use]
    pub fn backend(&self) -> &Backend {
        &self.inner.backend
    }

    /// Get a reference to the auth API client.
    #[must_use]
    pub fn auth(&self) -> &AuthApi {
        &self.inner.auth
    }

    /// Get a reference to the catalog API client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogApi {
        &self.inner.catalog
    }

    /// Get a reference to the sales API client.
    #[must_use]
    pub fn sales(&self) -> &SalesApi {
        &self.inner.sales
    }

    /// Get a reference to the payments API client.
    #[must_use]
    pub fn payments(&self) -> &PaymentsApi {
        &self.inner.payments
    }

    /// Get a reference to the cart coordinator.
    #[must_use]
    pub fn cart(&self) -> &CartCoordinator {
        &self.inner.cart
    }
}
