//! Catalog API client.
//!
//! Read-only from the storefront. The default (unfiltered) listing and the
//! brand/category lookups are cached for 5 minutes; searches always go to
//! the backend.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::{debug, instrument};

use smartsales_core::api::{Brand, CatalogItem, Category, ListResponse};
use smartsales_core::types::CatalogItemId;

use super::{ApiError, Backend};

/// Filters accepted by `GET catalogo/`.
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    pub search: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
}

impl CatalogFilter {
    /// A filter that only searches.
    #[must_use]
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..Self::default()
        }
    }

    fn is_empty(&self) -> bool {
        self.search.is_none() && self.brand.is_none() && self.category.is_none()
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(brand) = &self.brand {
            pairs.push(("marca", brand.clone()));
        }
        if let Some(category) = &self.category {
            pairs.push(("categoria", category.clone()));
        }
        pairs
    }
}

#[derive(Clone)]
enum CacheValue {
    Items(Arc<Vec<CatalogItem>>),
    Brands(Arc<Vec<Brand>>),
    Categories(Arc<Vec<Category>>),
}

/// Client for the public catalog endpoints.
#[derive(Clone)]
pub struct CatalogApi {
    backend: Backend,
    cache: Cache<String, CacheValue>,
}

impl CatalogApi {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(backend: Backend) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self { backend, cache }
    }

    /// List catalog items, optionally filtered.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list(&self, filter: &CatalogFilter) -> Result<Arc<Vec<CatalogItem>>, ApiError> {
        let cache_key = "catalog:default".to_string();

        // Only the unfiltered listing is cached
        if filter.is_empty()
            && let Some(CacheValue::Items(items)) = self.cache.get(&cache_key).await
        {
            debug!("Cache hit for catalog listing");
            return Ok(items);
        }

        let response: ListResponse<CatalogItem> = self
            .backend
            .get_with_query("catalogo/", None, &filter.query_pairs())
            .await?;
        let items = Arc::new(response.into_items());

        if filter.is_empty() {
            self.cache
                .insert(cache_key, CacheValue::Items(items.clone()))
                .await;
        }

        Ok(items)
    }

    /// Get a single catalog item.
    ///
    /// # Errors
    ///
    /// Returns an error if the item is not found or the API request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get(&self, id: CatalogItemId) -> Result<CatalogItem, ApiError> {
        self.backend.get(&format!("catalogo/{id}/"), None).await
    }

    /// List all brands (for filter dropdowns).
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn brands(&self) -> Result<Arc<Vec<Brand>>, ApiError> {
        let cache_key = "catalog:brands".to_string();
        if let Some(CacheValue::Brands(brands)) = self.cache.get(&cache_key).await {
            debug!("Cache hit for brands");
            return Ok(brands);
        }

        let response: ListResponse<Brand> = self.backend.get("marcas/", None).await?;
        let brands = Arc::new(response.into_items());
        self.cache
            .insert(cache_key, CacheValue::Brands(brands.clone()))
            .await;
        Ok(brands)
    }

    /// List all categories (for filter dropdowns).
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Arc<Vec<Category>>, ApiError> {
        let cache_key = "catalog:categories".to_string();
        if let Some(CacheValue::Categories(categories)) = self.cache.get(&cache_key).await {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let response: ListResponse<Category> = self.backend.get("categorias/", None).await?;
        let categories = Arc::new(response.into_items());
        self.cache
            .insert(cache_key, CacheValue::Categories(categories.clone()))
            .await;
        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendConfig;

    fn api_for(server: &mockito::ServerGuard) -> CatalogApi {
        let backend = Backend::new(&BackendConfig {
            base_url: server.url(),
        });
        CatalogApi::new(backend)
    }

    #[tokio::test]
    async fn test_list_accepts_bare_array() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/catalogo/")
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id": 1, "nombre": "Mouse", "precio": "50.00", "stock_disponible": 3, "estado": "activo"}]"#)
            .create_async()
            .await;

        let api = api_for(&server);
        let items = api.list(&CatalogFilter::default()).await.expect("list");
        assert_eq!(items.len(), 1);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_accepts_paginated_shape() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/catalogo/")
            .match_query(mockito::Matcher::UrlEncoded(
                "search".into(),
                "mouse".into(),
            ))
            .with_body(
                r#"{"count": 1, "results": [{"id": 1, "nombre": "Mouse", "precio": 50, "stock_disponible": 3, "estado": "activo"}]}"#,
            )
            .create_async()
            .await;

        let api = api_for(&server);
        let items = api
            .list(&CatalogFilter::search("mouse"))
            .await
            .expect("list");
        assert_eq!(items.len(), 1);
        assert_eq!(items.first().map(|i| i.name.as_str()), Some("Mouse"));
    }

    #[tokio::test]
    async fn test_default_listing_is_cached() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/catalogo/")
            .with_body("[]")
            .expect(1)
            .create_async()
            .await;

        let api = api_for(&server);
        let _ = api.list(&CatalogFilter::default()).await.expect("first");
        let _ = api.list(&CatalogFilter::default()).await.expect("second");
        mock.assert_async().await;
    }
}
