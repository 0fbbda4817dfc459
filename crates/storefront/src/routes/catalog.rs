//! Catalog route handlers (public, no auth required).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use smartsales_core::api::CatalogItem;
use smartsales_core::types::CatalogItemId;

use crate::backend::CatalogFilter;
use crate::error::Result;
use crate::filters;
use crate::routes::format_price;
use crate::state::AppState;

/// Catalog item display data for templates.
#[derive(Clone)]
pub struct CatalogItemView {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: String,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub stock: i64,
    pub available: bool,
}

impl From<&CatalogItem> for CatalogItemView {
    fn from(item: &CatalogItem) -> Self {
        Self {
            id: item.id.as_i64(),
            name: item.name.clone(),
            description: item.description.clone(),
            price: format_price(item.price),
            brand: item.brand.clone(),
            category: item.category.clone(),
            stock: item.available_stock,
            available: item.is_purchasable(),
        }
    }
}

/// Search and filter query parameters.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub marca: Option<String>,
    #[serde(default)]
    pub categoria: Option<String>,
}

/// Catalog listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/index.html")]
pub struct CatalogIndexTemplate {
    pub items: Vec<CatalogItemView>,
    pub brands: Vec<String>,
    pub categories: Vec<String>,
    pub search: String,
    pub selected_brand: String,
    pub selected_category: String,
}

/// Catalog item detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/show.html")]
pub struct CatalogShowTemplate {
    pub item: CatalogItemView,
}

/// Display the catalog listing.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Result<impl IntoResponse> {
    let filter = CatalogFilter {
        search: query.q.clone().filter(|s| !s.trim().is_empty()),
        brand: query.marca.clone().filter(|s| !s.is_empty()),
        category: query.categoria.clone().filter(|s| !s.is_empty()),
    };

    let items = state.catalog().list(&filter).await?;

    // Filter dropdowns are decoration; an empty list is fine when the
    // lookups fail.
    let brands = state
        .catalog()
        .brands()
        .await
        .map(|brands| brands.iter().map(|b| b.name.clone()).collect())
        .unwrap_or_default();
    let categories = state
        .catalog()
        .categories()
        .await
        .map(|categories| categories.iter().map(|c| c.name.clone()).collect())
        .unwrap_or_default();

    Ok(CatalogIndexTemplate {
        items: items.iter().map(CatalogItemView::from).collect(),
        brands,
        categories,
        search: query.q.unwrap_or_default(),
        selected_brand: query.marca.unwrap_or_default(),
        selected_category: query.categoria.unwrap_or_default(),
    })
}

/// Display one catalog item.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let item = state.catalog().get(CatalogItemId::new(id)).await?;

    Ok(CatalogShowTemplate {
        item: CatalogItemView::from(&item),
    })
}
