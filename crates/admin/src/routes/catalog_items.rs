//! Catalog item administration screens.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use smartsales_core::api::{CatalogItem, CatalogItemInput};
use smartsales_core::types::{CatalogItemId, CatalogStatus};

use crate::backend::ApiError;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireOperator;
use crate::routes::format_price;
use crate::state::AppState;

/// Catalog item row display data.
#[derive(Clone)]
pub struct CatalogItemView {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: String,
    pub raw_price: Decimal,
    pub stock: i64,
    pub active: bool,
    pub brand: String,
    pub category: String,
}

impl From<&CatalogItem> for CatalogItemView {
    fn from(item: &CatalogItem) -> Self {
        Self {
            id: item.id.as_i64(),
            name: item.name.clone(),
            description: item.description.clone().unwrap_or_default(),
            price: format_price(item.price),
            raw_price: item.price,
            stock: item.available_stock,
            active: item.status.is_active(),
            brand: item.brand.clone().unwrap_or_default(),
            category: item.category.clone().unwrap_or_default(),
        }
    }
}

/// Catalog item create/edit form data.
#[derive(Debug, Deserialize)]
pub struct CatalogItemForm {
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    pub precio: Decimal,
    pub stock_disponible: i64,
    #[serde(default)]
    pub estado: Option<String>,
    #[serde(default)]
    pub marca: Option<String>,
    #[serde(default)]
    pub categoria: Option<String>,
}

impl CatalogItemForm {
    fn into_input(self) -> CatalogItemInput {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        let status = match self.estado.as_deref() {
            Some("inactivo") => CatalogStatus::Inactive,
            _ => CatalogStatus::Active,
        };
        CatalogItemInput {
            name: self.nombre.trim().to_string(),
            description: non_empty(self.descripcion),
            price: self.precio,
            available_stock: self.stock_disponible,
            status,
            brand: non_empty(self.marca),
            category: non_empty(self.categoria),
        }
    }
}

/// Catalog listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/list.html")]
pub struct CatalogListTemplate {
    pub items: Vec<CatalogItemView>,
}

/// Catalog item form page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/form.html")]
pub struct CatalogFormTemplate {
    pub title: &'static str,
    pub action: String,
    pub item: Option<CatalogItemView>,
    pub brands: Vec<String>,
    pub categories: Vec<String>,
    pub field_errors: Vec<(String, String)>,
}

/// Catalog item detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/detail.html")]
pub struct CatalogDetailTemplate {
    pub item: CatalogItemView,
}

async fn form_lookups(state: &AppState, token: &str) -> (Vec<String>, Vec<String>) {
    let brands = state
        .catalog()
        .brands(token)
        .await
        .map(|brands| brands.into_iter().map(|b| b.name).collect())
        .unwrap_or_default();
    let categories = state
        .catalog()
        .categories(token)
        .await
        .map(|categories| categories.into_iter().map(|c| c.name).collect())
        .unwrap_or_default();
    (brands, categories)
}

/// List all catalog items.
#[instrument(skip(state, operator))]
pub async fn list(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
) -> Result<impl IntoResponse> {
    let items = state.catalog().list(&operator.access_token).await?;

    Ok(CatalogListTemplate {
        items: items.iter().map(CatalogItemView::from).collect(),
    })
}

/// Display the create form.
#[instrument(skip(state, operator))]
pub async fn new_form(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
) -> impl IntoResponse {
    let (brands, categories) = form_lookups(&state, &operator.access_token).await;

    CatalogFormTemplate {
        title: "Crear ítem de catálogo",
        action: "/catalogos/create".to_string(),
        item: None,
        brands,
        categories,
        field_errors: Vec::new(),
    }
}

/// Create a catalog item.
#[instrument(skip(state, operator, form))]
pub async fn create(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    Form(form): Form<CatalogItemForm>,
) -> Result<Response> {
    match state
        .catalog()
        .create(&operator.access_token, &form.into_input())
        .await
    {
        Ok(_) => Ok(Redirect::to("/catalogos").into_response()),
        Err(ApiError::Validation(fields)) => {
            let (brands, categories) = form_lookups(&state, &operator.access_token).await;
            Ok(CatalogFormTemplate {
                title: "Crear ítem de catálogo",
                action: "/catalogos/create".to_string(),
                item: None,
                brands,
                categories,
                field_errors: fields.into_iter().collect(),
            }
            .into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Display one catalog item.
#[instrument(skip(state, operator))]
pub async fn detail(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let item = state
        .catalog()
        .get(&operator.access_token, CatalogItemId::new(id))
        .await?;

    Ok(CatalogDetailTemplate {
        item: CatalogItemView::from(&item),
    })
}

/// Display the edit form.
#[instrument(skip(state, operator))]
pub async fn edit_form(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let item = state
        .catalog()
        .get(&operator.access_token, CatalogItemId::new(id))
        .await?;
    let (brands, categories) = form_lookups(&state, &operator.access_token).await;

    Ok(CatalogFormTemplate {
        title: "Editar ítem de catálogo",
        action: format!("/catalogos/edit/{id}"),
        item: Some(CatalogItemView::from(&item)),
        brands,
        categories,
        field_errors: Vec::new(),
    })
}

/// Update a catalog item.
#[instrument(skip(state, operator, form))]
pub async fn update(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    Path(id): Path<i64>,
    Form(form): Form<CatalogItemForm>,
) -> Result<Response> {
    match state
        .catalog()
        .update(
            &operator.access_token,
            CatalogItemId::new(id),
            &form.into_input(),
        )
        .await
    {
        Ok(_) => Ok(Redirect::to("/catalogos").into_response()),
        Err(ApiError::Validation(fields)) => {
            let item = state
                .catalog()
                .get(&operator.access_token, CatalogItemId::new(id))
                .await?;
            let (brands, categories) = form_lookups(&state, &operator.access_token).await;
            Ok(CatalogFormTemplate {
                title: "Editar ítem de catálogo",
                action: format!("/catalogos/edit/{id}"),
                item: Some(CatalogItemView::from(&item)),
                brands,
                categories,
                field_errors: fields.into_iter().collect(),
            }
            .into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Delete a catalog item.
#[instrument(skip(state, operator))]
pub async fn delete(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    Path(id): Path<i64>,
) -> Result<Response> {
    state
        .catalog()
        .delete(&operator.access_token, CatalogItemId::new(id))
        .await?;
    Ok(Redirect::to("/catalogos").into_response())
}
