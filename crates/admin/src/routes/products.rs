//! Serialized product unit administration screens.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use smartsales_core::api::{Product, ProductInput};
use smartsales_core::types::{CatalogItemId, ProductId};

use crate::backend::ApiError;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireOperator;
use crate::state::AppState;

/// Product unit row display data.
#[derive(Clone)]
pub struct ProductView {
    pub id: i64,
    pub serial_number: String,
    pub catalog_item_id: Option<i64>,
    pub catalog_item: String,
    pub status: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i64(),
            serial_number: product.serial_number.clone(),
            catalog_item_id: product.catalog_item_id.map(|id| id.as_i64()),
            catalog_item: product.catalog_item_name.clone().unwrap_or_default(),
            status: product.status.clone().unwrap_or_default(),
        }
    }
}

/// Product create/edit form data.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub numero_serie: String,
    pub catalogo: i64,
    #[serde(default)]
    pub estado: Option<String>,
}

impl ProductForm {
    fn into_input(self) -> ProductInput {
        ProductInput {
            serial_number: self.numero_serie.trim().to_string(),
            catalog_item_id: CatalogItemId::new(self.catalogo),
            status: self.estado.filter(|s| !s.trim().is_empty()),
        }
    }
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/list.html")]
pub struct ProductsListTemplate {
    pub products: Vec<ProductView>,
}

/// Product form page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/form.html")]
pub struct ProductFormTemplate {
    pub title: &'static str,
    pub action: String,
    pub product: Option<ProductView>,
    pub field_errors: Vec<(String, String)>,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/detail.html")]
pub struct ProductDetailTemplate {
    pub product: ProductView,
}

/// List all product units.
#[instrument(skip(state, operator))]
pub async fn list(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
) -> Result<impl IntoResponse> {
    let products = state.products().list(&operator.access_token).await?;

    Ok(ProductsListTemplate {
        products: products.iter().map(ProductView::from).collect(),
    })
}

/// Display the create form.
pub async fn new_form(RequireOperator(_operator): RequireOperator) -> impl IntoResponse {
    ProductFormTemplate {
        title: "Registrar producto",
        action: "/productos/create".to_string(),
        product: None,
        field_errors: Vec::new(),
    }
}

/// Create a product unit.
#[instrument(skip(state, operator, form))]
pub async fn create(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    match state
        .products()
        .create(&operator.access_token, &form.into_input())
        .await
    {
        Ok(_) => Ok(Redirect::to("/productos").into_response()),
        Err(ApiError::Validation(fields)) => Ok(ProductFormTemplate {
            title: "Registrar producto",
            action: "/productos/create".to_string(),
            product: None,
            field_errors: fields.into_iter().collect(),
        }
        .into_response()),
        Err(e) => Err(e.into()),
    }
}

/// Display one product unit.
#[instrument(skip(state, operator))]
pub async fn detail(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let product = state
        .products()
        .get(&operator.access_token, ProductId::new(id))
        .await?;

    Ok(ProductDetailTemplate {
        product: ProductView::from(&product),
    })
}

/// Display the edit form.
#[instrument(skip(state, operator))]
pub async fn edit_form(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let product = state
        .products()
        .get(&operator.access_token, ProductId::new(id))
        .await?;

    Ok(ProductFormTemplate {
        title: "Editar producto",
        action: format!("/productos/edit/{id}"),
        product: Some(ProductView::from(&product)),
        field_errors: Vec::new(),
    })
}

/// Update a product unit.
#[instrument(skip(state, operator, form))]
pub async fn update(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    Path(id): Path<i64>,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    match state
        .products()
        .update(&operator.access_token, ProductId::new(id), &form.into_input())
        .await
    {
        Ok(_) => Ok(Redirect::to("/productos").into_response()),
        Err(ApiError::Validation(fields)) => {
            let product = state
                .products()
                .get(&operator.access_token, ProductId::new(id))
                .await?;
            Ok(ProductFormTemplate {
                title: "Editar producto",
                action: format!("/productos/edit/{id}"),
                product: Some(ProductView::from(&product)),
                field_errors: fields.into_iter().collect(),
            }
            .into_response())
        }
        Err(e) => Err(AppError::from(e)),
    }
}

/// Delete a product unit.
#[instrument(skip(state, operator))]
pub async fn delete(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    Path(id): Path<i64>,
) -> Result<Response> {
    state
        .products()
        .delete(&operator.access_token, ProductId::new(id))
        .await?;
    Ok(Redirect::to("/productos").into_response())
}
