//! Client (customer) administration screens.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use smartsales_core::api::{City, Client, ClientInput};
use smartsales_core::types::{CityId, ClientId};

use crate::backend::ApiError;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireOperator;
use crate::state::AppState;

/// Client row display data.
#[derive(Clone)]
pub struct ClientView {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub city_id: Option<i64>,
    pub tax_id: String,
}

impl From<&Client> for ClientView {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id.as_i64(),
            name: client.display_name(),
            email: client.email.clone().unwrap_or_default(),
            phone: client.phone.clone().unwrap_or_default(),
            address: client.address.clone().unwrap_or_default(),
            city: client.city_name.clone().unwrap_or_default(),
            city_id: client.city_id.map(|id| id.as_i64()),
            tax_id: client.tax_id.clone().unwrap_or_default(),
        }
    }
}

/// City option display data.
#[derive(Clone)]
pub struct CityView {
    pub id: i64,
    pub name: String,
}

impl From<&City> for CityView {
    fn from(city: &City) -> Self {
        Self {
            id: city.id.as_i64(),
            name: city.name.clone(),
        }
    }
}

/// Client create/edit form data.
#[derive(Debug, Deserialize)]
pub struct ClientForm {
    pub nombre: String,
    #[serde(default)]
    pub apellido: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub direccion: Option<String>,
    #[serde(default)]
    pub ciudad: Option<i64>,
    #[serde(default)]
    pub nit: Option<String>,
}

impl ClientForm {
    fn into_input(self) -> ClientInput {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        ClientInput {
            first_name: self.nombre.trim().to_string(),
            last_name: non_empty(self.apellido),
            email: non_empty(self.email),
            phone: non_empty(self.telefono),
            address: non_empty(self.direccion),
            city_id: self.ciudad.map(CityId::new),
            tax_id: non_empty(self.nit),
        }
    }
}

/// Client listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "clients/list.html")]
pub struct ClientsListTemplate {
    pub clients: Vec<ClientView>,
}

/// Client form page template.
#[derive(Template, WebTemplate)]
#[template(path = "clients/form.html")]
pub struct ClientFormTemplate {
    pub title: &'static str,
    pub action: String,
    pub client: Option<ClientView>,
    pub cities: Vec<CityView>,
    pub field_errors: Vec<(String, String)>,
}

/// Client detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "clients/detail.html")]
pub struct ClientDetailTemplate {
    pub client: ClientView,
}

async fn city_options(state: &AppState, token: &str) -> Vec<CityView> {
    // The select still renders when the lookup fails
    state
        .locations()
        .cities(token, None)
        .await
        .map(|cities| cities.iter().map(CityView::from).collect())
        .unwrap_or_default()
}

/// List all clients.
#[instrument(skip(state, operator))]
pub async fn list(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
) -> Result<impl IntoResponse> {
    let clients = state.clients().list(&operator.access_token).await?;

    Ok(ClientsListTemplate {
        clients: clients.iter().map(ClientView::from).collect(),
    })
}

/// Display the create form.
#[instrument(skip(state, operator))]
pub async fn new_form(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
) -> impl IntoResponse {
    ClientFormTemplate {
        title: "Crear cliente",
        action: "/clientes/create".to_string(),
        client: None,
        cities: city_options(&state, &operator.access_token).await,
        field_errors: Vec::new(),
    }
}

/// Create a client.
#[instrument(skip(state, operator, form))]
pub async fn create(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    Form(form): Form<ClientForm>,
) -> Result<Response> {
    match state
        .clients()
        .create(&operator.access_token, &form.into_input())
        .await
    {
        Ok(_) => Ok(Redirect::to("/clientes").into_response()),
        Err(ApiError::Validation(fields)) => Ok(ClientFormTemplate {
            title: "Crear cliente",
            action: "/clientes/create".to_string(),
            client: None,
            cities: city_options(&state, &operator.access_token).await,
            field_errors: fields.into_iter().collect(),
        }
        .into_response()),
        Err(e) => Err(e.into()),
    }
}

/// Display one client.
#[instrument(skip(state, operator))]
pub async fn detail(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let client = state
        .clients()
        .get(&operator.access_token, ClientId::new(id))
        .await?;

    Ok(ClientDetailTemplate {
        client: ClientView::from(&client),
    })
}

/// Display the edit form.
#[instrument(skip(state, operator))]
pub async fn edit_form(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let client = state
        .clients()
        .get(&operator.access_token, ClientId::new(id))
        .await?;

    Ok(ClientFormTemplate {
        title: "Editar cliente",
        action: format!("/clientes/edit/{id}"),
        client: Some(ClientView::from(&client)),
        cities: city_options(&state, &operator.access_token).await,
        field_errors: Vec::new(),
    })
}

/// Update a client.
#[instrument(skip(state, operator, form))]
pub async fn update(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    Path(id): Path<i64>,
    Form(form): Form<ClientForm>,
) -> Result<Response> {
    match state
        .clients()
        .update(&operator.access_token, ClientId::new(id), &form.into_input())
        .await
    {
        Ok(_) => Ok(Redirect::to("/clientes").into_response()),
        Err(ApiError::Validation(fields)) => {
            let client = state
                .clients()
                .get(&operator.access_token, ClientId::new(id))
                .await?;
            Ok(ClientFormTemplate {
                title: "Editar cliente",
                action: format!("/clientes/edit/{id}"),
                client: Some(ClientView::from(&client)),
                cities: city_options(&state, &operator.access_token).await,
                field_errors: fields.into_iter().collect(),
            }
            .into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Delete a client.
#[instrument(skip(state, operator))]
pub async fn delete(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    Path(id): Path<i64>,
) -> Result<Response> {
    state
        .clients()
        .delete(&operator.access_token, ClientId::new(id))
        .await?;
    Ok(Redirect::to("/clientes").into_response())
}
