//! Role administration screens.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;

use smartsales_core::api::{Permission, Role, RoleInput};
use smartsales_core::types::{PermissionId, RoleId};

use crate::backend::ApiError;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireOperator;
use crate::state::AppState;

/// Role row display data.
#[derive(Clone)]
pub struct RoleView {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub permission_count: usize,
}

impl From<&Role> for RoleView {
    fn from(role: &Role) -> Self {
        Self {
            id: role.id.as_i64(),
            name: role.name.clone(),
            description: role.description.clone().unwrap_or_default(),
            permission_count: role.permissions.len(),
        }
    }
}

/// Permission checkbox display data.
#[derive(Clone)]
pub struct PermissionView {
    pub id: i64,
    pub name: String,
    pub granted: bool,
}

/// Parse the role form from raw key/value pairs.
///
/// The permission checkboxes submit as a repeated `permissions` key, which
/// a flat form struct cannot express.
fn parse_role_form(pairs: Vec<(String, String)>) -> RoleInput {
    let mut name = String::new();
    let mut description = None;
    let mut permissions = Vec::new();

    for (key, value) in pairs {
        match key.as_str() {
            "nombre" => name = value.trim().to_string(),
            "descripcion" if !value.trim().is_empty() => {
                description = Some(value.trim().to_string());
            }
            "permissions" => {
                if let Ok(id) = value.parse::<i64>() {
                    permissions.push(PermissionId::new(id));
                }
            }
            _ => {}
        }
    }

    RoleInput {
        name,
        description,
        permissions,
    }
}

/// Role listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "roles/list.html")]
pub struct RolesListTemplate {
    pub roles: Vec<RoleView>,
}

/// Role form page template.
#[derive(Template, WebTemplate)]
#[template(path = "roles/form.html")]
pub struct RoleFormTemplate {
    pub title: &'static str,
    pub action: String,
    pub role: Option<RoleView>,
    pub permissions: Vec<PermissionView>,
    pub field_errors: Vec<(String, String)>,
}

/// Role detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "roles/detail.html")]
pub struct RoleDetailTemplate {
    pub role: RoleView,
    pub permissions: Vec<PermissionView>,
}

fn permission_views(all: &[Permission], granted: &[PermissionId]) -> Vec<PermissionView> {
    all.iter()
        .map(|permission| PermissionView {
            id: permission.id.as_i64(),
            name: permission.name.clone(),
            granted: granted.contains(&permission.id),
        })
        .collect()
}

/// List all roles.
#[instrument(skip(state, operator))]
pub async fn list(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
) -> Result<impl IntoResponse> {
    let roles = state.roles().list(&operator.access_token).await?;

    Ok(RolesListTemplate {
        roles: roles.iter().map(RoleView::from).collect(),
    })
}

/// Display the create form.
#[instrument(skip(state, operator))]
pub async fn new_form(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
) -> Result<impl IntoResponse> {
    let permissions = state.roles().permissions(&operator.access_token).await?;

    Ok(RoleFormTemplate {
        title: "Crear rol",
        action: "/roles/create".to_string(),
        role: None,
        permissions: permission_views(&permissions, &[]),
        field_errors: Vec::new(),
    })
}

/// Create a role.
#[instrument(skip(state, operator, pairs))]
pub async fn create(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response> {
    match state
        .roles()
        .create(&operator.access_token, &parse_role_form(pairs))
        .await
    {
        Ok(_) => Ok(Redirect::to("/roles").into_response()),
        Err(ApiError::Validation(fields)) => {
            let permissions = state.roles().permissions(&operator.access_token).await?;
            Ok(RoleFormTemplate {
                title: "Crear rol",
                action: "/roles/create".to_string(),
                role: None,
                permissions: permission_views(&permissions, &[]),
                field_errors: fields.into_iter().collect(),
            }
            .into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Display one role with its granted permissions.
#[instrument(skip(state, operator))]
pub async fn detail(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let role = state
        .roles()
        .get(&operator.access_token, RoleId::new(id))
        .await?;
    let all = state.roles().permissions(&operator.access_token).await?;
    let granted = permission_views(&all, &role.permissions)
        .into_iter()
        .filter(|p| p.granted)
        .collect();

    Ok(RoleDetailTemplate {
        role: RoleView::from(&role),
        permissions: granted,
    })
}

/// Display the edit form.
#[instrument(skip(state, operator))]
pub async fn edit_form(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let role = state
        .roles()
        .get(&operator.access_token, RoleId::new(id))
        .await?;
    let permissions = state.roles().permissions(&operator.access_token).await?;

    Ok(RoleFormTemplate {
        title: "Editar rol",
        action: format!("/roles/edit/{id}"),
        permissions: permission_views(&permissions, &role.permissions),
        role: Some(RoleView::from(&role)),
        field_errors: Vec::new(),
    })
}

/// Update a role.
#[instrument(skip(state, operator, pairs))]
pub async fn update(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    Path(id): Path<i64>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response> {
    match state
        .roles()
        .update(&operator.access_token, RoleId::new(id), &parse_role_form(pairs))
        .await
    {
        Ok(_) => Ok(Redirect::to("/roles").into_response()),
        Err(ApiError::Validation(fields)) => {
            let role = state
                .roles()
                .get(&operator.access_token, RoleId::new(id))
                .await?;
            let permissions = state.roles().permissions(&operator.access_token).await?;
            Ok(RoleFormTemplate {
                title: "Editar rol",
                action: format!("/roles/edit/{id}"),
                permissions: permission_views(&permissions, &role.permissions),
                role: Some(RoleView::from(&role)),
                field_errors: fields.into_iter().collect(),
            }
            .into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Delete a role.
#[instrument(skip(state, operator))]
pub async fn delete(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    Path(id): Path<i64>,
) -> Result<Response> {
    state
        .roles()
        .delete(&operator.access_token, RoleId::new(id))
        .await?;
    Ok(Redirect::to("/roles").into_response())
}
