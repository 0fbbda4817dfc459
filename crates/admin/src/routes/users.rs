//! User administration screens.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use smartsales_core::api::{User, UserInput};
use smartsales_core::types::{RoleId, UserId};

use crate::backend::ApiError;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireOperator;
use crate::state::AppState;

/// User row display data.
#[derive(Clone)]
pub struct UserView {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub active: bool,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.as_i64(),
            username: user.username.clone(),
            email: user.email.clone().unwrap_or_default(),
            name: user.display_name(),
            role: user.role.clone().unwrap_or_default(),
            active: user.is_active,
        }
    }
}

/// User create/edit form data.
#[derive(Debug, Deserialize)]
pub struct UserForm {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub rol_id: Option<i64>,
    #[serde(default)]
    pub is_active: Option<String>,
}

impl UserForm {
    fn into_input(self) -> UserInput {
        UserInput {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.filter(|p| !p.is_empty()),
            role_id: self.rol_id.map(RoleId::new),
            is_active: self.is_active.is_some(),
        }
    }
}

/// User listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "users/list.html")]
pub struct UsersListTemplate {
    pub users: Vec<UserView>,
}

/// User form page template (create and edit).
#[derive(Template, WebTemplate)]
#[template(path = "users/form.html")]
pub struct UserFormTemplate {
    pub title: &'static str,
    pub action: String,
    pub user: Option<UserView>,
    pub field_errors: Vec<(String, String)>,
}

/// User detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "users/detail.html")]
pub struct UserDetailTemplate {
    pub user: UserView,
}

/// List all users.
#[instrument(skip(state, operator))]
pub async fn list(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
) -> Result<impl IntoResponse> {
    let users = state.users().list(&operator.access_token).await?;

    Ok(UsersListTemplate {
        users: users.iter().map(UserView::from).collect(),
    })
}

/// Display the create form.
pub async fn new_form(RequireOperator(_operator): RequireOperator) -> impl IntoResponse {
    UserFormTemplate {
        title: "Crear usuario",
        action: "/usuarios/create".to_string(),
        user: None,
        field_errors: Vec::new(),
    }
}

/// Create a user.
#[instrument(skip(state, operator, form))]
pub async fn create(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    Form(form): Form<UserForm>,
) -> Result<Response> {
    match state
        .users()
        .create(&operator.access_token, &form.into_input())
        .await
    {
        Ok(_) => Ok(Redirect::to("/usuarios").into_response()),
        Err(ApiError::Validation(fields)) => Ok(UserFormTemplate {
            title: "Crear usuario",
            action: "/usuarios/create".to_string(),
            user: None,
            field_errors: fields.into_iter().collect(),
        }
        .into_response()),
        Err(e) => Err(e.into()),
    }
}

/// Display one user.
#[instrument(skip(state, operator))]
pub async fn detail(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let user = state
        .users()
        .get(&operator.access_token, UserId::new(id))
        .await?;

    Ok(UserDetailTemplate {
        user: UserView::from(&user),
    })
}

/// Display the edit form.
#[instrument(skip(state, operator))]
pub async fn edit_form(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let user = state
        .users()
        .get(&operator.access_token, UserId::new(id))
        .await?;

    Ok(UserFormTemplate {
        title: "Editar usuario",
        action: format!("/usuarios/edit/{id}"),
        user: Some(UserView::from(&user)),
        field_errors: Vec::new(),
    })
}

/// Update a user.
#[instrument(skip(state, operator, form))]
pub async fn update(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    Path(id): Path<i64>,
    Form(form): Form<UserForm>,
) -> Result<Response> {
    match state
        .users()
        .update(&operator.access_token, UserId::new(id), &form.into_input())
        .await
    {
        Ok(_) => Ok(Redirect::to("/usuarios").into_response()),
        Err(ApiError::Validation(fields)) => {
            let user = state
                .users()
                .get(&operator.access_token, UserId::new(id))
                .await?;
            Ok(UserFormTemplate {
                title: "Editar usuario",
                action: format!("/usuarios/edit/{id}"),
                user: Some(UserView::from(&user)),
                field_errors: fields.into_iter().collect(),
            }
            .into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Delete a user.
#[instrument(skip(state, operator))]
pub async fn delete(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    Path(id): Path<i64>,
) -> Result<Response> {
    state
        .users()
        .delete(&operator.access_token, UserId::new(id))
        .await?;
    Ok(Redirect::to("/usuarios").into_response())
}
