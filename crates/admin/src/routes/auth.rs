//! Operator login/logout handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::backend::ApiError;
use crate::middleware::set_current_operator;
use crate::models::CurrentOperator;
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub next: Option<String>,
}

/// Query parameters for the login page.
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub error: Option<String>,
    pub next: Option<String>,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub next: String,
}

/// Display the login page.
pub async fn login_page(Query(query): Query<LoginQuery>) -> impl IntoResponse {
    let error = query.error.map(|code| match code.as_str() {
        "credentials" => "Usuario o contraseña incorrectos".to_string(),
        "staff" => "Esta cuenta no tiene acceso al panel".to_string(),
        _ => "Error al iniciar sesión".to_string(),
    });

    LoginTemplate {
        error,
        next: sanitize_next(query.next),
    }
}

/// Handle login form submission. Only staff accounts get a session.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    match state.auth().login(&form.username, &form.password).await {
        Ok(tokens) => {
            if !tokens.user.is_staff {
                tracing::warn!("Non-staff login attempt: {}", form.username);
                return Redirect::to("/login?error=staff").into_response();
            }

            let operator = CurrentOperator::from_tokens(tokens);
            if let Err(e) = set_current_operator(&session, &operator).await {
                tracing::error!("Failed to set session: {e}");
                return Redirect::to("/login?error=session").into_response();
            }

            Redirect::to(&sanitize_next(form.next)).into_response()
        }
        Err(ApiError::Unauthorized) => Redirect::to("/login?error=credentials").into_response(),
        Err(e) => {
            tracing::error!("Login failed: {e}");
            Redirect::to("/login?error=backend").into_response()
        }
    }
}

/// Handle logout: best-effort token blacklist, then drop the session.
#[instrument(skip(state, session))]
pub async fn logout(State(state): State<AppState>, session: Session) -> Response {
    if let Ok(Some(operator)) = session
        .get::<CurrentOperator>(crate::models::session_keys::CURRENT_OPERATOR)
        .await
    {
        if let Err(e) = state
            .auth()
            .logout(&operator.access_token, &operator.refresh_token)
            .await
        {
            tracing::warn!("Backend logout failed: {e}");
        }
    }

    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {e}");
    }

    Redirect::to("/login").into_response()
}

/// Only allow same-site relative redirect targets.
fn sanitize_next(next: Option<String>) -> String {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path,
        _ => "/".to_string(),
    }
}
