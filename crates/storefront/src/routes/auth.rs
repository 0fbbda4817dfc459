//! Authentication route handlers.
//!
//! Login and register proxy the backend and store the user plus the
//! access/refresh token pair in the session. Logout posts the refresh token
//! to the backend (best effort) and then destroys the whole session - the
//! analog of the original client's full page reload that discards all
//! in-memory state rather than reconciling it.

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

use smartsales_core::api::RegisterRequest;
use smartsales_core::types::Email;

use crate::backend::ApiError;
use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{OptionalAuth, set_current_user};
use crate::models::CurrentUser;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub next: Option<String>,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
    pub next: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
    pub next: String,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
    pub field_errors: Vec<(String, String)>,
}

impl RegisterTemplate {
    fn clean() -> Self {
        Self {
            error: None,
            field_errors: Vec::new(),
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the login page.
pub async fn login_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    let error = query.error.map(|code| match code.as_str() {
        "credentials" => "Usuario o contraseña incorrectos".to_string(),
        "session" => "La sesión expiró, intenta nuevamente".to_string(),
        _ => "Error al iniciar sesión".to_string(),
    });

    LoginTemplate {
        error,
        success: query.success,
        next: sanitize_next(query.next),
    }
}

/// Handle login form submission.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    match state.auth().login(&form.username, &form.password).await {
        Ok(tokens) => {
            let user = CurrentUser::from_tokens(tokens);
            if let Err(e) = set_current_user(&session, &user).await {
                tracing::error!("Failed to set session: {e}");
                return Redirect::to("/auth/login?error=session").into_response();
            }

            set_sentry_user(&user.id, user.email.as_deref());
            Redirect::to(&sanitize_next(form.next)).into_response()
        }
        Err(ApiError::Unauthorized) => {
            tracing::warn!("Login rejected for {}", form.username);
            Redirect::to("/auth/login?error=credentials").into_response()
        }
        Err(e) => {
            tracing::error!("Login failed: {e}");
            Redirect::to("/auth/login?error=backend").into_response()
        }
    }
}

/// Display the registration page.
pub async fn register_page() -> impl IntoResponse {
    RegisterTemplate::clean()
}

/// Handle registration form submission.
///
/// Validation errors from the backend come back as a field->message map and
/// are surfaced field-by-field; local checks (email shape, password
/// confirmation) short-circuit before the request goes out.
#[instrument(skip(state, session, form))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    if form.password != form.password_confirm {
        return RegisterTemplate {
            error: Some("Las contraseñas no coinciden".to_string()),
            field_errors: Vec::new(),
        }
        .into_response();
    }

    let email = match Email::parse(form.email.trim()) {
        Ok(email) => email,
        Err(e) => {
            return RegisterTemplate {
                error: None,
                field_errors: vec![("email".to_string(), e.to_string())],
            }
            .into_response();
        }
    };

    let request = RegisterRequest {
        username: form.username.trim().to_string(),
        email: email.as_str().to_string(),
        password: form.password,
        first_name: form.first_name.trim().to_string(),
        last_name: form.last_name.filter(|s| !s.trim().is_empty()),
        phone: form.phone.filter(|s| !s.trim().is_empty()),
    };

    match state.auth().register(&request).await {
        Ok(tokens) => {
            let user = CurrentUser::from_tokens(tokens);
            if let Err(e) = set_current_user(&session, &user).await {
                tracing::error!("Failed to set session: {e}");
                return Redirect::to("/auth/login?error=session").into_response();
            }

            set_sentry_user(&user.id, user.email.as_deref());
            Redirect::to("/").into_response()
        }
        Err(ApiError::Validation(fields)) => RegisterTemplate {
            error: None,
            field_errors: fields.into_iter().collect(),
        }
        .into_response(),
        Err(e) => {
            tracing::error!("Registration failed: {e}");
            RegisterTemplate {
                error: Some("Error al registrarse, intenta nuevamente".to_string()),
                field_errors: Vec::new(),
            }
            .into_response()
        }
    }
}

/// Handle logout.
///
/// Best-effort blacklists the refresh token, then flushes the whole session
/// so nothing (cart snapshot, checkout flags, tokens) survives.
#[instrument(skip(state, session, auth))]
pub async fn logout(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(auth): OptionalAuth,
) -> Response {
    if let Some(user) = auth {
        if let Err(e) = state.auth().logout(&user.refresh_token).await {
            tracing::warn!("Backend logout failed: {e}");
        }
        state.cart().forget(user.id);
    }

    clear_sentry_user();
    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {e}");
    }

    Redirect::to("/").into_response()
}

/// Only allow same-site relative redirect targets.
fn sanitize_next(next: Option<String>) -> String {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path,
        _ => "/".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_next_accepts_relative_paths() {
        assert_eq!(sanitize_next(Some("/carrito".into())), "/carrito");
    }

    #[test]
    fn test_sanitize_next_rejects_external_targets() {
        assert_eq!(sanitize_next(Some("https://evil.example".into())), "/");
        assert_eq!(sanitize_next(Some("//evil.example".into())), "/");
        assert_eq!(sanitize_next(None), "/");
    }
}
