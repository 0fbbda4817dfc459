//! Authentication middleware and extractors.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{CurrentOperator, session_keys};

/// Extractor that requires a logged-in staff operator.
///
/// Anonymous requests are redirected to the login page, preserving the
/// requested path.
pub struct RequireOperator(pub CurrentOperator);

/// Rejection for unauthenticated requests.
pub struct RedirectToLogin(String);

impl IntoResponse for RedirectToLogin {
    fn into_response(self) -> Response {
        Redirect::to(&format!("/login?next={}", self.0)).into_response()
    }
}

impl<S> FromRequestParts<S> for RequireOperator
where
    S: Send + Sync,
{
    type Rejection = RedirectToLogin;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts.extensions.get::<Session>().ok_or_else(|| {
            RedirectToLogin(urlencoding::encode(parts.uri.path()).into_owned())
        })?;

        let operator: CurrentOperator = session
            .get(session_keys::CURRENT_OPERATOR)
            .await
            .ok()
            .flatten()
            .ok_or_else(|| {
                RedirectToLogin(urlencoding::encode(parts.uri.path()).into_owned())
            })?;

        Ok(Self(operator))
    }
}

/// Helper to set the current operator in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_operator(
    session: &Session,
    operator: &CurrentOperator,
) -> Result<(), tower_sessions::session::Error> {
    session
        .insert(session_keys::CURRENT_OPERATOR, operator)
        .await
}

/// Helper to clear the current operator from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_operator(
    session: &Session,
) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentOperator>(session_keys::CURRENT_OPERATOR)
        .await?;
    Ok(())
}
