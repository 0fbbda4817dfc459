//! Voice assistant route handler.
//!
//! Speech capture stays in the browser (Web Speech API); the transcript is
//! posted here. The pipeline is: search the catalog with the transcript,
//! keep active items with available stock, add the first match to the cart
//! through the coordinator, and report what happened as a status fragment.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::backend::CatalogFilter;
use crate::cart::{CartOutcome, CartUser};
use crate::middleware::OptionalAuth;
use crate::state::AppState;

/// Voice command form data: the raw transcript.
#[derive(Debug, Deserialize)]
pub struct VoiceCommandForm {
    pub texto: String,
}

/// Assistant status fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/assistant_status.html")]
pub struct AssistantStatusTemplate {
    pub message: String,
}

/// Run the transcript-to-cart pipeline.
#[instrument(skip(state, auth, form))]
pub async fn command(
    State(state): State<AppState>,
    OptionalAuth(auth): OptionalAuth,
    Form(form): Form<VoiceCommandForm>,
) -> Response {
    // Speech recognizers love trailing periods
    let transcript = form.texto.trim().trim_end_matches('.').trim().to_string();
    if transcript.is_empty() {
        return status(StatusCode::BAD_REQUEST, "No entendí el comando".to_string());
    }

    let results = match state
        .catalog()
        .list(&CatalogFilter::search(transcript.as_str()))
        .await
    {
        Ok(results) => results,
        Err(e) => {
            tracing::error!("Voice search failed: {e}");
            return status(
                StatusCode::BAD_GATEWAY,
                "Error al procesar tu solicitud".to_string(),
            );
        }
    };

    if results.is_empty() {
        return status(
            StatusCode::OK,
            format!("No encontré productos para \"{transcript}\""),
        );
    }

    let Some(item) = results.iter().find(|item| item.is_purchasable()) else {
        return status(
            StatusCode::OK,
            format!("\"{transcript}\" no tiene stock disponible"),
        );
    };

    let cart_auth = auth.as_ref().map(|user| CartUser {
        id: user.id,
        token: &user.access_token,
    });

    match state.cart().add_item(cart_auth, item.id, 1).await {
        CartOutcome::Updated(_) => (
            AppendHeaders([("HX-Trigger", "cart-updated")]),
            AssistantStatusTemplate {
                message: format!("¡{} agregado al carrito!", item.name),
            },
        )
            .into_response(),
        CartOutcome::NeedsLogin => status(
            StatusCode::UNAUTHORIZED,
            "Debes iniciar sesión para agregar productos al carrito".to_string(),
        ),
        CartOutcome::Failed(_) => status(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Error al agregar al carrito".to_string(),
        ),
    }
}

fn status(code: StatusCode, message: String) -> Response {
    (code, AssistantStatusTemplate { message }).into_response()
}
