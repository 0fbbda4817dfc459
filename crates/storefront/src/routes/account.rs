//! Customer account route handlers (profile, payments, sale history).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use smartsales_core::api::{ChangePasswordRequest, Payment, SaleLine, UpdateProfileRequest, User};
use smartsales_core::types::{Email, SaleId, SaleStatus};

use crate::backend::ApiError;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::routes::checkout::SaleView;
use crate::routes::format_price;
use crate::state::AppState;

// =============================================================================
// View Models
// =============================================================================

/// Profile display data.
#[derive(Clone)]
pub struct ProfileView {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

impl From<&User> for ProfileView {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone().unwrap_or_default(),
            first_name: user.first_name.clone().unwrap_or_default(),
            last_name: user.last_name.clone().unwrap_or_default(),
            role: user.role.clone().unwrap_or_else(|| "Cliente".to_string()),
        }
    }
}

/// Payment row display data.
#[derive(Clone)]
pub struct PaymentView {
    pub id: i64,
    pub sale_id: Option<i64>,
    pub amount: String,
    pub status: &'static str,
    pub provider: String,
    pub date: String,
}

impl From<&Payment> for PaymentView {
    fn from(payment: &Payment) -> Self {
        Self {
            id: payment.id.as_i64(),
            sale_id: payment.sale_id.map(|id| id.as_i64()),
            amount: format_price(payment.amount),
            status: payment.status.label(),
            provider: payment.provider.clone().unwrap_or_else(|| "Stripe".to_string()),
            date: payment
                .created_at
                .map(|date| date.format("%d/%m/%Y %H:%M").to_string())
                .unwrap_or_default(),
        }
    }
}

/// Sale line row display data.
#[derive(Clone)]
pub struct SaleLineView {
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub subtotal: String,
}

impl From<&SaleLine> for SaleLineView {
    fn from(line: &SaleLine) -> Self {
        Self {
            name: line.item_name.clone().unwrap_or_else(|| "-".to_string()),
            quantity: line.quantity,
            unit_price: format_price(line.unit_price),
            subtotal: format_price(line.subtotal),
        }
    }
}

// =============================================================================
// Form and Query Types
// =============================================================================

/// Profile edit form data.
#[derive(Debug, Deserialize)]
pub struct EditProfileForm {
    pub email: String,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub apellido: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub direccion: Option<String>,
}

/// Change password form data.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordForm {
    pub old_password: String,
    pub new_password: String,
    pub new_password_confirm: String,
}

/// Query parameters for success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Profile page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/profile.html")]
pub struct ProfileTemplate {
    pub profile: ProfileView,
    pub success: Option<String>,
}

/// Profile edit page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/edit.html")]
pub struct EditProfileTemplate {
    pub profile: ProfileView,
    pub error: Option<String>,
    pub field_errors: Vec<(String, String)>,
}

/// Change password page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/change_password.html")]
pub struct ChangePasswordTemplate {
    pub error: Option<String>,
}

/// Payment history page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/payments.html")]
pub struct PaymentsTemplate {
    pub payments: Vec<PaymentView>,
}

/// Sale detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/sale.html")]
pub struct SaleDetailTemplate {
    pub sale: SaleView,
    pub lines: Vec<SaleLineView>,
    pub payable: bool,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the profile page.
#[instrument(skip(state, user))]
pub async fn profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> Result<impl IntoResponse> {
    let profile = state.auth().profile(&user.access_token).await?;

    Ok(ProfileTemplate {
        profile: ProfileView::from(&profile),
        success: query.success.map(|_| "Perfil actualizado".to_string()),
    })
}

/// Display the profile edit form.
#[instrument(skip(state, user))]
pub async fn edit_profile_page(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse> {
    let profile = state.auth().profile(&user.access_token).await?;

    Ok(EditProfileTemplate {
        profile: ProfileView::from(&profile),
        error: None,
        field_errors: Vec::new(),
    })
}

/// Handle profile update.
#[instrument(skip(state, user, form))]
pub async fn edit_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<EditProfileForm>,
) -> Result<Response> {
    let email = match Email::parse(form.email.trim()) {
        Ok(email) => email,
        Err(e) => {
            let profile = state.auth().profile(&user.access_token).await?;
            return Ok(EditProfileTemplate {
                profile: ProfileView::from(&profile),
                error: None,
                field_errors: vec![("email".to_string(), e.to_string())],
            }
            .into_response());
        }
    };

    let request = UpdateProfileRequest {
        email: Some(email.as_str().to_string()),
        first_name: form.nombre.filter(|s| !s.trim().is_empty()),
        last_name: form.apellido.filter(|s| !s.trim().is_empty()),
        phone: form.telefono.filter(|s| !s.trim().is_empty()),
        address: form.direccion.filter(|s| !s.trim().is_empty()),
    };

    match state.auth().update_profile(&user.access_token, &request).await {
        Ok(_) => Ok(Redirect::to("/mi-perfil?success=1").into_response()),
        Err(ApiError::Validation(fields)) => {
            let profile = state.auth().profile(&user.access_token).await?;
            Ok(EditProfileTemplate {
                profile: ProfileView::from(&profile),
                error: None,
                field_errors: fields.into_iter().collect(),
            }
            .into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Display the change password form.
pub async fn change_password_page(RequireAuth(_user): RequireAuth) -> impl IntoResponse {
    ChangePasswordTemplate { error: None }
}

/// Handle password change.
#[instrument(skip(state, user, form))]
pub async fn change_password(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<ChangePasswordForm>,
) -> Result<Response> {
    if form.new_password != form.new_password_confirm {
        return Ok(ChangePasswordTemplate {
            error: Some("Las contraseñas nuevas no coinciden".to_string()),
        }
        .into_response());
    }

    let request = ChangePasswordRequest {
        old_password: form.old_password,
        new_password: form.new_password,
    };

    match state
        .auth()
        .change_password(&user.access_token, &request)
        .await
    {
        Ok(()) => Ok(Redirect::to("/mi-perfil?success=1").into_response()),
        Err(ApiError::Validation(fields)) => {
            let message = fields
                .into_values()
                .next()
                .unwrap_or_else(|| "Contraseña rechazada".to_string());
            Ok(ChangePasswordTemplate {
                error: Some(message),
            }
            .into_response())
        }
        Err(ApiError::Unauthorized) => Ok(ChangePasswordTemplate {
            error: Some("La contraseña actual es incorrecta".to_string()),
        }
        .into_response()),
        Err(e) => Err(e.into()),
    }
}

/// Display the caller's payment history.
#[instrument(skip(state, user))]
pub async fn payments(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse> {
    let payments = state.payments().list_mine(&user.access_token).await?;

    Ok(PaymentsTemplate {
        payments: payments.iter().map(PaymentView::from).collect(),
    })
}

/// Display one of the caller's sales.
#[instrument(skip(state, user))]
pub async fn sale_detail(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let sale_id = SaleId::new(id);
    let sale = state.sales().get(&user.access_token, sale_id).await?;

    // Lines are supplementary; the page still renders without them.
    let lines = state
        .sales()
        .lines(&user.access_token, sale_id)
        .await
        .unwrap_or_default();

    let payable = sale.status == SaleStatus::Pending;

    Ok(SaleDetailTemplate {
        sale: SaleView::from(&sale),
        lines: lines.iter().map(SaleLineView::from).collect(),
        payable,
    })
}
