//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! All state lives in the cart coordinator; these handlers only translate
//! outcomes into fragments and status codes. An unauthenticated mutation
//! returns 401 with a login prompt fragment instead of a generic error.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use smartsales_core::api::CheckoutRequest;
use smartsales_core::types::{CartItemId, CatalogItemId};

use crate::cart::{CartOutcome, CartSnapshot, CartUser, CheckoutCartError};
use crate::filters;
use crate::middleware::{OptionalAuth, RequireAuth};
use crate::models::CurrentUser;
use crate::routes::format_price;
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: i64,
    pub name: String,
    pub brand: Option<String>,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u32,
    pub error: Option<String>,
}

impl CartView {
    /// Create an empty cart view.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: format_price(Decimal::ZERO),
            item_count: 0,
            error: None,
        }
    }
}

impl From<&CartSnapshot> for CartView {
    fn from(snapshot: &CartSnapshot) -> Self {
        Self {
            items: snapshot
                .items()
                .iter()
                .map(|item| CartItemView {
                    id: item.id.as_i64(),
                    name: item.catalog_item.name.clone(),
                    brand: item.catalog_item.brand.clone(),
                    quantity: item.quantity,
                    unit_price: format_price(item.catalog_item.price),
                    line_total: format_price(item.subtotal),
                })
                .collect(),
            total: format_price(snapshot.total_price()),
            item_count: snapshot.item_count(),
            error: snapshot.error.clone(),
        }
    }
}

/// Borrow the session user as a cart identity.
fn cart_user(user: Option<&CurrentUser>) -> Option<CartUser<'_>> {
    user.map(|u| CartUser {
        id: u.id,
        token: &u.access_token,
    })
}

/// Fragment telling an anonymous visitor to log in (HTMX, status 401).
fn needs_login_fragment() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Html(
            "<span class=\"cart-error\">Debes iniciar sesión para agregar productos al carrito. \
             <a href=\"/auth/login\">Ingresar</a></span>",
        ),
    )
        .into_response()
}

// =============================================================================
// Form Types
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub catalogo_id: i64,
    pub quantity: Option<u32>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub item_id: i64,
    pub quantity: u32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub item_id: i64,
}

/// Checkout form data (creates the sale).
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    pub direccion: String,
    #[serde(default)]
    pub impuesto: Option<Decimal>,
    #[serde(default)]
    pub descuento: Option<Decimal>,
    #[serde(default)]
    pub costo_envio: Option<Decimal>,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Checkout form page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/checkout.html")]
pub struct CheckoutFormTemplate {
    pub cart: CartView,
    pub error: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the cart page.
#[instrument(skip(state, auth))]
pub async fn show(State(state): State<AppState>, OptionalAuth(auth): OptionalAuth) -> impl IntoResponse {
    let snapshot = state.cart().load(cart_user(auth.as_ref())).await;

    CartShowTemplate {
        cart: CartView::from(&snapshot),
    }
}

/// Add item to cart (HTMX).
///
/// Returns the updated count badge with an HTMX trigger so other fragments
/// refresh; an anonymous caller gets the login prompt instead.
#[instrument(skip(state, auth))]
pub async fn add(
    State(state): State<AppState>,
    OptionalAuth(auth): OptionalAuth,
    Form(form): Form<AddToCartForm>,
) -> Response {
    let outcome = state
        .cart()
        .add_item(
            cart_user(auth.as_ref()),
            CatalogItemId::new(form.catalogo_id),
            form.quantity.unwrap_or(1),
        )
        .await;

    match outcome {
        CartOutcome::Updated(snapshot) => (
            AppendHeaders([("HX-Trigger", "cart-updated")]),
            CartCountTemplate {
                count: snapshot.item_count(),
            },
        )
            .into_response(),
        CartOutcome::NeedsLogin => needs_login_fragment(),
        CartOutcome::Failed(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<span class=\"cart-error\">Error al agregar el producto</span>"),
        )
            .into_response(),
    }
}

/// Update cart item quantity (HTMX).
#[instrument(skip(state, auth))]
pub async fn update(
    State(state): State<AppState>,
    OptionalAuth(auth): OptionalAuth,
    Form(form): Form<UpdateCartForm>,
) -> Response {
    let outcome = state
        .cart()
        .update_quantity(
            cart_user(auth.as_ref()),
            CartItemId::new(form.item_id),
            form.quantity,
        )
        .await;

    render_items_outcome(outcome)
}

/// Remove item from cart (HTMX).
#[instrument(skip(state, auth))]
pub async fn remove(
    State(state): State<AppState>,
    OptionalAuth(auth): OptionalAuth,
    Form(form): Form<RemoveFromCartForm>,
) -> Response {
    let outcome = state
        .cart()
        .remove_item(cart_user(auth.as_ref()), CartItemId::new(form.item_id))
        .await;

    render_items_outcome(outcome)
}

/// Empty the cart (HTMX).
#[instrument(skip(state, auth))]
pub async fn clear(State(state): State<AppState>, OptionalAuth(auth): OptionalAuth) -> Response {
    let outcome = state.cart().clear(cart_user(auth.as_ref())).await;
    render_items_outcome(outcome)
}

/// Render a mutation outcome as the cart items fragment.
///
/// A failed mutation still renders: the snapshot keeps the previous items
/// and carries the error message for the banner.
fn render_items_outcome(outcome: CartOutcome) -> Response {
    match outcome {
        CartOutcome::Updated(snapshot) => (
            AppendHeaders([("HX-Trigger", "cart-updated")]),
            CartItemsTemplate {
                cart: CartView::from(&snapshot),
            },
        )
            .into_response(),
        CartOutcome::NeedsLogin => needs_login_fragment(),
        CartOutcome::Failed(snapshot) => CartItemsTemplate {
            cart: CartView::from(&snapshot),
        }
        .into_response(),
    }
}

/// Get cart count badge (HTMX).
#[instrument(skip(state, auth))]
pub async fn badge(State(state): State<AppState>, OptionalAuth(auth): OptionalAuth) -> impl IntoResponse {
    let snapshot = state.cart().load(cart_user(auth.as_ref())).await;

    CartCountTemplate {
        count: snapshot.item_count(),
    }
}

/// Display the checkout form.
#[instrument(skip(state, user))]
pub async fn checkout_form(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Response {
    let snapshot = state.cart().load(cart_user(Some(&user))).await;
    if snapshot.item_count() == 0 {
        return Redirect::to("/carrito").into_response();
    }

    CheckoutFormTemplate {
        cart: CartView::from(&snapshot),
        error: None,
    }
    .into_response()
}

/// Create the sale from the cart and move on to payment.
#[instrument(skip(state, user, form))]
pub async fn checkout_submit(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<CheckoutForm>,
) -> Response {
    if form.direccion.trim().is_empty() {
        let snapshot = state.cart().load(cart_user(Some(&user))).await;
        return CheckoutFormTemplate {
            cart: CartView::from(&snapshot),
            error: Some("La dirección de entrega es requerida".to_string()),
        }
        .into_response();
    }

    let request = CheckoutRequest {
        client_id: None,
        address: form.direccion.trim().to_string(),
        tax: form.impuesto.unwrap_or(Decimal::ZERO),
        discount: form.descuento.unwrap_or(Decimal::ZERO),
        shipping_cost: form.costo_envio.unwrap_or(Decimal::ZERO),
    };

    match state.cart().checkout(cart_user(Some(&user)), &request).await {
        Ok(sale) => Redirect::to(&format!("/checkout/pago/{}", sale.id)).into_response(),
        Err(CheckoutCartError::NeedsLogin) => {
            Redirect::to("/auth/login?next=/carrito/checkout").into_response()
        }
        Err(CheckoutCartError::Api(error)) => {
            tracing::error!("Checkout failed: {error}");
            let snapshot = state.cart().load(cart_user(Some(&user))).await;
            CheckoutFormTemplate {
                cart: CartView::from(&snapshot),
                error: Some("No se pudo crear la venta, intenta nuevamente".to_string()),
            }
            .into_response()
        }
    }
}
