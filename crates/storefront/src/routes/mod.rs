//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Catalog listing (store home)
//! GET  /health                 - Health check
//!
//! # Catalog
//! GET  /catalogo               - Catalog listing (search/brand/category filters)
//! GET  /producto/{id}          - Catalog item detail
//!
//! # Cart (HTMX fragments)
//! GET  /carrito                - Cart page
//! POST /carrito/agregar        - Add item (returns count badge, triggers cart-updated)
//! POST /carrito/actualizar     - Update quantity (returns cart_items fragment)
//! POST /carrito/eliminar       - Remove item (returns cart_items fragment)
//! POST /carrito/vaciar         - Empty the cart (returns cart_items fragment)
//! GET  /carrito/badge          - Cart count badge (fragment)
//! GET  /carrito/checkout       - Checkout form (address, tax, discount, shipping)
//! POST /carrito/checkout       - Create the sale, redirect to payment
//!
//! # Payment
//! GET  /checkout/pago/{venta_id}           - Payment page (hosted card widget)
//! GET  /checkout/pago/{venta_id}/completar - Widget return redirect; verify once
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! GET  /auth/registro          - Register page
//! POST /auth/registro          - Register action
//! POST /auth/logout            - Logout action (destroys the whole session)
//!
//! # Account (requires auth)
//! GET  /mi-perfil              - Profile overview
//! GET  /editar-perfil          - Edit profile form
//! POST /editar-perfil          - Update profile
//! GET  /cambiar-contrasena     - Change password form
//! POST /cambiar-contrasena     - Change password
//! GET  /mis-pagos              - Payment history
//! GET  /mis-ventas/{id}        - Sale detail
//!
//! # Voice assistant
//! POST /asistente/comando      - Transcript -> catalog search -> add to cart
//! ```

pub mod account;
pub mod assistant;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;

use axum::{
    Router,
    routing::{get, post},
};
use rust_decimal::Decimal;

use crate::middleware::{api_rate_limiter, auth_rate_limiter};
use crate::state::AppState;

/// Format a decimal amount as a display price.
pub(crate) fn format_price(amount: Decimal) -> String {
    format!("Bs {amount:.2}")
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/registro", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
        .layer(auth_rate_limiter())
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/agregar", post(cart::add))
        .route("/actualizar", post(cart::update))
        .route("/eliminar", post(cart::remove))
        .route("/vaciar", post(cart::clear))
        .route("/badge", get(cart::badge))
        .route(
            "/checkout",
            get(cart::checkout_form).post(cart::checkout_submit),
        )
        .layer(api_rate_limiter())
}

/// Create the payment routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/pago/{venta_id}", get(checkout::pay))
        .route("/pago/{venta_id}/completar", get(checkout::complete))
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/mi-perfil", get(account::profile))
        .route(
            "/editar-perfil",
            get(account::edit_profile_page).post(account::edit_profile),
        )
        .route(
            "/cambiar-contrasena",
            get(account::change_password_page).post(account::change_password),
        )
        .route("/mis-pagos", get(account::payments))
        .route("/mis-ventas/{id}", get(account::sale_detail))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Store home is the catalog
        .route("/", get(catalog::index))
        .route("/catalogo", get(catalog::index))
        .route("/producto/{id}", get(catalog::show))
        // Cart
        .nest("/carrito", cart_routes())
        // Payment flow
        .nest("/checkout", checkout_routes())
        // Auth
        .nest("/auth", auth_routes())
        // Account pages
        .merge(account_routes())
        // Voice command pipeline
        .route(
            "/asistente/comando",
            post(assistant::command).layer(api_rate_limiter()),
        )
}
