//! HTTP route handlers for the admin console.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//! GET  /                       - Dashboard (stats + ML predictions)
//!
//! # Auth
//! GET  /login                  - Login page
//! POST /login                  - Login action (staff only)
//! POST /logout                 - Logout action
//!
//! # Resource CRUD (list / create / detail / edit / delete)
//! /usuarios      - Platform users
//! /roles         - Roles and permissions
//! /clientes      - Store clients
//! /productos     - Serialized product units
//! /catalogos     - Catalog items
//!
//! # Sales and payments
//! GET  /ventas                 - Sales listing (status filter)
//! GET  /ventas/create          - Manual sale form
//! POST /ventas/create          - Create sale
//! GET  /ventas/detail/{id}     - Sale detail with lines
//! POST /ventas/estado/{id}     - Change sale status
//! GET  /pagos                  - Payments listing (filters)
//!
//! # Audit and reports
//! GET  /bitacora               - Audit log
//! GET  /reportes               - Report generator page
//! POST /reportes/generar       - NLP prompt -> PDF/Excel passthrough
//! GET  /reportes/estandar/{key} - Predefined report download
//! ```

pub mod audit;
pub mod auth;
pub mod catalog_items;
pub mod clients;
pub mod dashboard;
pub mod payments;
pub mod products;
pub mod reports;
pub mod roles;
pub mod sales;
pub mod users;

use axum::{
    Router,
    routing::{get, post},
};
use rust_decimal::Decimal;

use crate::state::AppState;

/// Format a decimal amount as a display price.
pub(crate) fn format_price(amount: Decimal) -> String {
    format!("Bs {amount:.2}")
}

/// Create all routes for the admin console.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Dashboard
        .route("/", get(dashboard::index))
        // Auth
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        // Users
        .route("/usuarios", get(users::list))
        .route("/usuarios/create", get(users::new_form).post(users::create))
        .route("/usuarios/detail/{id}", get(users::detail))
        .route(
            "/usuarios/edit/{id}",
            get(users::edit_form).post(users::update),
        )
        .route("/usuarios/delete/{id}", post(users::delete))
        // Roles
        .route("/roles", get(roles::list))
        .route("/roles/create", get(roles::new_form).post(roles::create))
        .route("/roles/detail/{id}", get(roles::detail))
        .route("/roles/edit/{id}", get(roles::edit_form).post(roles::update))
        .route("/roles/delete/{id}", post(roles::delete))
        // Clients
        .route("/clientes", get(clients::list))
        .route(
            "/clientes/create",
            get(clients::new_form).post(clients::create),
        )
        .route("/clientes/detail/{id}", get(clients::detail))
        .route(
            "/clientes/edit/{id}",
            get(clients::edit_form).post(clients::update),
        )
        .route("/clientes/delete/{id}", post(clients::delete))
        // Products (serialized units)
        .route("/productos", get(products::list))
        .route(
            "/productos/create",
            get(products::new_form).post(products::create),
        )
        .route("/productos/detail/{id}", get(products::detail))
        .route(
            "/productos/edit/{id}",
            get(products::edit_form).post(products::update),
        )
        .route("/productos/delete/{id}", post(products::delete))
        // Catalog items
        .route("/catalogos", get(catalog_items::list))
        .route(
            "/catalogos/create",
            get(catalog_items::new_form).post(catalog_items::create),
        )
        .route("/catalogos/detail/{id}", get(catalog_items::detail))
        .route(
            "/catalogos/edit/{id}",
            get(catalog_items::edit_form).post(catalog_items::update),
        )
        .route("/catalogos/delete/{id}", post(catalog_items::delete))
        // Sales
        .route("/ventas", get(sales::list))
        .route("/ventas/create", get(sales::new_form).post(sales::create))
        .route("/ventas/detail/{id}", get(sales::detail))
        .route("/ventas/estado/{id}", post(sales::change_status))
        // Payments
        .route("/pagos", get(payments::list))
        // Audit log
        .route("/bitacora", get(audit::list))
        // Reports
        .route("/reportes", get(reports::page))
        .route("/reportes/generar", post(reports::generate))
        .route("/reportes/estandar/{key}", get(reports::standard))
}
