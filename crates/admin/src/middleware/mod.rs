//! HTTP middleware for the admin console.
//!
//! Lighter than the storefront stack: session layer plus the staff-only
//! auth extractor. The console is expected to sit behind a private network
//! boundary.

pub mod auth;
pub mod session;

pub use auth::{RequireOperator, clear_current_operator, set_current_operator};
pub use session::create_session_layer;
