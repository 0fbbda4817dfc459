//! SmartSales365 Core - Shared types library.
//!
//! This crate provides common types used across all SmartSales365 components:
//! - `storefront` - Public-facing store (catalog, cart, checkout, payments)
//! - `admin` - Internal administration console
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and statuses
//! - [`api`] - Typed wire records for the SmartSales365 REST API

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod types;

pub use types::*;
