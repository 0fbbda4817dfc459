//! Typed wire records for the SmartSales365 REST API.
//!
//! The backend's JSON payloads are parsed into these records at the HTTP
//! boundary instead of being consumed as untyped values. Field names follow
//! Rust conventions; `#[serde(rename)]` maps them to the backend's wire
//! names. Monetary amounts are [`rust_decimal::Decimal`] - the backend
//! serializes decimals as strings and these records accept both string and
//! numeric encodings.

pub mod audit;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod client;
pub mod location;
pub mod payment;
pub mod product;
pub mod report;
pub mod role;
pub mod sale;
pub mod user;

use serde::Deserialize;

pub use audit::AuditEntry;
pub use auth::{
    AuthTokens, ChangePasswordRequest, LoginRequest, LogoutRequest, RefreshRequest,
    RefreshResponse, RegisterRequest, UpdateProfileRequest,
};
pub use cart::{
    AddItemRequest, Cart, CartItem, CheckoutRequest, ClearCartResponse, UpdateItemRequest,
};
pub use catalog::{Brand, CatalogItem, CatalogItemInput, Category};
pub use client::{Client, ClientInput};
pub use location::{City, Department};
pub use payment::{CreatePaymentIntent, Payment, PaymentIntent, PaymentVerification};
pub use product::{Product, ProductInput};
pub use report::{ReportPrompt, StandardReport};
pub use role::{Permission, Role, RoleInput};
pub use sale::{ChangeStatusRequest, MonthlyTotal, Sale, SaleInput, SaleLine, SalesStats};
pub use user::{User, UserInput};

/// A list endpoint response.
///
/// The backend returns either a bare JSON array or a paginated object with a
/// `results` key, depending on the view; both shapes are accepted here.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    /// Paginated response: `{"count": .., "results": [..]}`.
    Paginated {
        count: i64,
        #[serde(default)]
        next: Option<String>,
        #[serde(default)]
        previous: Option<String>,
        results: Vec<T>,
    },
    /// Bare array response.
    Plain(Vec<T>),
}

impl<T> ListResponse<T> {
    /// Extract the items regardless of response shape.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Paginated { results, .. } => results,
            Self::Plain(items) => items,
        }
    }

    /// Total item count (the page length for bare arrays).
    #[must_use]
    pub fn count(&self) -> usize {
        match self {
            Self::Paginated { results, .. } => results.len(),
            Self::Plain(items) => items.len(),
        }
    }
}

pub(crate) const fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_response_bare_array() {
        let list: ListResponse<i64> = serde_json::from_str("[1, 2, 3]").expect("deserialize");
        assert_eq!(list.count(), 3);
        assert_eq!(list.into_items(), vec![1, 2, 3]);
    }

    #[test]
    fn test_list_response_paginated() {
        let json = r#"{"count": 2, "next": null, "previous": null, "results": [10, 20]}"#;
        let list: ListResponse<i64> = serde_json::from_str(json).expect("deserialize");
        assert_eq!(list.into_items(), vec![10, 20]);
    }
}
