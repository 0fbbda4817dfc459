//! Cart API client.
//!
//! Never cached - the cart is mutable state owned by the backend, and every
//! mutating endpoint returns the full updated cart.

use tracing::instrument;

use smartsales_core::api::{
    AddItemRequest, Cart, CheckoutRequest, ClearCartResponse, Sale, UpdateItemRequest,
};
use smartsales_core::types::{CartItemId, CatalogItemId};

use super::{ApiError, Backend};

/// Client for the authenticated user's cart endpoints.
#[derive(Clone)]
pub struct CartApi {
    backend: Backend,
}

impl CartApi {
    /// Create a new cart client.
    #[must_use]
    pub const fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// Fetch the current user's cart.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] for anonymous callers.
    #[instrument(skip(self, token))]
    pub async fn my_cart(&self, token: &str) -> Result<Cart, ApiError> {
        self.backend.get("cart/my_cart/", Some(token)).await
    }

    /// Add a catalog item to the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; the returned cart is the full
    /// updated cart on success.
    #[instrument(skip(self, token), fields(catalog_id = %catalog_id))]
    pub async fn add_item(
        &self,
        token: &str,
        catalog_id: CatalogItemId,
        quantity: u32,
    ) -> Result<Cart, ApiError> {
        let payload = AddItemRequest {
            catalog_id,
            quantity,
        };
        self.backend
            .post("cart/add_item/", Some(token), &payload)
            .await
    }

    /// Update the quantity of one cart line.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token), fields(item_id = %item_id))]
    pub async fn update_item(
        &self,
        token: &str,
        item_id: CartItemId,
        quantity: u32,
    ) -> Result<Cart, ApiError> {
        let payload = UpdateItemRequest { quantity };
        self.backend
            .patch(&format!("cart/update_item/{item_id}/"), Some(token), &payload)
            .await
    }

    /// Remove one line from the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token), fields(item_id = %item_id))]
    pub async fn remove_item(&self, token: &str, item_id: CartItemId) -> Result<Cart, ApiError> {
        self.backend
            .delete(&format!("cart/remove_item/{item_id}/"), Some(token))
            .await
    }

    /// Empty the cart. Called after a successful payment.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn clear(&self, token: &str) -> Result<ClearCartResponse, ApiError> {
        self.backend.post_empty("cart/clear_cart/", Some(token)).await
    }

    /// Turn the cart into a pending sale.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token, request))]
    pub async fn checkout(&self, token: &str, request: &CheckoutRequest) -> Result<Sale, ApiError> {
        self.backend
            .post("cart/checkout/", Some(token), request)
            .await
    }
}
