//! Cart coordinator - the single source of truth for "what is in the cart".
//!
//! The backend owns the cart; this module holds, per authenticated user, the
//! cached snapshot of the last backend response plus the shared error
//! message the UI displays. The snapshot is only ever replaced wholesale
//! with what the backend returned - never merged or patched locally.
//!
//! Mutations for one user are serialized through a per-user async mutex:
//! while one mutation is in flight, a second request for the same user waits
//! instead of racing it, so the snapshot always reflects the order the
//! backend processed the calls in. There are no retries, no rollback and no
//! offline queue - a failed call leaves the previous snapshot in place and
//! records an error message.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};

use rust_decimal::Decimal;
use tokio::sync::Mutex;
use tracing::instrument;

use smartsales_core::api::{Cart, CartItem, CheckoutRequest, Sale};
use smartsales_core::types::{CartItemId, CatalogItemId, UserId};

use crate::backend::{ApiError, CartApi};

/// Identity of the cart owner for one operation.
#[derive(Debug, Clone, Copy)]
pub struct CartUser<'a> {
    pub id: UserId,
    pub token: &'a str,
}

/// A point-in-time view of one user's cart state.
#[derive(Debug, Clone, Default)]
pub struct CartSnapshot {
    /// Mirror of the last backend response; `None` before the first load.
    pub cart: Option<Cart>,
    /// Shared error message from the last failed operation, if any.
    pub error: Option<String>,
}

impl CartSnapshot {
    /// Total quantity across all lines; 0 when no cart is loaded.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.cart.as_ref().map_or(0, Cart::item_count)
    }

    /// Cart total; 0 when no cart is loaded.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.cart
            .as_ref()
            .map_or(Decimal::ZERO, |cart| cart.total_price)
    }

    /// The cart lines, empty when no cart is loaded.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        self.cart.as_ref().map_or(&[], |cart| cart.items.as_slice())
    }
}

/// Result of a cart mutation.
#[derive(Debug)]
pub enum CartOutcome {
    /// The backend applied the mutation; the snapshot is the returned cart.
    Updated(CartSnapshot),
    /// The caller must log in first. The snapshot was not touched.
    NeedsLogin,
    /// The call failed; the snapshot still holds the previous cart and a
    /// non-empty error message.
    Failed(CartSnapshot),
}

impl CartOutcome {
    /// Whether the mutation was applied.
    #[must_use]
    pub const fn is_updated(&self) -> bool {
        matches!(self, Self::Updated(_))
    }
}

/// Error from turning the cart into a sale.
#[derive(Debug, thiserror::Error)]
pub enum CheckoutCartError {
    #[error("authentication required for checkout")]
    NeedsLogin,
    #[error(transparent)]
    Api(ApiError),
}

#[derive(Default)]
struct CartState {
    cart: Option<Cart>,
    error: Option<String>,
}

impl CartState {
    fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            cart: self.cart.clone(),
            error: self.error.clone(),
        }
    }
}

/// Per-user slot; the inner mutex is the in-flight guard.
#[derive(Default)]
struct Slot {
    state: Mutex<CartState>,
}

/// Coordinates all cart operations against the backend.
#[derive(Clone)]
pub struct CartCoordinator {
    api: CartApi,
    slots: Arc<StdMutex<HashMap<UserId, Arc<Slot>>>>,
}

impl CartCoordinator {
    /// Create a new coordinator.
    #[must_use]
    pub fn new(api: CartApi) -> Self {
        Self {
            api,
            slots: Arc::new(StdMutex::new(HashMap::new())),
        }
    }

    fn slot(&self, user_id: UserId) -> Arc<Slot> {
        let mut slots = self
            .slots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        slots.entry(user_id).or_default().clone()
    }

    /// Drop the cached state for a user (called on logout).
    pub fn forget(&self, user_id: UserId) {
        let mut slots = self
            .slots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        slots.remove(&user_id);
    }

    /// Fetch the current cart.
    ///
    /// Anonymous visitors and stale tokens get an empty local cart with no
    /// error - browsing must not show error banners for not being logged in.
    #[instrument(skip(self, auth))]
    pub async fn load(&self, auth: Option<CartUser<'_>>) -> CartSnapshot {
        let Some(user) = auth else {
            return CartSnapshot {
                cart: Some(Cart::empty()),
                error: None,
            };
        };

        let slot = self.slot(user.id);
        let mut state = slot.state.lock().await;

        match self.api.my_cart(user.token).await {
            Ok(cart) => {
                state.cart = Some(cart);
                state.error = None;
            }
            Err(error) if error.is_unauthorized() => {
                state.cart = Some(Cart::empty());
                state.error = None;
            }
            Err(error) => {
                tracing::warn!("Failed to load cart: {error}");
                state.cart = Some(Cart::empty());
                state.error = Some("Error al cargar el carrito".to_string());
            }
        }

        state.snapshot()
    }

    /// Add a catalog item to the cart.
    #[instrument(skip(self, auth), fields(catalog_id = %catalog_id))]
    pub async fn add_item(
        &self,
        auth: Option<CartUser<'_>>,
        catalog_id: CatalogItemId,
        quantity: u32,
    ) -> CartOutcome {
        let Some(user) = auth else {
            return CartOutcome::NeedsLogin;
        };

        let slot = self.slot(user.id);
        let mut state = slot.state.lock().await;
        let result = self.api.add_item(user.token, catalog_id, quantity).await;
        apply(&mut state, result, "Error al agregar el producto")
    }

    /// Change the quantity of one cart line.
    #[instrument(skip(self, auth), fields(item_id = %item_id))]
    pub async fn update_quantity(
        &self,
        auth: Option<CartUser<'_>>,
        item_id: CartItemId,
        quantity: u32,
    ) -> CartOutcome {
        let Some(user) = auth else {
            return CartOutcome::NeedsLogin;
        };

        let slot = self.slot(user.id);
        let mut state = slot.state.lock().await;
        let result = self.api.update_item(user.token, item_id, quantity).await;
        apply(&mut state, result, "Error al actualizar la cantidad")
    }

    /// Remove one line from the cart.
    #[instrument(skip(self, auth), fields(item_id = %item_id))]
    pub async fn remove_item(
        &self,
        auth: Option<CartUser<'_>>,
        item_id: CartItemId,
    ) -> CartOutcome {
        let Some(user) = auth else {
            return CartOutcome::NeedsLogin;
        };

        let slot = self.slot(user.id);
        let mut state = slot.state.lock().await;
        let result = self.api.remove_item(user.token, item_id).await;
        apply(&mut state, result, "Error al eliminar el producto")
    }

    /// Empty the cart.
    #[instrument(skip(self, auth))]
    pub async fn clear(&self, auth: Option<CartUser<'_>>) -> CartOutcome {
        let Some(user) = auth else {
            return CartOutcome::NeedsLogin;
        };

        let slot = self.slot(user.id);
        let mut state = slot.state.lock().await;
        let result = self
            .api
            .clear(user.token)
            .await
            .map(|response| response.cart);
        apply(&mut state, result, "Error al vaciar el carrito")
    }

    /// Turn the cart into a pending sale.
    ///
    /// Serialized with the other mutations; the cached cart is left as the
    /// backend's post-checkout state is unknown until the next load.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutCartError::NeedsLogin`] for anonymous callers and
    /// wraps any backend error otherwise.
    #[instrument(skip(self, auth, request))]
    pub async fn checkout(
        &self,
        auth: Option<CartUser<'_>>,
        request: &CheckoutRequest,
    ) -> Result<Sale, CheckoutCartError> {
        let Some(user) = auth else {
            return Err(CheckoutCartError::NeedsLogin);
        };

        let slot = self.slot(user.id);
        let _state = slot.state.lock().await;
        match self.api.checkout(user.token, request).await {
            Ok(sale) => Ok(sale),
            Err(error) if error.is_unauthorized() => Err(CheckoutCartError::NeedsLogin),
            Err(error) => Err(CheckoutCartError::Api(error)),
        }
    }
}

/// Fold one backend result into the cart state.
///
/// Success replaces the snapshot wholesale and clears the error; 401 leaves
/// the state untouched and reports needs-login; anything else keeps the
/// previous snapshot and records `error_message`.
fn apply(state: &mut CartState, result: Result<Cart, ApiError>, error_message: &str) -> CartOutcome {
    match result {
        Ok(cart) => {
            state.cart = Some(cart);
            state.error = None;
            CartOutcome::Updated(state.snapshot())
        }
        Err(error) if error.is_unauthorized() => CartOutcome::NeedsLogin,
        Err(error) => {
            tracing::warn!("Cart mutation failed: {error}");
            state.error = Some(error_message.to_string());
            CartOutcome::Failed(state.snapshot())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Backend;
    use crate::config::BackendConfig;

    fn coordinator_for(server: &mockito::ServerGuard) -> CartCoordinator {
        let backend = Backend::new(&BackendConfig {
            base_url: server.url(),
        });
        CartCoordinator::new(CartApi::new(backend))
    }

    fn user(token: &str) -> Option<CartUser<'_>> {
        Some(CartUser {
            id: UserId::new(1),
            token,
        })
    }

    const CART_TWO_LINES: &str = r#"{
        "id": 9,
        "items": [
            {"id": 1, "catalogo": {"id": 3, "nombre": "Mouse", "precio": "50.00", "stock_disponible": 4, "estado": "activo"}, "quantity": 2, "subtotal": "100.00"},
            {"id": 2, "catalogo": {"id": 4, "nombre": "Monitor", "precio": "800.00", "stock_disponible": 1, "estado": "activo"}, "quantity": 3, "subtotal": "2400.00"}
        ],
        "total_price": "2500.00"
    }"#;

    #[tokio::test]
    async fn test_anonymous_load_is_empty_without_error() {
        let server = mockito::Server::new_async().await;
        let coordinator = coordinator_for(&server);

        let snapshot = coordinator.load(None).await;
        assert_eq!(snapshot.item_count(), 0);
        assert_eq!(snapshot.total_price(), Decimal::ZERO);
        assert!(snapshot.error.is_none());
    }

    #[tokio::test]
    async fn test_stale_token_load_is_empty_without_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/cart/my_cart/")
            .with_status(401)
            .with_body(r#"{"detail": "token inválido"}"#)
            .create_async()
            .await;
        let coordinator = coordinator_for(&server);

        let snapshot = coordinator.load(user("stale")).await;
        assert_eq!(snapshot.item_count(), 0);
        assert!(snapshot.error.is_none());
    }

    #[tokio::test]
    async fn test_anonymous_add_needs_login_without_request() {
        // No mock registered: a request would fail the test via Failed outcome
        let server = mockito::Server::new_async().await;
        let coordinator = coordinator_for(&server);

        let outcome = coordinator
            .add_item(None, CatalogItemId::new(3), 1)
            .await;
        assert!(matches!(outcome, CartOutcome::NeedsLogin));
    }

    #[tokio::test]
    async fn test_rejected_token_add_needs_login_and_keeps_snapshot() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/cart/my_cart/")
            .with_body(CART_TWO_LINES)
            .create_async()
            .await;
        server
            .mock("POST", "/cart/add_item/")
            .with_status(401)
            .with_body("{}")
            .create_async()
            .await;
        let coordinator = coordinator_for(&server);

        let loaded = coordinator.load(user("t")).await;
        assert_eq!(loaded.item_count(), 5);

        let outcome = coordinator.add_item(user("t"), CatalogItemId::new(3), 1).await;
        assert!(matches!(outcome, CartOutcome::NeedsLogin));

        // The cached snapshot was not mutated by the rejected call
        let after = coordinator.load(user("t")).await;
        assert_eq!(after.item_count(), 5);
    }

    #[tokio::test]
    async fn test_add_replaces_snapshot_wholesale() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/cart/add_item/")
            .with_body(CART_TWO_LINES)
            .create_async()
            .await;
        let coordinator = coordinator_for(&server);

        let outcome = coordinator.add_item(user("t"), CatalogItemId::new(3), 2).await;
        match outcome {
            CartOutcome::Updated(snapshot) => {
                assert_eq!(snapshot.item_count(), 5);
                assert_eq!(snapshot.total_price(), Decimal::new(250000, 2));
                assert!(snapshot.error.is_none());
            }
            other => panic!("expected updated outcome, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failed_update_keeps_items_and_sets_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/cart/my_cart/")
            .with_body(CART_TWO_LINES)
            .create_async()
            .await;
        server
            .mock("PATCH", "/cart/update_item/1/")
            .with_status(500)
            .with_body("backend exploded")
            .create_async()
            .await;
        let coordinator = coordinator_for(&server);

        let _ = coordinator.load(user("t")).await;
        let outcome = coordinator
            .update_quantity(user("t"), CartItemId::new(1), 9)
            .await;

        match outcome {
            CartOutcome::Failed(snapshot) => {
                // Previous snapshot survives, error message is set
                assert_eq!(snapshot.item_count(), 5);
                assert_eq!(snapshot.items().len(), 2);
                assert_eq!(
                    snapshot.error.as_deref(),
                    Some("Error al actualizar la cantidad")
                );
            }
            other => panic!("expected failed outcome, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_clear_resets_totals() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/cart/add_item/")
            .with_body(CART_TWO_LINES)
            .create_async()
            .await;
        server
            .mock("POST", "/cart/clear_cart/")
            .with_body(r#"{"message": "Carrito vaciado", "cart": {"items": [], "total_price": 0}}"#)
            .create_async()
            .await;
        let coordinator = coordinator_for(&server);

        let _ = coordinator.add_item(user("t"), CatalogItemId::new(3), 2).await;
        let outcome = coordinator.clear(user("t")).await;

        match outcome {
            CartOutcome::Updated(snapshot) => {
                assert_eq!(snapshot.total_price(), Decimal::ZERO);
                assert_eq!(snapshot.item_count(), 0);
            }
            other => panic!("expected updated outcome, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_successful_mutation_clears_previous_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("PATCH", "/cart/update_item/1/")
            .with_status(500)
            .create_async()
            .await;
        server
            .mock("POST", "/cart/add_item/")
            .with_body(CART_TWO_LINES)
            .create_async()
            .await;
        let coordinator = coordinator_for(&server);

        let failed = coordinator
            .update_quantity(user("t"), CartItemId::new(1), 2)
            .await;
        assert!(matches!(failed, CartOutcome::Failed(_)));

        let outcome = coordinator.add_item(user("t"), CatalogItemId::new(3), 1).await;
        match outcome {
            CartOutcome::Updated(snapshot) => assert!(snapshot.error.is_none()),
            other => panic!("expected updated outcome, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_checkout_returns_created_sale() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/cart/checkout/")
            .with_body(r#"{"id": 15, "estado": "pendiente", "total": "123.00"}"#)
            .create_async()
            .await;
        let coordinator = coordinator_for(&server);

        let request = CheckoutRequest {
            client_id: None,
            address: "Av. Arce 123".into(),
            tax: Decimal::new(1300, 2),
            discount: Decimal::ZERO,
            shipping_cost: Decimal::new(1000, 2),
        };
        let sale = coordinator
            .checkout(user("t"), &request)
            .await
            .expect("checkout");
        assert_eq!(sale.id.as_i64(), 15);
    }

    #[test]
    fn test_snapshot_folds() {
        let snapshot = CartSnapshot::default();
        assert_eq!(snapshot.item_count(), 0);
        assert_eq!(snapshot.total_price(), Decimal::ZERO);
        assert!(snapshot.items().is_empty());
    }
}
