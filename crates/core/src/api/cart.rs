//! Cart records and request payloads.
//!
//! The cart is owned by the backend; the client only ever holds the copy
//! returned by the last request. Mutating endpoints return the full updated
//! cart, never a delta.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CartItemId, CatalogItemId, ClientId};

use super::catalog::CatalogItem;

/// The authenticated user's cart as returned by `GET cart/my_cart/` and by
/// every mutating cart endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(rename = "total_price", default)]
    pub total_price: Decimal,
}

impl Cart {
    /// An empty cart, used as the local substitute for anonymous visitors.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            id: None,
            items: Vec::new(),
            total_price: Decimal::ZERO,
        }
    }

    /// Total quantity across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

/// One line in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: CartItemId,
    #[serde(rename = "catalogo")]
    pub catalog_item: CatalogItem,
    pub quantity: u32,
    #[serde(default)]
    pub subtotal: Decimal,
}

/// Payload for `POST cart/add_item/`.
#[derive(Debug, Clone, Serialize)]
pub struct AddItemRequest {
    #[serde(rename = "catalogo_id")]
    pub catalog_id: CatalogItemId,
    pub quantity: u32,
}

/// Payload for `PATCH cart/update_item/{id}/`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateItemRequest {
    pub quantity: u32,
}

/// Response of `POST cart/clear_cart/` - the cart comes back nested.
#[derive(Debug, Clone, Deserialize)]
pub struct ClearCartResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub cart: Cart,
}

/// Payload for `POST cart/checkout/`, which turns the cart into a sale.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutRequest {
    #[serde(rename = "cliente_id", skip_serializing_if = "Option::is_none")]
    pub client_id: Option<ClientId>,
    #[serde(rename = "direccion")]
    pub address: String,
    #[serde(rename = "impuesto")]
    pub tax: Decimal,
    #[serde(rename = "descuento")]
    pub discount: Decimal,
    #[serde(rename = "costo_envio")]
    pub shipping_cost: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cart_json() -> &'static str {
        r#"{
            "id": 9,
            "items": [
                {
                    "id": 1,
                    "catalogo": {"id": 3, "nombre": "Mouse", "precio": "50.00", "stock_disponible": 4, "estado": "activo"},
                    "quantity": 2,
                    "subtotal": "100.00"
                },
                {
                    "id": 2,
                    "catalogo": {"id": 4, "nombre": "Monitor", "precio": "800.00", "stock_disponible": 1, "estado": "activo"},
                    "quantity": 3,
                    "subtotal": "2400.00"
                }
            ],
            "total_price": "2500.00"
        }"#
    }

    #[test]
    fn test_cart_from_wire() {
        let cart: Cart = serde_json::from_str(cart_json()).expect("deserialize");
        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.item_count(), 5);
        assert_eq!(cart.total_price, Decimal::new(250000, 2));
    }

    #[test]
    fn test_empty_cart() {
        let cart = Cart::empty();
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.total_price, Decimal::ZERO);
    }

    #[test]
    fn test_clear_cart_response_nests_cart() {
        let json = r#"{"message": "Carrito vaciado", "cart": {"items": [], "total_price": 0}}"#;
        let response: ClearCartResponse = serde_json::from_str(json).expect("deserialize");
        assert!(response.cart.items.is_empty());
        assert_eq!(response.message.as_deref(), Some("Carrito vaciado"));
    }

    #[test]
    fn test_add_item_request_wire_names() {
        let request = AddItemRequest {
            catalog_id: CatalogItemId::new(3),
            quantity: 1,
        };
        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["catalogo_id"], 3);
        assert_eq!(json["quantity"], 1);
    }
}
