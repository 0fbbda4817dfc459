//! Catalog item records.
//!
//! A catalog item is a sellable record (price, stock, brand, category),
//! distinct from a physical serialized unit (see [`super::product`]).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CatalogItemId, CatalogStatus};

/// A sellable catalog item as returned by `GET catalogo/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: CatalogItemId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "precio")]
    pub price: Decimal,
    #[serde(rename = "stock_disponible", default)]
    pub available_stock: i64,
    #[serde(rename = "estado", default)]
    pub status: CatalogStatus,
    #[serde(rename = "marca", default)]
    pub brand: Option<String>,
    #[serde(rename = "categoria", default)]
    pub category: Option<String>,
    #[serde(rename = "imagen_url", default)]
    pub image_url: Option<String>,
}

impl CatalogItem {
    /// Whether the item can currently be added to a cart.
    #[must_use]
    pub const fn is_purchasable(&self) -> bool {
        self.status.is_active() && self.available_stock > 0
    }
}

/// Writable catalog item fields for create/update calls.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogItemInput {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "precio")]
    pub price: Decimal,
    #[serde(rename = "stock_disponible")]
    pub available_stock: i64,
    #[serde(rename = "estado")]
    pub status: CatalogStatus,
    #[serde(rename = "marca", skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(rename = "categoria", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// A brand, as returned by `GET marcas/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
}

/// A category, as returned by `GET categorias/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_item_from_wire() {
        let json = r#"{
            "id": 3,
            "nombre": "Teclado mecánico",
            "descripcion": "Switches rojos",
            "precio": "349.50",
            "stock_disponible": 12,
            "estado": "activo",
            "marca": "Logitech",
            "categoria": "Periféricos"
        }"#;
        let item: CatalogItem = serde_json::from_str(json).expect("deserialize");
        assert_eq!(item.name, "Teclado mecánico");
        assert_eq!(item.price, Decimal::new(34950, 2));
        assert!(item.is_purchasable());
    }

    #[test]
    fn test_inactive_item_not_purchasable() {
        let json = r#"{"id": 1, "nombre": "X", "precio": 10, "stock_disponible": 5, "estado": "inactivo"}"#;
        let item: CatalogItem = serde_json::from_str(json).expect("deserialize");
        assert!(!item.is_purchasable());
    }

    #[test]
    fn test_out_of_stock_not_purchasable() {
        let json = r#"{"id": 1, "nombre": "X", "precio": 10, "stock_disponible": 0, "estado": "activo"}"#;
        let item: CatalogItem = serde_json::from_str(json).expect("deserialize");
        assert!(!item.is_purchasable());
    }
}
