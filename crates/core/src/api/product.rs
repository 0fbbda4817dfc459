//! Physical product unit records (`productos/`).
//!
//! A product is one serialized physical unit tied to a catalog item, not the
//! sellable record itself.

use serde::{Deserialize, Serialize};

use crate::types::{CatalogItemId, ProductId};

/// A serialized physical unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(rename = "numero_serie")]
    pub serial_number: String,
    #[serde(rename = "catalogo", default)]
    pub catalog_item_id: Option<CatalogItemId>,
    #[serde(rename = "catalogo_nombre", default)]
    pub catalog_item_name: Option<String>,
    #[serde(rename = "estado", default)]
    pub status: Option<String>,
}

/// Writable product fields for create/update calls.
#[derive(Debug, Clone, Serialize)]
pub struct ProductInput {
    #[serde(rename = "numero_serie")]
    pub serial_number: String,
    #[serde(rename = "catalogo")]
    pub catalog_item_id: CatalogItemId,
    #[serde(rename = "estado", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_from_wire() {
        let json = r#"{"id": 10, "numero_serie": "SN-0001", "catalogo": 3, "catalogo_nombre": "Mouse"}"#;
        let product: Product = serde_json::from_str(json).expect("deserialize");
        assert_eq!(product.serial_number, "SN-0001");
        assert_eq!(product.catalog_item_id, Some(CatalogItemId::new(3)));
    }
}
