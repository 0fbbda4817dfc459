//! Sale records, statistics and ML predictions.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{ClientId, SaleId, SaleLineId, SaleStatus};

/// A sale as returned by `GET ventas/{id}/`.
///
/// All monetary fields arrive as decimal strings and are parsed once here;
/// handlers never re-parse them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: SaleId,
    #[serde(rename = "cliente", default)]
    pub client_id: Option<ClientId>,
    #[serde(rename = "cliente_nombre", default)]
    pub client_name: Option<String>,
    #[serde(rename = "fecha", default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(rename = "estado", default)]
    pub status: SaleStatus,
    #[serde(default)]
    pub subtotal: Decimal,
    #[serde(rename = "impuesto", default)]
    pub tax: Decimal,
    #[serde(rename = "descuento", default)]
    pub discount: Decimal,
    #[serde(rename = "costo_envio", default)]
    pub shipping_cost: Decimal,
    #[serde(default)]
    pub total: Decimal,
    #[serde(rename = "direccion", default)]
    pub address: Option<String>,
}

/// One line of a sale, from `GET detalle-ventas/?venta={id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleLine {
    pub id: SaleLineId,
    #[serde(rename = "venta")]
    pub sale_id: SaleId,
    #[serde(rename = "catalogo_nombre", default)]
    pub item_name: Option<String>,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
    #[serde(rename = "precio_unitario", default)]
    pub unit_price: Decimal,
    #[serde(default)]
    pub subtotal: Decimal,
}

/// Payload for `POST ventas/{id}/cambiar_estado/`.
#[derive(Debug, Clone, Serialize)]
pub struct ChangeStatusRequest {
    #[serde(rename = "estado")]
    pub status: SaleStatus,
}

/// Writable sale fields for manual creation from the admin console.
#[derive(Debug, Clone, Serialize)]
pub struct SaleInput {
    #[serde(rename = "cliente")]
    pub client_id: ClientId,
    #[serde(rename = "direccion")]
    pub address: String,
    #[serde(rename = "impuesto")]
    pub tax: Decimal,
    #[serde(rename = "descuento")]
    pub discount: Decimal,
    #[serde(rename = "costo_envio")]
    pub shipping_cost: Decimal,
}

/// Aggregates and ML predictions from `GET ventas/estadisticas/`.
///
/// Both the historical series and the predicted series are computed
/// server-side; this client only renders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SalesStats {
    #[serde(rename = "total_ventas", default)]
    pub total_sales: Decimal,
    #[serde(rename = "cantidad_ventas", default)]
    pub sales_count: i64,
    #[serde(rename = "ticket_promedio", default)]
    pub average_ticket: Decimal,
    #[serde(rename = "ventas_por_mes", default)]
    pub monthly: Vec<MonthlyTotal>,
    #[serde(rename = "predicciones", default)]
    pub predictions: Vec<MonthlyTotal>,
}

/// One month of (actual or predicted) sales volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    #[serde(rename = "mes")]
    pub month: String,
    #[serde(default)]
    pub total: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sale_parses_string_decimals() {
        let json = r#"{
            "id": 15,
            "cliente": 4,
            "cliente_nombre": "Ana Flores",
            "estado": "pendiente",
            "subtotal": "100.00",
            "impuesto": "13.00",
            "descuento": "0.00",
            "costo_envio": "10.00",
            "total": "123.00",
            "direccion": "Av. Arce 123"
        }"#;
        let sale: Sale = serde_json::from_str(json).expect("deserialize");
        assert_eq!(sale.total, Decimal::new(12300, 2));
        assert_eq!(sale.status, SaleStatus::Pending);
        assert_eq!(sale.client_name.as_deref(), Some("Ana Flores"));
    }

    #[test]
    fn test_stats_default_series() {
        let json = r#"{"total_ventas": "5000", "cantidad_ventas": 40}"#;
        let stats: SalesStats = serde_json::from_str(json).expect("deserialize");
        assert_eq!(stats.sales_count, 40);
        assert!(stats.monthly.is_empty());
        assert!(stats.predictions.is_empty());
    }
}
