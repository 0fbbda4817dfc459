//! Status enums for the SmartSales365 domain.
//!
//! Wire values are the backend's Spanish identifiers; the Rust names are the
//! English equivalents. Display labels are what the UI shows.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SaleStatus {
    #[default]
    #[serde(rename = "pendiente")]
    Pending,
    #[serde(rename = "pagada")]
    Paid,
    #[serde(rename = "enviada")]
    Shipped,
    #[serde(rename = "entregada")]
    Delivered,
    #[serde(rename = "cancelada")]
    Cancelled,
}

impl SaleStatus {
    /// The backend wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pendiente",
            Self::Paid => "pagada",
            Self::Shipped => "enviada",
            Self::Delivered => "entregada",
            Self::Cancelled => "cancelada",
        }
    }

    /// The label shown in the UI.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pendiente",
            Self::Paid => "Pagada",
            Self::Shipped => "Enviada",
            Self::Delivered => "Entregada",
            Self::Cancelled => "Cancelada",
        }
    }

    /// All statuses, for select inputs.
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::Pending,
            Self::Paid,
            Self::Shipped,
            Self::Delivered,
            Self::Cancelled,
        ]
    }
}

impl std::fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SaleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pendiente" => Ok(Self::Pending),
            "pagada" => Ok(Self::Paid),
            "enviada" => Ok(Self::Shipped),
            "entregada" => Ok(Self::Delivered),
            "cancelada" => Ok(Self::Cancelled),
            _ => Err(format!("invalid sale status: {s}")),
        }
    }
}

/// Status of a payment as reported by the payment backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentStatus {
    #[default]
    #[serde(rename = "pendiente")]
    Pending,
    #[serde(rename = "completado")]
    Completed,
    #[serde(rename = "fallido")]
    Failed,
    #[serde(rename = "reembolsado")]
    Refunded,
}

impl PaymentStatus {
    /// The label shown in the UI.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pendiente",
            Self::Completed => "Completado",
            Self::Failed => "Fallido",
            Self::Refunded => "Reembolsado",
        }
    }

    /// Whether the payment settled successfully.
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Publication status of a catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CatalogStatus {
    #[default]
    #[serde(rename = "activo")]
    Active,
    #[serde(rename = "inactivo")]
    Inactive,
}

impl CatalogStatus {
    /// Whether the item is visible in the public catalog.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sale_status_wire_values() {
        let json = serde_json::to_string(&SaleStatus::Paid).expect("serialize");
        assert_eq!(json, "\"pagada\"");

        let status: SaleStatus = serde_json::from_str("\"cancelada\"").expect("deserialize");
        assert_eq!(status, SaleStatus::Cancelled);
    }

    #[test]
    fn test_sale_status_parse() {
        assert_eq!("enviada".parse::<SaleStatus>(), Ok(SaleStatus::Shipped));
        assert!("unknown".parse::<SaleStatus>().is_err());
    }

    #[test]
    fn test_payment_status_completed() {
        assert!(PaymentStatus::Completed.is_completed());
        assert!(!PaymentStatus::Pending.is_completed());
    }
}
