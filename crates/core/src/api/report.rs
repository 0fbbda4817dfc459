//! Report generation payloads (`reports/`, `standard/{key}/`).
//!
//! Report content (NLP interpretation, PDF/Excel rendering) is produced
//! entirely server-side; the client sends a prompt and streams bytes back.

use serde::Serialize;

/// Payload for `POST reports/`: a natural-language report description.
#[derive(Debug, Clone, Serialize)]
pub struct ReportPrompt {
    pub prompt: String,
}

/// Predefined one-click reports served by `GET standard/{key}/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardReport {
    /// Current month's sales as an Excel workbook.
    SalesThisMonthExcel,
    /// Available inventory grouped by category, as a PDF.
    InventoryAvailablePdf,
}

impl StandardReport {
    /// The backend path key for the report.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::SalesThisMonthExcel => "sales_this_month_excel",
            Self::InventoryAvailablePdf => "inventory_available_pdf",
        }
    }

    /// Suggested download file name.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::SalesThisMonthExcel => "ventas_mes_actual.xlsx",
            Self::InventoryAvailablePdf => "inventario_disponible.pdf",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_report_keys() {
        assert_eq!(
            StandardReport::SalesThisMonthExcel.key(),
            "sales_this_month_excel"
        );
        assert_eq!(
            StandardReport::InventoryAvailablePdf.file_name(),
            "inventario_disponible.pdf"
        );
    }
}
