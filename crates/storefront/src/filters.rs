//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

fn format_money(value: impl Display) -> String {
    format!("Bs {value:.2}")
}

/// Formats a decimal amount as a price in bolivianos.
///
/// Usage in templates: `{{ item.price|money }}`
#[askama::filter_fn]
pub fn money(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format_money(value))
}

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    #[test]
    fn test_money_formats_two_decimals() {
        assert_eq!(super::format_money(Decimal::new(12345, 2)), "Bs 123.45");
        assert_eq!(super::format_money(Decimal::new(5, 0)), "Bs 5.00");
    }
}
