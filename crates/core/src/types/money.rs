//! BRL money display formatting.
//!
//! All amounts arrive from the backend as decimal values (sometimes strings,
//! sometimes numbers - `rust_decimal`'s deserializer accepts both). The
//! client never derives authoritative totals; it only formats what the
//! backend computed, in the Brazilian convention ("R$ 23,00").

use rust_decimal::Decimal;

/// Format a decimal amount as Brazilian reais, e.g. `R$ 1234,50`.
#[must_use]
pub fn format_brl(amount: Decimal) -> String {
    format!("R$ {amount:.2}").replace('.', ",")
}

/// Format a delivery distance in kilometers, e.g. `3,20 km`.
#[must_use]
pub fn format_km(distance: Decimal) -> String {
    format!("{distance:.2} km").replace('.', ",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(Decimal::new(2300, 2)), "R$ 23,00");
        assert_eq!(format_brl(Decimal::ZERO), "R$ 0,00");
        assert_eq!(format_brl(Decimal::new(99, 1)), "R$ 9,90");
        assert_eq!(format_brl(Decimal::new(123_456, 2)), "R$ 1234,56");
    }

    #[test]
    fn test_format_km() {
        assert_eq!(format_km(Decimal::new(32, 1)), "3,20 km");
    }
}
