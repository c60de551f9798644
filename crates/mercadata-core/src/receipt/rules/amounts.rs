//! Comma-decimal amount handling for receipt prices.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::{PRICE, TRAILING_PRICES};

/// Parse a comma-decimal amount (e.g. `"1,40"`) into a [`Decimal`].
///
/// The comma is the decimal separator; it is swapped for a dot before
/// parsing, so `"1,40"` yields exactly `1.40`.
pub fn parse_comma_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(&s.replace(',', ".")).ok()
}

/// All comma-decimal price substrings in a line, in order of appearance.
pub fn find_prices(line: &str) -> Vec<&str> {
    PRICE.find_iter(line).map(|m| m.as_str()).collect()
}

/// Strip the trailing run of price-like substrings from an item
/// description, leaving the bare item name.
pub fn strip_trailing_prices(rest: &str) -> String {
    TRAILING_PRICES.replace(rest, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_comma_decimal() {
        assert_eq!(
            parse_comma_decimal("1,40"),
            Some(Decimal::from_str("1.40").unwrap())
        );
        assert_eq!(
            parse_comma_decimal("0,66"),
            Some(Decimal::from_str("0.66").unwrap())
        );
        assert_eq!(parse_comma_decimal("kg"), None);
    }

    #[test]
    fn test_parse_keeps_scale() {
        // "2,40" must print back as "2.40", not "2.4".
        let price = parse_comma_decimal("2,40").unwrap();
        assert_eq!(price.to_string(), "2.40");
    }

    #[test]
    fn test_find_prices_in_order() {
        assert_eq!(find_prices("Manzana Fuji 1,20 2,40"), vec!["1,20", "2,40"]);
        assert_eq!(find_prices("Platano"), Vec::<&str>::new());
    }

    #[test]
    fn test_strip_trailing_prices() {
        assert_eq!(strip_trailing_prices("Manzana Fuji 1,20 2,40"), "Manzana Fuji");
        assert_eq!(strip_trailing_prices("Leche entera 1,15"), "Leche entera");
        assert_eq!(strip_trailing_prices("Platano"), "Platano");
    }
}
