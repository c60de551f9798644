//! Line-shape patterns for the Mercadona receipt layout.
//!
//! Each pattern names one logical line shape of the receipt. Capture
//! semantics are documented per pattern; all prices are comma-decimal
//! Euro amounts.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Receipt header line: `DD/MM/YYYY HH:MM OP: <digits>`.
    /// Captures: (1) date, (2) time, (3) ticket id.
    pub static ref TICKET_HEADER: Regex = Regex::new(
        r"(\d{2}/\d{2}/\d{4})\s+(\d{2}:\d{2})\s+OP:\s+(\d+)"
    ).unwrap();

    /// Store address line: street-type token followed by free text
    /// containing a digit.
    pub static ref ADDRESS_LINE: Regex = Regex::new(
        r"(?i)^(AVDA\.|C\.|CALLE)\s+.*\d+"
    ).unwrap();

    /// Item-table header line. Item lines start immediately after it.
    pub static ref TABLE_HEADER: Regex = Regex::new(
        r"(?i)Descripción\s+P\.\s+Unit\s+Importe"
    ).unwrap();

    /// Terminal line: totals, tax breakdown or payment section.
    /// Everything at and after this line is ignored.
    pub static ref STOP_LINE: Regex = Regex::new(
        r"(?i)\b(TOTAL|IVA|TARJETA|IMPORTE)\b"
    ).unwrap();

    /// Item line: leading integer quantity followed by the rest.
    /// Captures: (1) quantity, (2) rest of line.
    pub static ref QUANTITY_LINE: Regex = Regex::new(
        r"^(\d+)\s+(.*)"
    ).unwrap();

    /// Comma-decimal price substring, e.g. `1,40`.
    pub static ref PRICE: Regex = Regex::new(
        r"\d+,\d{2}"
    ).unwrap();

    /// Trailing run of price substrings at the end of an item line,
    /// e.g. the ` 1,20 2,40` tail of `Manzana Fuji 1,20 2,40`.
    pub static ref TRAILING_PRICES: Regex = Regex::new(
        r"(?:\s*\d+,\d{2})+$"
    ).unwrap();

    /// Weight-priced item continuation line:
    /// `<weight,3> kg <unit_price,2> €/kg <total_price,2>`.
    /// Captures: (1) weight, (2) unit price, (3) total price.
    pub static ref WEIGHT_LINE: Regex = Regex::new(
        r"^(\d+,\d{3})\s+kg\s+(\d+,\d{2})\s+€/kg\s+(\d+,\d{2})"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ticket_header_captures() {
        let caps = TICKET_HEADER
            .captures("04/05/2024 19:06  OP: 123456")
            .unwrap();
        assert_eq!(&caps[1], "04/05/2024");
        assert_eq!(&caps[2], "19:06");
        assert_eq!(&caps[3], "123456");
    }

    #[test]
    fn test_address_line_variants() {
        assert!(ADDRESS_LINE.is_match("AVDA. DE LA CONSTITUCION 12"));
        assert!(ADDRESS_LINE.is_match("C. MAYOR 3"));
        assert!(ADDRESS_LINE.is_match("calle ancha 45"));
        assert!(!ADDRESS_LINE.is_match("TELF. 912345678"));
        assert!(!ADDRESS_LINE.is_match("AVDA. SIN NUMERO"));
    }

    #[test]
    fn test_table_header_case_insensitive() {
        assert!(TABLE_HEADER.is_match("Descripción P. Unit Importe"));
        assert!(TABLE_HEADER.is_match("DESCRIPCIÓN  P. UNIT  IMPORTE"));
    }

    #[test]
    fn test_stop_line_tokens() {
        for line in ["TOTAL (€) 12,34", "iva 21%", "TARJETA BANCARIA", "IMPORTE: 3,00"] {
            assert!(STOP_LINE.is_match(line), "{line}");
        }
        assert!(!STOP_LINE.is_match("2 Tomate 1,20 2,40"));
    }

    #[test]
    fn test_weight_line_captures() {
        let caps = WEIGHT_LINE.captures("0,474 kg 1,40 €/kg 0,66").unwrap();
        assert_eq!(&caps[1], "0,474");
        assert_eq!(&caps[2], "1,40");
        assert_eq!(&caps[3], "0,66");
    }
}
