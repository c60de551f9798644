//! Item-table parser: a line cursor with one-line lookahead.
//!
//! The parser walks the item lines produced by segmentation and emits
//! one purchase record per recognized item. Recognition failures never
//! raise: an unrecognized line is skipped and an item with no
//! recoverable price is dropped. Partial datasets are normal output,
//! not an error condition.

use rust_decimal::Decimal;
use tracing::trace;

use crate::models::record::{PurchaseRecord, ReceiptHeader};

use super::rules::amounts::{find_prices, parse_comma_decimal, strip_trailing_prices};
use super::rules::categories::CategoryClassifier;
use super::rules::patterns::{QUANTITY_LINE, STOP_LINE, WEIGHT_LINE};

/// Outcome of examining the line at the cursor.
#[derive(Debug, Clone, PartialEq)]
enum LineStep {
    /// Stop-token line; the table is over and remaining lines are ignored.
    Stop,
    /// Line carries no recognizable item; advance by one.
    Skip,
    /// An item with a recovered price. `consumed` is 1 for single-line
    /// items and 2 when the price came from the lookahead line.
    Item {
        name: String,
        price: Decimal,
        consumed: usize,
    },
}

/// Examine the line at `idx`, with one line of lookahead for
/// weight-priced items. Pure: no cursor mutation happens here.
fn step(lines: &[String], idx: usize) -> LineStep {
    let line = lines[idx].trim();

    // Terminal predicate first: totals, tax and payment sections end
    // the table no matter what shape the line has.
    if STOP_LINE.is_match(line) {
        return LineStep::Stop;
    }

    let Some(caps) = QUANTITY_LINE.captures(line) else {
        // Not quantity-prefixed: continuation noise or unrecognized
        // format, silently dropped.
        return LineStep::Skip;
    };
    let rest = caps[2].trim();

    let prices = find_prices(rest);
    if let Some(last) = prices.last() {
        // One price: total only. Two or more: unit price(s) then total;
        // the last match is the line total either way.
        let Some(price) = parse_comma_decimal(last) else {
            return LineStep::Skip;
        };
        return LineStep::Item {
            name: strip_trailing_prices(rest),
            price,
            consumed: 1,
        };
    }

    // No price on the item line: weight-priced items carry it on the
    // next line.
    let name = rest.to_string();
    let Some(next_line) = lines.get(idx + 1).map(|l| l.trim()) else {
        return LineStep::Skip;
    };

    if let Some(caps) = WEIGHT_LINE.captures(next_line) {
        if let Some(price) = parse_comma_decimal(&caps[3]) {
            return LineStep::Item {
                name,
                price,
                consumed: 2,
            };
        }
    }

    if let Some(last) = find_prices(next_line).last() {
        if let Some(price) = parse_comma_decimal(last) {
            return LineStep::Item {
                name,
                price,
                consumed: 2,
            };
        }
    }

    // No price recoverable; the item is dropped and the lookahead line
    // is left for the next iteration.
    trace!("dropping item without recoverable price: {name:?}");
    LineStep::Skip
}

/// Walk the item lines and emit one record per recognized item.
///
/// The cursor advances by at least one line per iteration, plus one
/// extra when a lookahead line was consumed, and terminates at the end
/// of input or at the first stop-token line.
pub fn parse_items(
    item_lines: &[String],
    header: &ReceiptHeader,
    classifier: &CategoryClassifier,
) -> Vec<PurchaseRecord> {
    let mut records = Vec::new();
    let mut idx = 0;

    while idx < item_lines.len() {
        match step(item_lines, idx) {
            LineStep::Stop => break,
            LineStep::Skip => idx += 1,
            LineStep::Item {
                name,
                price,
                consumed,
            } => {
                let category = classifier.classify(&name);
                records.push(PurchaseRecord::new(header, name, category, price));
                idx += consumed;
            }
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|l| l.to_string()).collect()
    }

    fn parse(raw: &[&str]) -> Vec<PurchaseRecord> {
        parse_items(&lines(raw), &ReceiptHeader::default(), &CategoryClassifier::new())
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_single_line_item_with_unit_and_total() {
        let records = parse(&["2 Manzana Fuji 1,20 2,40"]);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].item, "Manzana Fuji");
        assert_eq!(records[0].category, "Frutas");
        assert_eq!(records[0].price, dec("2.40"));
    }

    #[test]
    fn test_single_line_item_with_total_only() {
        let records = parse(&["1 Leche entera 1,15"]);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].item, "Leche entera");
        assert_eq!(records[0].category, "Lácteos");
        assert_eq!(records[0].price, dec("1.15"));
    }

    #[test]
    fn test_weight_priced_item_consumes_lookahead() {
        let records = parse(&["1 Platano", "0,474 kg 1,40 €/kg 0,66"]);

        // One record only: the weight line must not be re-parsed.
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].item, "Platano");
        assert_eq!(records[0].category, "Frutas");
        assert_eq!(records[0].price, dec("0.66"));
    }

    #[test]
    fn test_lookahead_generic_price_line() {
        let records = parse(&["1 Queso al corte", "precio 3,85"]);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].item, "Queso al corte");
        assert_eq!(records[0].price, dec("3.85"));
    }

    #[test]
    fn test_item_without_price_is_dropped_lookahead_kept() {
        let records = parse(&["1 Platano", "2 Manzana Fuji 1,20 2,40"]);

        // The priceless item is dropped; the next line still parses
        // because the lookahead was not consumed.
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].item, "Manzana Fuji");
    }

    #[test]
    fn test_stop_token_terminates_table() {
        let records = parse(&[
            "2 Manzana Fuji 1,20 2,40",
            "TOTAL 12,34",
            "1 Leche entera 1,15",
        ]);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].item, "Manzana Fuji");
    }

    #[test]
    fn test_stop_token_case_insensitive() {
        let records = parse(&["tarjeta bancaria ****1234", "1 Leche entera 1,15"]);
        assert!(records.is_empty());
    }

    #[test]
    fn test_unrecognized_lines_skipped() {
        let records = parse(&[
            "PARKING 2H GRATIS",
            "2 Manzana Fuji 1,20 2,40",
            "se admiten devoluciones",
            "1 Leche entera 1,15",
        ]);

        let items: Vec<&str> = records.iter().map(|r| r.item.as_str()).collect();
        assert_eq!(items, vec!["Manzana Fuji", "Leche entera"]);
    }

    #[test]
    fn test_priceless_item_at_end_of_input() {
        let records = parse(&["1 Platano"]);
        assert!(records.is_empty());
    }

    #[test]
    fn test_records_carry_receipt_fields() {
        let header = ReceiptHeader {
            timestamp: None,
            ticket_id: "144142".to_string(),
            location: "AVDA. DEL PUERTO 108".to_string(),
        };
        let records = parse_items(
            &lines(&["2 Manzana Fuji 1,20 2,40"]),
            &header,
            &CategoryClassifier::new(),
        );

        assert_eq!(records[0].ticket_id, "144142");
        assert_eq!(records[0].location, "AVDA. DEL PUERTO 108");
    }

    #[test]
    fn test_uncategorized_item_falls_back() {
        let records = parse(&["1 Pilas alcalinas 2,50"]);
        assert_eq!(records[0].category, "Otros");
    }
}
