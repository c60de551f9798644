//! Receipt segmentation: header fields and the item-table boundary.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::models::record::{ReceiptHeader, TIMESTAMP_FORMAT};

use super::rules::patterns::{ADDRESS_LINE, TABLE_HEADER, TICKET_HEADER};

/// Result of segmenting one page of receipt text.
#[derive(Debug, Clone)]
pub struct Segmented {
    /// Receipt-level fields found in the header region.
    pub header: ReceiptHeader,

    /// Lines from the item-table start onward. The item parser decides
    /// where the table ends; no trimming happens here.
    pub item_lines: Vec<String>,
}

/// Split page text into lines, locate the receipt header fields and
/// return the suffix of lines where the item table begins.
///
/// The first line matching the ticket-header pattern sets the timestamp
/// and ticket id; scanning continues so a later address line can still
/// set the location. Item lines start immediately after the
/// `Descripción ... P. Unit ... Importe` header, or at
/// `fallback_items_start` when no such header exists (an unvalidated
/// heuristic for headerless documents).
pub fn segment(page_text: &str, fallback_items_start: usize) -> Segmented {
    let lines: Vec<&str> = page_text.lines().collect();

    let mut header = ReceiptHeader::default();

    for line in &lines {
        if header.ticket_id.is_empty() {
            if let Some(caps) = TICKET_HEADER.captures(line) {
                header.timestamp = parse_timestamp(&caps[1], &caps[2]);
                header.ticket_id = caps[3].to_string();
                continue;
            }
        }

        if header.location.is_empty() && ADDRESS_LINE.is_match(line.trim()) {
            header.location = line.trim().to_string();
        }
    }

    let start_idx = match lines.iter().position(|line| TABLE_HEADER.is_match(line)) {
        Some(idx) => idx + 1,
        None => {
            debug!(
                "no item-table header found, assuming items start at line {}",
                fallback_items_start
            );
            fallback_items_start
        }
    };

    let item_lines = lines
        .into_iter()
        .skip(start_idx)
        .map(|l| l.to_string())
        .collect();

    Segmented { header, item_lines }
}

fn parse_timestamp(date: &str, time: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(&format!("{date} {time}"), TIMESTAMP_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    const PAGE: &str = "\
MERCADONA, S.A.   A-46103834
AVDA. DEL PUERTO 108
TELÉFONO: 963670011
04/05/2024 19:06  OP: 144142
FACTURA SIMPLIFICADA: 2308-013-118114
Descripción P. Unit Importe
2 Manzana Fuji 1,20 2,40
1 Leche entera 1,15
TOTAL (€) 3,55";

    #[test]
    fn test_segment_header_fields() {
        let segmented = segment(PAGE, 5);

        assert_eq!(
            segmented.header.timestamp,
            NaiveDate::from_ymd_opt(2024, 5, 4)
                .unwrap()
                .and_hms_opt(19, 6, 0)
        );
        assert_eq!(segmented.header.ticket_id, "144142");
        assert_eq!(segmented.header.location, "AVDA. DEL PUERTO 108");
    }

    #[test]
    fn test_segment_items_start_after_table_header() {
        let segmented = segment(PAGE, 5);

        assert_eq!(
            segmented.item_lines,
            vec![
                "2 Manzana Fuji 1,20 2,40",
                "1 Leche entera 1,15",
                "TOTAL (€) 3,55",
            ]
        );
    }

    #[test]
    fn test_segment_fallback_start_index() {
        let page = "\
line0
line1
line2
line3
line4
2 Manzana Fuji 1,20 2,40
TOTAL 2,40";

        let segmented = segment(page, 5);
        assert_eq!(
            segmented.item_lines,
            vec!["2 Manzana Fuji 1,20 2,40", "TOTAL 2,40"]
        );
    }

    #[test]
    fn test_segment_fallback_past_end_yields_no_items() {
        let segmented = segment("only one line", 5);
        assert!(segmented.item_lines.is_empty());
        assert_eq!(segmented.header, ReceiptHeader::default());
    }

    #[test]
    fn test_segment_first_ticket_header_wins() {
        let page = "\
04/05/2024 19:06  OP: 111111
05/05/2024 10:00  OP: 222222";

        let segmented = segment(page, 5);
        assert_eq!(segmented.header.ticket_id, "111111");
    }
}
