//! Purchase record and dataset models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Timestamp format used on the receipt and in the output dataset.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Receipt-level fields shared by every item on one receipt.
///
/// A field the segmenter could not locate stays `None`/empty; records
/// are still emitted with the missing field blank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReceiptHeader {
    /// Purchase timestamp (day/month/year hour:minute).
    pub timestamp: Option<NaiveDateTime>,

    /// Ticket identifier (the digits after `OP:`).
    pub ticket_id: String,

    /// Store address line.
    pub location: String,
}

impl ReceiptHeader {
    /// Timestamp formatted as it appears on the receipt, empty when absent.
    pub fn format_timestamp(&self) -> String {
        self.timestamp
            .map(|t| t.format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_default()
    }
}

/// One line item on one receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    /// Purchase timestamp, receipt-level.
    pub timestamp: Option<NaiveDateTime>,

    /// Ticket identifier, receipt-level.
    pub ticket_id: String,

    /// Store address, receipt-level.
    pub location: String,

    /// Item description with trailing price substrings stripped.
    pub item: String,

    /// Category label, always assigned (fallback "Otros").
    pub category: String,

    /// Total price for the line, non-negative, Euro.
    pub price: Decimal,
}

impl PurchaseRecord {
    /// Build a record from receipt-level fields and an extracted item.
    pub fn new(
        header: &ReceiptHeader,
        item: impl Into<String>,
        category: impl Into<String>,
        price: Decimal,
    ) -> Self {
        Self {
            timestamp: header.timestamp,
            ticket_id: header.ticket_id.clone(),
            location: header.location.clone(),
            item: item.into(),
            category: category.into(),
            price,
        }
    }

    /// Timestamp formatted for the dataset, empty when absent.
    pub fn format_timestamp(&self) -> String {
        self.timestamp
            .map(|t| t.format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_default()
    }
}

/// A parsed receipt: header fields plus the records extracted from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    /// Source file name the receipt was read from.
    pub source: String,

    /// Receipt-level fields.
    pub header: ReceiptHeader,

    /// Extracted purchase records, in line order.
    pub records: Vec<PurchaseRecord>,
}

/// Ordered collection of purchase records across all processed documents.
///
/// Insertion order is document processing order, then line order within
/// a document. No deduplication, no uniqueness constraints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    records: Vec<PurchaseRecord>,
}

impl Dataset {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append all records from one receipt.
    pub fn extend_from_receipt(&mut self, receipt: &Receipt) {
        self.records.extend(receipt.records.iter().cloned());
    }

    /// Append a single record.
    pub fn push(&mut self, record: PurchaseRecord) {
        self.records.push(record);
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PurchaseRecord> {
        self.records.iter()
    }

    /// Records as a slice.
    pub fn records(&self) -> &[PurchaseRecord] {
        &self.records
    }
}

impl IntoIterator for Dataset {
    type Item = PurchaseRecord;
    type IntoIter = std::vec::IntoIter<PurchaseRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    #[test]
    fn test_format_timestamp() {
        let header = ReceiptHeader {
            timestamp: NaiveDate::from_ymd_opt(2024, 5, 4)
                .unwrap()
                .and_hms_opt(19, 6, 0),
            ticket_id: "123456".to_string(),
            location: "AVDA. EJEMPLO 12".to_string(),
        };

        assert_eq!(header.format_timestamp(), "04/05/2024 19:06");
    }

    #[test]
    fn test_format_timestamp_missing() {
        let header = ReceiptHeader::default();
        assert_eq!(header.format_timestamp(), "");
    }

    #[test]
    fn test_dataset_preserves_insertion_order() {
        let header = ReceiptHeader::default();
        let mut dataset = Dataset::new();

        dataset.push(PurchaseRecord::new(
            &header,
            "Leche",
            "Lácteos",
            Decimal::from_str("1.15").unwrap(),
        ));
        dataset.push(PurchaseRecord::new(
            &header,
            "Pan",
            "Panadería",
            Decimal::from_str("0.85").unwrap(),
        ));

        let items: Vec<&str> = dataset.iter().map(|r| r.item.as_str()).collect();
        assert_eq!(items, vec!["Leche", "Pan"]);
        assert_eq!(dataset.len(), 2);
    }
}
