//! Extraction pipeline: per-document processing and batch aggregation.

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::config::MercadataConfig;
use crate::models::record::{Dataset, Receipt};
use crate::pdf::{PdfExtractor, PdfProcessor};
use crate::receipt::rules::categories::CategoryClassifier;
use crate::receipt::{parse_items, segment};

/// Processes receipt documents into purchase records.
///
/// Documents are handled one at a time in input order, appending to a
/// single accumulating [`Dataset`]. Parse-level anomalies degrade to
/// dropped lines or empty receipts; only I/O-level and PDF-level
/// failures propagate, aborting the whole batch.
pub struct ReceiptPipeline {
    config: MercadataConfig,
    classifier: CategoryClassifier,
}

impl ReceiptPipeline {
    /// Pipeline with the default configuration and built-in category table.
    pub fn new() -> Self {
        Self::with_config(MercadataConfig::default())
    }

    /// Pipeline over a custom configuration.
    pub fn with_config(config: MercadataConfig) -> Self {
        let classifier = CategoryClassifier::from_config(&config.extraction);
        Self { config, classifier }
    }

    /// Parse one page of already-extracted receipt text.
    pub fn parse_text(&self, source: &str, text: &str) -> Receipt {
        let segmented = segment(text, self.config.extraction.fallback_items_start);
        let records = parse_items(&segmented.item_lines, &segmented.header, &self.classifier);

        debug!(
            "parsed {} records from {} (ticket {})",
            records.len(),
            source,
            if segmented.header.ticket_id.is_empty() {
                "unknown"
            } else {
                segmented.header.ticket_id.as_str()
            }
        );

        Receipt {
            source: source.to_string(),
            header: segmented.header,
            records,
        }
    }

    /// Process one PDF document: extract the first page's text and parse
    /// it. Only the first page is read; multi-page receipts are out of
    /// scope. A first page with no extractable text yields a receipt
    /// with zero records.
    pub fn process_document(&self, source: &str, data: &[u8]) -> Result<Receipt> {
        let mut extractor = PdfExtractor::new();
        extractor.load(data)?;

        let text = extractor.extract_page_text(1)?;

        if text.trim().len() < self.config.pdf.min_text_length {
            warn!("no extractable text on first page of {}", source);
            return Ok(Receipt {
                source: source.to_string(),
                header: Default::default(),
                records: Vec::new(),
            });
        }

        Ok(self.parse_text(source, &text))
    }

    /// Process a batch of documents in order, accumulating all records
    /// into one dataset. An unreadable document aborts the batch.
    pub fn process_batch<I, N, D>(&self, documents: I) -> Result<Dataset>
    where
        I: IntoIterator<Item = (N, D)>,
        N: AsRef<str>,
        D: AsRef<[u8]>,
    {
        let mut dataset = Dataset::new();

        for (name, data) in documents {
            let receipt = self.process_document(name.as_ref(), data.as_ref())?;
            info!(
                "{}: {} records extracted",
                name.as_ref(),
                receipt.records.len()
            );
            dataset.extend_from_receipt(&receipt);
        }

        Ok(dataset)
    }
}

impl Default for ReceiptPipeline {
    fn default() -> Self {
        Self::new()
    }
}
