//! Core library for Mercadona receipt extraction.
//!
//! This crate provides:
//! - PDF text extraction (first page of single-page receipt PDFs)
//! - Receipt segmentation (header fields and item-table boundary)
//! - Line-cursor item parsing (single-line and weight-priced items)
//! - Keyword-based category classification
//! - A batch pipeline accumulating records into a tabular dataset

pub mod error;
pub mod models;
pub mod pdf;
pub mod pipeline;
pub mod receipt;

pub use error::{MercadataError, Result};
pub use models::config::{CategoryRule, ExtractionConfig, MercadataConfig, PdfConfig};
pub use models::record::{Dataset, PurchaseRecord, Receipt, ReceiptHeader};
pub use pdf::{PdfExtractor, PdfProcessor};
pub use pipeline::ReceiptPipeline;
pub use receipt::rules::categories::CategoryClassifier;
pub use receipt::{Segmented, parse_items, segment};
