//! Receipt text parsing: segmentation, item parsing and line rules.

mod parser;
mod segment;
pub mod rules;

pub use parser::parse_items;
pub use segment::{Segmented, segment};
