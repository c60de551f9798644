//! Data models for receipt extraction.

pub mod config;
pub mod record;
