//! Everything downstream of parsing.
//!
//! This module contains:
//! - [`models`] - Output configuration
//! - [`filter`] - Message filtering by author, date and marker
//! - [`output`] - String serializers (CSV, JSON, JSONL)

pub mod filter;
pub mod models;
pub mod output;

pub use filter::CorpusFilter;
pub use models::OutputConfig;

#[cfg(feature = "csv-output")]
pub use output::to_csv;
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl};
