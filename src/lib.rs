//! # Chatlens
//!
//! A library for turning WhatsApp chat exports into per-message records
//! ready for statistics and visualisation.
//!
//! ## Overview
//!
//! Parsing runs in two stages:
//!
//! 1. **Segmentation** ([`parsing::Segmenter`]) cuts the raw transcript at
//!    every line that starts with a recognised timestamp (12-hour, 24-hour
//!    or bracketed iOS style). Continuation lines stay with their message.
//! 2. **Record building** ([`parsing::RecordBuilder`]) resolves each
//!    timestamp against the known export formats, falls back to a lenient
//!    parser, splits the author from the text and derives calendar fields.
//!
//! The result is an immutable [`Corpus`]. Filtering, grouping and summary
//! statistics all work on borrowed views of it.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatlens::prelude::*;
//!
//! let raw = "\
//! 12/03/2023, 9:15 pm - Alice: dinner at 8?
//! 12/03/2023, 9:16 pm - Bob: sure
//! see you there
//! 12/03/2023, 9:17 pm - Bob left
//! ";
//!
//! let parsed = TranscriptParser::new()
//!     .parse_str(raw)
//!     .into_parsed()
//!     .expect("transcript has messages");
//!
//! assert_eq!(parsed.corpus.len(), 3);
//! assert_eq!(parsed.corpus[1].text(), "sure\nsee you there\n");
//! assert!(parsed.corpus[2].is_notification());
//! assert!(parsed.report.is_clean());
//!
//! let by_author = parsed.corpus.by_author(false);
//! assert_eq!(by_author["Bob"].len(), 1);
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`TranscriptParser`], [`ParseOutcome`](parser::ParseOutcome), [`ParseReport`](parser::ParseReport)
//! - [`parsing`] - segmentation, timestamp resolution and author splitting
//! - [`message`] - [`ChatMessage`] and its derived [`TimeFields`](message::TimeFields)
//! - [`corpus`] - [`Corpus`], [`CorpusView`](corpus::CorpusView) and groupings
//! - [`config`] - [`ParseConfig`](config::ParseConfig)
//! - [`core`] - filtering and serialization
//! - [`format`] - [`OutputFormat`](format::OutputFormat) selection
//! - [`error`] - [`ChatlensError`], [`Result`]
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod corpus;
pub mod error;
pub mod format;
pub mod message;
pub mod parser;
pub mod parsing;

pub use corpus::Corpus;
pub use error::{ChatlensError, Result};
pub use message::ChatMessage;
pub use parser::TranscriptParser;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatlens::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::ParseConfig;
    pub use crate::core::filter::CorpusFilter;
    pub use crate::core::models::OutputConfig;
    pub use crate::corpus::{Corpus, CorpusSummary, CorpusView, HeatmapCell, MonthKey};
    pub use crate::error::{ChatlensError, Result};
    pub use crate::format::{OutputFormat, to_format};
    pub use crate::message::{ChatMessage, TimeFields};
    pub use crate::parser::{ParseIssue, ParseOutcome, ParseReport, ParsedTranscript, TranscriptParser};

    #[cfg(feature = "csv-output")]
    pub use crate::core::output::to_csv;
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl};
}
