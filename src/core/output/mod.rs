//! String serializers for parsed messages.
//!
//! - [`to_csv`] - CSV with semicolon delimiter - requires `csv-output` feature
//! - [`to_json`] - pretty-printed JSON array - requires `json-output` feature
//! - [`to_jsonl`] - JSON Lines, one object per line - requires `json-output` feature
//!
//! Every converter takes any ordered sequence of messages (a [`Corpus`],
//! a [`CorpusView`] or a slice) and returns a `String`. Writing files is left
//! to the caller.
//!
//! [`Corpus`]: crate::Corpus
//! [`CorpusView`]: crate::corpus::CorpusView
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatlens::Result<()> {
//! use chatlens::core::models::OutputConfig;
//! use chatlens::core::output::{to_csv, to_jsonl};
//! use chatlens::parser::TranscriptParser;
//!
//! let corpus = TranscriptParser::new()
//!     .parse_str("1/1/23, 10:30 - Alice: hi\n1/1/23, 10:31 - Bob: hello")
//!     .into_corpus();
//!
//! let config = OutputConfig::new().with_time_fields();
//! let csv = to_csv(&corpus, &config)?;
//! assert!(csv.starts_with("Timestamp;Author;Text;Year"));
//!
//! let jsonl = to_jsonl(corpus.view(|m| m.author() == "Bob").iter(), &config)?;
//! assert_eq!(jsonl.lines().count(), 1);
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::to_csv;
#[cfg(feature = "json-output")]
pub use json_writer::to_json;
#[cfg(feature = "json-output")]
pub use jsonl_writer::to_jsonl;

#[cfg(any(feature = "csv-output", feature = "json-output"))]
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
