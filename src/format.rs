//! Output format selection.
//!
//! [`OutputFormat`] names a serializer and [`to_format`] dispatches to it.
//! These types carry no CLI framework dependency.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatlens::Result<()> {
//! use chatlens::core::models::OutputConfig;
//! use chatlens::format::{OutputFormat, to_format};
//! use chatlens::parser::TranscriptParser;
//!
//! let corpus = TranscriptParser::new()
//!     .parse_str("1/1/23, 10:30 - Alice: hi")
//!     .into_corpus();
//!
//! let format = OutputFormat::from_path("chat.ndjson")?;
//! assert_eq!(format, OutputFormat::Jsonl);
//!
//! let out = to_format(&corpus, format, &OutputConfig::new())?;
//! assert!(out.contains(r#""author":"Alice""#));
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::models::OutputConfig;
use crate::error::{ChatlensError, Result};
use crate::message::ChatMessage;

/// Serialized representation of a corpus.
///
/// - [`Csv`](OutputFormat::Csv) - semicolon-delimited table
/// - [`Json`](OutputFormat::Json) - pretty-printed array
/// - [`Jsonl`](OutputFormat::Jsonl) - one object per line (also accepted as `ndjson`)
///
/// ```rust
/// use chatlens::format::OutputFormat;
///
/// let format: OutputFormat = "ndjson".parse().unwrap();
/// assert_eq!(format, OutputFormat::Jsonl);
/// assert_eq!(format.extension(), "jsonl");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
    #[serde(alias = "ndjson")]
    Jsonl,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    /// Returns all accepted format names.
    pub fn all_names() -> &'static [&'static str] {
        &["csv", "json", "jsonl", "ndjson"]
    }

    /// Detects the format from a path's extension (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidFormat`] for a missing or unknown extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_lowercase();

        ext.parse().map_err(|_| {
            ChatlensError::invalid_format(
                "output",
                format!("unknown file extension '.{ext}', expected one of: csv, json, jsonl, ndjson"),
            )
        })
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(format!(
                "unknown format '{}', expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

/// Serializes messages in the given format.
///
/// # Errors
///
/// Returns [`ChatlensError::InvalidFormat`] if the format's feature is not
/// enabled, or the serializer's error.
#[allow(unused_variables)]
pub fn to_format<'a>(
    messages: impl IntoIterator<Item = &'a ChatMessage>,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<String> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(messages, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(messages, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::to_jsonl(messages, config),
        #[allow(unreachable_patterns)]
        _ => Err(ChatlensError::invalid_format(
            "output",
            format!(
                "output format {} requires the '{}' feature to be enabled",
                format,
                match format {
                    OutputFormat::Csv => "csv-output",
                    OutputFormat::Json | OutputFormat::Jsonl => "json-output",
                }
            ),
        )),
    }
}
