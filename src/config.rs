//! Configuration types for the transcript parser.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! # Example
//!
//! ```rust
//! use chatlens::config::ParseConfig;
//! use chatlens::parser::TranscriptParser;
//!
//! let config = ParseConfig::new()
//!     .with_parallel(true)
//!     .with_parallel_threshold(10_000);
//!
//! let parser = TranscriptParser::with_config(config);
//! ```

use serde::{Deserialize, Serialize};

/// Configuration for transcript parsing.
///
/// # Example
///
/// ```rust
/// use chatlens::config::ParseConfig;
///
/// // Only accept timestamps in the known export formats
/// let config = ParseConfig::new().with_lenient_fallback(false);
/// assert!(!config.lenient_fallback);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    /// Try a generic date/time parser when no export format matches (default: true)
    pub lenient_fallback: bool,

    /// Build records on a thread pool for large transcripts (default: false).
    ///
    /// Has no effect unless the `parallel` feature is enabled.
    pub parallel: bool,

    /// Minimum number of segments before records are built in parallel (default: 4096)
    pub parallel_threshold: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            lenient_fallback: true,
            parallel: false,
            parallel_threshold: 4096,
        }
    }
}

impl ParseConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration tuned for very large transcripts.
    pub fn parallel() -> Self {
        Self {
            parallel: true,
            ..Self::default()
        }
    }

    /// Enables or disables the lenient timestamp fallback.
    #[must_use]
    pub fn with_lenient_fallback(mut self, enabled: bool) -> Self {
        self.lenient_fallback = enabled;
        self
    }

    /// Enables or disables parallel record construction.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the segment count above which records are built in parallel.
    #[must_use]
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ParseConfig::default();
        assert!(config.lenient_fallback);
        assert!(!config.parallel);
        assert_eq!(config.parallel_threshold, 4096);
    }

    #[test]
    fn test_builder() {
        let config = ParseConfig::new()
            .with_lenient_fallback(false)
            .with_parallel(true)
            .with_parallel_threshold(10);

        assert!(!config.lenient_fallback);
        assert!(config.parallel);
        assert_eq!(config.parallel_threshold, 10);
    }

    #[test]
    fn test_parallel_preset() {
        let config = ParseConfig::parallel();
        assert!(config.parallel);
        assert!(config.lenient_fallback);
    }

    #[cfg(feature = "json-output")]
    #[test]
    fn test_serde_missing_fields_use_defaults() {
        let config: ParseConfig = serde_json::from_str(r#"{"parallel": true}"#).unwrap();
        assert!(config.parallel);
        assert!(config.lenient_fallback);
        assert_eq!(config.parallel_threshold, 4096);
    }
}
