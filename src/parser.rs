//! Transcript parser: raw text in, ordered corpus out.
//!
//! Parsing never fails on content. Every decoded string produces a
//! [`ParseOutcome`]: either a corpus plus a report of the entries that needed
//! special handling, or [`ParseOutcome::EmptyCorpus`] when the text contains
//! no recognizable timestamp at all. Only I/O and undecodable bytes are
//! errors.
//!
//! # Example
//!
//! ```rust
//! use chatlens::parser::{ParseOutcome, TranscriptParser};
//!
//! let parser = TranscriptParser::new();
//! let outcome = parser.parse_str("1/1/23, 10:30 am - Alice: hi\n2/1/23, 11:00 am - Bob: hey");
//!
//! let ParseOutcome::Parsed(parsed) = outcome else {
//!     panic!("expected messages");
//! };
//! let authors: Vec<&str> = parsed.corpus.iter().map(|m| m.author()).collect();
//! assert_eq!(authors, ["Alice", "Bob"]);
//! assert!(parsed.report.is_clean());
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::ParseConfig;
use crate::corpus::Corpus;
use crate::error::Result;
use crate::message::ChatMessage;
use crate::parsing::{RawSegment, RecordBuilder, Segmenter, TimestampResolver};

/// A transcript entry that needed special handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseIssue {
    /// The matched timestamp normalized to nothing; the entry was dropped.
    MalformedSegment {
        /// Segment index in the transcript
        index: usize,
    },
    /// No format could read the timestamp; the entry was kept without one.
    UnresolvedTimestamp {
        /// Segment index in the transcript
        index: usize,
        /// The normalized timestamp text
        timestamp_text: String,
    },
}

impl ParseIssue {
    /// Returns the index of the affected segment.
    pub fn index(&self) -> usize {
        match self {
            ParseIssue::MalformedSegment { index }
            | ParseIssue::UnresolvedTimestamp { index, .. } => *index,
        }
    }
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseIssue::MalformedSegment { index } => {
                write!(f, "segment {index}: empty timestamp, entry dropped")
            }
            ParseIssue::UnresolvedTimestamp {
                index,
                timestamp_text,
            } => write!(f, "segment {index}: unresolved timestamp '{timestamp_text}'"),
        }
    }
}

/// Bookkeeping for one parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    segments: usize,
    issues: Vec<ParseIssue>,
}

impl ParseReport {
    /// Number of timestamp matches found.
    pub fn segments(&self) -> usize {
        self.segments
    }

    /// Number of messages in the corpus.
    pub fn records(&self) -> usize {
        self.segments - self.malformed()
    }

    /// Number of dropped segments.
    pub fn malformed(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| matches!(i, ParseIssue::MalformedSegment { .. }))
            .count()
    }

    /// Number of messages kept without a timestamp.
    pub fn unresolved(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| matches!(i, ParseIssue::UnresolvedTimestamp { .. }))
            .count()
    }

    /// All issues, in transcript order.
    pub fn issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    /// Returns `true` if every segment became a fully resolved message.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// A successfully parsed transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTranscript {
    pub corpus: Corpus,
    pub report: ParseReport,
}

/// Result of parsing a decoded transcript.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// At least one timestamp was found.
    Parsed(ParsedTranscript),
    /// No recognizable timestamp anywhere in the input.
    EmptyCorpus,
}

impl ParseOutcome {
    /// Returns `true` if nothing could be parsed.
    pub fn is_empty_corpus(&self) -> bool {
        matches!(self, ParseOutcome::EmptyCorpus)
    }

    pub fn parsed(&self) -> Option<&ParsedTranscript> {
        match self {
            ParseOutcome::Parsed(parsed) => Some(parsed),
            ParseOutcome::EmptyCorpus => None,
        }
    }

    pub fn into_parsed(self) -> Option<ParsedTranscript> {
        match self {
            ParseOutcome::Parsed(parsed) => Some(parsed),
            ParseOutcome::EmptyCorpus => None,
        }
    }

    /// Returns the corpus, empty for [`ParseOutcome::EmptyCorpus`].
    pub fn into_corpus(self) -> Corpus {
        self.into_parsed()
            .map(|parsed| parsed.corpus)
            .unwrap_or_default()
    }
}

/// Parser for WhatsApp-style text exports.
///
/// # Example
///
/// ```rust,no_run
/// use chatlens::parser::TranscriptParser;
///
/// let parser = TranscriptParser::new();
/// let outcome = parser.parse("WhatsApp Chat with Alice.txt".as_ref())?;
/// # Ok::<(), chatlens::ChatlensError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TranscriptParser {
    config: ParseConfig,
    segmenter: Segmenter,
    builder: RecordBuilder,
}

impl TranscriptParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self::with_config(ParseConfig::default())
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParseConfig) -> Self {
        let resolver = TimestampResolver::new().with_lenient_fallback(config.lenient_fallback);
        Self {
            config,
            segmenter: Segmenter::new(),
            builder: RecordBuilder::new(resolver),
        }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    /// Reads and parses a transcript file.
    pub fn parse(&self, path: &Path) -> Result<ParseOutcome> {
        let bytes = fs::read(path)?;
        self.parse_bytes(&bytes)
    }

    /// Decodes `bytes` as UTF-8 and parses them.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<ParseOutcome> {
        let content = std::str::from_utf8(bytes)?;
        Ok(self.parse_str(content))
    }

    /// Parses a transcript that is already in memory.
    pub fn parse_str(&self, raw: &str) -> ParseOutcome {
        let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

        let segments = self.segmenter.segment(raw);
        if segments.is_empty() {
            debug!(bytes = raw.len(), "no timestamps found");
            return ParseOutcome::EmptyCorpus;
        }

        let built = self.build_all(&segments);

        let mut messages = Vec::with_capacity(built.len());
        let mut issues = Vec::new();
        for (segment, record) in segments.iter().zip(built) {
            match record {
                Some(msg) => {
                    if msg.timestamp().is_none() {
                        issues.push(ParseIssue::UnresolvedTimestamp {
                            index: segment.index,
                            timestamp_text: segment.timestamp_text.clone(),
                        });
                    }
                    messages.push(msg);
                }
                None => issues.push(ParseIssue::MalformedSegment {
                    index: segment.index,
                }),
            }
        }

        let report = ParseReport {
            segments: segments.len(),
            issues,
        };
        debug!(
            segments = report.segments(),
            records = report.records(),
            unresolved = report.unresolved(),
            "transcript parsed"
        );

        ParseOutcome::Parsed(ParsedTranscript {
            corpus: Corpus::new(messages),
            report,
        })
    }

    /// Builds one record per segment; the output is index-aligned with `segments`.
    fn build_all(&self, segments: &[RawSegment<'_>]) -> Vec<Option<ChatMessage>> {
        #[cfg(feature = "parallel")]
        if self.config.parallel && segments.len() >= self.config.parallel_threshold {
            use rayon::prelude::*;

            debug!(segments = segments.len(), "building records in parallel");
            return segments
                .par_iter()
                .map(|segment| self.builder.build(segment))
                .collect();
        }

        segments
            .iter()
            .map(|segment| self.builder.build(segment))
            .collect()
    }
}

impl Default for TranscriptParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> ParsedTranscript {
        TranscriptParser::new()
            .parse_str(raw)
            .into_parsed()
            .expect("transcript should contain messages")
    }

    #[test]
    fn test_two_twelve_hour_messages() {
        let parsed = parse("1/1/23, 10:30 am - Alice: hi\n2/1/23, 11:00 am - Bob: hey");

        assert_eq!(parsed.corpus.len(), 2);
        assert_eq!(parsed.corpus[0].author(), "Alice");
        assert_eq!(parsed.corpus[0].text(), "hi\n");
        assert_eq!(parsed.corpus[1].author(), "Bob");
        assert_eq!(parsed.corpus[1].text(), "hey");

        let first = parsed.corpus[0].time().unwrap();
        assert_eq!((first.hour(), first.minute()), (10, 30));
        let second = parsed.corpus[1].time().unwrap();
        assert_eq!((second.month_num(), second.hour()), (1, 11));
        assert_eq!(second.day_of_month(), 2);
    }

    #[test]
    fn test_empty_corpus() {
        let parser = TranscriptParser::new();
        assert!(parser.parse_str("").is_empty_corpus());
        assert!(parser.parse_str("hello\nno timestamps here").is_empty_corpus());
        assert!(parser.parse_str("hello").into_corpus().is_empty());
    }

    #[test]
    fn test_unresolved_only_affects_its_record() {
        let parser = TranscriptParser::with_config(ParseConfig::new().with_lenient_fallback(false));
        let parsed = parser
            .parse_str("1/1/23, 10:30 am - Alice: hi\n[24/12/2022, 10:30:15] Bob: hey\n")
            .into_parsed()
            .unwrap();

        assert_eq!(parsed.corpus.len(), 2);
        assert!(parsed.corpus[0].timestamp().is_some());
        assert!(parsed.corpus[1].timestamp().is_none());
        assert_eq!(parsed.corpus[1].author(), "Bob");
        assert_eq!(
            parsed.report.issues(),
            &[ParseIssue::UnresolvedTimestamp {
                index: 1,
                timestamp_text: "24/12/2022, 10:30:15".to_string(),
            }]
        );
        assert_eq!(parsed.report.unresolved(), 1);
        assert_eq!(parsed.report.records(), 2);
    }

    #[test]
    fn test_byte_order_mark_ignored() {
        let parsed = parse("\u{feff}1/1/23, 10:30 - Alice: hi");
        assert_eq!(parsed.corpus.len(), 1);
        assert_eq!(parsed.corpus[0].author(), "Alice");
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        let err = TranscriptParser::new()
            .parse_bytes(&[b'1', b'/', 0xff, 0xfe])
            .unwrap_err();
        assert!(err.is_encoding());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = TranscriptParser::new()
            .parse(Path::new("/definitely/not/here.txt"))
            .unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn test_issue_display() {
        let issue = ParseIssue::UnresolvedTimestamp {
            index: 3,
            timestamp_text: "??".into(),
        };
        assert_eq!(issue.index(), 3);
        assert!(issue.to_string().contains("segment 3"));
        assert!(ParseIssue::MalformedSegment { index: 1 }.to_string().contains("dropped"));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_preserves_order() {
        let raw = (0..500)
            .map(|i| format!("1/1/23, {}:{:02} - User{}: message {}", i % 24, i % 60, i, i))
            .collect::<Vec<_>>()
            .join("\n");

        let sequential = TranscriptParser::new().parse_str(&raw);
        let parallel = TranscriptParser::with_config(
            ParseConfig::parallel().with_parallel_threshold(1),
        )
        .parse_str(&raw);

        assert_eq!(sequential, parallel);
        let corpus = parallel.into_corpus();
        for (i, msg) in corpus.iter().enumerate() {
            assert_eq!(msg.author(), format!("User{}", i));
        }
    }
}
