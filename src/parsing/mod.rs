//! Building blocks of the transcript pipeline.
//!
//! - [`segment`] splits raw text into timestamped segments
//! - [`timestamp`] resolves timestamp text into calendar instants
//! - [`author`] splits a segment body into author and text
//! - [`record`] combines the above into [`ChatMessage`](crate::ChatMessage)s
//!
//! Most callers want [`TranscriptParser`](crate::parser::TranscriptParser)
//! instead of these pieces.

pub mod author;
pub mod record;
pub mod segment;
pub mod timestamp;

pub use author::split_author;
pub use record::RecordBuilder;
pub use segment::{RawSegment, Segmenter, TimestampPattern, normalize_timestamp};
pub use timestamp::{
    CANDIDATE_FORMATS, Resolution, ResolvedBy, TimestampFormat, TimestampResolver, YearWidth,
    parse_lenient,
};
