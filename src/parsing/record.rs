//! Turning segments into messages.

use tracing::{debug, warn};

use crate::message::{ChatMessage, NOTIFICATION_AUTHOR};
use crate::parsing::author::split_author;
use crate::parsing::segment::RawSegment;
use crate::parsing::timestamp::{Resolution, ResolvedBy, TimestampResolver};

/// Builds one [`ChatMessage`] per segment.
///
/// Building is side-effect free apart from log events, so a single builder
/// can be shared across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordBuilder {
    resolver: TimestampResolver,
}

impl RecordBuilder {
    pub fn new(resolver: TimestampResolver) -> Self {
        Self { resolver }
    }

    /// Builds the message for `segment`.
    ///
    /// Returns `None` when the segment's timestamp text is empty; such a
    /// segment is dropped. An unresolvable timestamp still yields a message,
    /// without a timestamp.
    pub fn build(&self, segment: &RawSegment<'_>) -> Option<ChatMessage> {
        if segment.timestamp_text.is_empty() {
            warn!(index = segment.index, "dropping segment with empty timestamp");
            return None;
        }

        let resolution = self.resolver.resolve(&segment.timestamp_text);
        match resolution {
            Resolution::Resolved {
                via: ResolvedBy::Lenient,
                ..
            } => {
                debug!(
                    index = segment.index,
                    timestamp = %segment.timestamp_text,
                    "timestamp resolved by lenient fallback"
                );
            }
            Resolution::Unresolved => {
                warn!(
                    index = segment.index,
                    timestamp = %segment.timestamp_text,
                    "unresolved timestamp, message kept without time fields"
                );
            }
            Resolution::Resolved { .. } => {}
        }

        let (author, text) = split_author(segment.body);
        Some(ChatMessage::new(
            resolution.timestamp(),
            author.unwrap_or(NOTIFICATION_AUTHOR),
            text,
        ))
    }
}
