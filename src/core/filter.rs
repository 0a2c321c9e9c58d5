//! Filter messages by author, date range and marker.
//!
//! [`CorpusFilter`] is applied through [`Corpus::filter`](crate::Corpus::filter),
//! which yields a borrowed view instead of a new corpus.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Author | [`with_author`](CorpusFilter::with_author) | Messages from one author |
//! | Date from | [`with_date_from`](CorpusFilter::with_date_from) | Messages on or after date |
//! | Date to | [`with_date_to`](CorpusFilter::with_date_to) | Messages on or before date |
//! | Notifications | [`exclude_notifications`](CorpusFilter::exclude_notifications) | Drop system events |
//! | Media | [`exclude_media`](CorpusFilter::exclude_media) | Drop `<Media omitted>` placeholders |
//! | Deleted | [`exclude_deleted`](CorpusFilter::exclude_deleted) | Drop deletion notices |
//!
//! # Example
//!
//! ```
//! use chatlens::core::filter::CorpusFilter;
//! use chatlens::parser::TranscriptParser;
//!
//! # fn main() -> chatlens::Result<()> {
//! let corpus = TranscriptParser::new()
//!     .parse_str(
//!         "31/12/22, 23:50 - Alice: last one\n\
//!          1/1/23, 00:05 - Bob: happy new year\n\
//!          1/1/23, 00:06 - alice: <Media omitted>\n",
//!     )
//!     .into_corpus();
//!
//! let filter = CorpusFilter::new()
//!     .with_author("ALICE")
//!     .with_date_from("2023-01-01")?
//!     .exclude_media(true);
//!
//! assert_eq!(corpus.filter(&filter).len(), 0);
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Messages with unresolved timestamps are **excluded** when date filters are active
//! - Author matching is case-insensitive for ASCII characters
//! - Multiple filters are combined with AND logic

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ChatlensError;
use crate::message::ChatMessage;

/// Criteria a message must meet to appear in a filtered view.
///
/// Filters are combined with AND logic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusFilter {
    /// Include only messages from this author (case-insensitive).
    pub author: Option<String>,

    /// Include only messages on or after this date.
    pub date_from: Option<NaiveDate>,

    /// Include only messages on or before this date.
    pub date_to: Option<NaiveDate>,

    pub exclude_notifications: bool,
    pub exclude_media: bool,
    pub exclude_deleted: bool,
}

impl CorpusFilter {
    /// Creates a filter that accepts every message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps only messages from `author`.
    ///
    /// Matching is case-insensitive for ASCII characters.
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Sets the start date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self, ChatlensError> {
        self.date_from = Some(parse_date(date_str)?);
        Ok(self)
    }

    /// Sets the end date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self, ChatlensError> {
        self.date_to = Some(parse_date(date_str)?);
        Ok(self)
    }

    #[must_use]
    pub fn exclude_notifications(mut self, exclude: bool) -> Self {
        self.exclude_notifications = exclude;
        self
    }

    #[must_use]
    pub fn exclude_media(mut self, exclude: bool) -> Self {
        self.exclude_media = exclude;
        self
    }

    #[must_use]
    pub fn exclude_deleted(mut self, exclude: bool) -> Self {
        self.exclude_deleted = exclude;
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.author.is_some()
            || self.has_date_filter()
            || self.exclude_notifications
            || self.exclude_media
            || self.exclude_deleted
    }

    /// Returns `true` if date filters are active.
    pub fn has_date_filter(&self) -> bool {
        self.date_from.is_some() || self.date_to.is_some()
    }

    /// Returns `true` if `msg` passes every active filter.
    pub fn matches(&self, msg: &ChatMessage) -> bool {
        if let Some(ref author) = self.author {
            if !msg.author().eq_ignore_ascii_case(author) {
                return false;
            }
        }

        if self.exclude_notifications && msg.is_notification() {
            return false;
        }
        if self.exclude_media && msg.is_media() {
            return false;
        }
        if self.exclude_deleted && msg.is_deleted() {
            return false;
        }

        if self.has_date_filter() {
            let Some(date) = msg.date() else {
                // No resolved timestamp - exclude from date-filtered results
                return false;
            };
            if self.date_from.is_some_and(|from| date < from) {
                return false;
            }
            if self.date_to.is_some_and(|to| date > to) {
                return false;
            }
        }

        true
    }
}

fn parse_date(date_str: &str) -> Result<NaiveDate, ChatlensError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| ChatlensError::invalid_date(date_str))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn make_msg(author: &str, text: &str, date: Option<&str>) -> ChatMessage {
        let ts = date.map(|d| {
            NaiveDate::parse_from_str(d, "%Y-%m-%d")
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap()
        });
        ChatMessage::new(ts, author, text)
    }

    fn apply<'a>(messages: &'a [ChatMessage], filter: &CorpusFilter) -> Vec<&'a ChatMessage> {
        messages.iter().filter(|m| filter.matches(m)).collect()
    }

    #[test]
    fn test_filter_by_author() {
        let messages = vec![
            make_msg("Alice", "Hello", None),
            make_msg("Bob", "Hi", None),
            make_msg("alice", "Bye", None),
        ];

        let filter = CorpusFilter::new().with_author("Alice");
        let filtered = apply(&messages, &filter);

        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|m| m.author().eq_ignore_ascii_case("Alice")));
    }

    #[test]
    fn test_filter_by_date_range_inclusive() {
        let messages = vec![
            make_msg("Alice", "Old", Some("2024-01-01")),
            make_msg("Alice", "Start", Some("2024-06-01")),
            make_msg("Alice", "End", Some("2024-06-30")),
            make_msg("Alice", "New", Some("2024-12-01")),
        ];

        let filter = CorpusFilter::new()
            .with_date_from("2024-06-01")
            .unwrap()
            .with_date_to("2024-06-30")
            .unwrap();
        let filtered = apply(&messages, &filter);

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].text(), "Start");
        assert_eq!(filtered[1].text(), "End");
    }

    #[test]
    fn test_date_to_includes_whole_day() {
        let late = NaiveDateTime::parse_from_str("2024-06-30 23:59", "%Y-%m-%d %H:%M").unwrap();
        let msg = ChatMessage::new(Some(late), "Alice", "night");

        let filter = CorpusFilter::new().with_date_to("2024-06-30").unwrap();
        assert!(filter.matches(&msg));
    }

    #[test]
    fn test_unresolved_excluded_by_date_filter() {
        let msg = make_msg("Alice", "when?", None);
        assert!(CorpusFilter::new().matches(&msg));

        let filter = CorpusFilter::new().with_date_from("2020-01-01").unwrap();
        assert!(!filter.matches(&msg));
    }

    #[test]
    fn test_marker_exclusions() {
        let messages = vec![
            ChatMessage::notification(None, "Alice left"),
            make_msg("Bob", "<Media omitted>\n", None),
            make_msg("Bob", "This message was deleted", None),
            make_msg("Bob", "plain", None),
        ];

        let filter = CorpusFilter::new()
            .exclude_notifications(true)
            .exclude_media(true)
            .exclude_deleted(true);
        let filtered = apply(&messages, &filter);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].text(), "plain");
    }

    #[test]
    fn test_invalid_date() {
        let err = CorpusFilter::new().with_date_from("01/06/2024").unwrap_err();
        assert!(err.is_invalid_date());
        assert!(CorpusFilter::new().with_date_to("2024-13-01").is_err());
    }

    #[test]
    fn test_is_active() {
        assert!(!CorpusFilter::new().is_active());
        assert!(CorpusFilter::new().with_author("x").is_active());
        assert!(CorpusFilter::new().exclude_media(true).is_active());
        assert!(
            CorpusFilter::new()
                .with_date_to("2024-01-01")
                .unwrap()
                .has_date_filter()
        );
    }
}
