//! The message record produced by the parsing pipeline.
//!
//! A [`ChatMessage`] is one transcript entry: a (possibly unresolved)
//! timestamp, an author, and the message text. Calendar fields used by every
//! downstream statistic ([`TimeFields`]) are derived once, when the message is
//! constructed, and can never drift from the timestamp afterwards: all fields
//! are private and only exposed through accessors.
//!
//! # Example
//!
//! ```
//! use chatlens::ChatMessage;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2023, 1, 2)
//!     .unwrap()
//!     .and_hms_opt(14, 5, 0)
//!     .unwrap();
//! let msg = ChatMessage::new(Some(ts), "Alice", "hello\n");
//!
//! let time = msg.time().unwrap();
//! assert_eq!(time.day_name(), "Monday");
//! assert_eq!(time.month_name(), "January");
//! assert_eq!(time.period_bucket(), "14-15");
//! ```

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;

/// Author assigned to entries that carry no `name: ` delimiter.
pub const NOTIFICATION_AUTHOR: &str = "group_notification";

/// Verbatim text WhatsApp substitutes for attachments in "without media" exports.
pub const MEDIA_PLACEHOLDER: &str = "<Media omitted>";

/// Phrases WhatsApp leaves behind when a message is deleted.
pub const DELETED_PHRASES: [&str; 2] = ["This message was deleted", "You deleted this message"];

/// Returns the hour-wide period label for `hour`.
///
/// Hour 23 wraps to `"23-00"` and hour 0 is written `"00-1"`; every other hour
/// `h` maps to `"{h}-{h+1}"`.
///
/// # Example
///
/// ```
/// use chatlens::message::period_bucket;
///
/// assert_eq!(period_bucket(23), "23-00");
/// assert_eq!(period_bucket(0), "00-1");
/// assert_eq!(period_bucket(14), "14-15");
/// ```
pub fn period_bucket(hour: u32) -> String {
    match hour {
        23 => "23-00".to_string(),
        0 => "00-1".to_string(),
        h => format!("{}-{}", h, h + 1),
    }
}

/// Calendar fields derived from a resolved timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeFields {
    year: i32,
    month_name: String,
    month_num: u32,
    day_name: String,
    day_of_month: u32,
    hour: u32,
    minute: u32,
    period_bucket: String,
}

impl TimeFields {
    /// Derives all fields from `ts`.
    ///
    /// Month and weekday names are always English, independent of locale.
    pub fn from_timestamp(ts: NaiveDateTime) -> Self {
        Self {
            year: ts.year(),
            month_name: ts.format("%B").to_string(),
            month_num: ts.month(),
            day_name: ts.format("%A").to_string(),
            day_of_month: ts.day(),
            hour: ts.hour(),
            minute: ts.minute(),
            period_bucket: period_bucket(ts.hour()),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Full English month name, e.g. `"March"`.
    pub fn month_name(&self) -> &str {
        &self.month_name
    }

    /// Month number, 1 through 12.
    pub fn month_num(&self) -> u32 {
        self.month_num
    }

    /// Full English weekday name, e.g. `"Tuesday"`.
    pub fn day_name(&self) -> &str {
        &self.day_name
    }

    pub fn day_of_month(&self) -> u32 {
        self.day_of_month
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// Hour-wide label, see [`period_bucket`].
    pub fn period_bucket(&self) -> &str {
        &self.period_bucket
    }
}

/// One entry of a parsed transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    timestamp: Option<NaiveDateTime>,
    author: String,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    time: Option<TimeFields>,
}

impl ChatMessage {
    /// Creates a message and derives its calendar fields.
    ///
    /// A `None` timestamp marks an unresolved entry: it keeps its author and
    /// text but has no [`TimeFields`].
    pub fn new(
        timestamp: Option<NaiveDateTime>,
        author: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            author: author.into(),
            text: text.into(),
            time: timestamp.map(TimeFields::from_timestamp),
        }
    }

    /// Creates a system notification (author [`NOTIFICATION_AUTHOR`]).
    pub fn notification(timestamp: Option<NaiveDateTime>, text: impl Into<String>) -> Self {
        Self::new(timestamp, NOTIFICATION_AUTHOR, text)
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    /// Returns the resolved timestamp, if any.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        self.timestamp
    }

    /// Returns the calendar date of the timestamp, if resolved.
    pub fn date(&self) -> Option<NaiveDate> {
        self.timestamp.map(|ts| ts.date())
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the derived calendar fields, if the timestamp was resolved.
    pub fn time(&self) -> Option<&TimeFields> {
        self.time.as_ref()
    }

    // =========================================================================
    // Markers
    // =========================================================================

    /// Returns `true` if the entry had no author delimiter.
    pub fn is_notification(&self) -> bool {
        self.author == NOTIFICATION_AUTHOR
    }

    /// Returns `true` if the text is exactly the media placeholder followed by
    /// a line break.
    pub fn is_media(&self) -> bool {
        let Some(line) = self.text.strip_suffix('\n') else {
            return false;
        };
        line.strip_suffix('\r').unwrap_or(line) == MEDIA_PLACEHOLDER
    }

    /// Returns `true` if the text contains a deleted-message notice
    /// (case-insensitive).
    pub fn is_deleted(&self) -> bool {
        let lower = self.text.to_lowercase();
        DELETED_PHRASES
            .iter()
            .any(|phrase| lower.contains(&phrase.to_lowercase()))
    }

    /// Returns `true` if the text is empty or whitespace-only.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
