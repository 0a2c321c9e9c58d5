//! Splitting a raw transcript into timestamped segments.
//!
//! WhatsApp exports put a timestamp at the start of every entry, but the
//! timestamp shape depends on the exporting device and locale:
//!
//! - Android 12-hour: `24/12/2022, 10:30 am - Sender: Message`
//! - Android 24-hour: `24/12/2022, 10:30 - Sender: Message`
//! - iOS bracketed:   `[24/12/2022, 10:30:15] Sender: Message`
//!
//! Everything between one timestamp and the next belongs to the earlier
//! entry, which is how multi-line messages survive.

use regex::Regex;

/// Timestamp shapes recognized at the start of a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimestampPattern {
    /// `D/M/Y, H:MM am - ` (meridiem may be glued or separated by a narrow no-break space)
    TwelveHour,
    /// `D/M/Y, H:MM - `
    TwentyFourHour,
    /// `[D/M/Y, H:MM:SS] ` with an optional meridiem inside the brackets
    Bracketed,
}

impl TimestampPattern {
    /// Returns the regex fragment matching this shape, separator included.
    pub fn pattern(self) -> &'static str {
        match self {
            TimestampPattern::TwelveHour => {
                r"\d{1,2}/\d{1,2}/\d{2,4},\s\d{1,2}:\d{2}\s?(?i:am|pm)\s-\s"
            }
            TimestampPattern::TwentyFourHour => r"\d{1,2}/\d{1,2}/\d{2,4},\s\d{1,2}:\d{2}\s-\s",
            TimestampPattern::Bracketed => {
                r"\[\d{1,2}/\d{1,2}/\d{2,4},\s\d{1,2}:\d{2}:\d{2}(?:\s?(?i:am|pm))?\]\s"
            }
        }
    }

    fn group_name(self) -> &'static str {
        match self {
            TimestampPattern::TwelveHour => "twelve",
            TimestampPattern::TwentyFourHour => "twentyfour",
            TimestampPattern::Bracketed => "bracketed",
        }
    }

    /// Returns all shapes in matching priority order.
    pub fn all() -> &'static [TimestampPattern] {
        &[
            TimestampPattern::TwelveHour,
            TimestampPattern::TwentyFourHour,
            TimestampPattern::Bracketed,
        ]
    }
}

/// One transcript entry before interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSegment<'a> {
    /// Position of this segment in the transcript, starting at 0.
    pub index: usize,
    /// Which timestamp shape matched.
    pub pattern: TimestampPattern,
    /// Matched timestamp after [`normalize_timestamp`].
    pub timestamp_text: String,
    /// Text between this timestamp and the next one.
    pub body: &'a str,
}

/// Splits transcripts at timestamp matches.
///
/// # Example
///
/// ```
/// use chatlens::parsing::Segmenter;
///
/// let segmenter = Segmenter::new();
/// let segments = segmenter.segment("1/1/23, 10:30 am - Alice: hi\n2/1/23, 11:00 am - Bob: hey");
///
/// assert_eq!(segments.len(), 2);
/// assert_eq!(segments[0].timestamp_text, "1/1/23, 10:30 am");
/// assert_eq!(segments[0].body, "Alice: hi\n");
/// assert_eq!(segments[1].body, "Bob: hey");
/// ```
#[derive(Debug, Clone)]
pub struct Segmenter {
    regex: Regex,
}

impl Segmenter {
    /// Compiles the combined timestamp pattern.
    pub fn new() -> Self {
        let alternatives: Vec<String> = TimestampPattern::all()
            .iter()
            .map(|p| format!("(?P<{}>{})", p.group_name(), p.pattern()))
            .collect();
        // Anchored at line start; tolerate a BOM or left-to-right mark before the timestamp.
        let combined = format!(r"(?m)^[\x{{FEFF}}\x{{200E}}]?(?:{})", alternatives.join("|"));

        Self {
            regex: Regex::new(&combined).expect("timestamp patterns are valid regexes"),
        }
    }

    /// Splits `raw` into segments, in transcript order.
    ///
    /// Text before the first timestamp is discarded. A transcript without any
    /// timestamp yields an empty vector.
    ///
    /// Only timestamps at the start of a line begin a segment; a timestamp
    /// quoted mid-line stays part of the surrounding message body.
    pub fn segment<'a>(&self, raw: &'a str) -> Vec<RawSegment<'a>> {
        let matches: Vec<(TimestampPattern, regex::Match<'a>)> = self
            .regex
            .captures_iter(raw)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let pattern = TimestampPattern::all()
                    .iter()
                    .copied()
                    .find(|p| caps.name(p.group_name()).is_some())?;
                Some((pattern, whole))
            })
            .collect();

        matches
            .iter()
            .enumerate()
            .map(|(index, (pattern, m))| {
                let end = matches
                    .get(index + 1)
                    .map_or(raw.len(), |(_, next)| next.start());

                RawSegment {
                    index,
                    pattern: *pattern,
                    timestamp_text: normalize_timestamp(m.as_str()),
                    body: &raw[m.end()..end],
                }
            })
            .collect()
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Cleans up a matched timestamp.
///
/// Narrow no-break spaces (U+202F, used by newer exports between the time and
/// the meridiem) become ordinary spaces; surrounding brackets, dashes,
/// whitespace and directional marks are stripped.
///
/// ```
/// use chatlens::parsing::normalize_timestamp;
///
/// assert_eq!(normalize_timestamp("1/1/23, 10:30\u{202f}pm - "), "1/1/23, 10:30 pm");
/// assert_eq!(normalize_timestamp("[24/12/2022, 10:30:15] "), "24/12/2022, 10:30:15");
/// ```
pub fn normalize_timestamp(matched: &str) -> String {
    matched
        .replace('\u{202f}', " ")
        .trim_matches(|c: char| {
            matches!(c, '[' | ']' | '-' | '\u{feff}' | '\u{200e}') || c.is_whitespace()
        })
        .to_string()
}
