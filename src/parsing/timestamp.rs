//! Resolving timestamp text into calendar instants.
//!
//! The same export shape can carry day-first or month-first dates, two- or
//! four-digit years and 12- or 24-hour clocks. [`TimestampResolver`] tries
//! the [`CANDIDATE_FORMATS`] in a fixed priority order and, failing those,
//! the more permissive [`parse_lenient`].
//!
//! Chrono's `%Y` happily reads `23` as the year 23 AD, so every descriptor
//! also states the year width it accepts ([`YearWidth`]).

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use tracing::trace;

/// Number of digits the year token must have for a format to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearWidth {
    /// Exactly four digits (`%Y`)
    Full,
    /// Exactly two digits (`%y`)
    Short,
    /// No check (year-first formats)
    Any,
}

impl YearWidth {
    /// Returns `true` if the year token of `text` has this width.
    ///
    /// The year is taken as the last component of the date part, i.e. the
    /// text before the first `,`, space or `T`.
    pub fn accepts(self, text: &str) -> bool {
        let width = match self {
            YearWidth::Full => 4,
            YearWidth::Short => 2,
            YearWidth::Any => return true,
        };

        year_token(text).is_some_and(|y| y.len() == width && y.bytes().all(|b| b.is_ascii_digit()))
    }
}

fn year_token(text: &str) -> Option<&str> {
    let date = text.split([',', ' ', 'T']).next()?;
    date.rsplit(['/', '.', '-']).next()
}

/// A named chrono format string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampFormat {
    /// Human-readable name, used in diagnostics.
    pub name: &'static str,
    /// Chrono `strftime`-style pattern.
    pub pattern: &'static str,
    /// Year width this format applies to.
    pub year: YearWidth,
}

impl TimestampFormat {
    const fn new(name: &'static str, pattern: &'static str, year: YearWidth) -> Self {
        Self {
            name,
            pattern,
            year,
        }
    }

    /// Parses the whole of `text`; trailing residue is a failure.
    pub fn parse(&self, text: &str) -> Option<NaiveDateTime> {
        if !self.year.accepts(text) {
            return None;
        }
        NaiveDateTime::parse_from_str(text, self.pattern).ok()
    }
}

/// Export formats, in the order they are tried.
pub const CANDIDATE_FORMATS: [TimestampFormat; 6] = [
    TimestampFormat::new("day-first 12-hour", "%d/%m/%Y, %I:%M %p", YearWidth::Full),
    TimestampFormat::new(
        "day-first 12-hour short year",
        "%d/%m/%y, %I:%M %p",
        YearWidth::Short,
    ),
    TimestampFormat::new("day-first 24-hour", "%d/%m/%Y, %H:%M", YearWidth::Full),
    TimestampFormat::new(
        "day-first 24-hour short year",
        "%d/%m/%y, %H:%M",
        YearWidth::Short,
    ),
    TimestampFormat::new("month-first 12-hour", "%m/%d/%Y, %I:%M %p", YearWidth::Full),
    TimestampFormat::new(
        "month-first 12-hour short year",
        "%m/%d/%y, %I:%M %p",
        YearWidth::Short,
    ),
];

/// Formats tried by [`parse_lenient`] after normalization.
///
/// Ambiguous slash dates are read month-first before day-first.
const LENIENT_FORMATS: [TimestampFormat; 24] = [
    // ISO-like
    TimestampFormat::new("iso", "%Y-%m-%dT%H:%M:%S%.f", YearWidth::Any),
    TimestampFormat::new("iso space", "%Y-%m-%d %H:%M:%S%.f", YearWidth::Any),
    TimestampFormat::new("iso minutes", "%Y-%m-%dT%H:%M", YearWidth::Any),
    TimestampFormat::new("iso space minutes", "%Y-%m-%d %H:%M", YearWidth::Any),
    TimestampFormat::new("iso slash", "%Y/%m/%d %H:%M:%S", YearWidth::Any),
    TimestampFormat::new("iso slash minutes", "%Y/%m/%d %H:%M", YearWidth::Any),
    // Slash dates with seconds (bracketed exports)
    TimestampFormat::new("month-first 12-hour seconds", "%m/%d/%Y, %I:%M:%S %p", YearWidth::Full),
    TimestampFormat::new("month-first 12-hour seconds short year", "%m/%d/%y, %I:%M:%S %p", YearWidth::Short),
    TimestampFormat::new("day-first 12-hour seconds", "%d/%m/%Y, %I:%M:%S %p", YearWidth::Full),
    TimestampFormat::new("day-first 12-hour seconds short year", "%d/%m/%y, %I:%M:%S %p", YearWidth::Short),
    TimestampFormat::new("month-first 24-hour seconds", "%m/%d/%Y, %H:%M:%S", YearWidth::Full),
    TimestampFormat::new("month-first 24-hour seconds short year", "%m/%d/%y, %H:%M:%S", YearWidth::Short),
    TimestampFormat::new("day-first 24-hour seconds", "%d/%m/%Y, %H:%M:%S", YearWidth::Full),
    TimestampFormat::new("day-first 24-hour seconds short year", "%d/%m/%y, %H:%M:%S", YearWidth::Short),
    // Slash dates without seconds not covered by the candidates
    TimestampFormat::new("month-first 24-hour", "%m/%d/%Y, %H:%M", YearWidth::Full),
    TimestampFormat::new("month-first 24-hour short year", "%m/%d/%y, %H:%M", YearWidth::Short),
    TimestampFormat::new("slash no comma", "%m/%d/%Y %H:%M", YearWidth::Full),
    TimestampFormat::new("slash no comma short year", "%m/%d/%y %H:%M", YearWidth::Short),
    // Dotted European dates
    TimestampFormat::new("dotted seconds", "%d.%m.%Y, %H:%M:%S", YearWidth::Full),
    TimestampFormat::new("dotted seconds short year", "%d.%m.%y, %H:%M:%S", YearWidth::Short),
    TimestampFormat::new("dotted", "%d.%m.%Y, %H:%M", YearWidth::Full),
    TimestampFormat::new("dotted short year", "%d.%m.%y, %H:%M", YearWidth::Short),
    TimestampFormat::new("dotted 12-hour", "%d.%m.%Y, %I:%M %p", YearWidth::Full),
    TimestampFormat::new("dotted 12-hour short year", "%d.%m.%y, %I:%M %p", YearWidth::Short),
];

// "10:30pm", "10:30 p.m.", "10:30 P.M" -> "10:30 pm"
static MERIDIEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d)\s*([ap])\.?\s*m\.?$").expect("meridiem pattern is a valid regex")
});

/// Parses date/time text in any of the common shapes a generic parser would
/// accept.
///
/// Handles RFC 3339 and RFC 2822 (the offset is dropped and the wall-clock
/// time kept), ISO-like dates, slash dates with seconds, dotted European
/// dates and bare `YYYY-MM-DD` (midnight).
///
/// ```
/// use chatlens::parsing::parse_lenient;
///
/// assert!(parse_lenient("2023-01-05 10:30:00").is_some());
/// assert!(parse_lenient("24/12/2022, 10:30:15").is_some());
/// assert!(parse_lenient("yesterday-ish").is_none());
/// ```
pub fn parse_lenient(text: &str) -> Option<NaiveDateTime> {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return None;
    }
    let normalized = MERIDIEM.replace(&collapsed, "${1} ${2}m");

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(&normalized) {
        return Some(dt.naive_local());
    }

    if let Some(ts) = LENIENT_FORMATS
        .iter()
        .find_map(|format| format.parse(&normalized))
    {
        return Some(ts);
    }

    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Which step of the resolution chain produced a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedBy {
    /// One of the [`CANDIDATE_FORMATS`], identified by name.
    Candidate(&'static str),
    /// [`parse_lenient`].
    Lenient,
}

/// Outcome of resolving one timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Resolved {
        at: NaiveDateTime,
        via: ResolvedBy,
    },
    Unresolved,
}

impl Resolution {
    /// Returns the resolved instant, if any.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Resolution::Resolved { at, .. } => Some(*at),
            Resolution::Unresolved => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved { .. })
    }
}

/// Runs the candidate formats, then optionally the lenient fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampResolver {
    lenient_fallback: bool,
}

impl TimestampResolver {
    /// Creates a resolver with the lenient fallback enabled.
    pub fn new() -> Self {
        Self {
            lenient_fallback: true,
        }
    }

    /// Enables or disables the lenient fallback.
    #[must_use]
    pub fn with_lenient_fallback(mut self, enabled: bool) -> Self {
        self.lenient_fallback = enabled;
        self
    }

    /// Resolves `text`.
    ///
    /// ```
    /// use chatlens::parsing::{Resolution, ResolvedBy, TimestampResolver};
    ///
    /// let resolver = TimestampResolver::new();
    /// let resolution = resolver.resolve("13/01/2023, 10:30 am");
    /// assert!(matches!(
    ///     resolution,
    ///     Resolution::Resolved { via: ResolvedBy::Candidate("day-first 12-hour"), .. }
    /// ));
    /// ```
    pub fn resolve(&self, text: &str) -> Resolution {
        for format in &CANDIDATE_FORMATS {
            if let Some(at) = format.parse(text) {
                trace!(text, format = format.name, "timestamp resolved");
                return Resolution::Resolved {
                    at,
                    via: ResolvedBy::Candidate(format.name),
                };
            }
        }

        if self.lenient_fallback {
            if let Some(at) = parse_lenient(text) {
                return Resolution::Resolved {
                    at,
                    via: ResolvedBy::Lenient,
                };
            }
        }

        Resolution::Unresolved
    }
}

impl Default for TimestampResolver {
    fn default() -> Self {
        Self::new()
    }
}
