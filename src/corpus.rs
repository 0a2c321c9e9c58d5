//! The parsed corpus and the groupings statistics are built from.
//!
//! A [`Corpus`] owns its messages and never hands out mutable access to them.
//! Consumers narrow it down with [`Corpus::view`] or [`Corpus::filter`],
//! which return a borrowed [`CorpusView`], rather than mutating shared state.
//!
//! Every grouping uses a `BTreeMap`, so iteration order is deterministic.
//! Time-keyed groupings skip messages whose timestamp could not be resolved.
//!
//! # Example
//!
//! ```
//! use chatlens::parser::TranscriptParser;
//!
//! let corpus = TranscriptParser::new()
//!     .parse_str(
//!         "1/1/23, 10:30 - Alice: hi\n\
//!          1/1/23, 10:31 - Alice added Bob\n\
//!          2/1/23, 23:15 - Bob: hey",
//!     )
//!     .into_corpus();
//!
//! let by_author = corpus.by_author(false);
//! assert_eq!(by_author["Alice"].len(), 1);
//! assert!(!by_author.contains_key("group_notification"));
//!
//! let people = corpus.view(|m| !m.is_notification());
//! assert_eq!(people.len(), 2);
//! ```

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::ops::Index;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::core::filter::CorpusFilter;
use crate::message::ChatMessage;

/// Key for monthly timelines: `(year, month_num, month_name)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MonthKey<'a> {
    pub year: i32,
    pub month_num: u32,
    pub month_name: &'a str,
}

/// Renders as `"January-2023"`.
impl fmt::Display for MonthKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.month_name, self.year)
    }
}

/// Key for activity heatmaps: `(day_name, period_bucket)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct HeatmapCell<'a> {
    pub day_name: &'a str,
    pub period_bucket: &'a str,
}

/// Ordered, immutable sequence of parsed messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Corpus {
    messages: Vec<ChatMessage>,
}

impl Corpus {
    /// Wraps `messages`, which must already be in transcript order.
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self { messages }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Iterates in transcript order.
    pub fn iter(&self) -> std::slice::Iter<'_, ChatMessage> {
        self.messages.iter()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<ChatMessage> {
        self.messages
    }

    /// A view over every message.
    pub fn all(&self) -> CorpusView<'_> {
        CorpusView {
            messages: self.messages.iter().collect(),
        }
    }

    /// A view over the messages matching `predicate`, in transcript order.
    pub fn view(&self, predicate: impl Fn(&ChatMessage) -> bool) -> CorpusView<'_> {
        self.all().refine(predicate)
    }

    /// A view over the messages accepted by `filter`.
    pub fn filter(&self, filter: &CorpusFilter) -> CorpusView<'_> {
        self.view(|msg| filter.matches(msg))
    }

    /// See [`CorpusView::by_author`].
    pub fn by_author(&self, include_notifications: bool) -> BTreeMap<&str, Vec<&ChatMessage>> {
        self.all().by_author(include_notifications)
    }

    /// See [`CorpusView::by_month`].
    pub fn by_month(&self) -> BTreeMap<MonthKey<'_>, Vec<&ChatMessage>> {
        self.all().by_month()
    }

    /// See [`CorpusView::by_date`].
    pub fn by_date(&self) -> BTreeMap<NaiveDate, Vec<&ChatMessage>> {
        self.all().by_date()
    }

    /// See [`CorpusView::by_day_and_period`].
    pub fn by_day_and_period(&self) -> BTreeMap<HeatmapCell<'_>, Vec<&ChatMessage>> {
        self.all().by_day_and_period()
    }

    /// See [`CorpusView::summary`].
    pub fn summary(&self) -> CorpusSummary {
        self.all().summary()
    }
}

impl Index<usize> for Corpus {
    type Output = ChatMessage;

    fn index(&self, index: usize) -> &ChatMessage {
        &self.messages[index]
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a ChatMessage;
    type IntoIter = std::slice::Iter<'a, ChatMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

/// Borrowed, ordered subset of a [`Corpus`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorpusView<'a> {
    messages: Vec<&'a ChatMessage>,
}

impl<'a> CorpusView<'a> {
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Iterates in transcript order.
    pub fn iter(&self) -> impl Iterator<Item = &'a ChatMessage> + '_ {
        self.messages.iter().copied()
    }

    pub fn messages(&self) -> &[&'a ChatMessage] {
        &self.messages
    }

    /// Narrows this view further.
    #[must_use]
    pub fn refine(&self, predicate: impl Fn(&ChatMessage) -> bool) -> CorpusView<'a> {
        CorpusView {
            messages: self
                .messages
                .iter()
                .copied()
                .filter(|msg| predicate(msg))
                .collect(),
        }
    }

    /// Distinct authors in order of first appearance.
    pub fn authors(&self, include_notifications: bool) -> Vec<&'a str> {
        let mut seen = HashSet::new();
        let mut ordered = Vec::new();
        for msg in self.iter() {
            if !include_notifications && msg.is_notification() {
                continue;
            }
            if seen.insert(msg.author()) {
                ordered.push(msg.author());
            }
        }
        ordered
    }

    /// Groups messages by author.
    pub fn by_author(&self, include_notifications: bool) -> BTreeMap<&'a str, Vec<&'a ChatMessage>> {
        let mut groups: BTreeMap<&'a str, Vec<&'a ChatMessage>> = BTreeMap::new();
        for msg in self.iter() {
            if !include_notifications && msg.is_notification() {
                continue;
            }
            groups.entry(msg.author()).or_default().push(msg);
        }
        groups
    }

    /// Groups resolved messages by month, in chronological order.
    pub fn by_month(&self) -> BTreeMap<MonthKey<'a>, Vec<&'a ChatMessage>> {
        let mut groups: BTreeMap<MonthKey<'a>, Vec<&'a ChatMessage>> = BTreeMap::new();
        for msg in self.iter() {
            let Some(time) = msg.time() else { continue };
            let key = MonthKey {
                year: time.year(),
                month_num: time.month_num(),
                month_name: time.month_name(),
            };
            groups.entry(key).or_default().push(msg);
        }
        groups
    }

    /// Groups resolved messages by calendar date.
    pub fn by_date(&self) -> BTreeMap<NaiveDate, Vec<&'a ChatMessage>> {
        let mut groups: BTreeMap<NaiveDate, Vec<&'a ChatMessage>> = BTreeMap::new();
        for msg in self.iter() {
            if let Some(date) = msg.date() {
                groups.entry(date).or_default().push(msg);
            }
        }
        groups
    }

    /// Groups resolved messages by weekday name and period bucket.
    pub fn by_day_and_period(&self) -> BTreeMap<HeatmapCell<'a>, Vec<&'a ChatMessage>> {
        let mut groups: BTreeMap<HeatmapCell<'a>, Vec<&'a ChatMessage>> = BTreeMap::new();
        for msg in self.iter() {
            let Some(time) = msg.time() else { continue };
            let cell = HeatmapCell {
                day_name: time.day_name(),
                period_bucket: time.period_bucket(),
            };
            groups.entry(cell).or_default().push(msg);
        }
        groups
    }

    /// Counts the markers across this view.
    pub fn summary(&self) -> CorpusSummary {
        let mut summary = CorpusSummary {
            authors: self.authors(false).len(),
            ..CorpusSummary::default()
        };

        for msg in self.iter() {
            summary.messages += 1;
            if msg.is_notification() {
                summary.notifications += 1;
            }
            if msg.is_media() {
                summary.media += 1;
            }
            if msg.is_deleted() {
                summary.deleted += 1;
            }
            if msg.is_empty() {
                summary.empty += 1;
            }
            match msg.timestamp() {
                Some(ts) => {
                    summary.first = Some(summary.first.map_or(ts, |first| first.min(ts)));
                    summary.last = Some(summary.last.map_or(ts, |last| last.max(ts)));
                }
                None => summary.unresolved += 1,
            }
        }

        summary
    }
}

impl<'a, 'v> IntoIterator for &'v CorpusView<'a> {
    type Item = &'a ChatMessage;
    type IntoIter = std::iter::Copied<std::slice::Iter<'v, &'a ChatMessage>>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter().copied()
    }
}

/// Marker counts over a corpus or view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CorpusSummary {
    pub messages: usize,
    pub notifications: usize,
    pub media: usize,
    pub deleted: usize,
    pub empty: usize,
    pub unresolved: usize,
    /// Distinct non-notification authors
    pub authors: usize,
    pub first: Option<NaiveDateTime>,
    pub last: Option<NaiveDateTime>,
}
