#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Mock post types.
//!
//! A [`MockRecord`] is one synthesized social-media post. Records are
//! produced in a [`RecordBatch`] per generation request, live only in
//! memory, and are consumed as a table by exporters and chart builders.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use disaster_feed_disaster_models::{DisasterCategory, ImpactLevel, Sentiment};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error returned when a [`TimeWindow`] would end before it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("time window ends ({end}) before it starts ({start})")]
pub struct TimeWindowError {
    /// Requested start.
    pub start: DateTime<Utc>,
    /// Requested end.
    pub end: DateTime<Utc>,
}

/// Closed interval `[start, end]` that post timestamps are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    /// Creates a window from explicit bounds.
    ///
    /// # Errors
    ///
    /// Returns [`TimeWindowError`] if `end` is before `start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, TimeWindowError> {
        if end < start {
            return Err(TimeWindowError { start, end });
        }
        Ok(Self { start, end })
    }

    /// The `days` days leading up to `now`.
    #[must_use]
    pub fn last_days(now: DateTime<Utc>, days: u32) -> Self {
        Self {
            start: now - Duration::days(i64::from(days)),
            end: now,
        }
    }

    /// Window start.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Window end.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Length of the window.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whether `at` lies inside the window (inclusive on both ends).
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }
}

/// One synthesized post with its metadata and derived labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockRecord {
    /// Unique identifier.
    pub id: Uuid,
    /// Post text including trailing hashtags.
    pub text: String,
    /// Text with hashtag markers replaced by spaces; classifier input.
    pub clean_text: String,
    /// Post timestamp.
    pub created_at: DateTime<Utc>,
    /// Author handle.
    pub username: String,
    /// Author display name; a full name or the handle.
    pub display_name: String,
    /// Place name (e.g. "Miami, FL").
    pub location: String,
    /// Number of reposts.
    pub retweet_count: u64,
    /// Number of likes.
    pub like_count: u64,
    /// Number of replies.
    pub reply_count: u64,
    /// Hashtags appended to the text, without the `#`.
    pub hashtags: Vec<String>,
    /// Mentioned usernames.
    pub mentions: Vec<String>,
    /// Sentiment label of `clean_text`.
    pub sentiment: Sentiment,
    /// Compound sentiment score of `clean_text`.
    pub sentiment_score: f64,
    /// Impact level of `clean_text`.
    pub disaster_impact: ImpactLevel,
    /// Concrete category the post was generated for.
    pub disaster_type: DisasterCategory,
    /// Jittered latitude of `location`.
    pub lat: f64,
    /// Jittered longitude of `location`.
    pub lon: f64,
}

impl MockRecord {
    /// Column names, in table order.
    pub const COLUMNS: &'static [&'static str] = &[
        "id",
        "text",
        "clean_text",
        "created_at",
        "username",
        "display_name",
        "location",
        "retweet_count",
        "like_count",
        "reply_count",
        "hashtags",
        "mentions",
        "sentiment",
        "sentiment_score",
        "disaster_impact",
        "disaster_type",
        "lat",
        "lon",
    ];
}

/// Records produced by one generation request, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordBatch {
    records: Vec<MockRecord>,
}

impl RecordBatch {
    /// Creates an empty batch with room for `capacity` records.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    /// Appends a record.
    pub fn push(&mut self, record: MockRecord) {
        self.records.push(record);
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the batch holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over the records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, MockRecord> {
        self.records.iter()
    }
}

impl From<Vec<MockRecord>> for RecordBatch {
    fn from(records: Vec<MockRecord>) -> Self {
        Self { records }
    }
}

impl FromIterator<MockRecord> for RecordBatch {
    fn from_iter<I: IntoIterator<Item = MockRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RecordBatch {
    type Item = &'a MockRecord;
    type IntoIter = std::slice::Iter<'a, MockRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for RecordBatch {
    type Item = MockRecord;
    type IntoIter = std::vec::IntoIter<MockRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

/// A phrase and its (illustrative) occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseCount {
    /// The phrase.
    pub phrase: String,
    /// Occurrence count.
    pub count: u64,
}

/// An emerging topic and its (illustrative) score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicScore {
    /// Topic name.
    pub topic: String,
    /// Score in `[0, 10)`.
    pub score: f64,
}

/// Aggregate statistics over a [`RecordBatch`].
///
/// `hashtags` and `mentions` are exact counts over the batch. `terms`,
/// `phrases` and `emerging_topics` are random placeholder values over a
/// fixed vocabulary; they are not derived from the batch's text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    /// Hashtag → number of records carrying it.
    pub hashtags: BTreeMap<String, u64>,
    /// Username → number of times mentioned.
    pub mentions: BTreeMap<String, u64>,
    /// Illustrative term counts.
    pub terms: BTreeMap<String, u64>,
    /// Illustrative phrase counts.
    pub phrases: Vec<PhraseCount>,
    /// Illustrative emerging-topic scores.
    pub emerging_topics: Vec<TopicScore>,
}

impl TrendSummary {
    /// Hashtags sorted by count (descending), ties broken alphabetically.
    #[must_use]
    pub fn ranked_hashtags(&self) -> Vec<(&str, u64)> {
        let mut ranked: Vec<(&str, u64)> = self
            .hashtags
            .iter()
            .map(|(tag, count)| (tag.as_str(), *count))
            .collect();
        // BTreeMap iteration is already alphabetical and the sort is stable.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}
