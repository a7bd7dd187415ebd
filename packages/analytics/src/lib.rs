#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Chart series over a generated batch.
//!
//! Each public function produces the data for one dashboard chart:
//! sentiment and volume per hour, a word cloud, a scatter map and an
//! impact histogram. [`chart_data`] bundles them. None of these fail; an
//! empty batch yields empty series.

pub mod stopwords;

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, DurationRound as _, TimeDelta, Utc};
use disaster_feed_analytics_models::{
    ChartData, ImpactCount, LocationPoint, SentimentBucket, VolumePoint, WordCount,
};
use disaster_feed_disaster_models::{ImpactLevel, Sentiment};
use disaster_feed_mock_models::RecordBatch;

/// Word cloud size used when the caller has no preference.
pub const DEFAULT_MAX_WORDS: usize = 100;

const MIN_WORD_LEN: usize = 2;

fn floor_to_hour(at: DateTime<Utc>) -> DateTime<Utc> {
    at.duration_trunc(TimeDelta::hours(1)).unwrap_or(at)
}

/// Sentiment label counts per hour, ascending by hour.
#[must_use]
pub fn sentiment_over_time(batch: &RecordBatch) -> Vec<SentimentBucket> {
    let mut buckets: BTreeMap<DateTime<Utc>, SentimentBucket> = BTreeMap::new();

    for record in batch {
        let hour = floor_to_hour(record.created_at);
        let bucket = buckets.entry(hour).or_insert(SentimentBucket {
            hour,
            positive: 0,
            neutral: 0,
            negative: 0,
        });
        match record.sentiment {
            Sentiment::Positive => bucket.positive += 1,
            Sentiment::Neutral => bucket.neutral += 1,
            Sentiment::Negative => bucket.negative += 1,
        }
    }

    buckets.into_values().collect()
}

/// Record count per hour, ascending by hour.
#[must_use]
pub fn volume_over_time(batch: &RecordBatch) -> Vec<VolumePoint> {
    let mut counts: BTreeMap<DateTime<Utc>, u64> = BTreeMap::new();
    for record in batch {
        *counts.entry(floor_to_hour(record.created_at)).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(hour, count)| VolumePoint { hour, count })
        .collect()
}

/// Lowercase alphabetic tokens of `text` that are long enough and not
/// stopwords.
fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphabetic())
        .filter(|token| token.chars().count() >= MIN_WORD_LEN)
        .map(str::to_lowercase)
        .filter(|word| !stopwords::is_stopword(word))
}

/// The `max_words` most frequent words across post text, most frequent
/// first. Ties are broken alphabetically.
#[must_use]
pub fn word_frequencies(batch: &RecordBatch, max_words: usize) -> Vec<WordCount> {
    let mut counts: HashMap<String, u64> = HashMap::new();
    for record in batch {
        for word in words(&record.text) {
            *counts.entry(word).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<WordCount> = counts
        .into_iter()
        .map(|(word, count)| WordCount { word, count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    ranked.truncate(max_words);

    log::debug!("Word frequencies: kept {} words", ranked.len());

    ranked
}

/// Map points for every record with a location, in batch order.
#[must_use]
pub fn location_points(batch: &RecordBatch) -> Vec<LocationPoint> {
    batch
        .iter()
        .filter(|record| !record.location.trim().is_empty())
        .map(|record| LocationPoint {
            lat: record.lat,
            lon: record.lon,
            location: record.location.clone(),
            username: record.username.clone(),
            sentiment: record.sentiment,
            text: record.text.clone(),
            created_at: record.created_at,
        })
        .collect()
}

/// Record count per impact level, ordered severe to unknown. Levels
/// nobody hit are left out.
#[must_use]
pub fn impact_distribution(batch: &RecordBatch) -> Vec<ImpactCount> {
    ImpactLevel::all()
        .iter()
        .map(|impact| ImpactCount {
            impact: *impact,
            count: batch
                .iter()
                .filter(|record| record.disaster_impact == *impact)
                .count() as u64,
        })
        .filter(|entry| entry.count > 0)
        .collect()
}

/// Every chart series for `batch`.
#[must_use]
pub fn chart_data(batch: &RecordBatch, max_words: usize) -> ChartData {
    log::debug!("Building chart data for {} records", batch.len());

    ChartData {
        sentiment_over_time: sentiment_over_time(batch),
        volume_over_time: volume_over_time(batch),
        word_frequencies: word_frequencies(batch, max_words),
        locations: location_points(batch),
        impact_distribution: impact_distribution(batch),
    }
}
