//! Trend summaries over a generated batch.
//!
//! Hashtag and mention counts are exact. Term, phrase and emerging-topic
//! values are random placeholders over fixed vocabularies so the dashboard
//! has something to show; they say nothing about the batch's text.

use std::collections::BTreeMap;

use disaster_feed_mock_models::{PhraseCount, RecordBatch, TopicScore, TrendSummary};
use rand::Rng;

pub const COMMON_TERMS: &[&str] = &[
    "emergency",
    "disaster",
    "relief",
    "help",
    "evacuation",
    "damage",
    "warning",
    "alert",
    "safety",
    "shelter",
    "recovery",
    "response",
    "crisis",
    "impact",
    "flood",
    "fire",
    "storm",
    "earthquake",
    "tornado",
];

pub const COMMON_PHRASES: &[&str] = &[
    "stay safe",
    "emergency response",
    "evacuation order",
    "rescue teams",
    "disaster relief",
    "immediate evacuation",
    "take shelter",
    "flash flood",
    "weather update",
    "road closed",
];

pub const EMERGING_TOPICS: &[&str] = &[
    "power outage",
    "shelter locations",
    "road closures",
    "volunteer coordination",
    "donation centers",
    "emergency contacts",
    "medical assistance",
    "pet rescue",
];

/// Exact occurrence counts of `items`.
fn frequencies<'a>(items: impl Iterator<Item = &'a String>) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    for item in items {
        *counts.entry(item.clone()).or_insert(0) += 1;
    }
    counts
}

/// Summarizes `batch`.
#[must_use]
pub fn summarize_trends<R: Rng + ?Sized>(batch: &RecordBatch, rng: &mut R) -> TrendSummary {
    let n = batch.len() as u64;
    let term_max = (n / 3).max(1);
    let phrase_max = (n / 5).max(1);

    let hashtags = frequencies(batch.iter().flat_map(|r| r.hashtags.iter()));
    let mentions = frequencies(batch.iter().flat_map(|r| r.mentions.iter()));

    let terms = COMMON_TERMS
        .iter()
        .map(|term| ((*term).to_string(), rng.gen_range(1..=term_max)))
        .collect();

    let phrases = COMMON_PHRASES
        .iter()
        .map(|phrase| PhraseCount {
            phrase: (*phrase).to_string(),
            count: rng.gen_range(1..=phrase_max),
        })
        .collect();

    let emerging_topics = EMERGING_TOPICS
        .iter()
        .map(|topic| TopicScore {
            topic: (*topic).to_string(),
            score: rng.r#gen::<f64>() * 10.0,
        })
        .collect();

    log::debug!(
        "Summarized {n} records: {} hashtags, {} mentions",
        hashtags.len(),
        mentions.len()
    );

    TrendSummary {
        hashtags,
        mentions,
        terms,
        phrases,
        emerging_topics,
    }
}
