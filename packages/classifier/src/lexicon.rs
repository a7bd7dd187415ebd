//! Word-list classifier.
//!
//! Sentiment is scored by counting positive and negative words and
//! squashing the difference into `[-1.0, 1.0]` with the same normalization
//! VADER uses for its compound score. Impact is the most severe level whose
//! vocabulary (from [`disaster_feed_keywords::impact_terms`]) appears in the
//! text as a whole word or phrase.

use disaster_feed_disaster_models::{ImpactLevel, Sentiment};
use disaster_feed_keywords::impact_terms;

use crate::{ClassifierError, ImpactClassifier, SentimentClassifier, SentimentScore};

/// Normalization constant for the compound score.
const ALPHA: f64 = 15.0;

/// Compound scores within this distance of zero are neutral.
const NEUTRAL_THRESHOLD: f64 = 0.05;

const POSITIVE_WORDS: &[&str] = &[
    "safe",
    "safety",
    "help",
    "helping",
    "relief",
    "recovery",
    "improving",
    "improve",
    "support",
    "volunteers",
    "thoughts",
    "progress",
    "restored",
    "clear",
    "stabilizing",
    "donations",
    "donation",
    "rescue",
    "survivors",
    "resources",
    "open",
    "cautious",
    "receding",
    "downgraded",
    "cancelled",
    "community",
    "staysafe",
];

const NEGATIVE_WORDS: &[&str] = &[
    "devastating",
    "damage",
    "destroyed",
    "danger",
    "dangerous",
    "warning",
    "flooding",
    "worsening",
    "extreme",
    "poor",
    "risk",
    "killed",
    "death",
    "outages",
    "closed",
    "closures",
    "breaching",
    "displaced",
    "threat",
    "severe",
    "rapidly",
    "affected",
    "complicating",
    "evacuations",
    "evacuation",
    "siren",
    "sirens",
    "emergency",
];

/// Keyword and lexicon based implementation of both classifier traits.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconClassifier;

impl LexiconClassifier {
    /// Creates a new lexicon classifier.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Lowercases `text` and collapses every run of non-alphanumeric characters
/// into a single space, padding both ends so whole-word lookups can be done
/// with `" {term} "`.
fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push(' ');
    for c in text.chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
        } else if !out.ends_with(' ') {
            out.push(' ');
        }
    }
    if !out.ends_with(' ') {
        out.push(' ');
    }
    out
}

fn contains_phrase(normalized: &str, phrase: &str) -> bool {
    normalized.contains(&format!(" {phrase} "))
}

#[allow(clippy::cast_precision_loss)]
fn compound(positive: usize, negative: usize) -> f64 {
    let raw = positive as f64 - negative as f64;
    raw / raw.mul_add(raw, ALPHA).sqrt()
}

impl SentimentClassifier for LexiconClassifier {
    fn classify_sentiment(&self, text: &str) -> Result<SentimentScore, ClassifierError> {
        let normalized = normalize(text);
        let mut positive = 0;
        let mut negative = 0;

        for word in normalized.split_whitespace() {
            if POSITIVE_WORDS.contains(&word) {
                positive += 1;
            } else if NEGATIVE_WORDS.contains(&word) {
                negative += 1;
            }
        }

        let score = compound(positive, negative);
        let label = if score >= NEUTRAL_THRESHOLD {
            Sentiment::Positive
        } else if score <= -NEUTRAL_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        };

        log::trace!("sentiment: +{positive} -{negative} => {label} ({score:.3})");

        Ok(SentimentScore { label, score })
    }
}

impl ImpactClassifier for LexiconClassifier {
    fn classify_impact(&self, text: &str) -> Result<ImpactLevel, ClassifierError> {
        let normalized = normalize(text);

        Ok(impact_terms()
            .iter()
            .find(|(_, terms)| terms.iter().any(|term| contains_phrase(&normalized, term)))
            .map_or(ImpactLevel::Unknown, |(level, _)| *level))
    }
}
