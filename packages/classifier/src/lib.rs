#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Sentiment and disaster-impact classification.
//!
//! The generator only depends on the [`SentimentClassifier`] and
//! [`ImpactClassifier`] traits, so a model-backed implementation can be
//! dropped in later. [`LexiconClassifier`] is the built-in implementation:
//! a word-list sentiment scorer plus an impact detector driven by the
//! keyword catalog.

pub mod lexicon;

use disaster_feed_disaster_models::{ImpactLevel, Sentiment};
use serde::{Deserialize, Serialize};

pub use lexicon::LexiconClassifier;

/// Errors that can occur while classifying text.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    /// The backing model or service could not be reached.
    #[error("Classifier unavailable: {message}")]
    Unavailable {
        /// Description of what went wrong.
        message: String,
    },
}

/// Sentiment label together with its compound score in `[-1.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    /// Polarity label.
    pub label: Sentiment,
    /// Compound score; negative values lean negative.
    pub score: f64,
}

/// Assigns a sentiment label and score to a piece of text.
pub trait SentimentClassifier {
    /// Classifies the sentiment of `text`.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError`] if the text cannot be classified.
    fn classify_sentiment(&self, text: &str) -> Result<SentimentScore, ClassifierError>;
}

/// Assigns a disaster impact level to a piece of text.
pub trait ImpactClassifier {
    /// Classifies the disaster impact described by `text`.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError`] if the text cannot be classified.
    fn classify_impact(&self, text: &str) -> Result<ImpactLevel, ClassifierError>;
}

/// Anything that can produce both sentiment and impact labels.
pub trait Classifier: SentimentClassifier + ImpactClassifier {}

impl<T: SentimentClassifier + ImpactClassifier> Classifier for T {}

impl<T: SentimentClassifier + ?Sized> SentimentClassifier for &T {
    fn classify_sentiment(&self, text: &str) -> Result<SentimentScore, ClassifierError> {
        (**self).classify_sentiment(text)
    }
}

impl<T: ImpactClassifier + ?Sized> ImpactClassifier for &T {
    fn classify_impact(&self, text: &str) -> Result<ImpactLevel, ClassifierError> {
        (**self).classify_impact(text)
    }
}
