#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Chart-ready series types.
//!
//! Each type is the tabular input of one dashboard chart. Rendering is
//! left to the consumer; an empty series means "no data" and should be
//! shown as a placeholder.

use chrono::{DateTime, Utc};
use disaster_feed_disaster_models::{ImpactLevel, Sentiment};
use serde::{Deserialize, Serialize};

/// Sentiment label counts for one hour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentBucket {
    /// Start of the hour.
    pub hour: DateTime<Utc>,
    /// Positive posts in this hour.
    pub positive: u64,
    /// Neutral posts in this hour.
    pub neutral: u64,
    /// Negative posts in this hour.
    pub negative: u64,
}

impl SentimentBucket {
    /// Total posts in this hour.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.positive + self.neutral + self.negative
    }
}

/// Post count for one hour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumePoint {
    /// Start of the hour.
    pub hour: DateTime<Utc>,
    /// Posts in this hour.
    pub count: u64,
}

/// Occurrences of one word across post text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    /// Lowercased word.
    pub word: String,
    /// Occurrences.
    pub count: u64,
}

/// One post plotted on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationPoint {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lon: f64,
    /// Place name.
    pub location: String,
    /// Author handle, used as the hover title.
    pub username: String,
    /// Marker color key.
    pub sentiment: Sentiment,
    /// Hover text.
    pub text: String,
    /// Hover timestamp.
    pub created_at: DateTime<Utc>,
}

/// Post count for one impact level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactCount {
    /// Impact level.
    pub impact: ImpactLevel,
    /// Posts at this level.
    pub count: u64,
}

/// Every chart series for one batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    /// Stacked sentiment area chart.
    pub sentiment_over_time: Vec<SentimentBucket>,
    /// Volume line chart.
    pub volume_over_time: Vec<VolumePoint>,
    /// Word cloud.
    pub word_frequencies: Vec<WordCount>,
    /// Scatter map.
    pub locations: Vec<LocationPoint>,
    /// Impact bar chart.
    pub impact_distribution: Vec<ImpactCount>,
}
