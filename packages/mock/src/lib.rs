#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Mock disaster post generation.
//!
//! [`MockGenerator`] fills category templates with sampled values, appends
//! hashtags, labels the text with a [`disaster_feed_classifier::Classifier`]
//! and assembles [`MockRecord`]s. [`summarize_trends`] aggregates a batch
//! for the dashboard, and [`export`] writes batches as CSV or JSON.

pub mod config;
pub mod export;
pub mod generator;
pub mod pools;
pub mod progress;
pub mod template;
pub mod trends;

use disaster_feed_classifier::ClassifierError;

pub use config::{ConfigError, GeneratorConfig};
pub use disaster_feed_mock_models::{MockRecord, RecordBatch, TimeWindow, TrendSummary};
pub use generator::MockGenerator;
pub use trends::summarize_trends;

/// Errors that can occur while generating records.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The sentiment or impact classifier failed.
    #[error("Classification failed: {0}")]
    Classifier(#[from] ClassifierError),
}
