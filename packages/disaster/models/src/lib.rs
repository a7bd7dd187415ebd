#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Disaster category taxonomy, impact levels and sentiment labels.
//!
//! This crate defines the shared vocabulary used across the disaster-feed
//! system. The keyword catalog, the classifier and the mock generator all
//! speak in terms of these types.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A concrete kind of disaster that a post can be about.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum DisasterCategory {
    /// Tropical cyclones, storm surge
    Hurricane,
    /// Seismic events and aftershocks
    Earthquake,
    /// River, flash and coastal flooding
    Flood,
    /// Forest, brush and grass fires
    Wildfire,
    /// Tornadoes and severe convective storms
    Tornado,
    /// Seismic sea waves
    Tsunami,
    /// Emergencies not tied to a specific hazard
    General,
}

impl DisasterCategory {
    /// Returns all concrete categories in declaration order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Hurricane,
            Self::Earthquake,
            Self::Flood,
            Self::Wildfire,
            Self::Tornado,
            Self::Tsunami,
            Self::General,
        ]
    }

    /// Lowercase noun used when the category is spliced into running text
    /// (e.g. "relief efforts for the flood").
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Hurricane => "hurricane",
            Self::Earthquake => "earthquake",
            Self::Flood => "flood",
            Self::Wildfire => "wildfire",
            Self::Tornado => "tornado",
            Self::Tsunami => "tsunami",
            Self::General => "emergency",
        }
    }
}

/// Error returned when a string names neither a [`DisasterCategory`] nor
/// the `All` selector.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown disaster category '{value}'")]
pub struct ParseCategoryError {
    /// The unrecognized input.
    pub value: String,
}

/// Category selector accepted by the generator: either one concrete
/// category or `All`, which is resolved to a concrete category per record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CategorySelector {
    /// Pick a concrete category at random for every record.
    #[default]
    All,
    /// Always use this category.
    Category(DisasterCategory),
}

impl From<DisasterCategory> for CategorySelector {
    fn from(category: DisasterCategory) -> Self {
        Self::Category(category)
    }
}

impl FromStr for CategorySelector {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        DisasterCategory::from_str(trimmed)
            .map(Self::Category)
            .map_err(|_| ParseCategoryError {
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for CategorySelector {
    type Error = ParseCategoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CategorySelector> for String {
    fn from(selector: CategorySelector) -> Self {
        selector.to_string()
    }
}

impl std::fmt::Display for CategorySelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::Category(category) => write!(f, "{category}"),
        }
    }
}

/// Coarse severity assigned to a post by the impact classifier.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ImpactLevel {
    /// Loss of life, destruction, evacuations
    Severe,
    /// Damage, injuries, outages
    Moderate,
    /// Contained, limited, recovering
    Minor,
    /// No impact vocabulary found
    Unknown,
}

impl ImpactLevel {
    /// Returns every level in display order (most to least severe, then
    /// unknown).
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Severe, Self::Moderate, Self::Minor, Self::Unknown]
    }

    /// Returns the levels that carry keyword vocabularies.
    #[must_use]
    pub const fn graded() -> &'static [Self] {
        &[Self::Severe, Self::Moderate, Self::Minor]
    }
}

/// Polarity label produced by the sentiment classifier.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Sentiment {
    /// Net positive wording
    Positive,
    /// Net negative wording
    Negative,
    /// Balanced or no polar wording
    Neutral,
}

impl Sentiment {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Positive, Self::Negative, Self::Neutral]
    }
}
