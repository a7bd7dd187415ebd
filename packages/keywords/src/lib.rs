#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Static keyword catalog for disaster search queries and impact detection.
//!
//! Search terms are kept short per category so that a combined query stays
//! under the length limits of social-media search APIs. Impact terms feed
//! the keyword impact classifier.

use std::str::FromStr;

use disaster_feed_disaster_models::{CategorySelector, DisasterCategory, ImpactLevel};

/// Number of [`DisasterCategory::General`] terms appended to a
/// category-specific query.
pub const GENERAL_TERMS_PER_QUERY: usize = 3;

/// Number of terms taken from each non-general category when building the
/// `All` query.
pub const TERMS_PER_CATEGORY_FOR_ALL: usize = 2;

const HURRICANE: &[&str] = &[
    "hurricane",
    "tropical storm",
    "cyclone",
    "typhoon",
    "storm surge",
];
const EARTHQUAKE: &[&str] = &["earthquake", "quake", "tremor", "seismic", "aftershock"];
const FLOOD: &[&str] = &[
    "flood",
    "flooding",
    "flash flood",
    "flood warning",
    "rising water",
];
const WILDFIRE: &[&str] = &[
    "wildfire",
    "forest fire",
    "brush fire",
    "fire spread",
    "fire evacuation",
];
const TORNADO: &[&str] = &[
    "tornado",
    "twister",
    "tornado warning",
    "funnel cloud",
    "severe storm",
];
const TSUNAMI: &[&str] = &[
    "tsunami",
    "tidal wave",
    "tsunami warning",
    "coastal evacuation",
    "wave height",
];
const GENERAL: &[&str] = &["disaster", "emergency", "evacuation", "rescue", "crisis"];

const SEVERE: &[&str] = &[
    "catastrophic",
    "devastating",
    "fatal",
    "death",
    "killed",
    "casualties",
    "destroyed",
    "emergency",
    "evacuate",
    "evacuation",
    "crisis",
    "danger",
    "severe",
    "tragedy",
    "disaster",
    "critical",
    "massive damage",
    "deadly",
    "fatalities",
];
const MODERATE: &[&str] = &[
    "damage",
    "injured",
    "wounded",
    "affected",
    "impact",
    "hit",
    "threat",
    "loss",
    "moderate",
    "concern",
    "worried",
    "warning",
    "displacement",
    "disruption",
    "power outage",
    "destruction",
    "property damage",
];
const MINOR: &[&str] = &[
    "minor",
    "small",
    "limited",
    "contained",
    "controlled",
    "restored",
    "recovery",
    "stable",
    "manageable",
    "relief",
    "minimal",
    "slight",
    "improving",
    "under control",
    "returning to normal",
];

const IMPACT_TERMS: &[(ImpactLevel, &[&str])] = &[
    (ImpactLevel::Severe, SEVERE),
    (ImpactLevel::Moderate, MODERATE),
    (ImpactLevel::Minor, MINOR),
];

/// Returns the dedicated search terms for a single category.
#[must_use]
pub const fn category_keywords(category: DisasterCategory) -> &'static [&'static str] {
    match category {
        DisasterCategory::Hurricane => HURRICANE,
        DisasterCategory::Earthquake => EARTHQUAKE,
        DisasterCategory::Flood => FLOOD,
        DisasterCategory::Wildfire => WILDFIRE,
        DisasterCategory::Tornado => TORNADO,
        DisasterCategory::Tsunami => TSUNAMI,
        DisasterCategory::General => GENERAL,
    }
}

/// Builds the search-term list for a selector.
///
/// * A concrete category yields its own terms followed by the first
///   [`GENERAL_TERMS_PER_QUERY`] general terms. For
///   [`DisasterCategory::General`] this repeats its leading terms.
/// * `All` yields the first [`TERMS_PER_CATEGORY_FOR_ALL`] terms of every
///   non-general category, in declaration order.
#[must_use]
pub fn keywords_for_selector(selector: CategorySelector) -> Vec<&'static str> {
    match selector {
        CategorySelector::All => DisasterCategory::all()
            .iter()
            .filter(|category| **category != DisasterCategory::General)
            .flat_map(|category| {
                category_keywords(*category)
                    .iter()
                    .take(TERMS_PER_CATEGORY_FOR_ALL)
                    .copied()
            })
            .collect(),
        CategorySelector::Category(category) => category_keywords(category)
            .iter()
            .chain(GENERAL.iter().take(GENERAL_TERMS_PER_QUERY))
            .copied()
            .collect(),
    }
}

/// Looks up search terms by category name.
///
/// Accepts any [`DisasterCategory`] name (case-insensitive) or `All`.
/// Names that are not recognized fall back to the general terms.
#[must_use]
pub fn keywords_for(category: &str) -> Vec<&'static str> {
    if let Ok(selector) = CategorySelector::from_str(category) {
        return keywords_for_selector(selector);
    }

    log::debug!("Unrecognized disaster category '{category}', using general keywords");
    GENERAL.to_vec()
}

/// Returns the concrete disaster categories in catalog order.
#[must_use]
pub const fn disaster_categories() -> &'static [DisasterCategory] {
    DisasterCategory::all()
}

/// Returns the impact vocabularies, most severe first.
#[must_use]
pub const fn impact_terms() -> &'static [(ImpactLevel, &'static [&'static str])] {
    IMPACT_TERMS
}
