//! Fixed sampling pools: authors, places, storm names, status phrases and
//! per-category hashtags.

use disaster_feed_disaster_models::DisasterCategory;

/// A place name with its approximate center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    /// Place name as it appears in post text.
    pub name: &'static str,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

const fn loc(name: &'static str, lat: f64, lon: f64) -> Location {
    Location { name, lat, lon }
}

pub const LOCATIONS: &[Location] = &[
    loc("New York, NY", 40.7128, -74.0060),
    loc("Los Angeles, CA", 34.0522, -118.2437),
    loc("Chicago, IL", 41.8781, -87.6298),
    loc("Houston, TX", 29.7604, -95.3698),
    loc("Phoenix, AZ", 33.4484, -112.0740),
    loc("Philadelphia, PA", 39.9526, -75.1652),
    loc("San Antonio, TX", 29.4241, -98.4936),
    loc("San Diego, CA", 32.7157, -117.1611),
    loc("Dallas, TX", 32.7767, -96.7970),
    loc("San Jose, CA", 37.3382, -121.8863),
    loc("Miami, FL", 25.7617, -80.1918),
    loc("Seattle, WA", 47.6062, -122.3321),
    loc("Boston, MA", 42.3601, -71.0589),
    loc("Detroit, MI", 42.3314, -83.0458),
    loc("Denver, CO", 39.7392, -104.9903),
    loc("Atlanta, GA", 33.7490, -84.3880),
    loc("New Orleans, LA", 29.9511, -90.0715),
    loc("San Francisco, CA", 37.7749, -122.4194),
    loc("Austin, TX", 30.2672, -97.7431),
    loc("Portland, OR", 45.5051, -122.6750),
];

/// Looks up a location by its place name.
#[must_use]
pub fn location_by_name(name: &str) -> Option<&'static Location> {
    LOCATIONS.iter().find(|l| l.name == name)
}

pub const USERNAMES: &[&str] = &[
    "DisasterAlert",
    "WeatherWatcher",
    "StormChaser",
    "EmergencyInfo",
    "SafetyFirst",
    "CrisisResponse",
    "WeatherChannel",
    "DisasterRelief",
    "EmergencyUpdate",
    "NewsFeed",
    "WeatherUpdates",
    "StormTracker",
    "DisasterMonitor",
    "EmergencyServices",
    "FirstResponder",
    "ReliefWorker",
    "WeatherForecast",
    "DisasterRecovery",
    "EmergencyNotice",
    "SafetyTips",
];

pub const FIRST_NAMES: &[&str] = &[
    "John", "Jane", "David", "Sarah", "Michael", "Emily", "Robert", "Lisa", "Thomas", "Mary",
];

pub const LAST_NAMES: &[&str] = &[
    "Smith", "Jones", "Johnson", "Brown", "Davis", "Miller", "Wilson", "Moore", "Taylor",
    "Anderson",
];

pub const HURRICANE_NAMES: &[&str] = &[
    "Alex", "Bonnie", "Colin", "Danielle", "Earl", "Fiona", "Gaston", "Hermine", "Ian", "Julia",
    "Karl", "Lisa", "Martin", "Nicole", "Owen", "Paula", "Richard", "Shary", "Tobias", "Virginie",
    "Walter",
];

pub const STATUS_UPDATES: &[&str] = &[
    "emergency response ongoing",
    "situation stabilizing",
    "damage assessment in progress",
    "evacuations continuing",
    "relief efforts underway",
    "conditions worsening",
    "recovery beginning",
    "emergency teams on scene",
    "shelters at capacity",
    "volunteers needed",
    "conditions improving",
];

/// Site referenced by relief-resource posts.
pub const RELIEF_WEBSITE: &str = "www.disasterrelief.org";

const HURRICANE_TAGS: &[&str] = &[
    "Hurricane",
    "StormAlert",
    "WeatherWarning",
    "Evacuation",
    "StormSurge",
    "HurricaneSeason",
    "StormPrep",
    "FloodWatch",
];
const EARTHQUAKE_TAGS: &[&str] = &[
    "Earthquake",
    "Quake",
    "Seismic",
    "TsunamiWarning",
    "Aftershock",
    "EarthquakeSafety",
    "QuakeDamage",
    "SeismicActivity",
];
const FLOOD_TAGS: &[&str] = &[
    "Flood",
    "FloodWarning",
    "HighWater",
    "FlashFlood",
    "RisingWater",
    "FloodSafety",
    "RiverWatch",
    "EvacuationOrder",
];
const WILDFIRE_TAGS: &[&str] = &[
    "Wildfire",
    "FireDanger",
    "FireWarning",
    "ForestFire",
    "EvacuationAlert",
    "FireSeason",
    "SmokeAdvisory",
    "FireSafety",
];
const TORNADO_TAGS: &[&str] = &[
    "Tornado",
    "TornadoWarning",
    "SevereWeather",
    "TakeCover",
    "StormChasers",
    "TwisterAlert",
    "TornadoSeason",
    "FunnelCloud",
];
const TSUNAMI_TAGS: &[&str] = &[
    "Tsunami",
    "TsunamiWarning",
    "CoastalEvacuation",
    "TsunamiAlert",
    "OceanSurge",
    "WaveHeight",
    "TsunamiDanger",
    "SeaLevelRise",
];
const GENERAL_TAGS: &[&str] = &[
    "Emergency",
    "EmergencyResponse",
    "DisasterUpdate",
    "DisasterRelief",
    "StaySafe",
    "HelpNeeded",
    "CommunitySupport",
    "Donations",
];

/// Returns the hashtag pool (without `#`) for a category.
#[must_use]
pub const fn hashtags_for(category: DisasterCategory) -> &'static [&'static str] {
    match category {
        DisasterCategory::Hurricane => HURRICANE_TAGS,
        DisasterCategory::Earthquake => EARTHQUAKE_TAGS,
        DisasterCategory::Flood => FLOOD_TAGS,
        DisasterCategory::Wildfire => WILDFIRE_TAGS,
        DisasterCategory::Tornado => TORNADO_TAGS,
        DisasterCategory::Tsunami => TSUNAMI_TAGS,
        DisasterCategory::General => GENERAL_TAGS,
    }
}

// Sampling indexes into these with `gen_range(0..len)`.
const _: () = assert!(!LOCATIONS.is_empty());
const _: () = assert!(!USERNAMES.is_empty());
const _: () = assert!(!FIRST_NAMES.is_empty() && !LAST_NAMES.is_empty());
const _: () = assert!(!HURRICANE_NAMES.is_empty() && !STATUS_UPDATES.is_empty());
