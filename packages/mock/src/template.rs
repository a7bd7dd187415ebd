//! Post templates and placeholder filling.
//!
//! Templates use `{name}` placeholders. Each pool has a fixed set of
//! placeholder names it may use; the `const` assertions at the bottom of
//! this module reject any template that uses a name outside its pool's set,
//! so a typo fails the build instead of leaking into generated text.

use std::str::FromStr;

use disaster_feed_disaster_models::DisasterCategory;
use strum_macros::{AsRefStr, Display, EnumString};

/// Every placeholder name a template may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Placeholder {
    Location,
    Disaster,
    Name,
    WindSpeed,
    Category,
    SurgeHeight,
    Magnitude,
    Time,
    Acres,
    Containment,
    WaveHeight,
    OutageCount,
    Status,
    Website,
}

/// Placeholders allowed in category-specific templates.
pub const SPECIFIC_PLACEHOLDERS: &[&str] = &[
    "location",
    "name",
    "wind_speed",
    "category",
    "surge_height",
    "magnitude",
    "time",
    "acres",
    "containment",
    "wave_height",
    "outage_count",
];

/// Placeholders allowed in generic templates.
pub const GENERIC_PLACEHOLDERS: &[&str] = &["location", "disaster", "status", "website"];

/// Which pool a template was drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplatePool {
    /// Templates written for one category.
    Specific(DisasterCategory),
    /// Cross-category templates; `{disaster}` carries the category.
    Generic,
}

const HURRICANE: &[&str] = &[
    "Hurricane {name} is approaching the coast of {location}. Stay safe everyone! #Hurricane #StaySafe",
    "Wind speeds of {wind_speed} mph reported as Hurricane {name} makes landfall in {location}. #WeatherAlert",
    "Evacuations underway in {location} as Hurricane {name} strengthens to Category {category}. #Hurricane",
    "Storm surge expected to reach {surge_height} feet in {location} due to Hurricane {name}. #StormSurge",
    "Hurricane {name} has been downgraded to a tropical storm near {location}. Stay cautious. #HurricaneRecovery",
    "Flooding reported in {location} after Hurricane {name} passed through. #FloodWarning",
    "Power outages affecting {outage_count} homes in {location} due to Hurricane {name}. #PowerOutage",
];

const EARTHQUAKE: &[&str] = &[
    "Magnitude {magnitude} earthquake reported in {location}. #Earthquake #Breaking",
    "Aftershocks continue in {location} following yesterday's {magnitude} earthquake. #Aftershock",
    "Building damage reported in {location} after the {magnitude} earthquake. #EarthquakeDamage",
    "Rescue teams searching for survivors in {location} after the devastating earthquake. #RescueEfforts",
    "Tsunami warning issued for coastal {location} following offshore earthquake. #TsunamiWarning",
    "Earthquake of {magnitude} magnitude felt across {location}. No major damage reported. #Earthquake",
    "Seismic activity continues in {location} region. Experts monitoring closely. #SeismicActivity",
];

const FLOOD: &[&str] = &[
    "Flash flood warning for {location}. Seek higher ground immediately! #FlashFlood",
    "River levels rising rapidly in {location}. Flood stage expected by {time}. #FloodWarning",
    "Evacuation orders issued for low-lying areas in {location} due to flooding. #Evacuation",
    "Roads closed in {location} due to severe flooding. Avoid travel if possible. #RoadClosure",
    "Flood waters receding in {location}, but damage assessment still ongoing. #FloodRecovery",
    "Emergency shelters open in {location} for those displaced by flooding. #EmergencyShelter",
    "Levees at risk of breaching in {location} as flood waters continue to rise. #FloodDanger",
];

const WILDFIRE: &[&str] = &[
    "Wildfire spreading rapidly near {location}. Evacuation orders in place. #Wildfire",
    "Fire crews battling {acres} acre wildfire in {location}. Containment at {containment}%. #FireAlert",
    "Smoke advisory issued for {location} due to nearby wildfire. Air quality poor. #SmokeAdvisory",
    "High winds complicating firefighting efforts in {location} wildfire. #FireDanger",
    "Wildfire in {location} now {containment}% contained. Crews making progress. #FireUpdate",
    "New evacuation orders for {location} as wildfire changes direction. #FireEvacuation",
    "Fire danger remains extreme in {location} due to hot, dry conditions. #FireSeason",
];

const TORNADO: &[&str] = &[
    "Tornado warning issued for {location}. Seek shelter immediately! #TornadoWarning",
    "Tornado touched down in {location}. Damage reported. Stay clear of the area. #Tornado",
    "Funnel cloud spotted near {location}. Take cover now! #TornadoAlert",
    "Tornado damage assessment underway in {location}. Several buildings destroyed. #TornadoDamage",
    "Storm system producing multiple tornadoes moving through {location}. #SevereWeather",
    "Tornado sirens activated in {location}. Move to interior room immediately. #TornadoSiren",
    "All clear given for {location} after tornado warning expires. Stay alert for updates. #WeatherUpdate",
];

const TSUNAMI: &[&str] = &[
    "Tsunami warning issued for {location} following offshore earthquake. #Tsunami",
    "Wave height of {wave_height} meters reported in {location} tsunami. #TsunamiAlert",
    "Coastal evacuations underway in {location} due to tsunami threat. #CoastalEvacuation",
    "Tsunami waves expected to reach {location} by {time}. Move to higher ground. #TsunamiWarning",
    "Tsunami warning cancelled for {location}. All clear given. #TsunamiUpdate",
    "Tsunami damage reported along {location} coastline. Emergency teams responding. #TsunamiDamage",
    "Small tsunami waves observed in {location}. Monitoring continues. #TsunamiWatch",
];

/// Cross-category templates.
pub const GENERIC: &[&str] = &[
    "Emergency response teams deployed to {location} for {disaster} relief. #EmergencyResponse",
    "Latest update on the {disaster} in {location}: {status}. Stay tuned for more information. #DisasterUpdate",
    "Resources available for those affected by the {disaster} in {location}. Visit {website} for details. #DisasterRelief",
    "Our thoughts are with everyone affected by the {disaster} in {location}. #StaySafe",
    "Volunteers needed for {disaster} recovery efforts in {location}. #HelpNeeded",
    "Weather conditions improving in {location} following the {disaster}. #WeatherUpdate",
    "Road closures in effect around {location} due to {disaster}. Check local traffic updates. #TrafficAlert",
    "Schools closed in {location} tomorrow due to {disaster}. #SchoolClosure",
    "Remember to check on elderly neighbors during this {disaster} in {location}. #CommunitySupport",
    "Donation center for {disaster} victims open at {location} community center. #Donations",
];

/// Returns the category-specific templates. [`DisasterCategory::General`]
/// has none and always draws from [`GENERIC`].
#[must_use]
pub const fn specific_templates(category: DisasterCategory) -> &'static [&'static str] {
    match category {
        DisasterCategory::Hurricane => HURRICANE,
        DisasterCategory::Earthquake => EARTHQUAKE,
        DisasterCategory::Flood => FLOOD,
        DisasterCategory::Wildfire => WILDFIRE,
        DisasterCategory::Tornado => TORNADO,
        DisasterCategory::Tsunami => TSUNAMI,
        DisasterCategory::General => &[],
    }
}

/// Returns the templates belonging to `pool`.
#[must_use]
pub const fn templates(pool: TemplatePool) -> &'static [&'static str] {
    match pool {
        TemplatePool::Specific(category) => specific_templates(category),
        TemplatePool::Generic => GENERIC,
    }
}

/// Replaces every `{name}` in `template` with `resolve(placeholder)`.
///
/// Names that do not parse as a [`Placeholder`] are copied through
/// verbatim; the build-time pool checks keep that from happening for the
/// built-in templates.
pub fn fill(template: &str, mut resolve: impl FnMut(Placeholder) -> String) -> String {
    let mut out = String::with_capacity(template.len() + 32);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };

        let name = &after[..close];
        if let Ok(placeholder) = Placeholder::from_str(name) {
            out.push_str(&resolve(placeholder));
        } else {
            log::warn!("Unknown template placeholder '{{{name}}}' in \"{template}\"");
            out.push_str(&rest[open..=open + close + 1]);
        }

        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}

const fn bytes_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

const fn is_allowed(name: &[u8], allowed: &[&str]) -> bool {
    let mut i = 0;
    while i < allowed.len() {
        if bytes_eq(name, allowed[i].as_bytes()) {
            return true;
        }
        i += 1;
    }
    false
}

/// Whether every `{name}` in `template` is balanced and listed in
/// `allowed`.
const fn template_is_valid(template: &str, allowed: &[&str]) -> bool {
    let bytes = template.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'}' => return false,
            b'{' => {
                let start = i + 1;
                let mut end = start;
                while end < bytes.len() && bytes[end] != b'}' {
                    if bytes[end] == b'{' {
                        return false;
                    }
                    end += 1;
                }
                if end == bytes.len() {
                    return false;
                }
                let (_, tail) = bytes.split_at(start);
                let (name, _) = tail.split_at(end - start);
                if !is_allowed(name, allowed) {
                    return false;
                }
                i = end + 1;
            }
            _ => i += 1,
        }
    }
    true
}

/// Whether every template in `pool` passes [`template_is_valid`].
#[must_use]
pub const fn pool_is_valid(pool: &[&str], allowed: &[&str]) -> bool {
    let mut i = 0;
    while i < pool.len() {
        if !template_is_valid(pool[i], allowed) {
            return false;
        }
        i += 1;
    }
    true
}

const _: () = assert!(
    pool_is_valid(HURRICANE, SPECIFIC_PLACEHOLDERS),
    "hurricane template uses an unknown placeholder"
);
const _: () = assert!(
    pool_is_valid(EARTHQUAKE, SPECIFIC_PLACEHOLDERS),
    "earthquake template uses an unknown placeholder"
);
const _: () = assert!(
    pool_is_valid(FLOOD, SPECIFIC_PLACEHOLDERS),
    "flood template uses an unknown placeholder"
);
const _: () = assert!(
    pool_is_valid(WILDFIRE, SPECIFIC_PLACEHOLDERS),
    "wildfire template uses an unknown placeholder"
);
const _: () = assert!(
    pool_is_valid(TORNADO, SPECIFIC_PLACEHOLDERS),
    "tornado template uses an unknown placeholder"
);
const _: () = assert!(
    pool_is_valid(TSUNAMI, SPECIFIC_PLACEHOLDERS),
    "tsunami template uses an unknown placeholder"
);
const _: () = assert!(
    pool_is_valid(GENERIC, GENERIC_PLACEHOLDERS),
    "generic template uses an unknown placeholder"
);
const _: () = assert!(!GENERIC.is_empty());
