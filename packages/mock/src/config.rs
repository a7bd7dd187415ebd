//! Generator tunables.
//!
//! Every field has a default, so a TOML file only needs to list the values
//! it overrides:
//!
//! ```toml
//! mention_probability = 0.5
//! mean_likes = 40.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors that can occur while loading or validating a [`GeneratorConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML or has unknown keys.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A value is out of range.
    #[error("Invalid value for '{field}': {message}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// Description of the allowed range.
        message: String,
    },
}

/// Probabilities, distribution parameters and defaults used by
/// [`crate::MockGenerator`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Chance of drawing from the category's own templates rather than the
    /// generic ones.
    pub specific_template_probability: f64,
    /// Chance that a post mentions other accounts.
    pub mention_probability: f64,
    /// Chance that the display name is a full name instead of the handle.
    pub real_name_probability: f64,
    /// Maximum coordinate offset in degrees, applied independently to
    /// latitude and longitude.
    pub coordinate_jitter: f64,
    /// Mean of the exponential retweet count.
    pub mean_retweets: f64,
    /// Mean of the exponential like count.
    pub mean_likes: f64,
    /// Mean of the exponential reply count.
    pub mean_replies: f64,
    /// Length of the default time window, ending now.
    pub default_window_days: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            specific_template_probability: 0.7,
            mention_probability: 0.3,
            real_name_probability: 0.5,
            coordinate_jitter: 0.07,
            mean_retweets: 10.0,
            mean_likes: 25.0,
            mean_replies: 5.0,
            default_window_days: 7,
        }
    }
}

/// Largest accepted [`GeneratorConfig::coordinate_jitter`], in degrees.
pub const MAX_COORDINATE_JITTER: f64 = 1.0;

/// Largest accepted [`GeneratorConfig::default_window_days`] (about a century).
pub const MAX_WINDOW_DAYS: u32 = 36_500;

fn probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            message: format!("{value} is not a probability in [0, 1]"),
        })
    }
}

fn positive_mean(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            message: format!("{value} must be a finite number greater than 0"),
        })
    }
}

impl GeneratorConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the TOML is malformed, has unknown keys,
    /// or a value is out of range.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::de::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or
    /// [`Self::from_toml_str`] fails.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        log::debug!("Loading generator config from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Checks that every value is in range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        probability(
            "specific_template_probability",
            self.specific_template_probability,
        )?;
        probability("mention_probability", self.mention_probability)?;
        probability("real_name_probability", self.real_name_probability)?;

        if !(0.0..=MAX_COORDINATE_JITTER).contains(&self.coordinate_jitter) {
            return Err(ConfigError::Invalid {
                field: "coordinate_jitter",
                message: format!(
                    "{} is not a number of degrees in [0, {MAX_COORDINATE_JITTER}]",
                    self.coordinate_jitter
                ),
            });
        }

        positive_mean("mean_retweets", self.mean_retweets)?;
        positive_mean("mean_likes", self.mean_likes)?;
        positive_mean("mean_replies", self.mean_replies)?;

        if !(1..=MAX_WINDOW_DAYS).contains(&self.default_window_days) {
            return Err(ConfigError::Invalid {
                field: "default_window_days",
                message: format!(
                    "{} is not a day count in [1, {MAX_WINDOW_DAYS}]",
                    self.default_window_days
                ),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        GeneratorConfig::default().validate().unwrap();
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config = GeneratorConfig::from_toml_str("").unwrap();
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn partial_toml_overrides() {
        let config =
            GeneratorConfig::from_toml_str("mention_probability = 0.5\nmean_likes = 40.0\n")
                .unwrap();
        assert!((config.mention_probability - 0.5).abs() < f64::EPSILON);
        assert!((config.mean_likes - 40.0).abs() < f64::EPSILON);
        assert_eq!(config.default_window_days, 7);
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = GeneratorConfig::from_toml_str("mentions = 2").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)), "{err}");
    }

    #[test]
    fn rejects_out_of_range_values() {
        let err = GeneratorConfig::from_toml_str("real_name_probability = 1.5").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "real_name_probability",
                ..
            }
        ));

        let err = GeneratorConfig::from_toml_str("mean_replies = 0.0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "mean_replies",
                ..
            }
        ));

        for toml in [
            "coordinate_jitter = -0.1",
            "coordinate_jitter = 1e308",
            "coordinate_jitter = nan",
            "coordinate_jitter = inf",
        ] {
            let err = GeneratorConfig::from_toml_str(toml).unwrap_err();
            assert!(
                matches!(
                    err,
                    ConfigError::Invalid {
                        field: "coordinate_jitter",
                        ..
                    }
                ),
                "{toml}: {err}"
            );
        }

        for toml in ["default_window_days = 0", "default_window_days = 4000000000"] {
            let err = GeneratorConfig::from_toml_str(toml).unwrap_err();
            assert!(
                matches!(
                    err,
                    ConfigError::Invalid {
                        field: "default_window_days",
                        ..
                    }
                ),
                "{toml}: {err}"
            );
        }
    }

    #[test]
    fn accepts_boundary_values() {
        let config = GeneratorConfig::from_toml_str(&format!(
            "coordinate_jitter = {MAX_COORDINATE_JITTER:.1}\ndefault_window_days = {MAX_WINDOW_DAYS}\n"
        ))
        .unwrap();
        assert_eq!(config.default_window_days, MAX_WINDOW_DAYS);
    }
}
