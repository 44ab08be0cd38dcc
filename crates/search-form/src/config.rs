//! Form behaviour settings

use crate::url::DEFAULT_RADIUS_KM;
use branchen_core::config::SearchSettings;
use branchen_geo::PositionOptions;
use std::time::Duration;

/// Delay between the "where" field losing focus and the suggestion list closing.
pub const DEFAULT_BLUR_GRACE: Duration = Duration::from_millis(200);

/// Settings for one [`SearchForm`](crate::SearchForm).
#[derive(Debug, Clone, PartialEq)]
pub struct FormConfig {
    /// Radius in kilometres for searches around the device
    pub radius_km: u32,
    /// Grace delay before a blur closes the suggestion list
    pub blur_grace: Duration,
    /// Options passed to the device position request
    pub position: PositionOptions,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            radius_km: DEFAULT_RADIUS_KM,
            blur_grace: DEFAULT_BLUR_GRACE,
            position: PositionOptions::default(),
        }
    }
}

impl From<&SearchSettings> for FormConfig {
    fn from(settings: &SearchSettings) -> Self {
        Self {
            radius_km: settings.radius_km,
            blur_grace: Duration::from_millis(settings.blur_grace_ms),
            position: PositionOptions {
                high_accuracy: settings.high_accuracy,
                timeout: Duration::from_millis(settings.position_timeout_ms),
                maximum_age: Duration::from_millis(settings.maximum_age_ms),
            },
        }
    }
}

impl FormConfig {
    /// Builder-style method to set the radius
    #[must_use]
    pub fn with_radius_km(mut self, radius_km: u32) -> Self {
        self.radius_km = radius_km;
        self
    }

    /// Builder-style method to set the blur grace delay
    #[must_use]
    pub fn with_blur_grace(mut self, blur_grace: Duration) -> Self {
        self.blur_grace = blur_grace;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_settings_defaults() {
        assert_eq!(FormConfig::default(), FormConfig::from(&SearchSettings::default()));
    }

    #[test]
    fn test_from_settings() {
        let settings = SearchSettings {
            radius_km: 20,
            position_timeout_ms: 3_000,
            high_accuracy: false,
            ..SearchSettings::default()
        };
        let config = FormConfig::from(&settings);
        assert_eq!(config.radius_km, 20);
        assert_eq!(config.position.timeout, Duration::from_secs(3));
        assert!(!config.position.high_accuracy);
        assert_eq!(config.blur_grace, DEFAULT_BLUR_GRACE);
    }
}
