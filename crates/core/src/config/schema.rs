//! Configuration schema definitions
//!
//! Every section and field defaults, so an empty file is a valid config.

use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    #[serde(default)]
    pub search: SearchSettings,

    #[serde(default)]
    pub geocoder: GeocoderSettings,

    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

/// Search form behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Radius in kilometres attached to "near me" searches
    #[serde(default = "default_radius_km")]
    pub radius_km: u32,

    /// Delay before the suggestion list closes after the field loses focus
    #[serde(default = "default_blur_grace_ms")]
    pub blur_grace_ms: u64,

    /// Ask the device for its most accurate fix
    #[serde(default = "default_true")]
    pub high_accuracy: bool,

    /// Give up on the device position after this many milliseconds
    #[serde(default = "default_position_timeout_ms")]
    pub position_timeout_ms: u64,

    /// Oldest cached device position that may be reused (0 = never)
    #[serde(default)]
    pub maximum_age_ms: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            radius_km: default_radius_km(),
            blur_grace_ms: default_blur_grace_ms(),
            high_accuracy: true,
            position_timeout_ms: default_position_timeout_ms(),
            maximum_age_ms: 0,
        }
    }
}

fn default_radius_km() -> u32 {
    50
}

fn default_blur_grace_ms() -> u64 {
    200
}

fn default_position_timeout_ms() -> u64 {
    10_000
}

fn default_true() -> bool {
    true
}

/// Reverse geocoding service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocoderSettings {
    /// Service root, `/reverse` is appended
    #[serde(default = "default_geocoder_url")]
    pub base_url: String,

    /// Client identification sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Nominatim detail level (14 = suburb)
    #[serde(default = "default_zoom")]
    pub zoom: u8,
}

impl Default for GeocoderSettings {
    fn default() -> Self {
        Self {
            base_url: default_geocoder_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            zoom: default_zoom(),
        }
    }
}

fn default_geocoder_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_user_agent() -> String {
    "GelbeSeitenApp/1.0".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_zoom() -> u8 {
    14
}

/// Logging output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetrySettings {
    /// Filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON lines instead of the compact format
    #[serde(default)]
    pub json: bool,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
