//! Configuration for the Nominatim client
//!
//! Supports environment-based configuration with sensible defaults.

use crate::error::{ApiError, ApiResult};
use branchen_core::config::GeocoderSettings;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Public OpenStreetMap Nominatim instance
pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Client identification required by the Nominatim usage policy
pub const DEFAULT_USER_AGENT: &str = "GelbeSeitenApp/1.0";

/// Detail level of the reverse lookup (14 = suburb)
pub const DEFAULT_ZOOM: u8 = 14;

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Service root; `/reverse` is appended
    pub base_url: String,
    /// Value of the `User-Agent` header
    pub user_agent: String,
    /// Request timeout
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// Nominatim `zoom` parameter
    pub zoom: u8,
    /// Ask for the structured `address` object
    pub address_details: bool,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            zoom: DEFAULT_ZOOM,
            address_details: true,
        }
    }
}

impl From<&GeocoderSettings> for ClientConfig {
    fn from(settings: &GeocoderSettings) -> Self {
        Self {
            base_url: settings.base_url.clone(),
            user_agent: settings.user_agent.clone(),
            timeout: Duration::from_secs(settings.timeout_secs),
            zoom: settings.zoom,
            address_details: true,
        }
    }
}

impl ClientConfig {
    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `BRANCHEN_GEOCODER_URL`: service root
    /// - `BRANCHEN_GEOCODER_USER_AGENT`: client identification
    /// - `BRANCHEN_GEOCODER_TIMEOUT_SECS`: request timeout in seconds
    pub fn from_env() -> ApiResult<Self> {
        Self::default().overlay_env()
    }

    /// Override fields of `self` with whatever the environment sets
    pub fn overlay_env(mut self) -> ApiResult<Self> {
        if let Ok(url) = env::var("BRANCHEN_GEOCODER_URL") {
            self.base_url = url;
        }
        if let Ok(agent) = env::var("BRANCHEN_GEOCODER_USER_AGENT") {
            self.user_agent = agent;
        }
        if let Ok(raw) = env::var("BRANCHEN_GEOCODER_TIMEOUT_SECS") {
            let secs: u64 = raw
                .parse()
                .map_err(|_| ApiError::config(format!("BRANCHEN_GEOCODER_TIMEOUT_SECS is not a number: {raw}")))?;
            self.timeout = Duration::from_secs(secs);
        }
        Ok(self)
    }

    /// Builder-style method to set base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder-style method to set the user agent
    #[must_use]
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder-style method to set the zoom level
    #[must_use]
    pub fn with_zoom(mut self, zoom: u8) -> Self {
        self.zoom = zoom;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.base_url.is_empty() {
            return Err(ApiError::config("base_url cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ApiError::config("base_url must start with http:// or https://"));
        }

        if self.user_agent.trim().is_empty() {
            return Err(ApiError::config("user_agent cannot be empty"));
        }

        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        if self.zoom > 18 {
            return Err(ApiError::config(format!("zoom must be between 0 and 18, got {}", self.zoom)));
        }

        Ok(())
    }
}
