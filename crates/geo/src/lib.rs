//! Coordinates and device geolocation for the branchen search form.
//!
//! This crate provides:
//! - The [`Coordinate`] value used throughout the search tools
//! - [`PositionOptions`] and [`PositionError`] mirroring the browser
//!   geolocation contract
//! - The [`Geolocator`] seam with a [`FixedGeolocator`] for native use
//! - A `navigator.geolocation` backed implementation behind the `wasm` feature
//!
//! # Example
//!
//! ```
//! use branchen_geo::Coordinate;
//!
//! let berlin = Coordinate::new(52.5200, 13.4050);
//! assert!(berlin.is_valid());
//! ```

mod error;
mod position;

#[cfg(feature = "wasm")]
mod wasm;

pub use error::{GeoError, GeoErrorCode, Result};
pub use position::{FixedGeolocator, Geolocator, PositionError, PositionOptions};

#[cfg(feature = "wasm")]
pub use wasm::BrowserGeolocator;

/// A geographic coordinate with latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    #[inline]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Creates a coordinate, rejecting values outside the WGS84 ranges.
    pub fn checked(latitude: f64, longitude: f64) -> Result<Self> {
        let coord = Self::new(latitude, longitude);
        if coord.is_valid() {
            Ok(coord)
        } else {
            Err(GeoError::InvalidCoordinate(format!("({latitude}, {longitude})")))
        }
    }

    /// Returns true if the coordinate has valid values.
    #[inline]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self::new(lat, lon)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}
