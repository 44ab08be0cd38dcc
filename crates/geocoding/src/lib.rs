//! Reverse geocoding against OpenStreetMap Nominatim
//!
//! Resolves a device position into a [`Place`] with a structured address and a
//! short human-readable label.
//!
//! # Example
//!
//! ```rust,no_run
//! use branchen_geo::Coordinate;
//! use branchen_geocoding::{ClientConfig, NominatimClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = NominatimClient::with_config(ClientConfig::default())?;
//!     let place = client.reverse(Coordinate::new(52.5173, 13.3951)).await?;
//!     println!("{:?}", place.label());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod place;

pub use client::NominatimClient;
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult};
pub use place::{Address, Place};

use branchen_geo::Coordinate;

/// Turns coordinates into a place description.
///
/// The search form depends on this seam rather than on the HTTP client, so
/// tests and embedders can substitute their own lookup.
#[allow(async_fn_in_trait)]
pub trait ReverseGeocoder {
    /// Look up the place at `coordinate`.
    async fn reverse(&self, coordinate: Coordinate) -> ApiResult<Place>;
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::NominatimClient;
    pub use crate::config::ClientConfig;
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::place::{Address, Place};
    pub use crate::ReverseGeocoder;
}
