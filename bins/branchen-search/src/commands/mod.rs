//! Command implementations

pub mod locate;
pub mod render;
pub mod url;

use branchen_geo::Coordinate;

/// Parses an optional `--lat`/`--lon` pair into a coordinate.
pub(crate) fn coordinate(lat: Option<f64>, lon: Option<f64>) -> branchen_core::Result<Option<Coordinate>> {
    match (lat, lon) {
        (Some(lat), Some(lon)) => Coordinate::checked(lat, lon)
            .map(Some)
            .map_err(|e| branchen_core::Error::validation(e.to_string()).with_source(e)),
        _ => Ok(None),
    }
}
