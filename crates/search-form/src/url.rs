//! Search URL construction.
//!
//! Layout of the result paths:
//!
//! | Input | Path |
//! |-------|------|
//! | device position stored | `/branchen/{what}/standort?lat=..&lon=..&radius=..` |
//! | typed place | `/branchen/{what}/{where}` |
//! | nothing, or sentinel without position | `/branchen/{what}/standort` |

use crate::error::FormError;
use crate::slug::{location_slug, search_slug};
use crate::state::SearchState;

/// Root of all directory search paths.
pub const SEARCH_ROOT: &str = "/branchen";

/// Path segment for searches around the device.
pub const NEARBY_SEGMENT: &str = "standort";

/// Radius in kilometres for searches around the device.
pub const DEFAULT_RADIUS_KM: u32 = 50;

/// Rejects a submit that has neither a term nor a device location.
pub fn validate(state: &SearchState) -> Result<(), FormError> {
    if state.what.is_empty() && !state.uses_device_location() {
        return Err(FormError::MissingSearchInput);
    }
    Ok(())
}

/// Path and query for `state`. Does not validate.
pub fn build_search_url(state: &SearchState, radius_km: u32) -> String {
    let what = search_slug(&state.what);
    let nearby = format!("{SEARCH_ROOT}/{what}/{NEARBY_SEGMENT}");

    if state.uses_device_location() {
        match state.coordinates {
            Some(coord) => format!(
                "{nearby}?lat={}&lon={}&radius={radius_km}",
                coord.latitude, coord.longitude
            ),
            None => nearby,
        }
    } else if !state.where_text.is_empty() {
        format!("{SEARCH_ROOT}/{what}/{}", location_slug(&state.where_text))
    } else {
        nearby
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::USE_MY_LOCATION;
    use branchen_geo::Coordinate;

    fn state(what: &str, where_text: &str, coordinates: Option<(f64, f64)>) -> SearchState {
        SearchState {
            what: what.to_string(),
            where_text: where_text.to_string(),
            coordinates: coordinates.map(Coordinate::from),
            ..SearchState::default()
        }
    }

    #[test]
    fn test_device_location_url() {
        let s = state("Pizza", USE_MY_LOCATION, Some((52.5, 13.4)));
        assert_eq!(
            build_search_url(&s, DEFAULT_RADIUS_KM),
            "/branchen/pizza/standort?lat=52.5&lon=13.4&radius=50"
        );
    }

    #[test]
    fn test_typed_location_url() {
        let s = state("Zahnarzt", "Berlin (Mitte)", None);
        assert_eq!(build_search_url(&s, DEFAULT_RADIUS_KM), "/branchen/zahnarzt/berlin_mitte");
    }

    #[test]
    fn test_no_location_url() {
        let s = state("Friseur", "", None);
        assert_eq!(build_search_url(&s, DEFAULT_RADIUS_KM), "/branchen/friseur/standort");
    }

    #[test]
    fn test_sentinel_without_coordinates() {
        let s = state("", "meinen Standort verwenden", None);
        assert!(validate(&s).is_ok());
        assert_eq!(build_search_url(&s, DEFAULT_RADIUS_KM), "/branchen/alle/standort");
    }

    #[test]
    fn test_coordinates_win_over_edited_location() {
        let s = state("Bäcker", "Hamburg", Some((53.55, 9.99)));
        assert_eq!(
            build_search_url(&s, DEFAULT_RADIUS_KM),
            "/branchen/bäcker/standort?lat=53.55&lon=9.99&radius=50"
        );
    }

    #[test]
    fn test_whitespace_location_falls_back_to_country() {
        let s = state("Apotheke", "   ", None);
        assert_eq!(build_search_url(&s, DEFAULT_RADIUS_KM), "/branchen/apotheke/deutschland");
    }

    #[test]
    fn test_custom_radius_and_negative_coordinates() {
        let s = state("", "", Some((-33.8688, 151.2093)));
        assert_eq!(
            build_search_url(&s, 10),
            "/branchen/alle/standort?lat=-33.8688&lon=151.2093&radius=10"
        );
    }

    #[test]
    fn test_validation() {
        assert!(matches!(validate(&state("", "", None)), Err(FormError::MissingSearchInput)));
        // A typed place alone is not enough.
        assert!(validate(&state("", "Köln", None)).is_err());
        assert!(validate(&state("Pizza", "", None)).is_ok());
        assert!(validate(&state("", "", Some((50.0, 8.0)))).is_ok());
    }

    #[test]
    fn test_whitespace_term_passes_validation() {
        let s = state("   ", "", None);
        assert!(validate(&s).is_ok());
        assert_eq!(build_search_url(&s, DEFAULT_RADIUS_KM), "/branchen/alle/standort");
    }
}
