//! Error types for the search form.
//!
//! `Display` is meant for logs; what the user sees in the modal comes from
//! [`FormError::user_message`].

use crate::messages;
use branchen_core::ErrorCode;
use branchen_geo::PositionError;
use branchen_geocoding::ApiError;
use thiserror::Error;

/// Everything that can end up in the error modal.
#[derive(Debug, Error)]
pub enum FormError {
    /// The platform has no geolocation capability
    #[error("geolocation is not available on this platform")]
    GeolocationUnavailable,

    /// The device refused or failed to report a position
    #[error("device position failed: {0}")]
    Position(#[from] PositionError),

    /// The reverse lookup after a successful position fix failed
    #[error("reverse geocoding failed: {0}")]
    Geocoding(#[from] ApiError),

    /// Submit without a search term and without a device location
    #[error("no search term and no location given")]
    MissingSearchInput,
}

impl FormError {
    /// Text for the error modal.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::GeolocationUnavailable => messages::GEOLOCATION_UNAVAILABLE,
            Self::Position(PositionError::PermissionDenied) => messages::LOCATION_PERMISSION_DENIED,
            Self::Position(PositionError::PositionUnavailable) => messages::LOCATION_POSITION_UNAVAILABLE,
            Self::Position(PositionError::Timeout) => messages::LOCATION_TIMEOUT,
            Self::Position(PositionError::Unknown(_)) => messages::LOCATION_FAILED,
            Self::Geocoding(_) => messages::GEOCODING_FAILED,
            Self::MissingSearchInput => messages::MISSING_SEARCH_INPUT,
        }
    }

    /// Matching code in the shared error taxonomy.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::GeolocationUnavailable => ErrorCode::GeolocationUnavailable,
            Self::Position(PositionError::PermissionDenied) => ErrorCode::LocationDenied,
            Self::Position(PositionError::PositionUnavailable) => ErrorCode::PositionUnavailable,
            Self::Position(PositionError::Timeout) => ErrorCode::LocationTimeout,
            Self::Position(PositionError::Unknown(_)) => ErrorCode::LocationError,
            Self::Geocoding(_) => ErrorCode::GeocodingFailed,
            Self::MissingSearchInput => ErrorCode::MissingSearchInput,
        }
    }
}

impl From<FormError> for branchen_core::Error {
    fn from(err: FormError) -> Self {
        let code = err.code();
        let message = err.user_message();
        branchen_core::Error::new(code, message).with_source(err)
    }
}
