//! Device position acquisition.
//!
//! Mirrors the browser geolocation contract: a one-shot position request with
//! accuracy, timeout and cache-age options, failing with one of the numeric
//! error codes defined by the W3C Geolocation API.

use crate::Coordinate;
use std::time::Duration;
use thiserror::Error;

/// Options for a single position request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    /// Ask for the most accurate fix the device can produce
    pub high_accuracy: bool,
    /// Maximum time to wait for a fix
    pub timeout: Duration,
    /// Oldest cached fix that may be returned (zero = always fresh)
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::ZERO,
        }
    }
}

/// Failure reported by the device when acquiring a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PositionError {
    /// The user or platform refused access
    #[error("permission to read the device position was denied")]
    PermissionDenied,
    /// The device could not determine a position
    #[error("the device position is unavailable")]
    PositionUnavailable,
    /// No fix arrived within the requested timeout
    #[error("timed out waiting for the device position")]
    Timeout,
    /// Any code outside the three defined ones
    #[error("device position request failed with code {0}")]
    Unknown(u16),
}

impl PositionError {
    /// `GeolocationPositionError.PERMISSION_DENIED`
    pub const PERMISSION_DENIED: u16 = 1;
    /// `GeolocationPositionError.POSITION_UNAVAILABLE`
    pub const POSITION_UNAVAILABLE: u16 = 2;
    /// `GeolocationPositionError.TIMEOUT`
    pub const TIMEOUT: u16 = 3;

    /// Maps a raw platform error code.
    pub fn from_code(code: u16) -> Self {
        match code {
            Self::PERMISSION_DENIED => Self::PermissionDenied,
            Self::POSITION_UNAVAILABLE => Self::PositionUnavailable,
            Self::TIMEOUT => Self::Timeout,
            other => Self::Unknown(other),
        }
    }

    /// The raw platform error code.
    pub fn code(&self) -> u16 {
        match self {
            Self::PermissionDenied => Self::PERMISSION_DENIED,
            Self::PositionUnavailable => Self::POSITION_UNAVAILABLE,
            Self::Timeout => Self::TIMEOUT,
            Self::Unknown(code) => *code,
        }
    }
}

/// Source of the device position.
///
/// Implementations are driven from a single thread; the returned futures
/// need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait Geolocator {
    /// Whether the platform exposes a geolocation capability at all.
    fn is_available(&self) -> bool;

    /// Requests the current device position once.
    async fn current_position(&self, options: &PositionOptions) -> Result<Coordinate, PositionError>;
}

/// A geolocator with a predetermined answer.
///
/// Used by the command-line tool, where the "device" position comes from
/// arguments, and by tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedGeolocator {
    outcome: Option<Result<Coordinate, PositionError>>,
}

impl FixedGeolocator {
    /// Always reports `coordinate`.
    pub fn at(coordinate: Coordinate) -> Self {
        Self { outcome: Some(Ok(coordinate)) }
    }

    /// Always fails with `error`.
    pub fn failing(error: PositionError) -> Self {
        Self { outcome: Some(Err(error)) }
    }

    /// Behaves like a platform without geolocation support.
    pub fn unavailable() -> Self {
        Self { outcome: None }
    }
}

impl Geolocator for FixedGeolocator {
    fn is_available(&self) -> bool {
        self.outcome.is_some()
    }

    async fn current_position(&self, _options: &PositionOptions) -> Result<Coordinate, PositionError> {
        self.outcome.unwrap_or(Err(PositionError::PositionUnavailable))
    }
}
