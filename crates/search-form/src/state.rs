//! Form state.
//!
//! The visual mode of the form is a single [`UiState`] value rather than a set
//! of independent flags, so "locating while an error is shown" or "suggestions
//! open while locating" cannot be represented.

use crate::slug::is_device_location_text;
use branchen_geo::Coordinate;
use serde::Serialize;

/// What the form is currently showing besides its inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum UiState {
    /// Plain form
    #[default]
    Idle,
    /// Waiting for the device position and the reverse lookup
    Locating,
    /// The "use my location" suggestion is listed under the "where" field
    SuggestionsOpen,
    /// The error modal is open with this (non-empty) message
    ErrorShown(String),
}

impl UiState {
    /// Error state for `message`, or [`UiState::Idle`] for an empty one.
    pub fn error(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.is_empty() { Self::Idle } else { Self::ErrorShown(message) }
    }

    pub fn is_locating(&self) -> bool {
        matches!(self, Self::Locating)
    }

    pub fn suggestions_visible(&self) -> bool {
        matches!(self, Self::SuggestionsOpen)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::ErrorShown(message) => Some(message),
            _ => None,
        }
    }
}

/// Everything the form holds for one mount.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchState {
    /// Business category or free-text term
    pub what: String,
    /// Typed place name or the "use my location" sentinel
    #[serde(rename = "where")]
    pub where_text: String,
    /// Device position, stored only after a completed location resolution
    pub coordinates: Option<Coordinate>,
    pub ui: UiState,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a submit should search around the device.
    ///
    /// True when the sentinel text is in the "where" field or coordinates have
    /// been stored, even if the field was edited afterwards.
    pub fn uses_device_location(&self) -> bool {
        is_device_location_text(&self.where_text) || self.coordinates.is_some()
    }

    pub fn is_locating(&self) -> bool {
        self.ui.is_locating()
    }

    pub fn suggestions_visible(&self) -> bool {
        self.ui.suggestions_visible()
    }

    pub fn error(&self) -> Option<&str> {
        self.ui.error_message()
    }
}
