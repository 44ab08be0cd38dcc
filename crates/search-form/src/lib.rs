//! "What/where" search form for the branchen business directory.
//!
//! This crate provides:
//! - [`SearchForm`], the controller for one mounted form: input events,
//!   the "use my location" suggestion, device location resolution and submit
//! - Slug and URL building for the `/branchen/{what}/{where}` result pages
//! - The error modal and its dismissal rules
//! - HTML rendering of the form via [`Markup`]
//! - WASM bindings behind the `wasm` feature
//!
//! # Example
//!
//! ```
//! use branchen_search_form::{build_search_url, SearchState, DEFAULT_RADIUS_KM};
//!
//! let state = SearchState {
//!     what: "Zahnarzt".into(),
//!     where_text: "Berlin (Mitte)".into(),
//!     ..SearchState::default()
//! };
//! assert_eq!(build_search_url(&state, DEFAULT_RADIUS_KM), "/branchen/zahnarzt/berlin_mitte");
//! ```

pub mod config;
pub mod error;
pub mod form;
pub mod markup;
pub mod messages;
pub mod navigator;
pub mod presenter;
pub mod slug;
pub mod state;
pub mod url;

#[cfg(feature = "wasm")]
mod wasm;

pub use config::{FormConfig, DEFAULT_BLUR_GRACE};
pub use error::FormError;
pub use form::{BlurTicket, Resolution, SearchForm};
pub use markup::{Markup, MarkupError};
pub use navigator::Navigator;
pub use presenter::ModalClick;
pub use slug::{location_slug, search_slug};
pub use state::{SearchState, UiState};
pub use url::{build_search_url, validate, DEFAULT_RADIUS_KM};

#[cfg(feature = "wasm")]
pub use wasm::WebSearchForm;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::FormConfig;
    pub use crate::error::FormError;
    pub use crate::form::{Resolution, SearchForm};
    pub use crate::navigator::Navigator;
    pub use crate::state::{SearchState, UiState};
    pub use branchen_geo::{Coordinate, Geolocator};
    pub use branchen_geocoding::ReverseGeocoder;
}
