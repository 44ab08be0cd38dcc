//! Shared foundations for the branchen search tools
//!
//! - **Error handling**: errors with codes, context and recovery suggestions
//! - **Configuration**: TOML-based configuration with serde defaults
//!
//! # Example
//!
//! ```rust,no_run
//! use branchen_core::config::Config;
//!
//! let config = Config::load(None).expect("config");
//! println!("radius: {} km", config.schema.search.radius_km);
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;

pub use error::{Error, ErrorCode, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema, GeocoderSettings, SearchSettings, TelemetrySettings};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result};
}
