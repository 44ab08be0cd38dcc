//! Configuration loading and schema definitions
//!
//! One TOML file feeds the search form, the geocoder client and logging.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
