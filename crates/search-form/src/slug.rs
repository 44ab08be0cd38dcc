//! URL slugs for search terms and place names.
//!
//! A slug is the lowercased, trimmed input with every run of whitespace
//! replaced by a single underscore. Nothing else is escaped; umlauts and
//! punctuation pass through unchanged.

use crate::messages::USE_MY_LOCATION;
use once_cell::sync::Lazy;
use regex::Regex;

/// Slug used when the search term is empty.
pub const ALL_CATEGORIES: &str = "alle";

/// Slug used when the place name reduces to nothing.
pub const WHOLE_COUNTRY: &str = "deutschland";

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static PARENTHESES: Lazy<Regex> = Lazy::new(|| Regex::new(r"[()]").unwrap());

fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    WHITESPACE_RUN.replace_all(lowered.trim(), "_").into_owned()
}

/// Slug for the "what" term, [`ALL_CATEGORIES`] when empty.
///
/// ```
/// use branchen_search_form::slug::search_slug;
///
/// assert_eq!(search_slug("  Italienisches   Restaurant "), "italienisches_restaurant");
/// assert_eq!(search_slug("   "), "alle");
/// ```
pub fn search_slug(text: &str) -> String {
    let slug = slugify(text);
    if slug.is_empty() { ALL_CATEGORIES.to_string() } else { slug }
}

/// Slug for a typed place name: like [`search_slug`] with `(` and `)`
/// removed, [`WHOLE_COUNTRY`] when nothing is left.
///
/// ```
/// use branchen_search_form::slug::location_slug;
///
/// assert_eq!(location_slug("Berlin (Mitte)"), "berlin_mitte");
/// assert_eq!(location_slug("()"), "deutschland");
/// ```
pub fn location_slug(text: &str) -> String {
    let slug = PARENTHESES.replace_all(&slugify(text), "").into_owned();
    if slug.is_empty() { WHOLE_COUNTRY.to_string() } else { slug }
}

/// Whether the "where" text asks for the device position.
pub fn is_device_location_text(text: &str) -> bool {
    text.to_lowercase().contains(&USE_MY_LOCATION.to_lowercase())
}
