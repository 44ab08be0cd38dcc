//! User-facing texts. The form ships in German only.

/// Sentinel shown in the "where" field once the device position is in use.
pub const USE_MY_LOCATION: &str = "Meinen Standort verwenden";

pub const GEOLOCATION_UNAVAILABLE: &str = "Geolocation ist in Ihrem Browser nicht verfügbar.";
pub const LOCATION_PERMISSION_DENIED: &str =
    "Standortzugriff wurde verweigert. Bitte erlauben Sie den Zugriff in Ihren Browsereinstellungen.";
pub const LOCATION_POSITION_UNAVAILABLE: &str = "Standortinformationen sind nicht verfügbar.";
pub const LOCATION_TIMEOUT: &str = "Zeitüberschreitung beim Abrufen des Standorts.";
pub const LOCATION_FAILED: &str = "Standort konnte nicht abgerufen werden.";
pub const GEOCODING_FAILED: &str = "Fehler beim Abrufen des Standorts";
pub const MISSING_SEARCH_INPUT: &str = "Bitte geben Sie einen Suchbegriff oder Ort ein";

pub const WHAT_PLACEHOLDER: &str = "Was";
pub const WHERE_PLACEHOLDER: &str = "Wo";
pub const WHERE_LOCATING_PLACEHOLDER: &str = "Standort wird ermittelt...";
pub const SUBMIT_LABEL: &str = "Finden";
pub const ERROR_TITLE: &str = "Fehler";
pub const DISMISS_LABEL: &str = "OK";
