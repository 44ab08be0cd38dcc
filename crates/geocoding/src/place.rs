//! Reverse geocoding response types

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A place returned by a reverse lookup.
///
/// Nominatim answers HTTP 200 with `{"error": "Unable to geocode"}` for
/// coordinates it cannot resolve (open sea, for instance); such responses
/// decode with `error` set and everything else empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Nominatim internal id
    #[serde(default)]
    pub place_id: Option<u64>,
    /// Full comma-separated address line
    #[serde(default)]
    pub display_name: Option<String>,
    /// Latitude echoed back by the service (string in the wire format)
    #[serde(default)]
    pub lat: Option<String>,
    /// Longitude echoed back by the service
    #[serde(default)]
    pub lon: Option<String>,
    /// Structured address, present with `addressdetails=1`
    #[serde(default)]
    pub address: Option<Address>,
    /// Service-side lookup failure
    ///
    /// Nominatim sends a plain string; error statuses carry an object whose
    /// `message` is kept.
    #[serde(default, deserialize_with = "error_text")]
    pub error: Option<String>,
}

fn error_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.map(|value| match &value {
        Value::String(text) => text.clone(),
        Value::Object(fields) => fields
            .get("message")
            .and_then(Value::as_str)
            .map_or_else(|| value.to_string(), str::to_string),
        _ => value.to_string(),
    }))
}

/// Structured address components.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    /// Street name
    pub road: Option<String>,
    /// House number
    pub house_number: Option<String>,
    /// Suburb or quarter
    pub suburb: Option<String>,
    /// Administrative district of a city
    pub city_district: Option<String>,
    /// City
    pub city: Option<String>,
    /// Town
    pub town: Option<String>,
    /// Village
    pub village: Option<String>,
    /// Municipality
    pub municipality: Option<String>,
    /// Federal state
    pub state: Option<String>,
    /// Postal code
    pub postcode: Option<String>,
    /// Country name in the local language
    pub country: Option<String>,
    /// ISO 3166-1 alpha-2 code, lowercase
    pub country_code: Option<String>,
}

impl Address {
    /// The settlement name, whichever granularity the service reported.
    pub fn locality(&self) -> Option<&str> {
        self.city
            .as_deref()
            .or(self.town.as_deref())
            .or(self.village.as_deref())
            .or(self.municipality.as_deref())
    }

    /// The part of the settlement, if any.
    pub fn district(&self) -> Option<&str> {
        self.suburb.as_deref().or(self.city_district.as_deref())
    }
}

impl Place {
    /// Whether the service found anything at the coordinates.
    pub fn is_resolved(&self) -> bool {
        self.error.is_none() && (self.display_name.is_some() || self.address.is_some())
    }

    /// Short human-readable label, e.g. `Berlin (Mitte)`.
    ///
    /// Falls back to the full display name when no locality is known.
    pub fn label(&self) -> Option<String> {
        let from_address = self.address.as_ref().and_then(|address| {
            let locality = address.locality()?;
            Some(match address.district() {
                Some(district) if district != locality => format!("{locality} ({district})"),
                _ => locality.to_string(),
            })
        });

        from_address.or_else(|| self.display_name.clone())
    }
}
