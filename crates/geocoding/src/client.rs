//! Nominatim reverse geocoding client

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::place::Place;
use crate::ReverseGeocoder;
use branchen_geo::Coordinate;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// Client for the `/reverse` endpoint of a Nominatim instance.
#[derive(Clone)]
pub struct NominatimClient {
    inner: Client,
    config: Arc<ClientConfig>,
}

impl NominatimClient {
    /// Create a new client with default configuration from environment
    pub fn new() -> ApiResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::with_config(config)
    }

    /// Create a new client with specific configuration
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|_| ApiError::config(format!("invalid user agent: {}", config.user_agent)))?;
        default_headers.insert(USER_AGENT, agent);

        let builder = Client::builder().default_headers(default_headers);
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(config.timeout);
        let inner = builder.build().map_err(ApiError::Request)?;

        Ok(Self {
            inner,
            config: Arc::new(config),
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Full URL of the reverse lookup for `coordinate`.
    pub fn reverse_url(&self, coordinate: Coordinate) -> ApiResult<Url> {
        let endpoint = format!("{}/reverse", self.config.base_url.trim_end_matches('/'));
        let lat = coordinate.latitude.to_string();
        let lon = coordinate.longitude.to_string();
        let zoom = self.config.zoom.to_string();
        let address_details = if self.config.address_details { "1" } else { "0" };

        Url::parse_with_params(
            &endpoint,
            [
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("format", "json"),
                ("addressdetails", address_details),
                ("zoom", zoom.as_str()),
            ],
        )
        .map_err(|e| ApiError::InvalidUrl(format!("{endpoint}: {e}")))
    }

    /// Resolve `coordinate` to a place.
    #[instrument(skip(self), fields(request_id))]
    pub async fn reverse(&self, coordinate: Coordinate) -> ApiResult<Place> {
        let url = self.reverse_url(coordinate)?;
        let place: Place = self.get_json(url).await?;

        if let Some(ref reason) = place.error {
            debug!(reason = %reason, "Service could not resolve coordinates");
        }
        Ok(place)
    }

    /// Perform a GET and decode the JSON body
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> ApiResult<T> {
        let request_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("request_id", request_id.as_str());
        debug!(request_id = %request_id, url = %url, "Sending request");

        let response = self
            .inner
            .get(url)
            .header(X_REQUEST_ID, &request_id)
            .send()
            .await
            .inspect_err(|e| warn!(request_id = %request_id, error = %e, "Request failed"))?;

        self.handle_response(&request_id, response).await
    }

    /// Handle HTTP response and deserialize
    ///
    /// A JSON body is decoded whatever the status; the service reports lookup
    /// problems in the body. Only an error status without a decodable body
    /// becomes [`ApiError::ApiResponse`].
    async fn handle_response<T: DeserializeOwned>(&self, request_id: &str, response: Response) -> ApiResult<T> {
        let status = response.status();
        let body = response.text().await?;
        debug!(request_id = %request_id, status = status.as_u16(), bytes = body.len(), "Response received");

        match serde_json::from_str(&body) {
            Ok(decoded) => {
                if !status.is_success() {
                    warn!(request_id = %request_id, status = status.as_u16(), "Service returned an error status with a JSON body");
                }
                Ok(decoded)
            }
            Err(err) if status.is_success() => Err(ApiError::Json(err)),
            Err(_) => {
                warn!(request_id = %request_id, status = status.as_u16(), "Service returned an error status");
                Err(ApiError::api_response(status.as_u16(), body))
            }
        }
    }
}

impl ReverseGeocoder for NominatimClient {
    async fn reverse(&self, coordinate: Coordinate) -> ApiResult<Place> {
        NominatimClient::reverse(self, coordinate).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> NominatimClient {
        NominatimClient::with_config(ClientConfig::default()).unwrap()
    }

    #[test]
    fn test_reverse_url() {
        let url = client().reverse_url(Coordinate::new(52.5, 13.4)).unwrap();
        assert_eq!(
            url.as_str(),
            "https://nominatim.openstreetmap.org/reverse?lat=52.5&lon=13.4&format=json&addressdetails=1&zoom=14"
        );
    }

    #[test]
    fn test_reverse_url_trailing_slash() {
        let config = ClientConfig::default().with_base_url("http://localhost:8080/");
        let client = NominatimClient::with_config(config).unwrap();
        let url = client.reverse_url(Coordinate::new(-33.8688, 151.2093)).unwrap();
        assert_eq!(url.path(), "/reverse");
        assert!(url.query().unwrap().starts_with("lat=-33.8688&lon=151.2093"));
    }

    #[test]
    fn test_client_creation_validates() {
        assert!(NominatimClient::with_config(ClientConfig::default().with_base_url("")).is_err());
        assert!(NominatimClient::with_config(ClientConfig::default().with_user_agent("bad\nagent")).is_err());
    }
}
