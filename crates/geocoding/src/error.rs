//! Error types for the geocoding client

use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Geocoding client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed (connection, timeout, body decoding)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Service returned a non-success status
    #[error("API error ({status}): {message}")]
    ApiResponse {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an API response error
    pub fn api_response(status: u16, message: impl Into<String>) -> Self {
        Self::ApiResponse {
            status,
            message: message.into(),
        }
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiResponse { status, .. } if (400..500).contains(status))
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiResponse { status, .. } if *status >= 500)
    }

    /// Check if the request never produced a response
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Request(e) if e.is_request() || e.is_timeout())
    }
}

impl From<ApiError> for branchen_core::Error {
    fn from(err: ApiError) -> Self {
        use branchen_core::ErrorCode;

        let code = match &err {
            ApiError::Config(_) | ApiError::InvalidUrl(_) => ErrorCode::InvalidConfigValue,
            _ => ErrorCode::GeocodingFailed,
        };
        branchen_core::Error::new(code, err.to_string()).with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(ApiError::api_response(429, "slow down").is_client_error());
        assert!(ApiError::api_response(503, "maintenance").is_server_error());
        assert!(!ApiError::config("x").is_server_error());
    }

    #[test]
    fn test_into_core_error() {
        let core: branchen_core::Error = ApiError::api_response(500, "boom").into();
        assert_eq!(core.code, branchen_core::ErrorCode::GeocodingFailed);

        let core: branchen_core::Error = ApiError::InvalidUrl("::".into()).into();
        assert_eq!(core.code, branchen_core::ErrorCode::InvalidConfigValue);
    }
}
