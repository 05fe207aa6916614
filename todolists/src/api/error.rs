//! Error types for the backend API client

use thiserror::Error;

/// Errors that can occur when talking to the backend
///
/// Every variant means no usable response envelope was received. Responses that
/// arrive with a non-zero result code are not errors at this level; they are
/// returned as [`super::ApiResponse`] values for the caller to inspect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// HTTP request failed (connection refused, timeout, TLS, ...)
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Backend answered with a non-2xx status
    #[error("API error (status {status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// Response body was not the expected JSON
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),

    /// Base URL or endpoint path could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// API key contains characters not allowed in a header value
    #[error("Invalid API key")]
    InvalidApiKey,
}

impl ApiError {
    /// The human-readable detail of this error, without the variant prefix
    ///
    /// A status error never exposes the response body here. Empty when the
    /// transport gave no description.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::RequestFailed(message)
            | Self::ResponseParseFailed(message)
            | Self::InvalidUrl(message) => message.clone(),
            Self::Status { status, .. } => format!("Request failed with status code {status}"),
            Self::InvalidApiKey => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_strips_prefix() {
        let error = ApiError::RequestFailed("connection refused".to_string());
        assert_eq!(error.to_string(), "Request failed: connection refused");
        assert_eq!(error.message(), "connection refused");
    }

    #[test]
    fn test_status_message_hides_body() {
        let error = ApiError::Status {
            status: 502,
            message: "<html><body><h1>502 Bad Gateway</h1></body></html>".to_string(),
        };
        assert_eq!(error.message(), "Request failed with status code 502");
        assert!(error.to_string().contains("502 Bad Gateway"));
    }
}
