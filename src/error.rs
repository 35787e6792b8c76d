//! Error types for Bitbucket Server client operations

use thiserror::Error;

/// Structured error types for Bitbucket Server client operations
///
/// The taxonomy is closed on purpose: callers branch on variants, never on
/// message contents.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never completed: DNS failure, connection refused,
    /// timeout, TLS failure
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server returned a success status but the body is not valid JSON,
    /// or promised a body and sent none
    #[error("malformed response from {endpoint}")]
    MalformedResponse {
        endpoint: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// The body was valid JSON but did not match the expected shape
    #[error("failed to decode response from {endpoint}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// The request body could not be serialized; nothing was sent
    #[error("failed to encode request body")]
    Encoding(#[source] serde_json::Error),

    /// Authentication or authorization rejected by the server (HTTP 401)
    #[error("permission denied")]
    Permission,

    /// Resource does not exist (HTTP 404)
    #[error("not found: {resource}")]
    NotFound { resource: String },

    /// Any other non-success status, with the raw status code for inspection
    #[error("request failed with HTTP {status}")]
    RequestFailed { status: u16, body: String },

    /// Configuration is invalid
    #[error("configuration error: {0}")]
    Config(String),

    /// Configuration field validation failed
    #[error("invalid {field}: {message}")]
    ConfigValidation { field: String, message: String },

    /// A resource key was empty
    #[error("project key cannot be empty")]
    InvalidKey,

    /// The token source failed to produce a credential
    #[error("credential error: {0}")]
    Credentials(String),

    /// The base endpoint could not be parsed as a URL
    #[error("invalid URL: {url}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl ClientError {
    /// Create a malformed-response error with endpoint context
    pub fn malformed_response(endpoint: impl Into<String>, source: serde_json::Error) -> Self {
        Self::MalformedResponse { endpoint: endpoint.into(), source: Some(source) }
    }

    /// Create a malformed-response error for a success response that
    /// promised a body but sent none
    pub fn missing_body(endpoint: impl Into<String>) -> Self {
        Self::MalformedResponse { endpoint: endpoint.into(), source: None }
    }

    /// Create a decode error with endpoint context
    pub fn decode(endpoint: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode { endpoint: endpoint.into(), source }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a configuration field validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation { field: field.into(), message: message.into() }
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a credential error
    pub fn credentials(message: impl Into<String>) -> Self {
        Self::Credentials(message.into())
    }

    /// Create a request-failed error from a raw status and body
    pub fn request_failed(status: u16, body: impl Into<String>) -> Self {
        Self::RequestFailed { status, body: body.into() }
    }

    /// Check if this error is safe to retry
    ///
    /// Only transport-level failures qualify. The client never retries
    /// internally; `create` in particular is not idempotent.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = ClientError::config("missing base URL");
        assert!(matches!(err, ClientError::Config(_)));
        assert_eq!(err.to_string(), "configuration error: missing base URL");
    }

    #[test]
    fn test_not_found_display() {
        let err = ClientError::not_found("projects/NOPE");
        assert!(matches!(err, ClientError::NotFound { .. }));
        assert_eq!(err.to_string(), "not found: projects/NOPE");
    }

    #[test]
    fn test_request_failed_carries_status() {
        let err = ClientError::request_failed(503, "Service Unavailable");
        match err {
            ClientError::RequestFailed { status, .. } => assert_eq!(status, 503),
            _ => panic!("expected RequestFailed"),
        }
    }

    #[test]
    fn test_retryable_errors() {
        assert!(!ClientError::Permission.is_retryable());
        assert!(!ClientError::request_failed(500, "").is_retryable());
        assert!(!ClientError::config("test").is_retryable());
    }

    #[test]
    fn test_malformed_vs_decode_are_distinct() {
        let syntax = serde_json::from_str::<serde_json::Value>("not-json").unwrap_err();
        let err = ClientError::malformed_response("projects", syntax);
        assert!(matches!(err, ClientError::MalformedResponse { .. }));

        let shape = serde_json::from_str::<u32>("\"seven\"").unwrap_err();
        let err = ClientError::decode("projects", shape);
        assert!(matches!(err, ClientError::Decode { .. }));
    }

    #[test]
    fn test_missing_body_is_malformed() {
        let err = ClientError::missing_body("projects/DEMO");
        assert!(matches!(err, ClientError::MalformedResponse { source: None, .. }));
        assert_eq!(err.to_string(), "malformed response from projects/DEMO");
    }
}
