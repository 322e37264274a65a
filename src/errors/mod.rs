//! Error types for the Instagram client.

use std::fmt;
use thiserror::Error;

/// Result type alias for Instagram operations.
pub type InstagramResult<T> = Result<T, InstagramError>;

/// Error kinds for categorizing Instagram errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstagramErrorKind {
    // Configuration errors
    /// Missing authentication configuration.
    MissingAuth,
    /// Invalid base URL.
    InvalidBaseUrl,
    /// Invalid configuration.
    InvalidConfiguration,

    // Authentication errors
    /// Invalid token format or value.
    InvalidToken,
    /// Bad credentials.
    BadCredentials,
    /// Access forbidden.
    Forbidden,

    // Request errors
    /// Invalid parameter.
    InvalidParameter,

    // Resource errors
    /// Resource not found (404).
    NotFound,
    /// A username lookup matched no users.
    UserNotFound,

    // Rate limit errors
    /// Rate limit exceeded.
    RateLimitExceeded,

    // Network errors
    /// Connection failed.
    ConnectionFailed,
    /// Request timeout.
    Timeout,

    // Response errors
    /// Failed to deserialize response.
    DeserializationError,

    // Server errors
    /// Internal server error (500).
    InternalError,
    /// Bad gateway (502).
    BadGateway,
    /// Service unavailable (503).
    ServiceUnavailable,

    // Generic
    /// Unknown error.
    Unknown,
}

impl fmt::Display for InstagramErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAuth => write!(f, "missing_auth"),
            Self::InvalidBaseUrl => write!(f, "invalid_base_url"),
            Self::InvalidConfiguration => write!(f, "invalid_configuration"),
            Self::InvalidToken => write!(f, "invalid_token"),
            Self::BadCredentials => write!(f, "bad_credentials"),
            Self::Forbidden => write!(f, "forbidden"),
            Self::InvalidParameter => write!(f, "invalid_parameter"),
            Self::NotFound => write!(f, "not_found"),
            Self::UserNotFound => write!(f, "user_not_found"),
            Self::RateLimitExceeded => write!(f, "rate_limit_exceeded"),
            Self::ConnectionFailed => write!(f, "connection_failed"),
            Self::Timeout => write!(f, "timeout"),
            Self::DeserializationError => write!(f, "deserialization_error"),
            Self::InternalError => write!(f, "internal_error"),
            Self::BadGateway => write!(f, "bad_gateway"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Instagram API error with detailed information.
#[derive(Error, Debug)]
pub struct InstagramError {
    /// Error kind.
    kind: InstagramErrorKind,
    /// Error message.
    message: String,
    /// HTTP status code.
    status_code: Option<u16>,
    /// Error type reported in the API's error envelope.
    error_type: Option<String>,
    /// Underlying cause.
    #[source]
    cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for InstagramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(code) = self.status_code {
            write!(f, " (HTTP {})", code)?;
        }
        if let Some(ref error_type) = self.error_type {
            write!(f, " [error_type: {}]", error_type)?;
        }
        Ok(())
    }
}

impl InstagramError {
    /// Creates a new Instagram error.
    pub fn new(kind: InstagramErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status_code: None,
            error_type: None,
            cause: None,
        }
    }

    /// Sets the HTTP status code.
    pub fn with_status(mut self, code: u16) -> Self {
        self.status_code = Some(code);
        self
    }

    /// Sets the error type reported by the API.
    pub fn with_error_type(mut self, error_type: impl Into<String>) -> Self {
        self.error_type = Some(error_type.into());
        self
    }

    /// Sets the underlying cause.
    pub fn with_cause(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Gets the error kind.
    pub fn kind(&self) -> &InstagramErrorKind {
        &self.kind
    }

    /// Gets the HTTP status code.
    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// Gets the error type reported by the API.
    pub fn error_type(&self) -> Option<&str> {
        self.error_type.as_deref()
    }

    /// Returns true if this error is retryable.
    ///
    /// The client performs no retries itself; callers can use this to drive
    /// their own policy.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind,
            InstagramErrorKind::RateLimitExceeded
                | InstagramErrorKind::ConnectionFailed
                | InstagramErrorKind::Timeout
                | InstagramErrorKind::InternalError
                | InstagramErrorKind::BadGateway
                | InstagramErrorKind::ServiceUnavailable
        )
    }

    /// Creates an error from an HTTP status code and API error envelope fields.
    pub fn from_response(status: u16, error_type: Option<String>, message: String) -> Self {
        let kind = Self::kind_from_status(status, error_type.as_deref());
        let mut error = Self::new(kind, message).with_status(status);

        if let Some(error_type) = error_type {
            error = error.with_error_type(error_type);
        }

        error
    }

    /// Maps an HTTP status code and envelope error type to an error kind.
    ///
    /// OAuth failures arrive with HTTP 400, so the envelope's error type takes
    /// precedence over the bare status.
    fn kind_from_status(status: u16, error_type: Option<&str>) -> InstagramErrorKind {
        match error_type {
            Some("OAuthAccessTokenException") => return InstagramErrorKind::BadCredentials,
            Some("OAuthParameterException") => return InstagramErrorKind::InvalidParameter,
            Some("OAuthRateLimitException") => return InstagramErrorKind::RateLimitExceeded,
            Some("APINotFoundError") => return InstagramErrorKind::NotFound,
            Some("APINotAllowedError") => return InstagramErrorKind::Forbidden,
            _ => {}
        }

        match status {
            400 => InstagramErrorKind::InvalidParameter,
            401 => InstagramErrorKind::BadCredentials,
            403 => InstagramErrorKind::Forbidden,
            404 => InstagramErrorKind::NotFound,
            429 => InstagramErrorKind::RateLimitExceeded,
            500 => InstagramErrorKind::InternalError,
            502 => InstagramErrorKind::BadGateway,
            503 => InstagramErrorKind::ServiceUnavailable,
            _ => InstagramErrorKind::Unknown,
        }
    }

    // Convenience constructors

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(InstagramErrorKind::InvalidConfiguration, message)
    }

    /// Creates an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(InstagramErrorKind::BadCredentials, message)
    }

    /// Creates a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(InstagramErrorKind::NotFound, message).with_status(404)
    }

    /// Creates an error for a username lookup that matched no users.
    pub fn user_not_found(message: impl Into<String>) -> Self {
        Self::new(InstagramErrorKind::UserNotFound, message)
    }

    /// Creates a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(InstagramErrorKind::Timeout, message)
    }

    /// Creates a deserialization error.
    pub fn deserialization(message: impl Into<String>) -> Self {
        Self::new(InstagramErrorKind::DeserializationError, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = InstagramError::new(InstagramErrorKind::NotFound, "User not found")
            .with_status(404)
            .with_error_type("APINotFoundError");

        let display = format!("{}", error);
        assert!(display.contains("not_found"));
        assert!(display.contains("User not found"));
        assert!(display.contains("404"));
        assert!(display.contains("APINotFoundError"));
    }

    #[test]
    fn test_is_retryable() {
        let retryable = InstagramError::new(InstagramErrorKind::Timeout, "timeout");
        assert!(retryable.is_retryable());

        let not_retryable = InstagramError::user_not_found("no match");
        assert!(!not_retryable.is_retryable());
    }

    #[test]
    fn test_from_response_status_mapping() {
        let error = InstagramError::from_response(404, None, "Not Found".to_string());
        assert_eq!(*error.kind(), InstagramErrorKind::NotFound);
        assert_eq!(error.status_code(), Some(404));
    }

    #[test]
    fn test_from_response_oauth_error_type_wins() {
        let error = InstagramError::from_response(
            400,
            Some("OAuthAccessTokenException".to_string()),
            "The access_token provided is invalid.".to_string(),
        );

        assert_eq!(*error.kind(), InstagramErrorKind::BadCredentials);
        assert_eq!(error.error_type(), Some("OAuthAccessTokenException"));
    }

    #[test]
    fn test_user_not_found_is_distinct_from_not_found() {
        let local = InstagramError::user_not_found("no user matching 'ghost'");
        let remote = InstagramError::not_found("missing");

        assert_ne!(local.kind(), remote.kind());
        assert_eq!(local.status_code(), None);
        assert_eq!(remote.status_code(), Some(404));
    }
}
