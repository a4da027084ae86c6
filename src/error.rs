//! Error types for the Animia SMS dispatcher.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use thiserror::Error;

/// Errors that can occur when interacting with the Animia backend API.
#[derive(Error, Debug)]
pub enum SmsApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Authentication failed
    #[error("Authentication failed")]
    Unauthorized,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Backend answered 2xx but reported `success: false`
    #[error("Request rejected by backend: {0}")]
    Rejected(String),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Errors reported by a delivery channel.
///
/// Channels never panic or abort a batch; callers turn these into a failed
/// outcome and move on to the next channel or destination.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChannelError {
    /// The user (or platform) refused the SMS permission
    #[error("SMS permission denied")]
    PermissionDenied,

    /// The channel cannot be used on this platform
    #[error("Channel unavailable: {0}")]
    Unavailable(String),

    /// The send primitive failed on every attempt
    #[error("SMS sending failed after {attempts} attempt(s): {reason}")]
    SendFailed { attempts: u32, reason: String },

    /// No handler could be opened for the messaging URI
    #[error("Cannot open SMS app: {0}")]
    OpenFailed(String),
}

/// Convenience type alias for Results with SmsApiError
pub type SmsApiResult<T> = Result<T, SmsApiError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with ChannelError
pub type ChannelResult<T> = Result<T, ChannelError>;
