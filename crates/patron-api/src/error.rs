//! # Client Error Types
//!
//! Error types for calls against the customer API.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Client Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Response            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidUrl     │  │  Transport      │  │  Status (raw body)      │ │
//! │  │                 │  │  Timeout        │  │  Api ({code, message})  │ │
//! │  │                 │  │                 │  │  Decode                 │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  Every variant converts into an ApiError the view can display.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

// =============================================================================
// API Error Body
// =============================================================================

/// Error body returned by the customer API on a failed list request.
///
/// ## Serialization
/// ```json
/// {
///   "code": "DB_UNAVAILABLE",
///   "message": "Could not reach the customer database"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Machine-readable error code.
    pub code: String,

    /// Human-readable message for display.
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Builds an error from a non-2xx response.
    ///
    /// Parses the `{code, message}` body when present; otherwise synthesises
    /// an `HTTP_<status>` code and uses the raw body (or a generic message).
    pub fn from_status_body(status: u16, body: &str) -> Self {
        if let Ok(parsed) = serde_json::from_str::<ApiError>(body) {
            return parsed;
        }

        let body = body.trim();
        let message = if body.is_empty() {
            format!("Request failed with status {}", status)
        } else {
            body.to_string()
        };

        ApiError::new(format!("HTTP_{}", status), message)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Client Error
// =============================================================================

/// Failure of a single request against the customer API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configured base URL cannot be used.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Connection-level failure (DNS, refused, reset, ...).
    #[error("Request failed: {0}")]
    Transport(String),

    /// The transport gave up waiting for a response.
    #[error("Request timed out")]
    Timeout,

    /// Non-2xx response with an unstructured body.
    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Non-2xx response carrying a `{code, message}` body.
    #[error("Server returned {status}: {error}")]
    Api { status: u16, error: ApiError },

    /// A 2xx body that could not be decoded.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Returns true if repeating the same request could succeed.
    ///
    /// Nothing retries automatically; this only informs what the view offers.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Transport(_) | ClientError::Timeout => true,
            ClientError::Status { status, .. } | ClientError::Api { status, .. } => {
                *status >= 500
            }
            ClientError::InvalidUrl(_) | ClientError::Decode(_) => false,
        }
    }

    /// HTTP status of the response, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } | ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_builder() {
            ClientError::InvalidUrl(err.to_string())
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

/// Converts any client failure into the displayable error shape.
impl From<&ClientError> for ApiError {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::Api { error, .. } => error.clone(),
            ClientError::Status { status, body } => ApiError::from_status_body(*status, body),
            ClientError::Transport(e) => ApiError::new("NETWORK_ERROR", e.clone()),
            ClientError::Timeout => ApiError::new("TIMEOUT", "Request timed out"),
            ClientError::Decode(e) => ApiError::new("DECODE_ERROR", e.clone()),
            ClientError::InvalidUrl(e) => ApiError::new("INVALID_URL", e.clone()),
        }
    }
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        ApiError::from(&err)
    }
}
