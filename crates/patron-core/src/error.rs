//! # Error Types
//!
//! Domain-specific error types for patron-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  patron-core errors (this file)                                        │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Draft validation failures                      │
//! │                                                                         │
//! │  patron-api errors (separate crate)                                    │
//! │  ├── ClientError      - Transport / status / decode failures           │
//! │  └── ApiError         - { code, message } body shown to the user       │
//! │                                                                         │
//! │  console errors (in app)                                               │
//! │  ├── FlowError        - Add-customer flow misuse                       │
//! │  └── AppError         - Configuration and startup                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the offending field in the message
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A customer payload could not be decoded from its JSON form.
    #[error("Malformed customer payload: {0}")]
    MalformedCustomer(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::MalformedCustomer(err.to_string())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Draft validation errors.
///
/// These never leave the client: a draft that fails validation is not sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value does not have the expected shape.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Returns the name of the field that failed.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field } => field,
            ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
