//! # Console Error Types
//!
//! Errors raised by the console host and the add-customer flow.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Patron                                 │
//! │                                                                         │
//! │  Load failure ─────► ApiError stored in the list cache (never raised)  │
//! │                                                                         │
//! │  Submit:                                                                │
//! │    validation fails ─► SubmitOutcome::Invalid   (flow stays usable)    │
//! │    request fails ────► SubmitOutcome::Failed    (draft preserved)      │
//! │    flow misused ─────► FlowError                (caller bug)           │
//! │                                                                         │
//! │  Host (binary):                                                         │
//! │    config / outcome ─► AppError ─► stderr + non-zero exit              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use patron_api::ClientError;
use patron_core::ValidationError;
use thiserror::Error;

use crate::state::FlowState;

/// Result type alias for host operations.
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for add-customer flow operations.
pub type FlowResult<T> = Result<T, FlowError>;

// =============================================================================
// Flow Error
// =============================================================================

/// Misuse of the add-customer flow.
///
/// Validation and request failures are outcomes, not errors; these variants
/// only cover calls the state machine does not accept in its current state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    /// The dialog is closed.
    #[error("Add-customer dialog is not open")]
    NotOpen,

    /// A submission is already in flight for this dialog.
    #[error("A submission is already in flight")]
    SubmissionInFlight,

    /// The draft cannot be edited in the current state.
    #[error("Draft cannot be edited while {0}")]
    NotEditable(FlowState),
}

// =============================================================================
// App Error
// =============================================================================

/// Errors surfaced by the `patron` binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to read or parse the config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to write the config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    /// The draft did not pass validation.
    #[error("Customer not added: {0}")]
    Validation(#[from] ValidationError),

    /// Request against the customer API failed.
    #[error("Customer API error: {0}")]
    Client(#[from] ClientError),

    /// Flow was driven from the wrong state.
    #[error("Add-customer flow error: {0}")]
    Flow(#[from] FlowError),

    /// The dialog was closed before the submission resolved.
    #[error("Submission abandoned before it completed")]
    SubmissionAbandoned,
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for AppError {
    fn from(err: toml::ser::Error) -> Self {
        AppError::ConfigSaveFailed(err.to_string())
    }
}

impl AppError {
    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            AppError::InvalidConfig(_) | AppError::ConfigLoadFailed(_) | AppError::ConfigSaveFailed(_)
        )
    }

    /// Returns true if running the same command again may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Client(e) if e.is_retryable())
    }
}
