//! # Validation Module
//!
//! The validation gate that runs before an add-customer submission.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: THIS MODULE (client)                                          │
//! │  ├── firstName, lastName, email must not be empty                      │
//! │  ├── email must contain '@'                                            │
//! │  └── businessName is never checked                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Server                                                        │
//! │  └── Uniqueness, stricter formats (reported as success/failure only)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use patron_core::validation::validate_email;
//!
//! assert!(validate_email("a@b").is_ok());
//! assert!(validate_email("no-at-sign").is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{CustomerDraft, DraftField};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a required text field.
///
/// ## Rules
/// - Must not be empty; whitespace counts as a value
pub fn validate_required(field: DraftField, value: &str) -> ValidationResult<()> {
    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.wire_name().to_string(),
        });
    }

    Ok(())
}

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - Must contain `@` (nothing stricter: `"a@b"` passes)
pub fn validate_email(email: &str) -> ValidationResult<()> {
    validate_required(DraftField::Email, email)?;

    if !email.contains('@') {
        return Err(ValidationError::InvalidFormat {
            field: DraftField::Email.wire_name().to_string(),
            reason: "must contain '@'".to_string(),
        });
    }

    Ok(())
}

/// Validates a whole draft, returning the first failure in form order.
///
/// ## Example
/// ```rust
/// use patron_core::{validation::validate_draft, CustomerDraft};
///
/// let ok = CustomerDraft::new("Ada", "Lovelace", "", "ada@x.com");
/// assert!(validate_draft(&ok).is_ok());
///
/// let missing_last = CustomerDraft::new("Ada", "", "", "ada@x.com");
/// assert!(validate_draft(&missing_last).is_err());
/// ```
pub fn validate_draft(draft: &CustomerDraft) -> ValidationResult<()> {
    validate_required(DraftField::FirstName, &draft.first_name)?;
    validate_required(DraftField::LastName, &draft.last_name)?;
    validate_email(&draft.email)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
