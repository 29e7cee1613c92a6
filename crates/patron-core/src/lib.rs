//! # patron-core: Pure Domain Logic for Patron
//!
//! This crate holds the customer model and the add-customer validation rules
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Patron Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Host view (apps/console)                        │   │
//! │  │    CustomerListStore ◄── on_customer_added ── AddCustomerFlow   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 patron-api (HTTP contract)                      │   │
//! │  │        GET /api/customers        POST /api/customers            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ patron-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────┐   ┌────────────────┐   ┌──────────────┐       │   │
//! │  │   │   types    │   │   validation   │   │    error     │       │   │
//! │  │   │  Customer  │   │ validate_draft │   │ Validation-  │       │   │
//! │  │   │  Draft     │   │ validate_email │   │ Error        │       │   │
//! │  │   └────────────┘   └────────────────┘   └──────────────┘       │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO TIMERS • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Customer, CustomerDraft, DraftField)
//! - [`error`] - Domain error types
//! - [`validation`] - Draft validation gate
//!
//! ## Example Usage
//!
//! ```rust
//! use patron_core::{validation::validate_draft, CustomerDraft};
//!
//! let draft = CustomerDraft::new("Ada", "Lovelace", "", "ada@x.com");
//! assert!(validate_draft(&draft).is_ok());
//!
//! let customer = draft.to_customer();
//! assert_eq!(customer.display_name(), "Ada Lovelace");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Path of the customer collection endpoint, relative to the API base URL.
pub const CUSTOMERS_PATH: &str = "/api/customers";

/// How long the invalid-submission feedback cue stays raised, in milliseconds.
///
/// After this delay the add-customer flow returns from `Invalid` to `Editing`.
pub const INVALID_FEEDBACK_DELAY_MS: u64 = 500;
