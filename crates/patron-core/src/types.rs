//! # Domain Types
//!
//! Core domain types used throughout Patron.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐   to_customer()   ┌─────────────────────┐     │
//! │  │   CustomerDraft     │ ────────────────► │      Customer       │     │
//! │  │  ─────────────────  │                   │  ─────────────────  │     │
//! │  │  first_name         │                   │  first_name         │     │
//! │  │  last_name          │                   │  last_name          │     │
//! │  │  business_name      │                   │  business_name ("") │     │
//! │  │  email              │                   │  email (row key)    │     │
//! │  └─────────────────────┘                   │  extra (server-only)│     │
//! │                                            └─────────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Shape
//! Customers travel as camelCase JSON. `businessName` is optional on the way
//! in (defaults to `""`) and always present on the way out. Fields the server
//! adds (such as `id`) are kept in `extra` and written back unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreResult;

// =============================================================================
// Customer
// =============================================================================

/// One customer record.
///
/// Email is the display key for list rows. Uniqueness is a server concern and
/// is not enforced here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub first_name: String,

    pub last_name: String,

    /// Optional business name. Absent on the wire means empty.
    #[serde(default)]
    pub business_name: String,

    pub email: String,

    /// Any additional fields returned by the server, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Customer {
    /// Creates a customer with no server-side extras.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        business_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Customer {
            first_name: first_name.into(),
            last_name: last_name.into(),
            business_name: business_name.into(),
            email: email.into(),
            extra: Map::new(),
        }
    }

    /// Parses a customer from a JSON document.
    pub fn from_json(text: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serializes the customer to JSON.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Full name as shown in the list ("First Last").
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Key used to identify the row in a rendered list.
    pub fn row_key(&self) -> &str {
        &self.email
    }

    /// Returns a server-provided field that is not part of the core shape.
    pub fn extra_field(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }
}

/// The customer collection in server order followed by optimistic appends.
pub type Customers = Vec<Customer>;

// =============================================================================
// Customer Draft
// =============================================================================

/// The four editable fields of the add-customer form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    FirstName,
    LastName,
    BusinessName,
    Email,
}

impl DraftField {
    /// All fields in form order.
    pub const ALL: [DraftField; 4] = [
        DraftField::FirstName,
        DraftField::LastName,
        DraftField::BusinessName,
        DraftField::Email,
    ];

    /// Wire name of the field (camelCase).
    pub fn wire_name(&self) -> &'static str {
        match self {
            DraftField::FirstName => "firstName",
            DraftField::LastName => "lastName",
            DraftField::BusinessName => "businessName",
            DraftField::Email => "email",
        }
    }

    /// Whether the field must be filled before submission.
    pub fn is_required(&self) -> bool {
        !matches!(self, DraftField::BusinessName)
    }
}

impl std::fmt::Display for DraftField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

/// In-progress, unsaved values of the add-customer form.
///
/// Created empty when the dialog opens and reset to empty when it closes.
/// Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerDraft {
    pub first_name: String,
    pub last_name: String,
    pub business_name: String,
    pub email: String,
}

impl CustomerDraft {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        business_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        CustomerDraft {
            first_name: first_name.into(),
            last_name: last_name.into(),
            business_name: business_name.into(),
            email: email.into(),
        }
    }

    /// Returns the current value of a field.
    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::FirstName => &self.first_name,
            DraftField::LastName => &self.last_name,
            DraftField::BusinessName => &self.business_name,
            DraftField::Email => &self.email,
        }
    }

    /// Replaces the value of a field.
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::FirstName => self.first_name = value,
            DraftField::LastName => self.last_name = value,
            DraftField::BusinessName => self.business_name = value,
            DraftField::Email => self.email = value,
        }
    }

    /// Clears every field.
    pub fn clear(&mut self) {
        *self = CustomerDraft::default();
    }

    /// True when every field is empty.
    pub fn is_empty(&self) -> bool {
        DraftField::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    /// Builds the customer value that is sent to the server.
    ///
    /// Values are taken exactly as typed; this is also the fallback
    /// "created" customer when the server answers with an empty body.
    pub fn to_customer(&self) -> Customer {
        Customer::new(
            self.first_name.clone(),
            self.last_name.clone(),
            self.business_name.clone(),
            self.email.clone(),
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
