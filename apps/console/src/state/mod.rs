//! # State Module
//!
//! Client-side state for the customer list and the add-customer dialog.
//!
//! ## Why Multiple State Types?
//! The list and the dialog have independent lifecycles: the list loads once
//! and is appended to, the dialog opens and closes many times. Each type owns
//! its own lock so neither blocks the other.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────┐  on_customer_added  ┌──────────────────────┐ │
//! │  │  CustomerListStore   │ ◄────────────────── │  AddCustomerFlow     │ │
//! │  │                      │                     │                      │ │
//! │  │  Arc<Mutex<          │                     │  Arc<Mutex<          │ │
//! │  │    CacheSnapshot>>   │                     │    FlowInner>>       │ │
//! │  │                      │                     │  + FeedbackCue       │ │
//! │  └──────────┬───────────┘                     └──────────┬───────────┘ │
//! │             │ GET /api/customers                         │ POST        │
//! │             └──────────────────► CustomerApi ◄───────────┘             │
//! │                                                                         │
//! │  LOCKING RULES:                                                         │
//! │  • std::sync::Mutex, never held across an .await                       │
//! │  • Appends read and write the cache under a single lock                │
//! │  • Callbacks run with no lock held                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod add_customer;
mod config;
mod customers;
mod feedback;

pub use add_customer::{AddCustomerFlow, FlowEvents, FlowState, NoOpEvents, SubmitOutcome};
pub use config::{ApiSettings, FormSettings, PatronConfig};
pub use customers::{CacheSnapshot, CustomerListStore};
pub use feedback::FeedbackCue;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Locks a state mutex, recovering the data if a previous holder panicked.
///
/// Every critical section in this module leaves the data consistent before
/// any call that could panic, so the inner value is still usable.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
