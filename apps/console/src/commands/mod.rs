//! # Console Commands
//!
//! Operations the `patron` binary exposes, one module per area.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (Console wiring)
//! └── customers.rs  ◄─── list / add
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Console Command Flow                                 │
//! │                                                                         │
//! │  patron add --first-name Ada --last-name Lovelace --email ada@x.io     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  customers::add_customer(&console, draft)                               │
//! │         │  store.load()            GET  /api/customers                  │
//! │         │  flow.open() + set_field                                      │
//! │         │  flow.submit()           POST /api/customers                  │
//! │         │     └─► ListDialog::on_customer_added ─► store append         │
//! │         ▼                                                               │
//! │  view::render_list(store.snapshot())  ─► stdout                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod customers;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use patron_api::CustomerApi;
use patron_core::Customer;
use tracing::debug;

use crate::state::{AddCustomerFlow, CustomerListStore, FlowEvents};

/// The list view's handler for dialog callbacks.
///
/// Appends created customers to the cached list and tracks whether the
/// dialog is currently shown.
pub struct ListDialog {
    store: CustomerListStore,
    closed: AtomicBool,
}

impl ListDialog {
    pub fn new(store: CustomerListStore) -> Self {
        ListDialog {
            store,
            closed: AtomicBool::new(false),
        }
    }

    /// True once the dialog reported that it closed.
    pub fn was_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl FlowEvents for ListDialog {
    fn on_customer_added(&self, customer: &Customer) {
        if !self.store.apply_optimistic_append(customer.clone()) {
            debug!(email = %customer.email, "Customer added before the list loaded");
        }
    }

    fn on_close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

/// The list view and its add-customer dialog, wired together.
#[derive(Clone)]
pub struct Console {
    pub store: CustomerListStore,
    pub flow: AddCustomerFlow,
    pub dialog: Arc<ListDialog>,
}

impl Console {
    pub fn new(api: Arc<dyn CustomerApi>, feedback_delay: Duration) -> Self {
        let store = CustomerListStore::new(Arc::clone(&api));
        let dialog = Arc::new(ListDialog::new(store.clone()));
        let flow = AddCustomerFlow::new(api, dialog.clone(), feedback_delay);

        Console {
            store,
            flow,
            dialog,
        }
    }
}
