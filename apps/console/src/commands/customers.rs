//! # Customer Commands
//!
//! `patron list` and `patron add`.

use patron_core::{Customer, CustomerDraft, DraftField};
use tracing::{info, warn};

use super::Console;
use crate::error::{AppError, AppResult};
use crate::state::SubmitOutcome;
use crate::view::render_list;

/// Loads the list and renders it.
///
/// A failed load is not an error here: it is rendered as the list's
/// error line.
pub async fn list_customers(console: &Console) -> String {
    let snapshot = console.store.load().await;
    render_list(&snapshot)
}

/// Loads the list, adds one customer through the dialog and returns the
/// customer as reported to the list.
///
/// The dialog is cancelled again if the submission does not go through, so
/// the draft never outlives the command.
pub async fn add_customer(console: &Console, draft: &CustomerDraft) -> AppResult<Customer> {
    console.store.load().await;

    let flow = &console.flow;
    flow.open();
    for field in DraftField::ALL {
        flow.set_field(field, draft.get(field))?;
    }

    match flow.submit().await? {
        SubmitOutcome::Added(customer) => {
            info!(email = %customer.email, total = console.store.total(), "Customer listed");
            Ok(customer)
        }
        SubmitOutcome::Invalid(invalid) => {
            flow.cancel();
            Err(AppError::Validation(invalid))
        }
        SubmitOutcome::Failed(e) => {
            warn!(error = %e, "Closing dialog after failed submission");
            flow.cancel();
            Err(AppError::Client(e))
        }
        SubmitOutcome::Abandoned => Err(AppError::SubmissionAbandoned),
    }
}
