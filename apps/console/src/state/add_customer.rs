//! # Add-Customer Flow
//!
//! State machine behind the "Add customer" dialog: open, edit, submit, close.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Add-Customer Dialog States                           │
//! │                                                                         │
//! │            open()                      submit(), draft valid            │
//! │   ┌──────┐ ─────► ┌─────────┐ ────────────────────────► ┌────────────┐ │
//! │   │ Idle │        │ Editing │                           │ Submitting │ │
//! │   └──────┘ ◄───── └─────────┘ ◄──────────────────────── └────────────┘ │
//! │      ▲    cancel()   │    ▲        request failed             │        │
//! │      │               │    │        (draft kept)               │        │
//! │      │  submit(),    ▼    │ cue expired                       │        │
//! │      │  invalid  ┌─────────┐                                  │        │
//! │      │           │ Invalid │                                  │        │
//! │      │           └─────────┘                                  │        │
//! │      └────────────────────────────────────────────────────────┘        │
//! │             request succeeded: on_customer_added, then on_close         │
//! │                                                                         │
//! │  cancel() from any open state returns to Idle and clears the draft.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Detached Submissions
//! Cancelling while `Submitting` closes the dialog at once. The request is
//! not aborted: if it later succeeds the customer is still reported through
//! `on_customer_added` (the row exists on the server), but `on_close` is not
//! fired a second time and the fresh dialog state is left untouched.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use patron_api::{ClientError, CustomerApi};
use patron_core::validation::validate_draft;
use patron_core::{Customer, CustomerDraft, DraftField, ValidationError};
use serde::Serialize;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::feedback::FeedbackCue;
use super::lock;
use crate::error::{FlowError, FlowResult};

// =============================================================================
// Flow State
// =============================================================================

/// Where the dialog is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowState {
    /// Dialog closed.
    #[default]
    Idle,

    /// Dialog open, accepting input.
    Editing,

    /// Last submission failed validation; the feedback cue is raised.
    Invalid,

    /// Create request in flight.
    Submitting,
}

impl FlowState {
    /// True for every state in which the dialog is visible.
    pub fn is_open(&self) -> bool {
        !matches!(self, FlowState::Idle)
    }
}

impl std::fmt::Display for FlowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlowState::Idle => write!(f, "idle"),
            FlowState::Editing => write!(f, "editing"),
            FlowState::Invalid => write!(f, "invalid"),
            FlowState::Submitting => write!(f, "submitting"),
        }
    }
}

// =============================================================================
// Flow Events
// =============================================================================

/// Callbacks the host supplies to observe the dialog.
///
/// Invoked on the submitting task with no flow lock held.
pub trait FlowEvents: Send + Sync {
    /// A customer was created. Fires exactly once per successful request.
    fn on_customer_added(&self, customer: &Customer);

    /// The dialog closed, through success or cancel.
    fn on_close(&self);
}

/// Event sink that ignores everything.
pub struct NoOpEvents;

impl FlowEvents for NoOpEvents {
    fn on_customer_added(&self, _customer: &Customer) {}
    fn on_close(&self) {}
}

// =============================================================================
// Submit Outcome
// =============================================================================

/// Result of a submit attempt that the flow accepted.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Created. Carries the server's echo, or the submitted values when the
    /// server answered with an empty body.
    Added(Customer),

    /// Validation failed; no request was issued.
    Invalid(ValidationError),

    /// The request failed; the dialog is back in `Editing` with the draft kept.
    Failed(ClientError),

    /// The request failed after the dialog had already been cancelled.
    Abandoned,
}

impl SubmitOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, SubmitOutcome::Added(_))
    }
}

// =============================================================================
// Add-Customer Flow
// =============================================================================

#[derive(Debug, Default)]
struct FlowInner {
    state: FlowState,
    draft: CustomerDraft,
    /// Correlation id of the submission the open dialog is waiting on.
    in_flight: Option<Uuid>,
}

/// Drives a single add-customer dialog.
///
/// Cloning yields another handle to the same dialog.
#[derive(Clone)]
pub struct AddCustomerFlow {
    inner: Arc<Mutex<FlowInner>>,
    cue: FeedbackCue,
    api: Arc<dyn CustomerApi>,
    events: Arc<dyn FlowEvents>,
}

impl AddCustomerFlow {
    /// Creates a closed dialog.
    ///
    /// `feedback_delay` is how long the invalid-submission cue stays raised.
    pub fn new(
        api: Arc<dyn CustomerApi>,
        events: Arc<dyn FlowEvents>,
        feedback_delay: Duration,
    ) -> Self {
        AddCustomerFlow {
            inner: Arc::new(Mutex::new(FlowInner::default())),
            cue: FeedbackCue::new(feedback_delay),
            api,
            events,
        }
    }

    /// Opens the dialog with an empty draft. No-op if already open.
    pub fn open(&self) {
        let mut inner = lock(&self.inner);
        if inner.state.is_open() {
            debug!(state = %inner.state, "Dialog already open");
            return;
        }
        inner.state = FlowState::Editing;
        inner.draft.clear();
        debug!("Add-customer dialog opened");
    }

    /// Replaces one draft field with the raw value the user typed.
    pub fn set_field(&self, field: DraftField, value: impl Into<String>) -> FlowResult<()> {
        let mut inner = lock(&self.inner);
        match inner.state {
            FlowState::Idle => Err(FlowError::NotOpen),
            FlowState::Submitting => Err(FlowError::NotEditable(FlowState::Submitting)),
            FlowState::Editing | FlowState::Invalid => {
                inner.draft.set(field, value);
                Ok(())
            }
        }
    }

    pub fn set_first_name(&self, value: impl Into<String>) -> FlowResult<()> {
        self.set_field(DraftField::FirstName, value)
    }

    pub fn set_last_name(&self, value: impl Into<String>) -> FlowResult<()> {
        self.set_field(DraftField::LastName, value)
    }

    pub fn set_business_name(&self, value: impl Into<String>) -> FlowResult<()> {
        self.set_field(DraftField::BusinessName, value)
    }

    pub fn set_email(&self, value: impl Into<String>) -> FlowResult<()> {
        self.set_field(DraftField::Email, value)
    }

    /// Validates the draft and, if it passes, creates the customer.
    ///
    /// ## Outcomes
    /// - invalid draft: state `Invalid`, cue raised, no request
    /// - created: `on_customer_added`, then the dialog closes (`on_close`)
    /// - request failed: back to `Editing`, draft preserved, no callback
    ///
    /// Returns `Err` only when the dialog is closed or already submitting.
    pub async fn submit(&self) -> FlowResult<SubmitOutcome> {
        let (submission, submitted) = {
            let mut inner = lock(&self.inner);
            match inner.state {
                FlowState::Idle => return Err(FlowError::NotOpen),
                FlowState::Submitting => return Err(FlowError::SubmissionInFlight),
                FlowState::Editing | FlowState::Invalid => {}
            }

            if let Err(invalid) = validate_draft(&inner.draft) {
                // The cue generation must advance before any timer can see
                // the new Invalid state.
                inner.state = FlowState::Invalid;
                self.raise_invalid_cue();
                drop(inner);

                info!(field = invalid.field(), "Submission rejected by validation");
                return Ok(SubmitOutcome::Invalid(invalid));
            }

            let submission = Uuid::new_v4();
            inner.state = FlowState::Submitting;
            inner.in_flight = Some(submission);
            (submission, inner.draft.to_customer())
        };

        self.cue.cancel();
        debug!(%submission, email = %submitted.email, "Submitting new customer");

        let result = self.api.create_customer(&submitted).await;
        let submitted_email = submitted.email.clone();

        match result {
            Ok(body) => {
                let created = body.unwrap_or(submitted);
                let attached = {
                    let mut inner = lock(&self.inner);
                    let attached = inner.in_flight == Some(submission);
                    if attached {
                        inner.in_flight = None;
                        inner.state = FlowState::Idle;
                        inner.draft.clear();
                    }
                    attached
                };

                info!(%submission, email = %created.email, attached, "Customer added");
                self.events.on_customer_added(&created);
                if attached {
                    self.events.on_close();
                }

                Ok(SubmitOutcome::Added(created))
            }
            Err(e) => {
                let attached = {
                    let mut inner = lock(&self.inner);
                    let attached = inner.in_flight == Some(submission);
                    if attached {
                        inner.in_flight = None;
                        inner.state = FlowState::Editing;
                    }
                    attached
                };

                if attached {
                    error!(
                        %submission,
                        email = %submitted_email,
                        status = ?e.status(),
                        error = %e,
                        "Failed to add customer"
                    );
                    Ok(SubmitOutcome::Failed(e))
                } else {
                    warn!(%submission, error = %e, "Abandoned submission failed");
                    Ok(SubmitOutcome::Abandoned)
                }
            }
        }
    }

    /// Closes the dialog and discards the draft.
    ///
    /// Returns false (and fires nothing) when the dialog was already closed.
    pub fn cancel(&self) -> bool {
        {
            let mut inner = lock(&self.inner);
            if !inner.state.is_open() {
                return false;
            }
            if let Some(submission) = inner.in_flight.take() {
                debug!(%submission, "Detaching in-flight submission");
            }
            inner.state = FlowState::Idle;
            inner.draft.clear();
        }

        self.cue.cancel();
        debug!("Add-customer dialog cancelled");
        self.events.on_close();
        true
    }

    pub fn state(&self) -> FlowState {
        lock(&self.inner).state
    }

    pub fn is_open(&self) -> bool {
        self.state().is_open()
    }

    /// Copy of the current draft.
    pub fn draft(&self) -> CustomerDraft {
        lock(&self.inner).draft.clone()
    }

    /// True while the invalid-submission cue is raised.
    pub fn is_feedback_active(&self) -> bool {
        self.cue.is_active()
    }

    /// Raises the cue; must be called with the flow lock held.
    fn raise_invalid_cue(&self) {
        let inner = Arc::clone(&self.inner);
        let cue = self.cue.clone();
        self.cue.trigger(move |generation| {
            end_invalid_feedback(&inner, &cue, generation);
        });
    }
}

/// Returns the dialog from `Invalid` to `Editing` once the cue raised with
/// `generation` expires. Stale generations are ignored.
fn end_invalid_feedback(inner: &Mutex<FlowInner>, cue: &FeedbackCue, generation: u64) {
    let mut inner = lock(inner);
    if cue.is_current(generation) && inner.state == FlowState::Invalid {
        inner.state = FlowState::Editing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{customer, CreateReply, FakeApi, ListReply, RecordingEvents};
    use serde_json::json;
    use tokio::time::sleep;

    fn flow_with(api: &Arc<FakeApi>, events: &Arc<RecordingEvents>) -> AddCustomerFlow {
        AddCustomerFlow::new(api.clone(), events.clone(), Duration::from_millis(500))
    }

    fn fill(flow: &AddCustomerFlow, first: &str, last: &str, business: &str, email: &str) {
        flow.set_first_name(first).unwrap();
        flow.set_last_name(last).unwrap();
        flow.set_business_name(business).unwrap();
        flow.set_email(email).unwrap();
    }

    async fn wait_for_state(flow: &AddCustomerFlow, state: FlowState) {
        while flow.state() != state {
            tokio::task::yield_now().await;
        }
    }

    #[test]
    fn test_flow_state_display() {
        assert_eq!(FlowState::Submitting.to_string(), "submitting");
        assert!(!FlowState::Idle.is_open());
        assert!(FlowState::Invalid.is_open());
    }

    #[tokio::test]
    async fn test_submit_with_empty_body_reports_submitted_values() {
        let api = FakeApi::new(ListReply::Ok(Vec::new()));
        let events = RecordingEvents::new();
        let flow = flow_with(&api, &events);

        flow.open();
        fill(&flow, "Ada", "Lovelace", "", "ada@x.io");
        let outcome = flow.submit().await.unwrap();

        let expected = Customer::new("Ada", "Lovelace", "", "ada@x.io");
        assert!(matches!(outcome, SubmitOutcome::Added(ref c) if *c == expected));
        assert_eq!(api.created(), vec![expected.clone()]);
        assert_eq!(events.added(), vec![expected]);
        assert_eq!(events.closes(), 1);
        assert_eq!(flow.state(), FlowState::Idle);
        assert!(flow.draft().is_empty());
    }

    #[tokio::test]
    async fn test_submit_passes_server_fields_through() {
        let api = FakeApi::new(ListReply::Ok(Vec::new()));
        let mut echoed = Customer::new("Grace", "Hopper", "Navy", "grace@navy.mil");
        echoed.extra.insert("id".to_string(), json!(42));
        api.set_create_reply(CreateReply::Body(echoed.clone()));
        let events = RecordingEvents::new();
        let flow = flow_with(&api, &events);

        flow.open();
        fill(&flow, "Grace", "Hopper", "Navy", "grace@navy.mil");
        flow.submit().await.unwrap();

        let added = events.added();
        assert_eq!(added, vec![echoed]);
        assert_eq!(added[0].extra_field("id"), Some(&json!(42)));
    }

    #[tokio::test]
    async fn test_failed_request_keeps_draft_and_skips_callbacks() {
        let api = FakeApi::new(ListReply::Ok(Vec::new()));
        api.set_create_reply(CreateReply::Status(500, "boom".to_string()));
        let events = RecordingEvents::new();
        let flow = flow_with(&api, &events);

        flow.open();
        fill(&flow, "Ada", "Lovelace", "Engines", "ada@x.io");
        let outcome = flow.submit().await.unwrap();

        assert!(matches!(
            outcome,
            SubmitOutcome::Failed(ClientError::Status { status: 500, .. })
        ));
        assert_eq!(flow.state(), FlowState::Editing);
        assert_eq!(
            flow.draft(),
            CustomerDraft::new("Ada", "Lovelace", "Engines", "ada@x.io")
        );
        assert!(events.added().is_empty());
        assert_eq!(events.closes(), 0);
    }

    #[tokio::test]
    async fn test_retry_after_failure_succeeds() {
        let api = FakeApi::new(ListReply::Ok(Vec::new()));
        api.set_create_reply(CreateReply::Transport);
        let events = RecordingEvents::new();
        let flow = flow_with(&api, &events);

        flow.open();
        fill(&flow, "Ada", "Lovelace", "", "ada@x.io");
        assert!(!flow.submit().await.unwrap().is_added());

        api.set_create_reply(CreateReply::Empty);
        assert!(flow.submit().await.unwrap().is_added());
        assert_eq!(api.created().len(), 2);
        assert_eq!(events.added().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_submit_issues_no_request_and_recovers() {
        let api = FakeApi::new(ListReply::Ok(Vec::new()));
        let events = RecordingEvents::new();
        let flow = flow_with(&api, &events);

        flow.open();
        fill(&flow, "Ada", "", "", "ada@x.io");
        let outcome = flow.submit().await.unwrap();

        assert!(matches!(outcome, SubmitOutcome::Invalid(ref e) if e.field() == "lastName"));
        assert_eq!(flow.state(), FlowState::Invalid);
        assert!(flow.is_feedback_active());
        assert!(api.created().is_empty());

        // Still editable while the cue is raised.
        flow.set_last_name("Lovelace").unwrap();

        sleep(Duration::from_millis(501)).await;
        assert_eq!(flow.state(), FlowState::Editing);
        assert!(!flow.is_feedback_active());
        assert_eq!(flow.draft().last_name, "Lovelace");
    }

    #[tokio::test(start_paused = true)]
    async fn test_email_without_at_sign_is_invalid() {
        let api = FakeApi::new(ListReply::Ok(Vec::new()));
        let events = RecordingEvents::new();
        let flow = flow_with(&api, &events);

        flow.open();
        fill(&flow, "Ada", "Lovelace", "", "ada.x.io");
        let outcome = flow.submit().await.unwrap();

        assert!(matches!(outcome, SubmitOutcome::Invalid(ref e) if e.field() == "email"));
        assert!(api.created().is_empty());
    }

    #[tokio::test]
    async fn test_whitespace_name_is_submitted_once() {
        let api = FakeApi::new(ListReply::Ok(Vec::new()));
        let events = RecordingEvents::new();
        let flow = flow_with(&api, &events);

        flow.open();
        fill(&flow, " ", "Lovelace", "", "a@b");
        let outcome = flow.submit().await.unwrap();

        assert!(outcome.is_added());
        assert_eq!(api.created(), vec![Customer::new(" ", "Lovelace", "", "a@b")]);
        assert_eq!(events.added().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_cue_expiry_keeps_newer_invalid_state() {
        let api = FakeApi::new(ListReply::Ok(Vec::new()));
        let events = RecordingEvents::new();
        let flow = flow_with(&api, &events);
        flow.open();

        flow.submit().await.unwrap();
        let stale = flow.cue.generation();
        flow.submit().await.unwrap();

        end_invalid_feedback(&flow.inner, &flow.cue, stale);
        assert_eq!(flow.state(), FlowState::Invalid);

        end_invalid_feedback(&flow.inner, &flow.cue, flow.cue.generation());
        assert_eq!(flow.state(), FlowState::Editing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeated_invalid_submits_restart_cue() {
        let api = FakeApi::new(ListReply::Ok(Vec::new()));
        let events = RecordingEvents::new();
        let flow = flow_with(&api, &events);
        flow.open();

        flow.submit().await.unwrap();
        sleep(Duration::from_millis(300)).await;
        flow.submit().await.unwrap();

        sleep(Duration::from_millis(300)).await;
        assert_eq!(flow.state(), FlowState::Invalid);

        sleep(Duration::from_millis(201)).await;
        assert_eq!(flow.state(), FlowState::Editing);
    }

    #[tokio::test]
    async fn test_cancel_is_idempotent() {
        let api = FakeApi::new(ListReply::Ok(Vec::new()));
        let events = RecordingEvents::new();
        let flow = flow_with(&api, &events);

        assert!(!flow.cancel());
        assert_eq!(events.closes(), 0);

        flow.open();
        fill(&flow, "Ada", "Lovelace", "", "ada@x.io");
        assert!(flow.cancel());
        assert!(!flow.cancel());

        assert_eq!(events.closes(), 1);
        assert!(flow.draft().is_empty());
        assert!(api.created().is_empty());
    }

    #[tokio::test]
    async fn test_closed_dialog_rejects_input() {
        let api = FakeApi::new(ListReply::Ok(Vec::new()));
        let flow = AddCustomerFlow::new(api, Arc::new(NoOpEvents), Duration::from_millis(500));

        assert_eq!(flow.set_email("a@b"), Err(FlowError::NotOpen));
        assert!(matches!(flow.submit().await, Err(FlowError::NotOpen)));
    }

    #[tokio::test]
    async fn test_double_submit_is_rejected_while_in_flight() {
        let api = FakeApi::gated(ListReply::Ok(Vec::new()));
        let events = RecordingEvents::new();
        let flow = flow_with(&api, &events);
        flow.open();
        fill(&flow, "Ada", "Lovelace", "", "ada@x.io");

        let pending = tokio::spawn({
            let flow = flow.clone();
            async move { flow.submit().await }
        });
        wait_for_state(&flow, FlowState::Submitting).await;

        assert!(matches!(flow.submit().await, Err(FlowError::SubmissionInFlight)));
        assert_eq!(
            flow.set_email("other@x.io"),
            Err(FlowError::NotEditable(FlowState::Submitting))
        );

        api.release();
        assert!(pending.await.unwrap().unwrap().is_added());
        assert_eq!(api.created().len(), 1);
        assert_eq!(events.added().len(), 1);
    }

    #[tokio::test]
    async fn test_cancel_during_submit_still_reports_created_customer() {
        let api = FakeApi::gated(ListReply::Ok(Vec::new()));
        let events = RecordingEvents::new();
        let flow = flow_with(&api, &events);
        flow.open();
        fill(&flow, "Ada", "Lovelace", "", "ada@x.io");

        let pending = tokio::spawn({
            let flow = flow.clone();
            async move { flow.submit().await }
        });
        wait_for_state(&flow, FlowState::Submitting).await;

        assert!(flow.cancel());
        assert_eq!(flow.state(), FlowState::Idle);

        // Reopened dialog must survive the late success untouched.
        flow.open();
        flow.set_first_name("Grace").unwrap();

        api.release();
        assert!(pending.await.unwrap().unwrap().is_added());

        assert_eq!(events.added().len(), 1);
        assert_eq!(events.closes(), 1);
        assert_eq!(flow.state(), FlowState::Editing);
        assert_eq!(flow.draft().first_name, "Grace");
    }

    #[tokio::test]
    async fn test_cancel_during_failed_submit_is_abandoned() {
        let api = FakeApi::gated(ListReply::Ok(Vec::new()));
        api.set_create_reply(CreateReply::Transport);
        let events = RecordingEvents::new();
        let flow = flow_with(&api, &events);
        flow.open();
        fill(&flow, "Ada", "Lovelace", "", "ada@x.io");

        let pending = tokio::spawn({
            let flow = flow.clone();
            async move { flow.submit().await }
        });
        wait_for_state(&flow, FlowState::Submitting).await;
        flow.cancel();

        api.release();
        assert!(matches!(
            pending.await.unwrap().unwrap(),
            SubmitOutcome::Abandoned
        ));
        assert!(events.added().is_empty());
        assert_eq!(flow.state(), FlowState::Idle);
    }

    #[tokio::test]
    async fn test_added_customer_reaches_list_store() {
        use crate::state::CustomerListStore;

        struct AppendToStore(CustomerListStore);
        impl FlowEvents for AppendToStore {
            fn on_customer_added(&self, customer: &Customer) {
                self.0.apply_optimistic_append(customer.clone());
            }
            fn on_close(&self) {}
        }

        let api = FakeApi::new(ListReply::Ok(vec![customer("a")]));
        let store = CustomerListStore::new(api.clone());
        store.load().await;
        let flow = AddCustomerFlow::new(
            api.clone(),
            Arc::new(AppendToStore(store.clone())),
            Duration::from_millis(500),
        );

        flow.open();
        fill(&flow, "Ada", "Lovelace", "", "ada@x.io");
        flow.submit().await.unwrap();

        assert_eq!(store.total(), 2);
        assert_eq!(api.list_calls(), 1);
    }
}
