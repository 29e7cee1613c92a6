//! In-memory fakes shared by the console's unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use patron_api::{ApiError, ClientError, ClientResult, CustomerApi};
use patron_core::{Customer, Customers};
use tokio::sync::Notify;

use crate::state::{lock, FlowEvents};

/// Customer whose email is `<tag>@x.com`.
pub fn customer(tag: &str) -> Customer {
    Customer::new(tag, "Tester", "", format!("{}@x.com", tag))
}

/// Scripted answer to `list_customers`.
#[derive(Debug, Clone)]
pub enum ListReply {
    Ok(Customers),
    Error(ApiError),
    Transport,
}

/// Scripted answer to `create_customer`.
#[derive(Debug, Clone)]
pub enum CreateReply {
    Empty,
    Body(Customer),
    Status(u16, String),
    Transport,
}

/// Fake customer API that records what it was asked to do.
///
/// A gated fake holds every create request until [`FakeApi::release`];
/// a list-gated fake holds every list request until [`FakeApi::release_list`].
pub struct FakeApi {
    list: Mutex<ListReply>,
    create: Mutex<CreateReply>,
    list_calls: AtomicUsize,
    created: Mutex<Vec<Customer>>,
    gate: Option<Notify>,
    list_gate: Option<Notify>,
}

impl FakeApi {
    pub fn new(list: ListReply) -> Arc<Self> {
        Arc::new(Self::build(list, None, None))
    }

    pub fn gated(list: ListReply) -> Arc<Self> {
        Arc::new(Self::build(list, Some(Notify::new()), None))
    }

    pub fn list_gated(list: ListReply) -> Arc<Self> {
        Arc::new(Self::build(list, None, Some(Notify::new())))
    }

    fn build(list: ListReply, gate: Option<Notify>, list_gate: Option<Notify>) -> Self {
        FakeApi {
            list: Mutex::new(list),
            create: Mutex::new(CreateReply::Empty),
            list_calls: AtomicUsize::new(0),
            created: Mutex::new(Vec::new()),
            gate,
            list_gate,
        }
    }

    pub fn set_list_reply(&self, reply: ListReply) {
        *lock(&self.list) = reply;
    }

    pub fn set_create_reply(&self, reply: CreateReply) {
        *lock(&self.create) = reply;
    }

    /// Lets one held create request through.
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    /// Lets one held list request through.
    pub fn release_list(&self) {
        if let Some(gate) = &self.list_gate {
            gate.notify_one();
        }
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Payloads received by `create_customer`, in order.
    pub fn created(&self) -> Vec<Customer> {
        lock(&self.created).clone()
    }
}

#[async_trait]
impl CustomerApi for FakeApi {
    async fn list_customers(&self) -> ClientResult<Customers> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = &self.list_gate {
            gate.notified().await;
        }

        let reply = lock(&self.list).clone();
        match reply {
            ListReply::Ok(customers) => Ok(customers),
            ListReply::Error(error) => Err(ClientError::Api { status: 500, error }),
            ListReply::Transport => Err(ClientError::Transport("connection refused".into())),
        }
    }

    async fn create_customer(&self, customer: &Customer) -> ClientResult<Option<Customer>> {
        lock(&self.created).push(customer.clone());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let reply = lock(&self.create).clone();
        match reply {
            CreateReply::Empty => Ok(None),
            CreateReply::Body(body) => Ok(Some(body)),
            CreateReply::Status(status, body) => Err(ClientError::Status { status, body }),
            CreateReply::Transport => Err(ClientError::Transport("connection reset".into())),
        }
    }
}

/// Event sink that remembers every callback.
#[derive(Default)]
pub struct RecordingEvents {
    added: Mutex<Vec<Customer>>,
    closes: AtomicUsize,
}

impl RecordingEvents {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn added(&self) -> Vec<Customer> {
        lock(&self.added).clone()
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

impl FlowEvents for RecordingEvents {
    fn on_customer_added(&self, customer: &Customer) {
        lock(&self.added).push(customer.clone());
    }

    fn on_close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}
