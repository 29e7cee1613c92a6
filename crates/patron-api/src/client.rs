//! # Customer API Client
//!
//! The `CustomerApi` seam and its reqwest implementation.
//!
//! ## Create Response Handling
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /api/customers                                                    │
//! │       │                                                                 │
//! │       ├── status not 2xx ──► read body as text ──► Status { .. }        │
//! │       │                                                                 │
//! │       └── 2xx ──► read body as TEXT first                               │
//! │                     │                                                   │
//! │                     ├── empty  ──► Ok(None)   (not an error)            │
//! │                     └── JSON   ──► Ok(Some(customer))                   │
//! │                                    or Decode if it is not a customer   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use async_trait::async_trait;
use patron_core::{Customer, Customers, CUSTOMERS_PATH};
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use crate::error::{ApiError, ClientError, ClientResult};

// =============================================================================
// API Seam
// =============================================================================

/// Operations the customer list store and add-customer flow need from the
/// remote API.
///
/// Implemented by [`HttpCustomerApi`] in production and by in-memory fakes in
/// tests.
#[async_trait]
pub trait CustomerApi: Send + Sync {
    /// Fetches the full customer collection.
    async fn list_customers(&self) -> ClientResult<Customers>;

    /// Creates a customer.
    ///
    /// Returns `Ok(None)` when the server acknowledged with an empty body.
    async fn create_customer(&self, customer: &Customer) -> ClientResult<Option<Customer>>;
}

// =============================================================================
// Client Configuration
// =============================================================================

/// Configuration for the HTTP client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Origin of the customer API, e.g. `http://localhost:3000`.
    pub base_url: String,

    /// Per-request timeout. `None` keeps the transport default.
    pub request_timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        ClientConfig {
            base_url: base_url.into(),
            request_timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

// =============================================================================
// HTTP Implementation
// =============================================================================

/// reqwest-backed [`CustomerApi`].
#[derive(Debug, Clone)]
pub struct HttpCustomerApi {
    client: Client,
    endpoint: Url,
}

impl HttpCustomerApi {
    /// Builds a client for the given configuration.
    ///
    /// The base URL must be absolute `http` or `https`. The customer path is
    /// resolved against its origin.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let base = Url::parse(&config.base_url)?;

        if base.scheme() != "http" && base.scheme() != "https" {
            return Err(ClientError::InvalidUrl(format!(
                "API URL must start with http:// or https://, got: {}",
                config.base_url
            )));
        }

        let endpoint = base.join(CUSTOMERS_PATH)?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(HttpCustomerApi { client, endpoint })
    }

    /// Full URL of the customer collection endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl CustomerApi for HttpCustomerApi {
    async fn list_customers(&self) -> ClientResult<Customers> {
        debug!(url = %self.endpoint, "GET customers");

        let response = self.client.get(self.endpoint.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let error = ApiError::from_status_body(status.as_u16(), &body);
            warn!(status = status.as_u16(), code = %error.code, "Customer list request failed");
            return Err(ClientError::Api {
                status: status.as_u16(),
                error,
            });
        }

        let customers: Customers =
            serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))?;

        debug!(count = customers.len(), "Customer list received");
        Ok(customers)
    }

    async fn create_customer(&self, customer: &Customer) -> ClientResult<Option<Customer>> {
        debug!(url = %self.endpoint, email = %customer.email, "POST customer");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(customer)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            // Failure bodies are only logged, so a read error is not fatal here.
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        if text.is_empty() {
            debug!(status = status.as_u16(), "Create acknowledged with empty body");
            return Ok(None);
        }

        let created =
            Customer::from_json(&text).map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(Some(created))
    }
}
