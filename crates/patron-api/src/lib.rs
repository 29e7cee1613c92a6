//! # patron-api: Customer API Client
//!
//! Thin async client for the customer collection endpoint.
//!
//! ## HTTP Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     /api/customers contract                             │
//! │                                                                         │
//! │  GET  /api/customers                                                    │
//! │  ├── 2xx  → [Customer, ...]                                             │
//! │  └── else → { "code": "...", "message": "..." }   → ClientError::Api    │
//! │                                                                         │
//! │  POST /api/customers   { firstName, lastName, businessName, email }     │
//! │  ├── 2xx, body      → Some(Customer)  (extra fields preserved)          │
//! │  ├── 2xx, no body   → None            (caller falls back to its draft)  │
//! │  └── else           → ClientError::Status { status, body }              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`client`] - `CustomerApi` trait and the reqwest-backed implementation
//! - [`error`] - `ClientError` and the `ApiError` wire body
//!
//! ## Usage
//! ```rust,ignore
//! use patron_api::{ClientConfig, CustomerApi, HttpCustomerApi};
//!
//! let api = HttpCustomerApi::new(ClientConfig::new("http://localhost:3000"))?;
//! let customers = api.list_customers().await?;
//! ```

pub mod client;
pub mod error;

pub use client::{ClientConfig, CustomerApi, HttpCustomerApi};
pub use error::{ApiError, ClientError, ClientResult};
