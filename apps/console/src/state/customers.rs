//! # Customer List State
//!
//! Owns the locally cached customer collection and its load status.
//!
//! ## Cache Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Customer Cache Operations                            │
//! │                                                                         │
//! │  Caller                   Store method               Cache change       │
//! │  ──────                   ────────────               ────────────       │
//! │                                                                         │
//! │  View mounts ───────────► load() ──────────────────► is_loading=true   │
//! │                              │ GET /api/customers                       │
//! │                              ├── ok ───────────────► customers=Some(..) │
//! │                              │                       error=None         │
//! │                              └── err ──────────────► error=Some(..)     │
//! │                                                      rows kept          │
//! │                                                                         │
//! │  Flow callback ─────────► apply_optimistic_append ─► customers.push(c)  │
//! │                           (no request issued)        or no-op if None   │
//! │                                                                         │
//! │  View renders ──────────► snapshot() ──────────────► (read only)       │
//! │                                                                         │
//! │  Every write bumps `version`.                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use patron_api::{ApiError, CustomerApi};
use patron_core::{Customer, Customers};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::lock;

/// Read view of the customer cache.
///
/// ## Invariants
/// - `customers` is `None` until the first successful load
/// - An `error` is advisory: previously loaded rows stay visible, but the
///   cache is not trusted while it is set
/// - `version` increases on every write
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheSnapshot {
    /// Server order followed by optimistic appends.
    pub customers: Option<Customers>,

    /// Last load failure, if the most recent load failed.
    pub error: Option<ApiError>,

    /// True while a load is pending.
    pub is_loading: bool,

    /// Write counter.
    pub version: u64,

    /// When the collection was last fetched successfully.
    pub loaded_at: Option<DateTime<Utc>>,
}

impl CacheSnapshot {
    /// Number of customers shown in the list header (0 before the first load).
    pub fn total(&self) -> usize {
        self.customers.as_ref().map_or(0, Vec::len)
    }

    /// True when data is present and no load error is outstanding.
    pub fn is_trusted(&self) -> bool {
        self.customers.is_some() && self.error.is_none()
    }
}

#[derive(Debug, Default)]
struct CacheState {
    snapshot: CacheSnapshot,
    /// Loads started but not yet settled.
    pending_loads: usize,
}

/// The list shown to the user and its loading/error status.
///
/// ## Thread Safety
/// Uses `Arc<Mutex<CacheState>>`:
/// - `Arc`: the view, the commands and the flow callback share one cache
/// - `Mutex`: appends read and write under a single lock so concurrent
///   appends cannot lose each other
///
/// Cloning yields another handle to the same cache.
#[derive(Clone)]
pub struct CustomerListStore {
    api: Arc<dyn CustomerApi>,
    cache: Arc<Mutex<CacheState>>,
}

impl CustomerListStore {
    /// Creates a store with no cached data.
    pub fn new(api: Arc<dyn CustomerApi>) -> Self {
        CustomerListStore {
            api,
            cache: Arc::new(Mutex::new(CacheState::default())),
        }
    }

    /// Fetches the customer collection and replaces the cache.
    ///
    /// Failures never propagate: they are recorded as the cache's error and
    /// the previously loaded rows are left in place. Returns the snapshot
    /// after the load settled.
    ///
    /// Loads may overlap: `is_loading` stays set until the last one settles,
    /// and the last to settle decides the cached rows.
    pub async fn load(&self) -> CacheSnapshot {
        {
            let mut cache = lock(&self.cache);
            cache.pending_loads += 1;
            cache.snapshot.is_loading = true;
        }

        debug!("Loading customer list");
        let result = self.api.list_customers().await;

        let mut cache = lock(&self.cache);
        cache.pending_loads = cache.pending_loads.saturating_sub(1);
        let still_pending = cache.pending_loads > 0;

        let snapshot = &mut cache.snapshot;
        snapshot.is_loading = still_pending;
        snapshot.version += 1;

        match result {
            Ok(customers) => {
                info!(count = customers.len(), "Customer list loaded");
                snapshot.customers = Some(customers);
                snapshot.error = None;
                snapshot.loaded_at = Some(Utc::now());
            }
            Err(e) => {
                let error = ApiError::from(&e);
                warn!(code = %error.code, message = %error.message, "Customer list failed to load");
                snapshot.error = Some(error);
            }
        }

        snapshot.clone()
    }

    /// Re-fetches the collection on explicit user request.
    pub async fn reload(&self) -> CacheSnapshot {
        self.load().await
    }

    /// Appends a customer to the cached collection without re-fetching.
    ///
    /// Returns `false` (and changes nothing) when no collection has been
    /// loaded yet. Duplicate emails are accepted as-is.
    pub fn apply_optimistic_append(&self, customer: Customer) -> bool {
        let mut cache = lock(&self.cache);
        let snapshot = &mut cache.snapshot;

        let Some(customers) = snapshot.customers.as_mut() else {
            debug!(email = %customer.email, "No cached list yet, skipping optimistic append");
            return false;
        };

        customers.push(customer);
        let count = customers.len();
        snapshot.version += 1;

        debug!(count, version = snapshot.version, "Customer appended to cached list");
        true
    }

    /// Returns a copy of the current cache state.
    pub fn snapshot(&self) -> CacheSnapshot {
        lock(&self.cache).snapshot.clone()
    }

    /// Returns the cached collection, if loaded.
    pub fn customers(&self) -> Option<Customers> {
        lock(&self.cache).snapshot.customers.clone()
    }

    /// Number of cached customers (0 before the first load).
    pub fn total(&self) -> usize {
        lock(&self.cache).snapshot.total()
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.cache).snapshot.is_loading
    }

    pub fn error(&self) -> Option<ApiError> {
        lock(&self.cache).snapshot.error.clone()
    }

    pub fn version(&self) -> u64 {
        lock(&self.cache).snapshot.version
    }
}
