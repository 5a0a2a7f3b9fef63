//! Per-form in-flight guard.
//!
//! A form moves `idle → submitting → idle`. While a submission is pending
//! the same form key cannot be submitted again; the second attempt gets
//! [`PortalError::Busy`] instead of a duplicate transaction.
//!
//! A submission runs on its own task that owns the guard, so the form stays
//! busy until the transaction settles even when the HTTP request has
//! already timed out.

use std::future::Future;
use std::sync::Arc;

use dashmap::DashMap;

use crate::error::{PortalError, PortalResult};

/// Set of form keys with a submission in flight.
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    pending: Arc<DashMap<String, ()>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `key` as submitting. The returned guard releases it on drop.
    pub fn begin(&self, key: impl Into<String>) -> PortalResult<InFlightGuard> {
        let key = key.into();
        match self.pending.entry(key.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                tracing::warn!(form = %key, "Rejected duplicate submission");
                Err(PortalError::Busy)
            }
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(());
                Ok(InFlightGuard {
                    pending: Arc::clone(&self.pending),
                    key,
                })
            }
        }
    }

    pub fn is_submitting(&self, key: &str) -> bool {
        self.pending.contains_key(key)
    }
}

/// Releases its form key when dropped.
#[derive(Debug)]
pub struct InFlightGuard {
    pending: Arc<DashMap<String, ()>>,
    key: String,
}

impl InFlightGuard {
    /// Run `submission` on a spawned task holding this guard and wait for it.
    ///
    /// Dropping the returned future does not cancel the submission or
    /// release the form key. A panicked task reports `failure`.
    pub async fn detach<T, F>(self, failure: &'static str, submission: F) -> PortalResult<T>
    where
        T: Send + 'static,
        F: Future<Output = PortalResult<T>> + Send + 'static,
    {
        let key = self.key.clone();
        let task = tokio::spawn(async move {
            let _guard = self;
            submission.await
        });
        match task.await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(form = %key, error = %e, "Submission task failed");
                Err(PortalError::TransactionFailed(failure))
            }
        }
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.pending.remove(&self.key);
    }
}

/// Form keys.
pub fn create_key() -> String {
    "create".to_string()
}

pub fn donate_key(campaign_id: &str) -> String {
    format!("donate:{}", campaign_id)
}

pub fn withdraw_key(campaign_id: &str) -> String {
    format!("withdraw:{}", campaign_id)
}

pub fn withdraw_fees_key() -> String {
    "withdraw-fees".to_string()
}
