//! Presentation views.
//!
//! # Data Flow
//! ```text
//! HTTP handler
//!     → wallet snapshot (WalletStore)
//!     → view (validation, gating, display computations)
//!     → CampaignSource reads / ContractService writes
//!     → JSON view model, ActionOutcome or PortalError
//! ```
//!
//! Views hold per-request state only. Client-side validation always runs
//! before the contract is touched.

pub mod admin;
pub mod create;
pub mod detail;
pub mod guard;
pub mod list;
pub mod wallet;

use alloy::rpc::types::TransactionReceipt;
use serde::Serialize;

/// Successful state-changing action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionOutcome {
    pub message: &'static str,
    pub tx_hash: String,
    pub block_number: Option<u64>,
    /// Where the client should navigate next.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<&'static str>,
}

impl ActionOutcome {
    pub fn from_receipt(message: &'static str, receipt: &TransactionReceipt) -> Self {
        Self {
            message,
            tx_hash: receipt.transaction_hash.to_string(),
            block_number: receipt.block_number,
            redirect: None,
        }
    }

    pub fn redirect_to(mut self, path: &'static str) -> Self {
        self.redirect = Some(path);
        self
    }
}
