//! User-facing error taxonomy.
//!
//! Every failure a view can report ends up here. Nothing is fatal to the
//! process; each variant leaves the portal in its pre-submission state.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::campaign::SourceError;
use crate::contract::ContractError;
use crate::wallet::WalletError;

/// Field name → message for form validation failures.
pub type FieldErrors = BTreeMap<&'static str, String>;

#[derive(Debug, Error)]
pub enum PortalError {
    /// No injected wallet provider exists.
    #[error("Please install a wallet provider to use this application!")]
    WalletUnavailable,

    /// The wallet refused or failed to connect.
    #[error("Failed to connect wallet. Please try again.")]
    ConnectFailed,

    /// The action needs a connected wallet.
    #[error("{0}")]
    NotConnected(&'static str),

    /// The contract wrapper was used without a signer.
    #[error("Contract not initialized")]
    NotInitialized,

    /// Client-side validation failed.
    #[error("Please fix the highlighted fields")]
    Validation(FieldErrors),

    /// A single-field input error (e.g. donation amount).
    #[error("{0}")]
    InvalidInput(&'static str),

    /// The connected account may not perform this action.
    #[error("{0}")]
    Forbidden(&'static str),

    #[error("Campaign {0} not found")]
    NotFound(String),

    /// The same form is already submitting.
    #[error("A submission is already in progress")]
    Busy,

    /// A transaction failed; the message is the generic per-action text.
    #[error("{0}")]
    TransactionFailed(&'static str),

    /// Campaign data could not be read.
    #[error("Failed to load campaign data")]
    Source(String),

    /// The request outlived `timeouts.request_secs`. A submitted transaction
    /// keeps its form busy until it settles.
    #[error("The request timed out")]
    Timeout,

    /// Middleware failure that is not a timeout.
    #[error("Internal server error")]
    Internal(String),
}

impl PortalError {
    /// Fold a contract error into the generic failure for `action`, keeping
    /// the "not initialized" condition distinct.
    pub fn from_contract(err: ContractError, action: &'static str) -> Self {
        match err {
            ContractError::NotInitialized => PortalError::NotInitialized,
            _ => PortalError::TransactionFailed(action),
        }
    }
}

impl From<SourceError> for PortalError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Contract(ContractError::NotInitialized) => PortalError::NotInitialized,
            other => PortalError::Source(other.to_string()),
        }
    }
}

impl From<WalletError> for PortalError {
    fn from(err: WalletError) -> Self {
        match err {
            WalletError::Unavailable => PortalError::WalletUnavailable,
            WalletError::NotAuthorized | WalletError::InvalidKey(_) => PortalError::ConnectFailed,
        }
    }
}

/// Result type for view operations.
pub type PortalResult<T> = Result<T, PortalError>;
