//! Wallet error definitions.

use thiserror::Error;

/// Errors that can occur while talking to the injected wallet.
#[derive(Debug, Error)]
pub enum WalletError {
    /// No injected provider is available.
    #[error("No wallet provider available")]
    Unavailable,

    /// The account has not been granted to this portal.
    #[error("Wallet access not authorized")]
    NotAuthorized,

    /// Invalid private key format or derivation error.
    #[error("Wallet error: {0}")]
    InvalidKey(String),
}

/// Result type for wallet operations.
pub type WalletResult<T> = Result<T, WalletError>;
