//! Contract-layer error definitions.

use alloy::primitives::TxHash;
use thiserror::Error;

/// Errors that can occur while calling the crowdfunding contract.
#[derive(Debug, Error)]
pub enum ContractError {
    /// The service was constructed without a signer.
    #[error("Contract not initialized")]
    NotInitialized,

    /// Decimal ETH amount could not be converted to wei.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Campaign id is not a decimal integer.
    #[error("Invalid campaign id: {0}")]
    InvalidCampaignId(String),

    /// The call could not be encoded, sent, or decoded.
    #[error("Contract call failed: {0}")]
    Call(String),

    /// The transaction was sent but no receipt could be obtained.
    #[error("Transaction failed: {0}")]
    Transaction(String),

    /// The transaction was mined with a failed status.
    #[error("Transaction reverted: {0}")]
    Reverted(TxHash),
}

/// Result type for contract operations.
pub type ContractResult<T> = Result<T, ContractError>;

impl From<alloy::contract::Error> for ContractError {
    fn from(e: alloy::contract::Error) -> Self {
        ContractError::Call(e.to_string())
    }
}

impl From<alloy::providers::PendingTransactionError> for ContractError {
    fn from(e: alloy::providers::PendingTransactionError) -> Self {
        ContractError::Transaction(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(ContractError::NotInitialized.to_string(), "Contract not initialized");
        let err = ContractError::InvalidAmount("abc".into());
        assert!(err.to_string().contains("abc"));
    }
}
