//! Decimal ETH ↔ wei conversion at the contract boundary.

use alloy::primitives::utils::{format_ether, parse_ether};
use alloy::primitives::{Address, U256};

use crate::contract::types::{ContractError, ContractResult};

/// Parse a human decimal ETH amount ("1.5") into wei.
pub fn to_wei(amount: &str) -> ContractResult<U256> {
    let trimmed = amount.trim();
    if trimmed.is_empty() || trimmed.starts_with('-') {
        return Err(ContractError::InvalidAmount(amount.to_string()));
    }
    parse_ether(trimmed).map_err(|e| ContractError::InvalidAmount(format!("{}: {}", amount, e)))
}

/// Format wei as a trimmed decimal ETH string ("32.5", "50.0").
pub fn to_eth(wei: U256) -> String {
    let formatted = format_ether(wei);
    match formatted.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                format!("{}.0", whole)
            } else {
                format!("{}.{}", whole, fraction)
            }
        }
        None => format!("{}.0", formatted),
    }
}

/// Parse a decimal campaign id into the contract's `uint256`.
pub fn to_campaign_id(id: &str) -> ContractResult<U256> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(ContractError::InvalidCampaignId(id.to_string()));
    }
    U256::from_str_radix(trimmed, 10).map_err(|_| ContractError::InvalidCampaignId(id.to_string()))
}

/// Clamp an on-chain timestamp into `i64` seconds.
pub fn to_timestamp(value: U256) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Checksummed address string.
pub fn to_address_string(address: Address) -> String {
    address.to_string()
}
