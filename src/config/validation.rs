//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, URLs and amounts before anything touches the chain
//! - Validate value ranges (timeouts > 0, fees within 100%)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: PortalConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use alloy::primitives::{utils::parse_ether, Address};
use thiserror::Error;

use crate::config::schema::{AdminAuthority, DataSourceKind, PortalConfig};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("wallet.rpc_url '{0}' is not a valid URL")]
    RpcUrl(String),

    #[error("wallet.private_key_env must not be empty")]
    KeyEnvVar,

    #[error("contract.address '{0}' is not a valid address")]
    ContractAddress(String),

    #[error("data.source = \"live\" requires a non-zero contract.address")]
    LiveWithoutContract,

    #[error("admin.address '{0}' is not a valid address")]
    AdminAddress(String),

    #[error("fees total {0} bps exceeds 10000")]
    Fees(u32),

    #[error("data.fixture_platform_fees '{0}' is not a decimal ETH amount")]
    FixtureFees(String),

    #[error("timeouts.request_secs must be greater than 0")]
    RequestTimeout,

    #[error("observability.metrics_address '{0}' is not a socket address")]
    MetricsAddress(String),
}

/// Validate a parsed configuration, collecting every error.
pub fn validate_config(config: &PortalConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if config.wallet.rpc_url.parse::<url::Url>().is_err() {
        errors.push(ValidationError::RpcUrl(config.wallet.rpc_url.clone()));
    }

    if config.wallet.enabled && config.wallet.private_key_env.trim().is_empty() {
        errors.push(ValidationError::KeyEnvVar);
    }

    match config.contract.address.parse::<Address>() {
        Ok(address) => {
            if config.data.source == DataSourceKind::Live && address.is_zero() {
                errors.push(ValidationError::LiveWithoutContract);
            }
        }
        Err(_) => errors.push(ValidationError::ContractAddress(config.contract.address.clone())),
    }

    if config.admin.authority == AdminAuthority::Configured
        && !config.admin.address.is_empty()
        && config.admin.address.parse::<Address>().is_err()
    {
        errors.push(ValidationError::AdminAddress(config.admin.address.clone()));
    }

    let total_bps = config.fees.platform_bps.saturating_add(config.fees.processing_bps);
    if total_bps > 10_000 {
        errors.push(ValidationError::Fees(total_bps));
    }

    if parse_ether(&config.data.fixture_platform_fees).is_err() {
        errors.push(ValidationError::FixtureFees(config.data.fixture_platform_fees.clone()));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::RequestTimeout);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
