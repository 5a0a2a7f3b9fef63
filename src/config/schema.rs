//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the portal.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the crowdfunding portal.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PortalConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Injected wallet provider settings.
    pub wallet: WalletConfig,

    /// Crowdfunding contract location.
    pub contract: ContractConfig,

    /// Where campaign data is read from.
    pub data: DataConfig,

    /// Admin panel authority.
    pub admin: AdminConfig,

    /// Fee structure shown on the admin panel.
    pub fees: FeeConfig,

    /// Campaign form defaults.
    pub campaigns: CampaignDefaults,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:5173").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:5173".to_string(),
        }
    }
}

/// Wallet provider configuration.
///
/// The private key itself never lives in the config file; only the name of
/// the environment variable holding it.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Expose an injected provider at all.
    pub enabled: bool,

    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Chain ID (e.g., 1 for Ethereum mainnet, 31337 for local Anvil).
    pub chain_id: u64,

    /// Environment variable holding the hex-encoded private key.
    pub private_key_env: String,

    /// Treat the account as already authorized for this portal, so it is
    /// restored on startup without an explicit connect.
    pub pre_authorized: bool,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rpc_url: "http://localhost:8545".to_string(),
            chain_id: 31337,
            private_key_env: "CROWDFUND_WALLET_PRIVATE_KEY".to_string(),
            pre_authorized: false,
        }
    }
}

/// Contract configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Address of the deployed crowdfunding contract.
    pub address: String,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            address: "0x0000000000000000000000000000000000000000".to_string(),
        }
    }
}

/// Campaign data source selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSourceKind {
    /// Read campaigns from the contract.
    Live,
    /// Serve campaigns from fixtures.
    Fixture,
}

/// Data source configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DataConfig {
    pub source: DataSourceKind,

    /// JSON file with a campaign array. Built-in samples are used when unset.
    pub fixture_path: Option<String>,

    /// Platform fee balance reported by the fixture source (decimal ETH).
    pub fixture_platform_fees: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: DataSourceKind::Fixture,
            fixture_path: None,
            fixture_platform_fees: "4.76".to_string(),
        }
    }
}

/// Who decides admin access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminAuthority {
    /// Compare against `admin.address`.
    Configured,
    /// Compare against the contract's `admin()` view.
    Contract,
}

/// Admin panel configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    pub authority: AdminAuthority,

    /// Admin address when `authority = "configured"`. Empty denies everyone.
    pub address: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            authority: AdminAuthority::Configured,
            address: String::new(),
        }
    }
}

/// Fee structure in basis points.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FeeConfig {
    pub platform_bps: u32,
    pub processing_bps: u32,
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            platform_bps: 300,
            processing_bps: 50,
        }
    }
}

/// Defaults applied by the creation form.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CampaignDefaults {
    /// Image used when the form leaves the image URL empty.
    pub default_image_url: String,
}

impl Default for CampaignDefaults {
    fn default() -> Self {
        Self {
            default_image_url: "https://images.pexels.com/photos/3184632/pexels-photo-3184632.jpeg"
                .to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// HTTP request timeout in seconds. Stops waiting; never cancels a
    /// broadcast transaction.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 300 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let config: PortalConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:5173");
        assert_eq!(config.data.source, DataSourceKind::Fixture);
        assert_eq!(config.admin.authority, AdminAuthority::Configured);
        assert_eq!(config.fees.platform_bps, 300);
    }

    #[test]
    fn test_partial_sections() {
        let raw = r#"
            [data]
            source = "live"

            [admin]
            authority = "contract"

            [observability]
            log_format = "json"
        "#;
        let config: PortalConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.data.source, DataSourceKind::Live);
        assert_eq!(config.data.fixture_platform_fees, "4.76");
        assert_eq!(config.admin.authority, AdminAuthority::Contract);
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.wallet.chain_id, 31337);
    }
}
