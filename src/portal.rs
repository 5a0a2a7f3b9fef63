//! Shared portal context handed to every view.

use std::sync::Arc;

use alloy::primitives::Address;

use crate::campaign::{CampaignSource, SourceError};
use crate::config::PortalConfig;
use crate::contract::ContractService;
use crate::views::guard::InFlight;
use crate::wallet::{InjectedProvider, WalletState, WalletStore};

/// Everything a request needs: configuration, the wallet store, the
/// campaign source and the in-flight guard.
#[derive(Debug)]
pub struct Portal {
    pub config: Arc<PortalConfig>,
    pub wallet: WalletStore,
    pub source: CampaignSource,
    pub inflight: InFlight,
    contract_address: Address,
}

impl Portal {
    /// `config` is assumed validated, so the contract address parses.
    pub fn new(config: PortalConfig, wallet: WalletStore, source: CampaignSource) -> Self {
        let contract_address = config.contract.address.parse().unwrap_or(Address::ZERO);
        Self {
            config: Arc::new(config),
            wallet,
            source,
            inflight: InFlight::new(),
            contract_address,
        }
    }

    /// Detect the wallet provider, restore a pre-authorized session and load
    /// the configured campaign source.
    pub fn from_config(config: PortalConfig, now: i64) -> Result<Self, SourceError> {
        let provider = InjectedProvider::detect(&config.wallet);
        if let Some(p) = &provider {
            tracing::debug!(chain_id = p.chain_id(), "Checking for an authorized wallet session");
        }
        let wallet = WalletStore::new(provider);
        wallet.restore();

        let contract_address: Address = config.contract.address.parse().unwrap_or(Address::ZERO);
        if contract_address.is_zero() && config.wallet.enabled {
            tracing::warn!("No contract address configured; transactions are disabled");
        }
        let source = CampaignSource::from_config(&config, contract_address, now)?;
        tracing::info!(source = ?source.kind(), contract = %contract_address, "Campaign source ready");

        Ok(Self::new(config, wallet, source))
    }

    pub fn contract_address(&self) -> Address {
        self.contract_address
    }

    /// Contract wrapper bound to the wallet's signer, if any. With the zero
    /// address every call fails with `NotInitialized`.
    pub fn contract(&self, wallet: &WalletState) -> ContractService {
        ContractService::new(self.contract_address, wallet.signer.as_ref())
    }
}
