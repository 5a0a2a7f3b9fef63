//! Campaign data sources.
//!
//! The portal reads campaigns either from the contract (`live`) or from
//! fixtures (`fixture`), chosen by `data.source` in the config. Writes always
//! go through [`ContractService`]; after a successful donation the fixture
//! source mirrors it in memory so the detail view reflects it.

use std::path::Path;

use alloy::primitives::Address;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::campaign::fixtures::{load_fixture_file, sample_campaigns};
use crate::campaign::types::{Campaign, Donation};
use crate::config::{DataSourceKind, PortalConfig};
use crate::contract::units::{to_eth, to_wei};
use crate::contract::{ContractError, ContractService};
use crate::wallet::WalletState;

/// Errors raised while reading campaign data.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Contract(#[from] ContractError),

    #[error("Fixture error: {0}")]
    Fixture(String),
}

/// In-memory campaign set.
#[derive(Debug)]
pub struct FixtureSource {
    campaigns: RwLock<Vec<Campaign>>,
    platform_fees: String,
}

/// Where campaign reads come from.
#[derive(Debug)]
pub enum CampaignSource {
    Live { contract_address: Address },
    Fixture(FixtureSource),
}

impl CampaignSource {
    /// Live source reading from the contract at `contract_address`.
    pub fn live(contract_address: Address) -> Self {
        CampaignSource::Live { contract_address }
    }

    /// Fixture source over the given campaigns.
    pub fn fixture(campaigns: Vec<Campaign>, platform_fees: impl Into<String>) -> Self {
        CampaignSource::Fixture(FixtureSource {
            campaigns: RwLock::new(campaigns),
            platform_fees: platform_fees.into(),
        })
    }

    /// Build the source selected by `data.source`.
    pub fn from_config(config: &PortalConfig, contract_address: Address, now: i64) -> Result<Self, SourceError> {
        match config.data.source {
            DataSourceKind::Live => Ok(Self::live(contract_address)),
            DataSourceKind::Fixture => {
                let campaigns = match &config.data.fixture_path {
                    Some(path) => load_fixture_file(Path::new(path))?,
                    None => sample_campaigns(now),
                };
                Ok(Self::fixture(campaigns, config.data.fixture_platform_fees.clone()))
            }
        }
    }

    pub fn kind(&self) -> DataSourceKind {
        match self {
            CampaignSource::Live { .. } => DataSourceKind::Live,
            CampaignSource::Fixture(_) => DataSourceKind::Fixture,
        }
    }

    /// Every campaign, in source order.
    pub async fn campaigns(&self, wallet: &WalletState) -> Result<Vec<Campaign>, SourceError> {
        match self {
            CampaignSource::Live { contract_address } => {
                let service = ContractService::new(*contract_address, wallet.signer.as_ref());
                Ok(service.get_campaigns().await?)
            }
            CampaignSource::Fixture(fixture) => Ok(fixture.campaigns.read().await.clone()),
        }
    }

    /// A single campaign, `None` when it does not exist.
    pub async fn campaign(&self, id: &str, wallet: &WalletState) -> Result<Option<Campaign>, SourceError> {
        match self {
            CampaignSource::Live { contract_address } => {
                let service = ContractService::new(*contract_address, wallet.signer.as_ref());
                let campaign = service.get_campaign(id).await?;
                // Unset mapping slots come back zeroed.
                let exists = campaign
                    .owner
                    .parse::<Address>()
                    .map(|owner| !owner.is_zero())
                    .unwrap_or(false);
                Ok(exists.then_some(campaign))
            }
            CampaignSource::Fixture(fixture) => Ok(fixture
                .campaigns
                .read()
                .await
                .iter()
                .find(|c| c.id == id)
                .cloned()),
        }
    }

    /// Accumulated platform fees in decimal ETH.
    pub async fn platform_fees(&self, wallet: &WalletState) -> Result<String, SourceError> {
        match self {
            CampaignSource::Live { contract_address } => {
                let service = ContractService::new(*contract_address, wallet.signer.as_ref());
                Ok(service.get_platform_fees().await?)
            }
            CampaignSource::Fixture(fixture) => Ok(fixture.platform_fees.clone()),
        }
    }

    /// Reflect a confirmed donation. The live source re-reads the contract on
    /// the next request, so this only touches fixtures.
    pub async fn record_donation(&self, id: &str, donor: &str, amount: &str, now: i64) {
        let CampaignSource::Fixture(fixture) = self else {
            return;
        };

        let mut campaigns = fixture.campaigns.write().await;
        let Some(campaign) = campaigns.iter_mut().find(|c| c.id == id) else {
            return;
        };

        match (to_wei(&campaign.amount_collected), to_wei(amount)) {
            (Ok(collected), Ok(donated)) => {
                campaign.amount_collected = to_eth(collected.saturating_add(donated));
            }
            _ => {
                tracing::warn!(
                    campaign_id = %id,
                    amount = %amount,
                    "Could not add donation to fixture total"
                );
                return;
            }
        }

        campaign.donations.get_or_insert_with(Vec::new).insert(
            0,
            Donation {
                donor: donor.to_string(),
                amount: amount.trim().to_string(),
                timestamp: now,
            },
        );
    }
}
