//! Contract call wrapper.
//!
//! # Responsibilities
//! - Bind the crowdfunding ABI to the connected signer
//! - Convert decimal ETH amounts and campaign ids at the call boundary
//! - Send exactly one call per method and await exactly one confirmation
//!
//! No retries, gas overrides, nonce management or timeouts happen here; the
//! provider's fillers handle gas and nonce.

use alloy::network::Ethereum;
use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, PendingTransactionBuilder};
use alloy::rpc::types::TransactionReceipt;

use crate::campaign::Campaign;
use crate::contract::abi::Crowdfunding;
use crate::contract::types::{ContractError, ContractResult};
use crate::contract::units::{to_address_string, to_campaign_id, to_eth, to_timestamp, to_wei};
use crate::observability::metrics;
use crate::wallet::SignerHandle;

type Instance = Crowdfunding::CrowdfundingInstance<DynProvider>;

/// One-shot wrapper around the crowdfunding contract.
#[derive(Clone)]
pub struct ContractService {
    contract: Option<Instance>,
}

impl ContractService {
    /// Bind the contract at `address` to `signer`.
    ///
    /// The zero address means no contract is deployed. With it, or without a
    /// signer, every method fails with [`ContractError::NotInitialized`].
    pub fn new(address: Address, signer: Option<&SignerHandle>) -> Self {
        let contract = signer
            .filter(|_| !address.is_zero())
            .map(|s| Crowdfunding::new(address, s.provider().clone()));
        Self { contract }
    }

    /// Whether both a contract address and a signer were supplied.
    pub fn is_initialized(&self) -> bool {
        self.contract.is_some()
    }

    fn contract(&self) -> ContractResult<&Instance> {
        self.contract.as_ref().ok_or(ContractError::NotInitialized)
    }

    /// Create a new campaign. `target_amount` is decimal ETH, `deadline` unix seconds.
    pub async fn create_campaign(
        &self,
        name: &str,
        description: &str,
        image_url: &str,
        target_amount: &str,
        deadline: i64,
    ) -> ContractResult<TransactionReceipt> {
        let result: ContractResult<TransactionReceipt> = async {
            let contract = self.contract()?;
            let target = to_wei(target_amount)?;
            let pending = contract
                .createCampaign(
                    name.to_string(),
                    description.to_string(),
                    image_url.to_string(),
                    target,
                    U256::from(deadline.max(0) as u64),
                )
                .send()
                .await?;
            confirm(pending).await
        }
        .await;
        record("createCampaign", result)
    }

    /// Donate `amount` (decimal ETH) to a campaign.
    pub async fn donate(&self, campaign_id: &str, amount: &str) -> ContractResult<TransactionReceipt> {
        let result: ContractResult<TransactionReceipt> = async {
            let contract = self.contract()?;
            let id = to_campaign_id(campaign_id)?;
            let value = to_wei(amount)?;
            let pending = contract.donate(id).value(value).send().await?;
            confirm(pending).await
        }
        .await;
        record("donate", result)
    }

    /// Withdraw collected funds (owner only, enforced by the contract).
    pub async fn withdraw(&self, campaign_id: &str) -> ContractResult<TransactionReceipt> {
        let result: ContractResult<TransactionReceipt> = async {
            let contract = self.contract()?;
            let id = to_campaign_id(campaign_id)?;
            let pending = contract.withdraw(id).send().await?;
            confirm(pending).await
        }
        .await;
        record("withdraw", result)
    }

    /// Withdraw accumulated platform fees (admin only, enforced by the contract).
    pub async fn withdraw_platform_fees(&self) -> ContractResult<TransactionReceipt> {
        let result: ContractResult<TransactionReceipt> = async {
            let contract = self.contract()?;
            let pending = contract.withdrawPlatformFees().send().await?;
            confirm(pending).await
        }
        .await;
        record("withdrawPlatformFees", result)
    }

    /// Read a single campaign.
    pub async fn get_campaign(&self, campaign_id: &str) -> ContractResult<Campaign> {
        let result: ContractResult<Campaign> = async {
            let contract = self.contract()?;
            let id = to_campaign_id(campaign_id)?;
            let c = contract.campaigns(id).call().await?;
            Ok(Campaign {
                id: c.id.to_string(),
                name: c.name,
                description: c.description,
                image_url: c.imageUrl,
                target_amount: to_eth(c.targetAmount),
                amount_collected: to_eth(c.amountCollected),
                deadline: to_timestamp(c.deadline),
                owner: to_address_string(c.owner),
                is_active: c.isActive,
                donations: None,
            })
        }
        .await;
        record("campaigns", result)
    }

    /// Read every campaign.
    pub async fn get_campaigns(&self) -> ContractResult<Vec<Campaign>> {
        let result: ContractResult<Vec<Campaign>> = async {
            let contract = self.contract()?;
            let campaigns = contract.getCampaigns().call().await?;
            Ok(campaigns.into_iter().map(Campaign::from).collect())
        }
        .await;
        record("getCampaigns", result)
    }

    /// Number of campaigns ever created.
    pub async fn get_campaign_count(&self) -> ContractResult<u64> {
        let result: ContractResult<u64> = async {
            let contract = self.contract()?;
            let count = contract.campaignCount().call().await?;
            u64::try_from(count).map_err(|e| ContractError::Call(e.to_string()))
        }
        .await;
        record("campaignCount", result)
    }

    /// Accumulated platform fees in decimal ETH.
    pub async fn get_platform_fees(&self) -> ContractResult<String> {
        let result: ContractResult<String> = async {
            let contract = self.contract()?;
            let fees = contract.platformFees().call().await?;
            Ok(to_eth(fees))
        }
        .await;
        record("platformFees", result)
    }

    /// The contract's admin account.
    pub async fn get_admin_address(&self) -> ContractResult<Address> {
        let result: ContractResult<Address> = async {
            let contract = self.contract()?;
            Ok(contract.admin().call().await?)
        }
        .await;
        record("admin", result)
    }
}

impl std::fmt::Debug for ContractService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractService")
            .field("address", &self.contract.as_ref().map(|c| *c.address()))
            .finish()
    }
}

impl From<Crowdfunding::Campaign> for Campaign {
    fn from(c: Crowdfunding::Campaign) -> Self {
        Campaign {
            id: c.id.to_string(),
            name: c.name,
            description: c.description,
            image_url: c.imageUrl,
            target_amount: to_eth(c.targetAmount),
            amount_collected: to_eth(c.amountCollected),
            deadline: to_timestamp(c.deadline),
            owner: to_address_string(c.owner),
            is_active: c.isActive,
            donations: None,
        }
    }
}

/// Wait for one confirmation and reject reverted receipts.
async fn confirm(pending: PendingTransactionBuilder<Ethereum>) -> ContractResult<TransactionReceipt> {
    let tx_hash = *pending.tx_hash();
    tracing::debug!(tx_hash = %tx_hash, "Transaction sent, awaiting confirmation");

    let receipt = pending.with_required_confirmations(1).get_receipt().await?;
    if !receipt.status() {
        return Err(ContractError::Reverted(receipt.transaction_hash));
    }

    tracing::info!(
        tx_hash = %receipt.transaction_hash,
        block_number = ?receipt.block_number,
        "Transaction confirmed"
    );
    Ok(receipt)
}

fn record<T>(method: &'static str, result: ContractResult<T>) -> ContractResult<T> {
    match &result {
        Ok(_) => metrics::record_contract_call(method, "ok"),
        Err(ContractError::NotInitialized) => {
            tracing::warn!(method, "Contract call without signer");
            metrics::record_contract_call(method, "not_initialized");
        }
        Err(e) => {
            tracing::warn!(method, error = %e, "Contract call failed");
            metrics::record_contract_call(method, "error");
        }
    }
    result
}
