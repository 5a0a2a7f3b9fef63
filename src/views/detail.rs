//! Campaign detail view with donate and withdraw actions.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::campaign::progress::{days_left, format_address, format_date_long, progress_percentage};
use crate::campaign::{Campaign, Donation};
use crate::contract::units::to_wei;
use crate::error::{PortalError, PortalResult};
use crate::observability::metrics;
use crate::portal::Portal;
use crate::views::guard::{donate_key, withdraw_key};
use crate::views::ActionOutcome;
use crate::wallet::WalletState;

pub const DONATE_NOT_CONNECTED: &str = "Please connect your wallet to donate";
pub const INVALID_DONATION: &str = "Please enter a valid donation amount";
pub const DONATION_SUCCESS: &str = "Donation successful!";
pub const DONATION_FAILED: &str = "Failed to donate. Please try again.";
pub const NOT_OWNER: &str = "Only the campaign owner can withdraw funds";
pub const WITHDRAW_SUCCESS: &str = "Funds withdrawn successfully!";
pub const WITHDRAW_FAILED: &str = "Failed to withdraw funds. Please try again.";

/// Donation history entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationEntry {
    pub donor: String,
    pub donor_display: String,
    pub amount: String,
    pub timestamp: i64,
    pub date_display: String,
}

impl From<&Donation> for DonationEntry {
    fn from(donation: &Donation) -> Self {
        Self {
            donor: donation.donor.clone(),
            donor_display: format_address(&donation.donor),
            amount: donation.amount.clone(),
            timestamp: donation.timestamp,
            date_display: format_date_long(donation.timestamp),
        }
    }
}

/// Rendered detail page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignDetailView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub target_amount: String,
    pub amount_collected: String,
    pub owner: String,
    pub owner_display: String,
    pub deadline: i64,
    pub deadline_display: String,
    pub is_active: bool,
    pub expired: bool,
    pub progress: f64,
    pub days_left: i64,
    pub donation_count: usize,
    pub donations: Vec<DonationEntry>,
    pub is_owner: bool,
    /// Donation form is offered only while the campaign is open.
    pub can_donate: bool,
    pub donating: bool,
    pub withdrawing: bool,
}

/// `POST /campaign/{id}/donate`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DonateForm {
    pub amount: String,
}

/// Whether the connected account owns `campaign`.
pub fn is_owner(wallet: &WalletState, campaign: &Campaign) -> bool {
    wallet.is_address(&campaign.owner)
}

/// A donation amount must be a decimal ETH value of at least one wei.
pub fn validate_donation(amount: &str) -> PortalResult<&str> {
    let amount = amount.trim();
    if !to_wei(amount).map(|wei| !wei.is_zero()).unwrap_or(false) {
        metrics::record_form_rejection("donate", "invalid_amount");
        return Err(PortalError::InvalidInput(INVALID_DONATION));
    }
    Ok(amount)
}

pub fn build_detail(
    campaign: &Campaign,
    wallet: &WalletState,
    now: i64,
    donating: bool,
    withdrawing: bool,
) -> CampaignDetailView {
    let donations: Vec<DonationEntry> = campaign
        .donations
        .iter()
        .flatten()
        .map(DonationEntry::from)
        .collect();

    CampaignDetailView {
        id: campaign.id.clone(),
        name: campaign.name.clone(),
        description: campaign.description.clone(),
        image_url: campaign.image_url.clone(),
        target_amount: campaign.target_amount.clone(),
        amount_collected: campaign.amount_collected.clone(),
        owner: campaign.owner.clone(),
        owner_display: format_address(&campaign.owner),
        deadline: campaign.deadline,
        deadline_display: format_date_long(campaign.deadline),
        is_active: campaign.is_active,
        expired: campaign.is_expired(now),
        progress: progress_percentage(&campaign.amount_collected, &campaign.target_amount),
        days_left: days_left(campaign.deadline, now),
        donation_count: donations.len(),
        donations,
        is_owner: is_owner(wallet, campaign),
        can_donate: campaign.is_open(now),
        donating,
        withdrawing,
    }
}

async fn load(portal: &Portal, wallet: &WalletState, id: &str) -> PortalResult<Campaign> {
    portal
        .source
        .campaign(id, wallet)
        .await
        .map_err(|e| {
            tracing::error!(campaign_id = %id, error = %e, "Error loading campaign");
            e
        })?
        .ok_or_else(|| PortalError::NotFound(id.to_string()))
}

/// `GET /campaign/{id}`
pub async fn campaign_detail(
    portal: &Portal,
    wallet: &WalletState,
    id: &str,
    now: i64,
) -> PortalResult<CampaignDetailView> {
    let campaign = load(portal, wallet, id).await?;
    Ok(build_detail(
        &campaign,
        wallet,
        now,
        portal.inflight.is_submitting(&donate_key(id)),
        portal.inflight.is_submitting(&withdraw_key(id)),
    ))
}

/// Send a donation after client-side checks and record it once confirmed.
pub async fn donate(
    portal: &Arc<Portal>,
    wallet: &WalletState,
    id: &str,
    form: &DonateForm,
    now: i64,
) -> PortalResult<ActionOutcome> {
    if !wallet.connected {
        metrics::record_form_rejection("donate", "not_connected");
        return Err(PortalError::NotConnected(DONATE_NOT_CONNECTED));
    }
    let amount = validate_donation(&form.amount)?.to_string();

    let submitting = portal.inflight.begin(donate_key(id))?;
    let contract = portal.contract(wallet);
    let portal = Arc::clone(portal);
    let id = id.to_string();
    let donor = wallet.address.map(|a| a.to_string()).unwrap_or_default();

    submitting
        .detach(DONATION_FAILED, async move {
            let receipt = contract.donate(&id, &amount).await.map_err(|e| {
                tracing::error!(campaign_id = %id, error = %e, "Error donating");
                PortalError::from_contract(e, DONATION_FAILED)
            })?;

            portal.source.record_donation(&id, &donor, &amount, now).await;
            tracing::info!(campaign_id = %id, amount = %amount, "Donation confirmed");
            Ok(ActionOutcome::from_receipt(DONATION_SUCCESS, &receipt))
        })
        .await
}

/// Withdraw collected funds; only the owner may.
pub async fn withdraw(portal: &Portal, wallet: &WalletState, id: &str) -> PortalResult<ActionOutcome> {
    let campaign = load(portal, wallet, id).await?;
    if !is_owner(wallet, &campaign) {
        metrics::record_form_rejection("withdraw", "not_owner");
        return Err(PortalError::Forbidden(NOT_OWNER));
    }

    let submitting = portal.inflight.begin(withdraw_key(id))?;
    let contract = portal.contract(wallet);
    let id = id.to_string();

    submitting
        .detach(WITHDRAW_FAILED, async move {
            let receipt = contract.withdraw(&id).await.map_err(|e| {
                tracing::error!(campaign_id = %id, error = %e, "Error withdrawing funds");
                PortalError::from_contract(e, WITHDRAW_FAILED)
            })?;

            tracing::info!(campaign_id = %id, "Funds withdrawn");
            Ok(ActionOutcome::from_receipt(WITHDRAW_SUCCESS, &receipt))
        })
        .await
}
