//! Admin panel: gate, platform stats and fee withdrawal.
//!
//! The admin account is either configured (`admin.address`) or read from the
//! contract's `admin()` view, depending on `admin.authority`.

use serde::Serialize;

use crate::campaign::{campaign_stats, CampaignStats};
use crate::config::{AdminAuthority, FeeConfig};
use crate::error::{PortalError, PortalResult};
use crate::observability::metrics;
use crate::portal::Portal;
use crate::views::guard::withdraw_fees_key;
use crate::views::ActionOutcome;
use crate::wallet::WalletState;

pub const CONNECT_REQUIRED: &str = "Please connect your wallet to access the admin panel.";
pub const NO_PERMISSION: &str = "You don't have permission to access the admin panel.";
pub const NOT_AUTHORIZED: &str = "You are not authorized to perform this action";
pub const FEES_WITHDRAWN: &str = "Platform fees withdrawn successfully!";
pub const FEES_FAILED: &str = "Failed to withdraw platform fees. Please try again.";

/// Fee percentages for display, e.g. `3%`, `0.5%`, `3.5%`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeStructure {
    pub platform_fee: String,
    pub processing_fee: String,
    pub total_fee: String,
}

impl From<&FeeConfig> for FeeStructure {
    fn from(fees: &FeeConfig) -> Self {
        Self {
            platform_fee: percent(fees.platform_bps),
            processing_fee: percent(fees.processing_bps),
            total_fee: percent(fees.platform_bps.saturating_add(fees.processing_bps)),
        }
    }
}

fn percent(bps: u32) -> String {
    format!("{}%", f64::from(bps) / 100.0)
}

/// Rendered admin panel.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminView {
    pub admin_address: String,
    pub stats: CampaignStats,
    pub platform_fees: String,
    pub fee_structure: FeeStructure,
    pub withdrawing: bool,
}

/// Case-insensitive match of the connected account against `admin_address`.
pub fn is_admin(wallet: &WalletState, admin_address: &str) -> bool {
    !admin_address.trim().is_empty() && wallet.is_address(admin_address)
}

/// Gate for viewing the panel.
pub fn check_access(wallet: &WalletState, admin_address: &str) -> PortalResult<()> {
    if !wallet.connected {
        return Err(PortalError::NotConnected(CONNECT_REQUIRED));
    }
    if !is_admin(wallet, admin_address) {
        tracing::warn!(address = ?wallet.address, "Admin panel access denied");
        return Err(PortalError::Forbidden(NO_PERMISSION));
    }
    Ok(())
}

/// Resolve the admin account for the configured authority.
pub async fn admin_address(portal: &Portal, wallet: &WalletState) -> PortalResult<String> {
    match portal.config.admin.authority {
        AdminAuthority::Configured => Ok(portal.config.admin.address.clone()),
        AdminAuthority::Contract => {
            // Without a signer nobody can be admin; fall through to the gate.
            if !wallet.connected {
                return Ok(String::new());
            }
            let address = portal
                .contract(wallet)
                .get_admin_address()
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, "Error reading admin address");
                    PortalError::from_contract(e, "Failed to read the admin account")
                })?;
            Ok(address.to_string())
        }
    }
}

/// `GET /admin`
pub async fn admin_panel(portal: &Portal, wallet: &WalletState, now: i64) -> PortalResult<AdminView> {
    let admin = admin_address(portal, wallet).await?;
    check_access(wallet, &admin)?;

    let campaigns = portal.source.campaigns(wallet).await?;
    let platform_fees = portal.source.platform_fees(wallet).await?;

    Ok(AdminView {
        admin_address: admin,
        stats: campaign_stats(&campaigns, now),
        platform_fees,
        fee_structure: FeeStructure::from(&portal.config.fees),
        withdrawing: portal.inflight.is_submitting(&withdraw_fees_key()),
    })
}

/// `POST /admin/withdraw-fees`
pub async fn withdraw_platform_fees(portal: &Portal, wallet: &WalletState) -> PortalResult<ActionOutcome> {
    let admin = admin_address(portal, wallet).await?;
    if !is_admin(wallet, &admin) {
        metrics::record_form_rejection("withdraw_fees", "not_admin");
        return Err(PortalError::Forbidden(NOT_AUTHORIZED));
    }

    let submitting = portal.inflight.begin(withdraw_fees_key())?;
    let contract = portal.contract(wallet);

    submitting
        .detach(FEES_FAILED, async move {
            let receipt = contract.withdraw_platform_fees().await.map_err(|e| {
                tracing::error!(error = %e, "Error withdrawing platform fees");
                PortalError::from_contract(e, FEES_FAILED)
            })?;

            tracing::info!("Platform fees withdrawn");
            Ok(ActionOutcome::from_receipt(FEES_WITHDRAWN, &receipt))
        })
        .await
}
