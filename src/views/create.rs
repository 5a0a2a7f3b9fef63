//! Create-campaign form.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::contract::units::to_wei;
use crate::error::{FieldErrors, PortalError, PortalResult};
use crate::observability::metrics;
use crate::portal::Portal;
use crate::views::guard::create_key;
use crate::views::ActionOutcome;
use crate::wallet::WalletState;

pub const NOT_CONNECTED: &str = "Please connect your wallet first";
pub const NAME_REQUIRED: &str = "Campaign name is required";
pub const DESCRIPTION_REQUIRED: &str = "Description is required";
pub const TARGET_INVALID: &str = "Target amount must be greater than 0";
pub const DEADLINE_REQUIRED: &str = "Deadline is required";
pub const DEADLINE_INVALID: &str = "Deadline must be a valid date";
pub const DEADLINE_PAST: &str = "Deadline must be in the future";
pub const CREATE_SUCCESS: &str = "Campaign created successfully!";
pub const CREATE_FAILED: &str = "Failed to create campaign. Please try again.";

/// `POST /create`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateCampaignForm {
    pub name: String,
    pub description: String,
    pub image_url: String,
    /// Decimal ETH.
    pub target_amount: String,
    /// RFC 3339 or `YYYY-MM-DDTHH:MM` (UTC).
    pub deadline: String,
}

/// A form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCampaign {
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub target_amount: String,
    pub deadline: i64,
}

/// Parse a deadline input into unix seconds.
pub fn parse_deadline(input: &str) -> Option<i64> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.timestamp());
    }
    ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(|dt| dt.and_utc().timestamp())
}

impl CreateCampaignForm {
    /// Check every field independently. An empty image URL takes
    /// `default_image_url`.
    pub fn validate(&self, now: i64, default_image_url: &str) -> Result<ValidCampaign, FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.name.trim().is_empty() {
            errors.insert("name", NAME_REQUIRED.to_string());
        }
        if self.description.trim().is_empty() {
            errors.insert("description", DESCRIPTION_REQUIRED.to_string());
        }

        // Same decimal parser the contract call uses, so a target that
        // passes here always converts to wei.
        let target = self.target_amount.trim();
        let target_ok = to_wei(target).map(|wei| !wei.is_zero()).unwrap_or(false);
        if !target_ok {
            errors.insert("targetAmount", TARGET_INVALID.to_string());
        }

        let deadline_input = self.deadline.trim();
        let deadline = if deadline_input.is_empty() {
            errors.insert("deadline", DEADLINE_REQUIRED.to_string());
            None
        } else {
            match parse_deadline(deadline_input) {
                None => {
                    errors.insert("deadline", DEADLINE_INVALID.to_string());
                    None
                }
                Some(ts) if ts <= now => {
                    errors.insert("deadline", DEADLINE_PAST.to_string());
                    None
                }
                Some(ts) => Some(ts),
            }
        };

        match deadline {
            Some(deadline) if errors.is_empty() => {
                let image_url = match self.image_url.trim() {
                    "" => default_image_url.to_string(),
                    url => url.to_string(),
                };
                Ok(ValidCampaign {
                    name: self.name.trim().to_string(),
                    description: self.description.trim().to_string(),
                    image_url,
                    target_amount: target.to_string(),
                    deadline,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Validate and submit a new campaign.
pub async fn create_campaign(
    portal: &Portal,
    wallet: &WalletState,
    form: &CreateCampaignForm,
    now: i64,
) -> PortalResult<ActionOutcome> {
    if !wallet.connected {
        metrics::record_form_rejection("create", "not_connected");
        return Err(PortalError::NotConnected(NOT_CONNECTED));
    }

    let campaign = form
        .validate(now, &portal.config.campaigns.default_image_url)
        .map_err(|errors| {
            metrics::record_form_rejection("create", "validation");
            tracing::debug!(fields = ?errors.keys().collect::<Vec<_>>(), "Create form rejected");
            PortalError::Validation(errors)
        })?;

    let submitting = portal.inflight.begin(create_key())?;
    let contract = portal.contract(wallet);

    submitting
        .detach(CREATE_FAILED, async move {
            let receipt = contract
                .create_campaign(
                    &campaign.name,
                    &campaign.description,
                    &campaign.image_url,
                    &campaign.target_amount,
                    campaign.deadline,
                )
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, "Error creating campaign");
                    PortalError::from_contract(e, CREATE_FAILED)
                })?;

            tracing::info!(name = %campaign.name, deadline = campaign.deadline, "Campaign created");
            Ok(ActionOutcome::from_receipt(CREATE_SUCCESS, &receipt).redirect_to("/"))
        })
        .await
}
