//! Campaign domain types.
//!
//! Monetary fields are decimal ETH strings; conversion to wei happens only at
//! the contract boundary (`crate::contract::units`).

use serde::{Deserialize, Serialize};

/// A crowdfunding campaign as displayed by the portal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    /// Campaign identifier (decimal string of the on-chain id).
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    /// Funding goal in ETH.
    pub target_amount: String,
    /// Amount raised so far in ETH.
    pub amount_collected: String,
    /// Unix timestamp (seconds).
    pub deadline: i64,
    /// Owner address.
    pub owner: String,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub donations: Option<Vec<Donation>>,
}

/// A single donation to a campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donation {
    pub donor: String,
    /// Amount in ETH.
    pub amount: String,
    /// Unix timestamp (seconds).
    pub timestamp: i64,
}

impl Campaign {
    /// Deadline has passed at `now`.
    pub fn is_expired(&self, now: i64) -> bool {
        now > self.deadline
    }

    /// Active flag set and deadline not yet passed.
    pub fn is_open(&self, now: i64) -> bool {
        self.is_active && !self.is_expired(now)
    }

    /// Number of recorded donations (0 when the source does not track them).
    pub fn donation_count(&self) -> usize {
        self.donations.as_ref().map_or(0, Vec::len)
    }
}
