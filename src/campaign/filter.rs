//! Campaign list filtering, search and aggregate stats.

use serde::{Deserialize, Serialize};

use crate::campaign::progress::total_raised;
use crate::campaign::types::Campaign;

/// Status filter offered by the campaign list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignFilter {
    #[default]
    All,
    /// Active flag set and deadline not passed.
    Active,
    /// Expired or deactivated.
    Completed,
}

impl CampaignFilter {
    /// Heading shown above the filtered grid.
    pub fn heading(self) -> &'static str {
        match self {
            CampaignFilter::All => "All Campaigns",
            CampaignFilter::Active => "Active Campaigns",
            CampaignFilter::Completed => "Completed Campaigns",
        }
    }

    fn admits(self, campaign: &Campaign, now: i64) -> bool {
        match self {
            CampaignFilter::All => true,
            CampaignFilter::Active => campaign.is_open(now),
            CampaignFilter::Completed => !campaign.is_open(now),
        }
    }
}

/// Case-insensitive match against name or description. Empty term matches all.
pub fn matches_search(campaign: &Campaign, term: &str) -> bool {
    let term = term.to_lowercase();
    campaign.name.to_lowercase().contains(&term)
        || campaign.description.to_lowercase().contains(&term)
}

/// Apply search and status filter, preserving input order.
pub fn filter_campaigns<'a>(
    campaigns: &'a [Campaign],
    filter: CampaignFilter,
    search: &str,
    now: i64,
) -> Vec<&'a Campaign> {
    campaigns
        .iter()
        .filter(|c| matches_search(c, search) && filter.admits(c, now))
        .collect()
}

/// Aggregate numbers for the list hero section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CampaignStats {
    /// Sum of amounts collected, one decimal.
    pub total_raised: String,
    pub active_campaigns: usize,
    pub total_campaigns: usize,
}

/// Compute hero stats over the unfiltered campaign set.
pub fn campaign_stats(campaigns: &[Campaign], now: i64) -> CampaignStats {
    CampaignStats {
        total_raised: total_raised(campaigns.iter().map(|c| c.amount_collected.as_str())),
        active_campaigns: campaigns.iter().filter(|c| c.is_open(now)).count(),
        total_campaigns: campaigns.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;
    const DAY: i64 = 86_400;

    fn campaign(id: &str, name: &str, description: &str, deadline: i64, active: bool) -> Campaign {
        Campaign {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            image_url: String::new(),
            target_amount: "10.0".into(),
            amount_collected: "2.5".into(),
            deadline,
            owner: "0x1234567890123456789012345678901234567890".into(),
            is_active: active,
            donations: None,
        }
    }

    fn sample() -> Vec<Campaign> {
        vec![
            campaign("1", "Green Energy", "Solar panels", NOW + 30 * DAY, true),
            campaign("2", "Medical Research", "Rare diseases", NOW - DAY, true),
            campaign("3", "Education", "Rural learning centers", NOW + 10 * DAY, false),
            campaign("4", "Clean Water", "Purification in villages", NOW + 60 * DAY, true),
        ]
    }

    fn ids(campaigns: Vec<&Campaign>) -> Vec<&str> {
        campaigns.into_iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_active_excludes_expired_and_inactive() {
        let all = sample();
        assert_eq!(ids(filter_campaigns(&all, CampaignFilter::Active, "", NOW)), ["1", "4"]);
    }

    #[test]
    fn test_completed_is_expired_or_inactive() {
        let all = sample();
        assert_eq!(
            ids(filter_campaigns(&all, CampaignFilter::Completed, "", NOW)),
            ["2", "3"]
        );
    }

    #[test]
    fn test_all_keeps_everything() {
        let all = sample();
        assert_eq!(filter_campaigns(&all, CampaignFilter::All, "", NOW).len(), 4);
    }

    #[test]
    fn test_search_is_case_insensitive_on_name_or_description() {
        let all = sample();
        assert_eq!(ids(filter_campaigns(&all, CampaignFilter::All, "GREEN", NOW)), ["1"]);
        assert_eq!(ids(filter_campaigns(&all, CampaignFilter::All, "villages", NOW)), ["4"]);
        assert_eq!(
            ids(filter_campaigns(&all, CampaignFilter::Completed, "rural", NOW)),
            ["3"]
        );
        assert!(filter_campaigns(&all, CampaignFilter::Active, "rural", NOW).is_empty());
    }

    #[test]
    fn test_stats() {
        let stats = campaign_stats(&sample(), NOW);
        assert_eq!(stats.total_raised, "10.0");
        assert_eq!(stats.active_campaigns, 2);
        assert_eq!(stats.total_campaigns, 4);
    }

    #[test]
    fn test_filter_deserializes_lowercase() {
        let filter: CampaignFilter = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(filter, CampaignFilter::Completed);
        assert_eq!(filter.heading(), "Completed Campaigns");
    }
}
