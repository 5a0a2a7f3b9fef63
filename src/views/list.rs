//! Campaign list view: hero stats, search, status filter and cards.

use serde::{Deserialize, Serialize};

use crate::campaign::progress::{days_left, format_date_short, progress_percentage};
use crate::campaign::{campaign_stats, filter_campaigns, Campaign, CampaignFilter, CampaignStats};
use crate::error::PortalResult;
use crate::portal::Portal;
use crate::wallet::WalletState;

/// `GET /?search=..&filter=..`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListQuery {
    pub search: String,
    pub filter: CampaignFilter,
}

/// One campaign card in the grid.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignCard {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub target_amount: String,
    pub amount_collected: String,
    pub owner: String,
    pub deadline: i64,
    pub deadline_display: String,
    pub is_active: bool,
    pub expired: bool,
    pub progress: f64,
    pub days_left: i64,
}

impl CampaignCard {
    pub fn new(campaign: &Campaign, now: i64) -> Self {
        Self {
            id: campaign.id.clone(),
            name: campaign.name.clone(),
            description: campaign.description.clone(),
            image_url: campaign.image_url.clone(),
            target_amount: campaign.target_amount.clone(),
            amount_collected: campaign.amount_collected.clone(),
            owner: campaign.owner.clone(),
            deadline: campaign.deadline,
            deadline_display: format_date_short(campaign.deadline),
            is_active: campaign.is_active,
            expired: campaign.is_expired(now),
            progress: progress_percentage(&campaign.amount_collected, &campaign.target_amount),
            days_left: days_left(campaign.deadline, now),
        }
    }
}

/// Rendered list page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignListView {
    pub stats: CampaignStats,
    pub heading: &'static str,
    pub search: String,
    pub filter: CampaignFilter,
    pub count: usize,
    pub campaigns: Vec<CampaignCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

/// Message shown when nothing survives the search and filter.
pub fn empty_message(search: &str) -> String {
    if search.is_empty() {
        "No campaigns available for this filter.".to_string()
    } else {
        format!("No campaigns match \"{}\". Try adjusting your search.", search)
    }
}

/// Build the list page from an already loaded campaign set.
pub fn build_list(campaigns: &[Campaign], query: &ListQuery, now: i64) -> CampaignListView {
    let search = query.search.as_str();
    let cards: Vec<CampaignCard> = filter_campaigns(campaigns, query.filter, search, now)
        .into_iter()
        .map(|c| CampaignCard::new(c, now))
        .collect();

    CampaignListView {
        stats: campaign_stats(campaigns, now),
        heading: query.filter.heading(),
        search: search.to_string(),
        filter: query.filter,
        count: cards.len(),
        empty_message: cards.is_empty().then(|| empty_message(search)),
        campaigns: cards,
    }
}

/// Load campaigns from the configured source and build the list page.
pub async fn campaign_list(
    portal: &Portal,
    wallet: &WalletState,
    query: &ListQuery,
    now: i64,
) -> PortalResult<CampaignListView> {
    let campaigns = portal.source.campaigns(wallet).await.map_err(|e| {
        tracing::error!(error = %e, "Error loading campaigns");
        e
    })?;
    Ok(build_list(&campaigns, query, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::fixtures::sample_campaigns;

    const NOW: i64 = 1_792_249_440;

    fn query(search: &str, filter: CampaignFilter) -> ListQuery {
        ListQuery {
            search: search.to_string(),
            filter,
        }
    }

    #[test]
    fn test_all_campaigns_with_stats() {
        let campaigns = sample_campaigns(NOW);
        let view = build_list(&campaigns, &ListQuery::default(), NOW);

        assert_eq!(view.heading, "All Campaigns");
        assert_eq!(view.count, 6);
        assert!(view.empty_message.is_none());
        assert_eq!(view.stats.total_campaigns, 6);
        assert_eq!(view.stats.active_campaigns, 5);
        assert_eq!(view.stats.total_raised, "155.4");
    }

    #[test]
    fn test_card_display_fields() {
        let campaigns = sample_campaigns(NOW);
        let view = build_list(&campaigns, &ListQuery::default(), NOW);
        let first = &view.campaigns[0];

        assert_eq!(first.progress, 65.0);
        assert_eq!(first.days_left, 30);
        assert_eq!(first.deadline_display, "Nov 16, 2026");
        assert!(!first.expired);

        let expired = view.campaigns.iter().find(|c| c.id == "3").unwrap();
        assert_eq!(expired.progress, 100.0);
        assert_eq!(expired.days_left, 0);
        assert!(expired.expired);
    }

    #[test]
    fn test_filters() {
        let campaigns = sample_campaigns(NOW);

        let active = build_list(&campaigns, &query("", CampaignFilter::Active), NOW);
        assert_eq!(active.heading, "Active Campaigns");
        assert_eq!(active.count, 5);

        let completed = build_list(&campaigns, &query("", CampaignFilter::Completed), NOW);
        assert_eq!(completed.heading, "Completed Campaigns");
        assert_eq!(completed.count, 1);
        assert_eq!(completed.campaigns[0].id, "3");
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let campaigns = sample_campaigns(NOW);
        let view = build_list(&campaigns, &query("WATER", CampaignFilter::All), NOW);
        assert_eq!(view.count, 1);
        assert_eq!(view.search, "WATER");
        assert_eq!(view.campaigns[0].id, "4");
    }

    #[test]
    fn test_search_term_is_matched_verbatim() {
        let campaigns = sample_campaigns(NOW);
        // Surrounding whitespace is part of the term.
        let view = build_list(&campaigns, &query(" WATER ", CampaignFilter::All), NOW);
        assert_eq!(view.search, " WATER ");
        assert_eq!(view.count, 1);

        let view = build_list(&campaigns, &query("  WATER", CampaignFilter::All), NOW);
        assert_eq!(view.count, 0);
        assert_eq!(
            view.empty_message.as_deref(),
            Some("No campaigns match \"  WATER\". Try adjusting your search.")
        );
    }

    #[test]
    fn test_empty_messages() {
        let campaigns = sample_campaigns(NOW);

        let view = build_list(&campaigns, &query("spaceship", CampaignFilter::All), NOW);
        assert_eq!(view.count, 0);
        assert_eq!(
            view.empty_message.as_deref(),
            Some("No campaigns match \"spaceship\". Try adjusting your search.")
        );

        let view = build_list(&[], &ListQuery::default(), NOW);
        assert_eq!(
            view.empty_message.as_deref(),
            Some("No campaigns available for this filter.")
        );
    }

    #[test]
    fn test_query_defaults() {
        let query: ListQuery = serde_json::from_str(r#"{"filter":"completed"}"#).unwrap();
        assert_eq!(query.filter, CampaignFilter::Completed);
        assert!(query.search.is_empty());
    }
}
