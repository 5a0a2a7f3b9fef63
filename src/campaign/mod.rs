//! Campaign data model, display math and data sources.

pub mod filter;
pub mod fixtures;
pub mod progress;
pub mod source;
pub mod types;

pub use filter::{campaign_stats, filter_campaigns, CampaignFilter, CampaignStats};
pub use source::{CampaignSource, SourceError};
pub use types::{Campaign, Donation};
