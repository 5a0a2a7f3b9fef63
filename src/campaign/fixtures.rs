//! Built-in sample campaigns and fixture file loading.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::campaign::source::SourceError;
use crate::campaign::types::{Campaign, Donation};

const DAY: i64 = 24 * 60 * 60;

#[allow(clippy::too_many_arguments)]
fn sample(
    id: &str,
    name: &str,
    description: &str,
    image_url: &str,
    target_amount: &str,
    amount_collected: &str,
    deadline: i64,
    owner: &str,
    is_active: bool,
) -> Campaign {
    Campaign {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        image_url: image_url.to_string(),
        target_amount: target_amount.to_string(),
        amount_collected: amount_collected.to_string(),
        deadline,
        owner: owner.to_string(),
        is_active,
        donations: Some(Vec::new()),
    }
}

/// Sample campaigns with deadlines relative to `now`.
pub fn sample_campaigns(now: i64) -> Vec<Campaign> {
    let mut campaigns = vec![
        sample(
            "1",
            "Revolutionary Green Energy Project",
            "Developing advanced solar panel technology to increase efficiency by 40% while reducing costs.",
            "https://images.pexels.com/photos/9800006/pexels-photo-9800006.jpeg",
            "50.0",
            "32.5",
            now + 30 * DAY,
            "0x1234567890123456789012345678901234567890",
            true,
        ),
        sample(
            "2",
            "Medical Research for Rare Diseases",
            "Funding critical research to find treatments for rare genetic disorders affecting children.",
            "https://images.pexels.com/photos/3938023/pexels-photo-3938023.jpeg",
            "25.0",
            "18.7",
            now + 45 * DAY,
            "0x2345678901234567890123456789012345678901",
            true,
        ),
        sample(
            "3",
            "Education Initiative for Rural Communities",
            "Building digital learning centers in underserved rural areas to provide quality education.",
            "https://images.pexels.com/photos/5427673/pexels-photo-5427673.jpeg",
            "15.0",
            "15.2",
            now - 5 * DAY,
            "0x3456789012345678901234567890123456789012",
            false,
        ),
        sample(
            "4",
            "Clean Water Solutions for Africa",
            "Installing water purification systems in African villages to provide clean drinking water.",
            "https://images.pexels.com/photos/6994311/pexels-photo-6994311.jpeg",
            "40.0",
            "12.3",
            now + 60 * DAY,
            "0x4567890123456789012345678901234567890123",
            true,
        ),
        sample(
            "5",
            "Blockchain Gaming Platform",
            "Creating a decentralized gaming platform with play-to-earn mechanics and NFT integration.",
            "https://images.pexels.com/photos/442576/pexels-photo-442576.jpeg",
            "100.0",
            "67.8",
            now + 20 * DAY,
            "0x5678901234567890123456789012345678901234",
            true,
        ),
        sample(
            "6",
            "Sustainable Fashion Startup",
            "Launching an eco-friendly clothing line using recycled materials and sustainable practices.",
            "https://images.pexels.com/photos/5698853/pexels-photo-5698853.jpeg",
            "30.0",
            "8.9",
            now + 35 * DAY,
            "0x6789012345678901234567890123456789012345",
            true,
        ),
    ];

    campaigns[0].donations = Some(vec![
        Donation {
            donor: "0xAbCdEf1234567890123456789012345678901234".to_string(),
            amount: "5.0".to_string(),
            timestamp: now - DAY,
        },
        Donation {
            donor: "0x9876543210987654321098765432109876543210".to_string(),
            amount: "10.0".to_string(),
            timestamp: now - 2 * DAY,
        },
        Donation {
            donor: "0x5555555555555555555555555555555555555555".to_string(),
            amount: "2.5".to_string(),
            timestamp: now - 3 * DAY,
        },
    ]);

    campaigns
}

/// Load a JSON array of campaigns.
pub fn load_fixture_file(path: &Path) -> Result<Vec<Campaign>, SourceError> {
    let file = File::open(path)
        .map_err(|e| SourceError::Fixture(format!("{}: {}", path.display(), e)))?;
    let campaigns: Vec<Campaign> = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| SourceError::Fixture(format!("{}: {}", path.display(), e)))?;

    tracing::info!(
        path = %path.display(),
        count = campaigns.len(),
        "Loaded campaign fixtures"
    );
    Ok(campaigns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_are_relative_to_now() {
        let now = 1_700_000_000;
        let campaigns = sample_campaigns(now);
        assert_eq!(campaigns.len(), 6);
        assert_eq!(campaigns[0].deadline, now + 30 * DAY);
        assert!(campaigns[2].is_expired(now));
        assert_eq!(campaigns[0].donation_count(), 3);
    }

    #[test]
    fn test_load_fixture_file() {
        let path = std::env::temp_dir().join("crowdfund_fixture_test.json");
        let campaigns = sample_campaigns(0);
        std::fs::write(&path, serde_json::to_string(&campaigns).unwrap()).unwrap();

        let loaded = load_fixture_file(&path).unwrap();
        assert_eq!(loaded, campaigns);

        std::fs::remove_file(&path).unwrap_or_default();
    }

    #[test]
    fn test_missing_fixture_file() {
        let err = load_fixture_file(Path::new("no/such/fixture.json")).unwrap_err();
        assert!(err.to_string().contains("no/such/fixture.json"));
    }
}
