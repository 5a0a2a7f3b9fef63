//! Write paths against a JSON-RPC node that confirms, reverts or stalls.

use reqwest::StatusCode;
use serde_json::{json, Value};

use crowdfund_portal::campaign::fixtures::sample_campaigns;
use crowdfund_portal::campaign::progress::unix_now;
use crowdfund_portal::campaign::CampaignSource;
use crowdfund_portal::PortalConfig;

mod common;

use common::{MockNode, Settlement, TestPortal};

fn config(request_secs: u64) -> PortalConfig {
    let mut config = PortalConfig::default();
    config.contract.address = common::CONTRACT_ADDRESS.to_string();
    config.timeouts.request_secs = request_secs;
    config
}

async fn post(client: &reqwest::Client, url: String, body: Value) -> (StatusCode, Value) {
    let res = client.post(url).json(&body).send().await.unwrap();
    let status = res.status();
    (status, res.json().await.unwrap())
}

async fn get(client: &reqwest::Client, url: String) -> Value {
    client.get(url).send().await.unwrap().json().await.unwrap()
}

/// Portal over the fixture campaigns with its wallet connected to `node`.
async fn connected_portal(node: &MockNode, request_secs: u64) -> (TestPortal, reqwest::Client) {
    let source = CampaignSource::fixture(sample_campaigns(unix_now()), "4.76");
    let portal = common::start_portal(config(request_secs), source, Some(node.provider())).await;
    let client = reqwest::Client::new();

    let (status, body) = post(&client, portal.url("/wallet/connect"), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["connected"], true);

    (portal, client)
}

#[tokio::test]
async fn test_confirmed_donation_is_recorded() {
    let node = MockNode::start(Settlement::Confirmed).await;
    let (portal, client) = connected_portal(&node, 30).await;

    let (status, body) = post(&client, portal.url("/campaign/1/donate"), json!({ "amount": "1.5" })).await;
    assert_eq!(status, StatusCode::OK, "body: {}", body);
    assert_eq!(body["message"], "Donation successful!");
    assert_eq!(body["txHash"], common::TX_HASH);
    assert_eq!(body["blockNumber"], common::RECEIPT_BLOCK);
    assert!(body.get("redirect").is_none());
    assert_eq!(node.raw_transactions(), 1);

    let body = get(&client, portal.url("/campaign/1")).await;
    assert_eq!(body["amountCollected"], "34.0");
    assert_eq!(body["donationCount"], 4);
    assert_eq!(body["donations"][0]["amount"], "1.5");
    assert_eq!(
        body["donations"][0]["donor"].as_str().unwrap().to_lowercase(),
        common::TEST_ADDRESS
    );
    assert_eq!(body["donating"], false);

    portal.stop().await;
}

#[tokio::test]
async fn test_confirmed_campaign_redirects_home() {
    let node = MockNode::start(Settlement::Confirmed).await;
    let (portal, client) = connected_portal(&node, 30).await;

    let (status, body) = post(
        &client,
        portal.url("/create"),
        json!({
            "name": "Community Garden",
            "description": "Raised beds for the neighbourhood",
            "targetAmount": "10.5",
            "deadline": "2099-01-01T00:00",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "body: {}", body);
    assert_eq!(body["message"], "Campaign created successfully!");
    assert_eq!(body["txHash"], common::TX_HASH);
    assert_eq!(body["blockNumber"], common::RECEIPT_BLOCK);
    assert_eq!(body["redirect"], "/");

    portal.stop().await;
}

#[tokio::test]
async fn test_reverted_donation_is_not_recorded() {
    let node = MockNode::start(Settlement::Reverted).await;
    let (portal, client) = connected_portal(&node, 30).await;

    let (status, body) = post(&client, portal.url("/campaign/1/donate"), json!({ "amount": "1.5" })).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "Failed to donate. Please try again.");
    assert_eq!(node.raw_transactions(), 1);

    let body = get(&client, portal.url("/campaign/1")).await;
    assert_eq!(body["amountCollected"], "32.5");
    assert_eq!(body["donationCount"], 3);
    assert_eq!(body["donating"], false);

    portal.stop().await;
}

#[tokio::test]
async fn test_zero_contract_address_sends_nothing() {
    let node = MockNode::start(Settlement::Confirmed).await;
    let source = CampaignSource::fixture(sample_campaigns(unix_now()), "4.76");
    let portal = common::start_portal(PortalConfig::default(), source, Some(node.provider())).await;
    let client = reqwest::Client::new();

    let (status, _) = post(&client, portal.url("/wallet/connect"), json!({})).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post(&client, portal.url("/campaign/1/donate"), json!({ "amount": "1.0" })).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "Contract not initialized");

    let (status, _) = post(
        &client,
        portal.url("/create"),
        json!({
            "name": "n",
            "description": "d",
            "targetAmount": "1",
            "deadline": "2099-01-01T00:00",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    assert_eq!(node.raw_transactions(), 0);
    let body = get(&client, portal.url("/campaign/1")).await;
    assert_eq!(body["amountCollected"], "32.5");

    portal.stop().await;
}

#[tokio::test]
async fn test_unparseable_amounts_never_reach_the_node() {
    let node = MockNode::start(Settlement::Confirmed).await;
    let (portal, client) = connected_portal(&node, 30).await;

    let (status, body) = post(&client, portal.url("/campaign/1/donate"), json!({ "amount": "1e-30" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Please enter a valid donation amount");

    let (status, body) = post(
        &client,
        portal.url("/create"),
        json!({
            "name": "n",
            "description": "d",
            "targetAmount": "1e3",
            "deadline": "2099-01-01T00:00",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["fields"]["targetAmount"], "Target amount must be greater than 0");

    assert_eq!(node.raw_transactions(), 0);
    portal.stop().await;
}

#[tokio::test]
async fn test_timed_out_donation_keeps_form_busy() {
    let node = MockNode::start(Settlement::Stalled).await;
    let (portal, client) = connected_portal(&node, 1).await;

    let (status, body) = post(&client, portal.url("/campaign/1/donate"), json!({ "amount": "1.0" })).await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body["error"], "The request timed out");

    // The broadcast is still pending, so a second attempt is refused.
    let (status, body) = post(&client, portal.url("/campaign/1/donate"), json!({ "amount": "1.0" })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "A submission is already in progress");
    assert_eq!(node.raw_transactions(), 1);

    let body = get(&client, portal.url("/campaign/1")).await;
    assert_eq!(body["donating"], true);
    assert_eq!(body["amountCollected"], "32.5");
}
