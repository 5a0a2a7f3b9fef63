//! Route handlers. Each one takes a wallet snapshot and delegates to a view.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Path, Query, Request, State},
    middleware::Next,
    response::Response,
    BoxError, Json,
};
use serde::Serialize;

use crate::campaign::progress::unix_now;
use crate::config::DataSourceKind;
use crate::error::{PortalError, PortalResult};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::views::admin::{self, AdminView};
use crate::views::create::{self, CreateCampaignForm};
use crate::views::detail::{self, CampaignDetailView, DonateForm};
use crate::views::list::{self, CampaignListView, ListQuery};
use crate::views::{wallet, ActionOutcome};
use crate::wallet::WalletSummary;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub source: DataSourceKind,
    pub wallet_provider: bool,
    pub wallet_connected: bool,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "ok",
        source: state.portal.source.kind(),
        wallet_provider: state.portal.wallet.has_provider(),
        wallet_connected: state.portal.wallet.connected(),
    })
}

pub async fn list_campaigns(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> PortalResult<Json<CampaignListView>> {
    let wallet = state.portal.wallet.snapshot();
    let view = list::campaign_list(&state.portal, &wallet, &query, unix_now()).await?;
    Ok(Json(view))
}

pub async fn create_campaign(
    State(state): State<AppState>,
    Json(form): Json<CreateCampaignForm>,
) -> PortalResult<Json<ActionOutcome>> {
    let wallet = state.portal.wallet.snapshot();
    let outcome = create::create_campaign(&state.portal, &wallet, &form, unix_now()).await?;
    Ok(Json(outcome))
}

pub async fn campaign_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> PortalResult<Json<CampaignDetailView>> {
    let wallet = state.portal.wallet.snapshot();
    let view = detail::campaign_detail(&state.portal, &wallet, &id, unix_now()).await?;
    Ok(Json(view))
}

pub async fn donate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(form): Json<DonateForm>,
) -> PortalResult<Json<ActionOutcome>> {
    let wallet = state.portal.wallet.snapshot();
    let outcome = detail::donate(&state.portal, &wallet, &id, &form, unix_now()).await?;
    Ok(Json(outcome))
}

pub async fn withdraw(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> PortalResult<Json<ActionOutcome>> {
    let wallet = state.portal.wallet.snapshot();
    let outcome = detail::withdraw(&state.portal, &wallet, &id).await?;
    Ok(Json(outcome))
}

pub async fn admin_panel(State(state): State<AppState>) -> PortalResult<Json<AdminView>> {
    let wallet = state.portal.wallet.snapshot();
    let view = admin::admin_panel(&state.portal, &wallet, unix_now()).await?;
    Ok(Json(view))
}

pub async fn withdraw_fees(State(state): State<AppState>) -> PortalResult<Json<ActionOutcome>> {
    let wallet = state.portal.wallet.snapshot();
    let outcome = admin::withdraw_platform_fees(&state.portal, &wallet).await?;
    Ok(Json(outcome))
}

pub async fn wallet_status(State(state): State<AppState>) -> Json<WalletSummary> {
    Json(wallet::wallet_summary(&state.portal))
}

pub async fn connect_wallet(State(state): State<AppState>) -> PortalResult<Json<WalletSummary>> {
    Ok(Json(wallet::connect(&state.portal)?))
}

pub async fn disconnect_wallet(State(state): State<AppState>) -> Json<WalletSummary> {
    Json(wallet::disconnect(&state.portal))
}

/// Count and time every matched request.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;
    let status = response.status().as_u16();

    tracing::debug!(route = %route, status, elapsed_ms = start.elapsed().as_millis() as u64, "Request handled");
    metrics::record_request(&route, status, start);
    response
}

/// Map errors from the tower middleware stack onto the JSON error body.
pub async fn handle_middleware_error(err: BoxError) -> PortalError {
    if err.is::<tower::timeout::error::Elapsed>() {
        tracing::warn!("Request timed out");
        PortalError::Timeout
    } else {
        tracing::error!(error = %err, "Unhandled middleware error");
        PortalError::Internal(err.to_string())
    }
}
