//! Crowdfunding portal.
//!
//! Serves the campaign list, detail, create and admin views as JSON routes
//! backed by a crowdfunding contract and a locally configured wallet.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ──▶ http::server ──▶ http::handlers ──▶ views::{list, detail, create, admin, wallet}
//!                                                     │               │
//!                                                     ▼               ▼
//!                                            campaign::source   contract::service
//!                                                     │               │
//!                                                     └──▶ wallet::store (signer) ──▶ JSON-RPC node
//! ```

use std::sync::Arc;

use tokio::net::TcpListener;

use crowdfund_portal::campaign::progress::unix_now;
use crowdfund_portal::config::load_from_env;
use crowdfund_portal::lifecycle::signals::spawn_signal_listener;
use crowdfund_portal::observability::{logging, metrics};
use crowdfund_portal::{Portal, PortalServer, Shutdown};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_from_env()?;
    logging::init_logging(&config.observability);

    tracing::info!("crowdfund-portal v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        source = ?config.data.source,
        admin_authority = ?config.admin.authority,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let portal = Arc::new(Portal::from_config(config, unix_now())?);

    let shutdown = Shutdown::new();
    spawn_signal_listener(&shutdown);

    PortalServer::new(portal).run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
