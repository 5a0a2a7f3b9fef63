//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID, metrics)
//! - Bind server to listener
//! - Stop accepting on the shutdown broadcast

use std::sync::Arc;
use std::time::Duration;

use axum::{
    error_handling::HandleErrorLayer,
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::http::handlers;
use crate::portal::Portal;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub portal: Arc<Portal>,
}

/// HTTP front of the portal.
pub struct PortalServer {
    router: Router,
}

impl PortalServer {
    pub fn new(portal: Arc<Portal>) -> Self {
        let request_timeout = Duration::from_secs(portal.config.timeouts.request_secs);
        let router = Self::build_router(AppState { portal }, request_timeout);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// A timed-out request answers with a JSON [`PortalError::Timeout`]; any
    /// transaction it started keeps running on its own task.
    ///
    /// [`PortalError::Timeout`]: crate::error::PortalError::Timeout
    fn build_router(state: AppState, request_timeout: Duration) -> Router {
        Router::new()
            .route("/", get(handlers::list_campaigns))
            .route("/create", post(handlers::create_campaign))
            .route("/campaign/{id}", get(handlers::campaign_detail))
            .route("/campaign/{id}/donate", post(handlers::donate))
            .route("/campaign/{id}/withdraw", post(handlers::withdraw))
            .route("/admin", get(handlers::admin_panel))
            .route("/admin/withdraw-fees", post(handlers::withdraw_fees))
            .route("/wallet", get(handlers::wallet_status))
            .route("/wallet/connect", post(handlers::connect_wallet))
            .route("/wallet/disconnect", post(handlers::disconnect_wallet))
            .route("/health", get(handlers::health))
            .route_layer(middleware::from_fn(handlers::track_requests))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(HandleErrorLayer::new(handlers::handle_middleware_error))
                    .layer(TimeoutLayer::new(request_timeout)),
            )
    }

    /// The router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until a shutdown signal arrives.
    pub async fn run(self, listener: TcpListener, mut shutdown: broadcast::Receiver<()>) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
