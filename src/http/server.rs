//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the axum Router with all handlers
//! - Wire up middleware (tracing, request deadline, CORS)
//! - Bind the server to a listener and serve until shutdown

use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::Address;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::campaigns::{CampaignAggregator, TxOrchestrator};
use crate::config::GatewayConfig;
use crate::http::handlers;
use crate::ledger::CampaignLedger;

/// Application state injected into handlers.
///
/// Built once at startup around the shared ledger handle; handlers never
/// rebind it and carry no state of their own across requests.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<CampaignAggregator>,
    pub orchestrator: Arc<TxOrchestrator>,
    pub contract_address: Address,
}

impl AppState {
    pub fn new(ledger: Arc<dyn CampaignLedger>, contract_address: Address) -> Self {
        Self {
            aggregator: Arc::new(CampaignAggregator::new(Arc::clone(&ledger))),
            orchestrator: Arc::new(TxOrchestrator::new(ledger)),
            contract_address,
        }
    }
}

/// Build the axum router with all routes and middleware layers.
pub fn build_router(config: &GatewayConfig, state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/campaigns",
            get(handlers::list_campaigns).post(handlers::create_campaign),
        )
        .route("/contribute", post(handlers::contribute))
        .route("/refund", post(handlers::refund))
        .route("/withdraw", post(handlers::withdraw))
        .with_state(state)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.listener.request_timeout_secs,
        )))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server from configuration and state.
    pub fn new(config: &GatewayConfig, state: AppState) -> Self {
        Self {
            router: build_router(config, state),
        }
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
