//! Crowdfunding Ledger Gateway
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                  GATEWAY                     │
//!                    │                                              │
//!   Client Request   │  ┌────────┐   ┌──────────┐   ┌───────────┐  │
//!   ─────────────────┼─▶│  http  │──▶│ handlers │──▶│aggregator │──┼──▶ read calls
//!                    │  │ server │   │(validate)│   │           │  │
//!                    │  └────────┘   └────┬─────┘   └───────────┘  │
//!                    │                    │                        │
//!                    │                    ▼                        │
//!                    │             ┌────────────┐   ┌───────────┐  │
//!   Client Response  │             │orchestrator│──▶│  ledger   │──┼──▶ transactions
//!   ◀────────────────┼─────────────│ + events   │   │  gateway  │  │
//!                    │             └────────────┘   └───────────┘  │
//!                    │                                              │
//!                    │  config (TOML + env) · wallet (env only)     │
//!                    └──────────────────────────────────────────────┘
//! ```
//!
//! Startup is fail-fast: missing contract address or signing key aborts the
//! process before any listener binds.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crowdfund_gateway::config::{self, CONFIG_PATH_ENV_VAR};
use crowdfund_gateway::http::{AppState, HttpServer};
use crowdfund_gateway::ledger::{LedgerGateway, Wallet};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crowdfund_gateway=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("crowdfund-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    let config_path =
        std::env::var(CONFIG_PATH_ENV_VAR).unwrap_or_else(|_| "gateway.toml".to_string());
    let config = match config::load_config(&PathBuf::from(&config_path)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(path = %config_path, error = %e, "Configuration rejected");
            return Err(e.into());
        }
    };

    let wallet = match Wallet::from_env() {
        Ok(wallet) => wallet,
        Err(e) => {
            tracing::error!(error = %e, "Signing identity unavailable");
            return Err(e.into());
        }
    };

    let gateway = match LedgerGateway::new(&config.ledger, wallet) {
        Ok(gateway) => gateway,
        Err(e) => {
            tracing::error!(error = %e, "Ledger gateway initialization failed");
            return Err(e.into());
        }
    };

    let contract_address = gateway.contract_address();
    let state = AppState::new(Arc::new(gateway), contract_address);

    // Configuration and gateway are validated; only now bind the listener.
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        contract = %contract_address,
        rpc_url = %config.ledger.rpc_url,
        "Listening for connections"
    );

    let server = HttpServer::new(&config, state);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
