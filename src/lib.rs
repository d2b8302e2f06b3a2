//! Crowdfunding Ledger Gateway Library
//!
//! Translates HTTP calls into read and write operations against a single
//! on-chain crowdfunding contract. The contract owns all campaign data and
//! enforces the fundraising rules; this service aggregates its state into
//! client-facing views, submits signed transactions, waits for inclusion,
//! and extracts created-campaign identifiers from receipt logs.

pub mod campaigns;
pub mod config;
pub mod http;
pub mod ledger;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use ledger::LedgerGateway;
