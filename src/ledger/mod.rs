//! Ledger access subsystem.
//!
//! # Responsibilities
//! - Hold the read-only connection and the signing identity
//! - Expose typed reads and typed transaction submission against one fixed
//!   contract address
//! - Normalize confirmation records and classify node failures
//!
//! The rest of the service depends on the [`CampaignLedger`] trait, not on
//! the concrete gateway, so tests can substitute an in-memory double.

pub mod contract;
pub mod gateway;
pub mod types;
pub mod wallet;

use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;

pub use contract::NATIVE_TOKEN;
pub use gateway::LedgerGateway;
pub use types::{CampaignRecord, ConfirmedTx, LedgerError, LedgerResult, WriteOp};
pub use wallet::Wallet;

/// Read and write access to the crowdfunding contract.
#[async_trait]
pub trait CampaignLedger: Send + Sync {
    /// Number of campaigns the contract has ever created. Campaigns are
    /// never deleted, so indices `0..total` are contiguous and stable.
    async fn total_campaigns(&self) -> LedgerResult<u64>;

    /// The stored record for campaign `id`.
    async fn campaign(&self, id: u64) -> LedgerResult<CampaignRecord>;

    /// Total contributed to campaign `id` in the given currency.
    async fn total_raised(&self, id: u64, token: Address) -> LedgerResult<U256>;

    /// Sign and broadcast `op`. Commits a transaction to the network, so
    /// this runs at most once per call; the network may include the
    /// transaction even if the caller later times out waiting for it.
    async fn submit(&self, op: WriteOp) -> LedgerResult<TxHash>;

    /// Wait until `tx_hash` is included in a block, bounded by the
    /// configured confirmation timeout. Never returns a record for a
    /// reverted transaction.
    async fn confirm(&self, tx_hash: TxHash) -> LedgerResult<ConfirmedTx>;
}
