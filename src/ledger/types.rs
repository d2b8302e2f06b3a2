//! Ledger-facing types and error definitions.

use alloy::primitives::{Address, TxHash, U256};
use alloy::rpc::types::Log;
use thiserror::Error;

/// Raw campaign record as stored by the contract, one per index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignRecord {
    pub owner: Address,
    pub goal_amount: U256,
    pub deadline: U256,
    pub title: String,
    pub description: String,
    pub withdrawn: bool,
}

/// Normalized confirmation record for a submitted transaction.
///
/// Produced once per transaction after the ledger observes inclusion.
/// Log entries are kept in block order so callers can decode events
/// emitted during execution.
#[derive(Debug, Clone)]
pub struct ConfirmedTx {
    pub tx_hash: TxHash,
    pub block_number: u64,
    pub gas_used: u64,
    pub logs: Vec<Log>,
}

/// A state-changing contract operation.
///
/// Closed set: the gateway maps each variant to one typed contract method,
/// so there is no way to submit an arbitrary method name. `ContributeNative`
/// attaches the amount as transaction value; `ContributeToken` passes it as
/// a call argument. The ledger treats those as different call shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    CreateCampaign {
        goal_amount: U256,
        deadline: U256,
        title: String,
        description: String,
    },
    ContributeNative {
        campaign_id: U256,
        amount: U256,
    },
    ContributeToken {
        campaign_id: U256,
        token: Address,
        amount: U256,
    },
    Refund {
        campaign_id: U256,
        token: Address,
    },
    Withdraw {
        campaign_id: U256,
    },
}

impl WriteOp {
    /// Contract method name, for logging.
    pub fn method(&self) -> &'static str {
        match self {
            WriteOp::CreateCampaign { .. } => "createCampaign",
            WriteOp::ContributeNative { .. } => "contributeETH",
            WriteOp::ContributeToken { .. } => "contributeToken",
            WriteOp::Refund { .. } => "refund",
            WriteOp::Withdraw { .. } => "withdraw",
        }
    }
}

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The node could not be reached or did not answer in time.
    #[error("ledger unavailable: {0}")]
    Unavailable(String),

    /// The node reported a failure for a read call.
    #[error("contract call failed: {0}")]
    ContractCall(String),

    /// The node rejected a transaction during pre-flight checks.
    #[error("transaction reverted: {0}")]
    Reverted(String),

    /// The signing account cannot cover value plus gas.
    #[error("insufficient funds: {0}")]
    InsufficientFunds(String),

    /// The transaction was included but execution reverted on-chain.
    #[error("transaction {0} failed on-chain")]
    TransactionFailed(TxHash),

    /// No receipt appeared within the confirmation window.
    ///
    /// The network may still include the transaction later, so resubmitting
    /// is not idempotent: a retry creates a distinct transaction.
    #[error("transaction {0} not confirmed after {1} seconds")]
    ConfirmationTimeout(TxHash, u64),

    /// A read failed while assembling the campaign list; no partial list is
    /// ever returned.
    #[error("campaign aggregation failed: {0}")]
    Aggregation(#[source] Box<LedgerError>),

    /// Invalid signing key material.
    #[error("wallet error: {0}")]
    Wallet(String),
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
