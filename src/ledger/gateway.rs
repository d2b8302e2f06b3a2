//! Ledger gateway: typed reads and signed writes against the contract.
//!
//! # Responsibilities
//! - Hold one read-only provider and one signing provider, created at
//!   startup and shared by every request
//! - Issue non-mutating contract calls with a per-call timeout
//! - Broadcast signed transactions and poll for inclusion
//! - Classify node failures into the `LedgerError` taxonomy

use std::time::Duration;

use alloy::consensus::TxReceipt as _;
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use async_trait::async_trait;
use tokio::time::{interval, timeout};

use crate::config::LedgerConfig;
use crate::ledger::contract::Crowdfund;
use crate::ledger::types::{CampaignRecord, ConfirmedTx, LedgerError, LedgerResult, WriteOp};
use crate::ledger::wallet::Wallet;
use crate::ledger::CampaignLedger;

const CONFIRMATION_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Gateway bound to one contract address and one signing identity.
///
/// Both provider handles are immutable after construction; cloning the
/// gateway is cheap and no locking is needed across requests.
#[derive(Clone)]
pub struct LedgerGateway {
    read: DynProvider,
    write: DynProvider,
    contract_address: Address,
    rpc_timeout_secs: u64,
    confirmation_timeout_secs: u64,
}

impl LedgerGateway {
    /// Create a gateway from validated configuration and a wallet.
    pub fn new(config: &LedgerConfig, wallet: Wallet) -> LedgerResult<Self> {
        let rpc_url: url::Url = config.rpc_url.parse().map_err(|e| {
            LedgerError::Unavailable(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;

        let contract_address: Address = config.contract_address.parse().map_err(|e| {
            LedgerError::ContractCall(format!(
                "Invalid contract address '{}': {}",
                config.contract_address, e
            ))
        })?;

        let read = ProviderBuilder::new().connect_http(rpc_url.clone()).erased();
        let write = ProviderBuilder::new()
            .wallet(wallet.signer())
            .connect_http(rpc_url)
            .erased();

        tracing::info!(
            rpc_url = %config.rpc_url,
            contract = %contract_address,
            signer = %wallet.address(),
            "Ledger gateway initialized"
        );

        Ok(Self {
            read,
            write,
            contract_address,
            rpc_timeout_secs: config.rpc_timeout_secs,
            confirmation_timeout_secs: config.confirmation_timeout_secs,
        })
    }

    /// The configured contract address.
    pub fn contract_address(&self) -> Address {
        self.contract_address
    }

    fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_secs)
    }

    fn timeout_error(&self) -> LedgerError {
        LedgerError::Unavailable(format!("RPC timeout after {} seconds", self.rpc_timeout_secs))
    }
}

#[async_trait]
impl CampaignLedger for LedgerGateway {
    async fn total_campaigns(&self) -> LedgerResult<u64> {
        let contract = Crowdfund::new(self.contract_address, self.read.clone());
        let total = timeout(self.rpc_timeout(), contract.totalCampaigns().call())
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(classify_read_error)?;
        Ok(total.saturating_to::<u64>())
    }

    async fn campaign(&self, id: u64) -> LedgerResult<CampaignRecord> {
        let contract = Crowdfund::new(self.contract_address, self.read.clone());
        let record = timeout(self.rpc_timeout(), contract.campaigns(U256::from(id)).call())
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(classify_read_error)?;

        Ok(CampaignRecord {
            owner: record.owner,
            goal_amount: record.goalAmount,
            deadline: record.deadline,
            title: record.title,
            description: record.description,
            withdrawn: record.withdrawn,
        })
    }

    async fn total_raised(&self, id: u64, token: Address) -> LedgerResult<U256> {
        let contract = Crowdfund::new(self.contract_address, self.read.clone());
        timeout(
            self.rpc_timeout(),
            contract.getTotalRaised(U256::from(id), token).call(),
        )
        .await
        .map_err(|_| self.timeout_error())?
        .map_err(classify_read_error)
    }

    async fn submit(&self, op: WriteOp) -> LedgerResult<TxHash> {
        let contract = Crowdfund::new(self.contract_address, self.write.clone());
        let method = op.method();

        // Each variant maps to exactly one typed contract method; the send
        // itself commits a signed transaction to the network, so this runs
        // at most once per call.
        let sent = timeout(self.rpc_timeout(), async {
            match op {
                WriteOp::CreateCampaign {
                    goal_amount,
                    deadline,
                    title,
                    description,
                } => {
                    contract
                        .createCampaign(goal_amount, deadline, title, description)
                        .send()
                        .await
                }
                WriteOp::ContributeNative { campaign_id, amount } => {
                    contract.contributeETH(campaign_id).value(amount).send().await
                }
                WriteOp::ContributeToken {
                    campaign_id,
                    token,
                    amount,
                } => {
                    contract
                        .contributeToken(campaign_id, token, amount)
                        .send()
                        .await
                }
                WriteOp::Refund { campaign_id, token } => {
                    contract.refund(campaign_id, token).send().await
                }
                WriteOp::Withdraw { campaign_id } => {
                    contract.withdraw(campaign_id).send().await
                }
            }
        })
        .await
        .map_err(|_| self.timeout_error())?;

        let pending = sent.map_err(classify_send_error)?;
        let tx_hash = *pending.tx_hash();

        tracing::info!(method, tx_hash = %tx_hash, "Transaction submitted");
        Ok(tx_hash)
    }

    async fn confirm(&self, tx_hash: TxHash) -> LedgerResult<ConfirmedTx> {
        let wait = Duration::from_secs(self.confirmation_timeout_secs);

        let result = timeout(wait, async {
            let mut ticker = interval(CONFIRMATION_POLL_INTERVAL);

            loop {
                ticker.tick().await;

                let receipt = match self.read.get_transaction_receipt(tx_hash).await {
                    Ok(Some(r)) => r,
                    Ok(None) => {
                        tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
                        continue;
                    }
                    Err(e) => return Err(LedgerError::Unavailable(e.to_string())),
                };

                // Inclusion observed; a reverted execution never yields a
                // receipt to the caller.
                if !receipt.status() {
                    return Err(LedgerError::TransactionFailed(tx_hash));
                }

                return Ok(ConfirmedTx {
                    tx_hash,
                    block_number: receipt.block_number.unwrap_or_default(),
                    gas_used: receipt.gas_used,
                    logs: receipt.inner.logs().to_vec(),
                });
            }
        })
        .await;

        match result {
            Ok(confirmed) => confirmed,
            Err(_) => Err(LedgerError::ConfirmationTimeout(
                tx_hash,
                self.confirmation_timeout_secs,
            )),
        }
    }
}

impl std::fmt::Debug for LedgerGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerGateway")
            .field("contract_address", &self.contract_address)
            .field("rpc_timeout_secs", &self.rpc_timeout_secs)
            .field("confirmation_timeout_secs", &self.confirmation_timeout_secs)
            .finish()
    }
}

/// Classify a failed read call. Transport problems mean the node is
/// unreachable; anything the node itself reports is a contract failure.
fn classify_read_error(err: alloy::contract::Error) -> LedgerError {
    match err {
        alloy::contract::Error::TransportError(e) if !e.is_error_resp() => {
            LedgerError::Unavailable(e.to_string())
        }
        other => LedgerError::ContractCall(other.to_string()),
    }
}

/// Classify a failed transaction submission. The node simulates before
/// broadcasting, so reverts and balance problems surface here.
fn classify_send_error(err: alloy::contract::Error) -> LedgerError {
    let message = err.to_string();
    match err {
        alloy::contract::Error::TransportError(e) if !e.is_error_resp() => {
            LedgerError::Unavailable(message)
        }
        _ if message.contains("insufficient funds") => LedgerError::InsufficientFunds(message),
        _ => LedgerError::Reverted(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LedgerConfig;
    use alloy::transports::TransportErrorKind;

    const TEST_PRIVATE_KEY: &str =
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn test_config() -> LedgerConfig {
        LedgerConfig {
            rpc_url: "http://127.0.0.1:8545".to_string(),
            contract_address: "0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string(),
            rpc_timeout_secs: 5,
            confirmation_timeout_secs: 30,
        }
    }

    #[test]
    fn test_gateway_creation() {
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        // Construction must succeed even when the node is unreachable;
        // connectivity failures surface per call.
        let gateway = LedgerGateway::new(&test_config(), wallet).unwrap();
        assert_eq!(
            gateway.contract_address().to_string(),
            "0x5FbDB2315678afecb367f032d93F642f64180aa3"
        );
    }

    #[test]
    fn test_gateway_rejects_bad_rpc_url() {
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let mut config = test_config();
        config.rpc_url = "not a url".to_string();
        let result = LedgerGateway::new(&config, wallet);
        assert!(matches!(result, Err(LedgerError::Unavailable(_))));
    }

    #[test]
    fn test_gateway_rejects_bad_contract_address() {
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let mut config = test_config();
        config.contract_address = "0x1234".to_string();
        let result = LedgerGateway::new(&config, wallet);
        assert!(matches!(result, Err(LedgerError::ContractCall(_))));
    }

    #[test]
    fn test_transport_error_classified_unavailable() {
        let err = alloy::contract::Error::TransportError(TransportErrorKind::custom_str(
            "connection refused",
        ));
        assert!(matches!(
            classify_read_error(err),
            LedgerError::Unavailable(_)
        ));

        let err = alloy::contract::Error::TransportError(TransportErrorKind::custom_str(
            "connection refused",
        ));
        assert!(matches!(
            classify_send_error(err),
            LedgerError::Unavailable(_)
        ));
    }
}
