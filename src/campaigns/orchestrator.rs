//! Transaction submission and confirmation.

use std::sync::Arc;

use crate::ledger::{CampaignLedger, ConfirmedTx, LedgerResult, WriteOp};

/// Submits state-changing operations and waits for inclusion.
///
/// Every write (create, contribute, refund, withdraw) flows through
/// [`submit_and_confirm`](TxOrchestrator::submit_and_confirm); the
/// operations differ only in their `WriteOp` variant, not in submission or
/// confirmation mechanics.
///
/// There is no automatic retry. A failed submission is reported to the
/// caller, and resubmitting creates a distinct transaction on the ledger,
/// so a retry after a confirmation timeout can double-spend: the first
/// transaction may still be included. Callers own that decision.
pub struct TxOrchestrator {
    ledger: Arc<dyn CampaignLedger>,
}

impl TxOrchestrator {
    pub fn new(ledger: Arc<dyn CampaignLedger>) -> Self {
        Self { ledger }
    }

    /// Submit `op` and suspend until the ledger confirms inclusion.
    /// Never returns a record for a reverted transaction.
    pub async fn submit_and_confirm(&self, op: WriteOp) -> LedgerResult<ConfirmedTx> {
        let method = op.method();
        let tx_hash = self.ledger.submit(op).await?;
        let confirmed = self.ledger.confirm(tx_hash).await?;

        tracing::info!(
            method,
            tx_hash = %confirmed.tx_hash,
            block_number = confirmed.block_number,
            gas_used = confirmed.gas_used,
            "Transaction confirmed"
        );

        Ok(confirmed)
    }
}
